//! Clipmerge CLI
//!
//! Interactive console for the two-slot audio session.

use std::fs;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use clipmerge::cli::{Cli, Console};
use clipmerge::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    info!("Clipmerge v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.session_config();
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            config.output_dir.display()
        )
    })?;
    info!(
        "writing {}-bit output to {}",
        config.export.bit_depth,
        config.output_dir.display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(Session::new(config), stdin.lock(), stdout.lock());
    console.run().context("console I/O failed")?;

    Ok(())
}
