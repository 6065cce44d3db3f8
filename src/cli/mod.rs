//! CLI Module
//!
//! Interactive console front end. Process flags configure the session; each
//! line typed at the prompt is parsed as one [`PromptCommand`].

pub mod commands;
pub mod console;
pub mod picker;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::SessionConfig;
use crate::engine::ExportFormat;
use crate::session::{EffectKind, Slot};

pub use console::Console;
pub use picker::FilePicker;

/// Clipmerge - load, trim, merge and apply effects to two audio clips
#[derive(Parser, Debug)]
#[command(name = "clipmerge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory that receives every output file
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Bit depth of output files (16, 24 or 32)
    #[arg(long, default_value_t = 16, value_parser = parse_bit_depth)]
    pub bit_depth: u16,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(&self.output_dir).with_export(ExportFormat::new(self.bit_depth))
    }
}

fn parse_bit_depth(text: &str) -> Result<u16, String> {
    match text.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{}' (expected 16, 24 or 32)", text)),
    }
}

/// One line typed at the prompt
#[derive(Parser, Debug)]
#[command(name = "clipmerge", no_binary_name = true)]
pub struct PromptLine {
    #[command(subcommand)]
    pub command: PromptCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PromptCommand {
    /// Load an audio file into slot 1 or 2 (asks for the file when PATH is omitted)
    #[command(name = "load")]
    Load {
        /// Slot to load into (1 or 2)
        slot: Slot,

        /// Audio file (mp3, wav, ogg, flac)
        path: Option<PathBuf>,
    },

    /// Show a file's duration, sample rate and channel count
    #[command(name = "describe")]
    Describe {
        /// Audio file
        path: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Trim a slot to START_MS..END_MS
    #[command(name = "trim")]
    Trim {
        /// Slot to trim (1 or 2)
        slot: Slot,

        /// Start time in milliseconds
        #[arg(allow_hyphen_values = true)]
        start: String,

        /// End time in milliseconds
        #[arg(allow_hyphen_values = true)]
        end: String,
    },

    /// Concatenate audio 1 and audio 2
    #[command(name = "merge")]
    Merge,

    /// Apply an effect to the merged audio (equalize, reduce-noise, reverb, echo)
    #[command(name = "effect")]
    Effect {
        /// Effect to apply
        kind: EffectKind,
    },

    /// Show the statistics of both slots
    #[command(name = "stats")]
    Stats,

    /// Leave the session
    #[command(name = "quit", alias = "exit")]
    Quit,
}

/// Split a prompt line into words, honouring single and double quotes
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> PromptCommand {
        PromptLine::try_parse_from(split_words(line)).unwrap().command
    }

    #[test]
    fn test_split_words_quotes() {
        assert_eq!(
            split_words(r#"load 1 "my song.mp3""#),
            vec!["load", "1", "my song.mp3"]
        );
        assert_eq!(split_words("  merge  "), vec!["merge"]);
        assert_eq!(split_words("trim 1 '' 5"), vec!["trim", "1", "", "5"]);
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            parse("load 2 b.flac"),
            PromptCommand::Load {
                slot: Slot::Secondary,
                path: Some(PathBuf::from("b.flac")),
            }
        );
        assert_eq!(
            parse("load first"),
            PromptCommand::Load {
                slot: Slot::Primary,
                path: None,
            }
        );
    }

    #[test]
    fn test_parse_trim_keeps_raw_text() {
        assert_eq!(
            parse("trim 1 0 abcd"),
            PromptCommand::Trim {
                slot: Slot::Primary,
                start: "0".to_string(),
                end: "abcd".to_string(),
            }
        );
        assert_eq!(
            parse("trim 2 -500 -1"),
            PromptCommand::Trim {
                slot: Slot::Secondary,
                start: "-500".to_string(),
                end: "-1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_effect_and_aliases() {
        assert_eq!(
            parse("effect reduce-noise"),
            PromptCommand::Effect {
                kind: EffectKind::FadeOut
            }
        );
        assert_eq!(parse("exit"), PromptCommand::Quit);
        assert_eq!(
            parse("describe x.wav --json"),
            PromptCommand::Describe {
                path: PathBuf::from("x.wav"),
                json: true,
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_slot() {
        assert!(PromptLine::try_parse_from(split_words("load 3 a.wav")).is_err());
    }

    #[test]
    fn test_cli_session_config() {
        let cli =
            Cli::try_parse_from(["clipmerge", "--output-dir", "out", "--bit-depth", "24"]).unwrap();
        let config = cli.session_config();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.export.bit_depth, 24);
    }

    #[test]
    fn test_cli_rejects_bit_depth() {
        assert!(Cli::try_parse_from(["clipmerge", "--bit-depth", "12"]).is_err());
    }
}
