//! Interactive console
//!
//! Reads one prompt line at a time, runs it against the session and prints
//! the resulting notice. Commands run to completion before the next line is
//! read.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::{debug, warn};

use crate::cli::commands::{plan, Action, StatsDisplay};
use crate::cli::picker::{accept_answer, prompt_for, FilePicker};
use crate::cli::{split_words, PromptCommand, PromptLine};
use crate::session::{
    Dispatch, Notice, Notifier, Outcome, Session, SessionError, Severity, Slot,
};

use clap::Parser;

const PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented input and output shared by the prompt, the picker and the
/// notices
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// One line without its terminator; `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> FilePicker for Terminal<R, W> {
    fn pick(&mut self, slot: Slot) -> Option<PathBuf> {
        if let Err(e) = self.prompt(&prompt_for(slot)) {
            warn!("failed to show file prompt: {}", e);
            return None;
        }
        match self.read_line() {
            Ok(Some(answer)) => match accept_answer(&answer) {
                Ok(path) => path,
                Err(notice) => {
                    self.notify(&notice);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("failed to read file choice: {}", e);
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Notifier for Terminal<R, W> {
    fn notify(&mut self, notice: &Notice) {
        if let Err(e) = writeln!(self.output, "{}", notice) {
            warn!("failed to display notice: {}", e);
        }
    }
}

pub struct Console<R, W> {
    session: Session,
    terminal: Terminal<R, W>,
    stats: StatsDisplay,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            terminal: Terminal::new(input, output),
            stats: StatsDisplay::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stats(&self) -> &StatsDisplay {
        &self.stats
    }

    pub fn into_output(self) -> W {
        self.terminal.output
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        self.show_stats()?;

        loop {
            self.terminal.prompt(PROMPT)?;
            let line = match self.terminal.read_line()? {
                Some(line) => line,
                None => break,
            };

            let words = split_words(&line);
            if words.is_empty() {
                continue;
            }

            let prompt = match PromptLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    write!(self.terminal.output, "{}", err)?;
                    continue;
                }
            };

            if self.execute(prompt)? == Flow::Quit {
                break;
            }
        }

        debug!("console closed");
        Ok(())
    }

    /// Run one parsed prompt command
    pub fn execute(&mut self, prompt: PromptCommand) -> io::Result<Flow> {
        match plan(prompt, &mut self.terminal) {
            Action::Dispatch(command) => match self.session.dispatch(command) {
                Dispatch::Cancelled => {}
                Dispatch::Completed(result) => {
                    let loaded = match &result {
                        Ok(outcome @ Outcome::Loaded { slot, .. }) => {
                            self.stats.update(outcome);
                            Some(*slot)
                        }
                        _ => None,
                    };
                    self.terminal.notify(&Notice::from_result(&result));
                    match (&result, loaded) {
                        (Err(err), _) => self.show_suggestions(err)?,
                        (Ok(_), Some(slot)) => {
                            writeln!(self.terminal.output, "{}", self.stats.line(slot))?
                        }
                        (Ok(_), None) => {}
                    }
                }
            },
            Action::DescribeJson(path) => match self.session.describe(&path) {
                Ok(stats) => match serde_json::to_string_pretty(&stats) {
                    Ok(json) => writeln!(self.terminal.output, "{}", json)?,
                    Err(e) => self.terminal.notify(&Notice {
                        severity: Severity::Error,
                        message: e.to_string(),
                    }),
                },
                Err(err) => {
                    self.terminal.notify(&Notice::from_error(&err));
                    self.show_suggestions(&err)?;
                }
            },
            Action::Refuse(notice) => self.terminal.notify(&notice),
            Action::ShowStats => self.show_stats()?,
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Recovery hints for a failure raised by the audio library
    fn show_suggestions(&mut self, err: &SessionError) -> io::Result<()> {
        if let Some(source) = err.clip_error() {
            for hint in source.recovery_suggestions() {
                writeln!(self.terminal.output, "  - {}", hint)?;
            }
        }
        Ok(())
    }

    fn show_stats(&mut self) -> io::Result<()> {
        for slot in Slot::ALL {
            writeln!(self.terminal.output, "{}", self.stats.line(slot))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::engine::{encode_wav, generate_test_tone, ExportFormat};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_lines(session: Session, input: &str) -> (Session, String) {
        let mut console = Console::new(session, Cursor::new(input.to_string()), Vec::new());
        console.run().unwrap();
        let session = std::mem::take(&mut console.session);
        let output = String::from_utf8(console.into_output()).unwrap();
        (session, output)
    }

    #[test]
    fn test_initial_stats_and_eof() {
        let (_, output) = run_lines(Session::default(), "");
        assert!(output.starts_with("Audio 1: Not Loaded\nAudio 2: Not Loaded\n"));
    }

    #[test]
    fn test_precondition_warnings() {
        let (_, output) = run_lines(Session::default(), "merge\neffect equalize\ntrim 2 0 10\n");
        assert!(output.contains("[Warning] Load both audio files to merge."));
        assert!(output.contains("[Warning] Merge the audio files before applying equalization."));
        assert!(output.contains("[Warning] Load the second audio file to trim."));
    }

    #[test]
    fn test_picker_prompt_and_cancel() {
        let (session, output) = run_lines(Session::default(), "load 1\n\nquit\n");
        assert!(output.contains("Select file for Audio 1"));
        assert!(!output.contains("[Error]"));
        assert!(session.state().primary.is_none());
    }

    #[test]
    fn test_non_audio_path_warns() {
        let (session, output) = run_lines(Session::default(), "load 1 notes.txt
load 2
b.doc
");
        assert!(output.contains("[Warning] notes.txt is not an audio file"));
        assert!(output.contains("[Warning] b.doc is not an audio file"));
        assert!(session.state().primary.is_none());
        assert!(session.state().secondary.is_none());
    }

    #[test]
    fn test_load_failure_lists_suggestions() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        let input = format!("load 1 \"{}\"\n", missing.display());
        let (_, output) = run_lines(Session::new(SessionConfig::new(dir.path())), &input);

        assert!(output.contains("[Error] Failed to load audio: File not found"));
        assert!(output.contains("  - Check the file path is correct"));
    }

    #[test]
    fn test_warnings_have_no_suggestions() {
        let (_, output) = run_lines(Session::default(), "merge
");
        assert!(output.contains("[Warning] Load both audio files to merge."));
        assert!(!output.contains("  - "));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let (_, output) = run_lines(Session::default(), "frobnicate\nstats\n");
        assert!(output.contains("frobnicate"));
        assert_eq!(output.matches("Audio 1: Not Loaded").count(), 2);
    }

    #[test]
    fn test_full_workflow() {
        let dir = tempdir().unwrap();
        let tone = generate_test_tone(440.0, 1.0, 8000, 1).unwrap();
        let a = dir.path().join("a.wav");
        encode_wav(&tone, &a, ExportFormat::cd_quality()).unwrap();

        let input = format!(
            concat!(
                "load 1 \"{0}\"\nload 2\n{0}\nmerge\neffect reverb\n",
                "describe \"{0}\" --json\nquit\nmerge\n",
            ),
            a.display()
        );
        let session = Session::new(SessionConfig::new(dir.path()));
        let (session, output) = run_lines(session, &input);

        assert!(output.contains("[Success] First audio loaded successfully."));
        assert!(output.contains("[Success] Second audio loaded successfully."));
        assert!(output.contains("Audio 2: Duration: 1.00 s, Sample Rate: 8000 Hz, Channels: 1"));
        assert!(output.contains("[Success] Merged audio saved as merged_audio.wav"));
        assert!(output.contains("reverb_merged_audio.wav"));
        assert!(output.contains("\"sample_rate\": 8000"));
        assert_eq!(output.matches("Merged audio saved").count(), 1);
        assert!(session.state().merged.is_some());
        assert!(dir.path().join("reverb_merged_audio.wav").exists());
    }
}
