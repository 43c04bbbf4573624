//! # Output and Prompts
//!
//! This module provides the two user-facing capabilities the library needs:
//! [`Reporter`] for advisory messages and [`Prompt`] for yes/no
//! confirmations. Business logic only ever talks to these traits, so the
//! same code runs interactively, with `--yes`, or inside a test.
//!
//! ## Respecting User Preferences
//!
//! [`OutputConfig`] decides whether colors are used. It respects:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::error::{Error, Result};

/// Sink for messages addressed to the user.
pub trait Reporter: Send + Sync {
    /// Neutral progress information.
    fn report(&self, message: &str);

    /// Something the user should act on; never fatal.
    fn warn(&self, message: &str);

    /// A completed action.
    fn success(&self, message: &str) {
        self.report(message);
    }
}

/// Source of yes/no answers.
pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Writes messages to the terminal: progress to stdout, warnings to stderr.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    config: OutputConfig,
}

impl ConsoleReporter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        if self.config.use_color {
            eprintln!("{}", style(format!("WARNING: {}", message)).yellow());
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    fn success(&self, message: &str) {
        if self.config.use_color {
            println!("{}", style(message).green());
        } else {
            println!("{}", message);
        }
    }
}

/// Asks on the terminal.
///
/// On a TTY this is a `dialoguer` confirmation defaulting to yes. Otherwise a
/// line is read from stdin and interpreted with [`parse_answer`].
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        if console::Term::stderr().is_term() {
            let theme = ColorfulTheme::default();
            return Confirm::with_theme(&theme)
                .with_prompt(question)
                .default(true)
                .interact()
                .map_err(|e| Error::Prompt {
                    message: e.to_string(),
                });
        }

        print!("{} [Y/n]: ", question);
        io::stdout().flush()?;
        read_answer(&mut io::stdin().lock())
    }
}

/// Read one answer line. End of input declines; only an actual empty line
/// takes the default.
pub fn read_answer(reader: &mut impl BufRead) -> Result<bool> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(false);
    }
    Ok(parse_answer(&input))
}

/// Interpret a free-form answer: `n`/`no` declines, anything else (including
/// an empty line) accepts.
pub fn parse_answer(input: &str) -> bool {
    !matches!(input.trim().to_lowercase().as_str(), "n" | "no")
}

/// Accepts every question without asking. Backs `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Answers every question the same way and remembers what was asked.
#[derive(Debug, Default)]
pub struct FixedPrompt {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl FixedPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> Vec<String> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }
}

impl Prompt for FixedPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.asked
            .lock()
            .map_err(|_| Error::LockPoisoned {
                context: "prompt history".to_string(),
            })?
            .push(question.to_string());
        Ok(self.answer)
    }
}

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Success,
}

/// Collects messages in memory instead of printing them.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message recorded, in order.
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Only the warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == Level::Warning)
            .map(|(_, message)| message)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_parse_answer() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("\n"));
        assert!(parse_answer(""));
        assert!(parse_answer("Yes"));
        assert!(!parse_answer("n\n"));
        assert!(!parse_answer(" N "));
        assert!(!parse_answer("no"));
    }

    #[test]
    fn test_read_answer_at_end_of_input_declines() {
        assert!(!read_answer(&mut io::Cursor::new("")).unwrap());
        assert!(read_answer(&mut io::Cursor::new("\n")).unwrap());
        assert!(!read_answer(&mut io::Cursor::new("no\n")).unwrap());
    }

    #[test]
    fn test_fixed_prompt_records_questions() {
        let prompt = FixedPrompt::new(false);
        assert!(!prompt.confirm("Update now?").unwrap());
        assert_eq!(prompt.questions(), vec!["Update now?"]);
    }

    #[test]
    fn test_memory_reporter_levels() {
        let reporter = MemoryReporter::new();
        reporter.report("checking");
        reporter.warn("hosts file");
        reporter.success("done");

        assert_eq!(reporter.messages().len(), 3);
        assert_eq!(reporter.warnings(), vec!["hosts file"]);
    }
}
