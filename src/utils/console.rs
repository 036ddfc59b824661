//! Console Output
//!
//! User-facing diagnostics for the CLI. Colour is an explicit option chosen
//! once at startup; nothing here reads the environment.

use std::fmt::Display;

use owo_colors::OwoColorize;

use crate::models::settings::ConsoleOptions;

/// Visual weight of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
    Plain,
}

/// Prints diagnostics and listings, coloured when enabled
#[derive(Debug, Clone, Copy)]
pub struct Console {
    options: ConsoleOptions,
}

impl Console {
    pub fn new(options: ConsoleOptions) -> Self {
        Self { options }
    }

    /// A console that never emits colour codes
    #[cfg(test)]
    pub(crate) fn plain() -> Self {
        Self::new(ConsoleOptions { color: false })
    }

    /// Apply the tone's colour to `text` if colour is enabled
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.options.color {
            return text.to_string();
        }
        match tone {
            Tone::Success => text.green().to_string(),
            Tone::Warning => text.yellow().to_string(),
            Tone::Error => text.red().to_string(),
            Tone::Info => text.blue().to_string(),
            Tone::Plain => text.to_string(),
        }
    }

    pub fn success(&self, msg: impl Display) {
        println!("{}", self.paint(Tone::Success, &format!("✅ {}", msg)));
    }

    pub fn warn(&self, msg: impl Display) {
        println!("{}", self.paint(Tone::Warning, &format!("⚠️  {}", msg)));
    }

    pub fn error(&self, msg: impl Display) {
        eprintln!("{}", self.paint(Tone::Error, &format!("❌ {}", msg)));
    }

    pub fn info(&self, msg: impl Display) {
        println!("{}", self.paint(Tone::Info, &msg.to_string()));
    }

    pub fn line(&self, msg: impl Display) {
        println!("{}", msg);
    }
}
