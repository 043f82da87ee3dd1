//! Output mode selection.
//!
//! JSON mode prints one pretty JSON document to stdout. Rich mode adds
//! ANSI colour for tones and headings and is only chosen when stdout is a
//! terminal and colour is enabled.

use std::io;

use anyhow::Result;
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use pmdash_lib::Tone;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    Rich,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
}

impl OutputContext {
    #[must_use]
    pub fn new(json: bool, color: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if color && io::stdout().is_tty() {
            OutputMode::Rich
        } else {
            OutputMode::Plain
        };
        Self { mode }
    }

    #[must_use]
    pub const fn with_mode(mode: OutputMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.mode, OutputMode::Json)
    }

    /// Print `value` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value)?;
        println!("{rendered}");
        Ok(())
    }

    /// Colour `text` with `tone` in rich mode; plain text otherwise.
    #[must_use]
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        match self.mode {
            OutputMode::Rich => text.with(tone_color(tone)).to_string(),
            OutputMode::Plain | OutputMode::Json => text.to_string(),
        }
    }

    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        match self.mode {
            OutputMode::Rich => text.bold().to_string(),
            OutputMode::Plain | OutputMode::Json => text.to_string(),
        }
    }

    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        match self.mode {
            OutputMode::Rich => text.dim().to_string(),
            OutputMode::Plain | OutputMode::Json => text.to_string(),
        }
    }
}

/// Terminal colour for a badge tone.
#[must_use]
pub const fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Gray => Color::DarkGrey,
        Tone::Blue => Color::Blue,
        Tone::Green => Color::Green,
        Tone::Yellow => Color::Yellow,
        Tone::Orange => Color::AnsiValue(208),
        Tone::Red => Color::Red,
        Tone::Purple => Color::Magenta,
        Tone::Pink => Color::AnsiValue(205),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_wins() {
        assert!(OutputContext::new(true, true).is_json());
        assert_eq!(OutputContext::new(true, false).mode(), OutputMode::Json);
    }

    #[test]
    fn test_no_color_is_plain() {
        assert_eq!(OutputContext::new(false, false).mode(), OutputMode::Plain);
    }

    #[test]
    fn test_plain_paint_is_identity() {
        let ctx = OutputContext::with_mode(OutputMode::Plain);
        assert_eq!(ctx.paint("Blocked", Tone::Red), "Blocked");
        assert_eq!(ctx.heading("Issues"), "Issues");
        assert_eq!(ctx.dim("none"), "none");
    }

    #[test]
    fn test_rich_paint_adds_escape_codes() {
        let ctx = OutputContext::with_mode(OutputMode::Rich);
        let painted = ctx.paint("Blocked", Tone::Red);
        assert!(painted.contains("Blocked"));
        assert!(painted.contains('\u{1b}'));
    }
}
