//! This module provides facilities for coloring and styling strings.

// Source for ANSI codes: https://gist.github.com/fnky/458719343aabd01cfb17a3a4f7296797

use std::{env, io::{self, IsTerminal}, sync::OnceLock};

/// A trait to provide text styling capability to strings.
pub trait FancyText {
	/// Stylize a string with the provided options.
	/// If styling is disabled, the string is returned unchanged.
	///
	/// # Parameters
	/// *style* - The text style to use, such as bold or italic.
	/// *foreground* - The color of the text itself.
	fn stylize(&self, style: Option<TextStyle>, foreground: Option<TextColor>) -> String {
		self.stylize_if(styling_enabled(Stream::Stdout), style, foreground)
	}

	/// Like *FancyText::stylize*, but styles the string only if *enabled* is set.
	/// Use this when the text is written somewhere other than STDOUT.
	fn stylize_if(&self, enabled: bool, style: Option<TextStyle>, foreground: Option<TextColor>) -> String;
}

/// The standard streams styled output can be written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
	Stdout,
	Stderr,
}

/// The ANSI escape code to reset all styles and colors.
const ANSI_RESET: &str = "\x1B[0m";

/// Various styles of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextStyle {
	/// **Bold** text.
	Bold,

	/// Dimmed text, used for less important details.
	Dim,
}

/// Various text colors available in the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextColor {
	Red,
	Green,
	Yellow,
	Cyan,
}

/// Checks if output written to a stream should be styled.
/// Styling is skipped when the stream isn't a terminal or the 'NO_COLOR' variable is set.
pub fn styling_enabled(stream: Stream) -> bool {
	static STDOUT: OnceLock<bool> = OnceLock::new();
	static STDERR: OnceLock<bool> = OnceLock::new();

	let no_color = || env::var_os("NO_COLOR").is_some();

	match stream {
		Stream::Stdout => *STDOUT.get_or_init(|| !no_color() && io::stdout().is_terminal()),
		Stream::Stderr => *STDERR.get_or_init(|| !no_color() && io::stderr().is_terminal()),
	}
}

/// Wraps text in ANSI codes, regardless of whether styling is enabled.
fn apply_ansi(text: &str, style: Option<TextStyle>, foreground: Option<TextColor>) -> String {
	if style.is_none() && foreground.is_none() {
		return text.to_owned();
	}

	let style_code = style.map(TextStyle::ansi).unwrap_or_default();
	let fg_code = foreground.map(TextColor::ansi_fg).unwrap_or_default();

	format!("{style_code}{fg_code}{text}{ANSI_RESET}")
}

impl FancyText for str {
	fn stylize_if(&self, enabled: bool, style: Option<TextStyle>, foreground: Option<TextColor>) -> String {
		if !enabled {
			return self.to_owned();
		}

		apply_ansi(self, style, foreground)
	}
}

impl TextStyle {
	/// Returns this style's associated ANSI escape code.
	pub fn ansi(self) -> &'static str {
		match self {
			TextStyle::Bold => "\x1B[1m",
			TextStyle::Dim => "\x1B[2m",
		}
	}
}

impl TextColor {
	/// Returns this color's associated ANSI escape code.
	/// This is specifically the code for changing the text's foreground color.
	pub fn ansi_fg(self) -> &'static str {
		match self {
			TextColor::Red => "\x1B[31m",
			TextColor::Green => "\x1B[32m",
			TextColor::Yellow => "\x1B[33m",
			TextColor::Cyan => "\x1B[36m",
		}
	}
}
