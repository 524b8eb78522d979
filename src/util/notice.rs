//! This module provides the *Notice* struct, which is used for pretty-printing warnings, errors, or other messages to users.

use std::{fmt::Display, io};

use crate::{
	prelude::*,
	structs::config::SUPPORTED_JAVA_VERSIONS,
	util::{misc::display_slice, text::{styling_enabled, Stream, TextColor, TextStyle}},
};

/// Notices allow you to easily pretty-print warning, errors, and other various information.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Notice {
	color: TextColor,
	prefix: String,
	header: String,
	fields: Vec<(String, String)>,
}

/// Presets to use while making a notice, allowing you to quickly recreate common forms of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoticePreset {
	/// A red notice with the prefix "ERROR".
	Error,

	/// A yellow notice with the prefix "WARN".
	Warning,

	/// A green notice with the prefix "DONE".
	Success,

	/// A cyan notice with the prefix "STATS".
	Statistics,
}

impl Notice {
	/// Builds a new notice from raw components.
	pub fn new(color: TextColor, prefix: &str, header: &str) -> Self {
		Self {
			color,
			prefix: prefix.to_owned(),
			header: header.to_owned(),
			fields: Vec::new(),
		}
	}

	/// Builds a new notice from a preset and a header.
	pub fn from_preset(preset: NoticePreset, header: &str) -> Self {
		match preset {
			NoticePreset::Error => Notice::new(TextColor::Red, "ERROR", header),
			NoticePreset::Warning => Notice::new(TextColor::Yellow, "WARN", header),
			NoticePreset::Success => Notice::new(TextColor::Green, "DONE", header),
			NoticePreset::Statistics => Notice::new(TextColor::Cyan, "STATS", header),
		}
	}

	/// Adds a new field to this notice, which will be printed after any other fields.
	/// A field will be presented in the form of `"{label}: {content}"`.
	pub fn add_field(mut self, label: &str, content: &str) -> Self {
		self.fields.push((label.to_owned(), content.to_owned()));
		self
	}

	/// Retrieves the content of the first field with a label.
	#[cfg(test)]
	pub fn field(&self, label: &str) -> Option<&str> {
		self.fields.iter()
			.find(|(l, _)| l == label)
			.map(|(_, content)| content.as_str())
	}

	/// Convenience method to allow printing a notice at the end of a dot-call chain.
	pub fn print(self) {
		println!("{}", self.render(styling_enabled(Stream::Stdout)));
	}

	/// Like *Notice::print*, but writes to STDERR.
	/// Styling follows STDERR, so redirecting it to a file leaves out ANSI codes.
	pub fn eprint(self) {
		eprintln!("{}", self.render(styling_enabled(Stream::Stderr)));
	}

	/// Formats this notice, with or without ANSI styling.
	pub fn render(&self, styled: bool) -> String {
		let style = (Some(TextStyle::Bold), Some(self.color));

		let mut text = format!("[{} - {}]", self.prefix, self.header).stylize_if(styled, style.0, style.1);
		text.push('\n');

		for (label, content) in self.fields.iter() {
			text.push_str(&format!("  {label}: ").stylize_if(styled, style.0, style.1));
			text.push_str(content);
			text.push('\n');
		}

		text
	}
}

impl Display for Notice {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.render(styling_enabled(Stream::Stdout)))
	}
}

// Beyond this point is just conversions between errors and notices.

impl From<AppError> for Notice {
	fn from(value: AppError) -> Self {
		match value {
			AppError::IO(error) => error.into(),
			AppError::Lua(error) => error.into(),
			AppError::Config(error) => error.into(),
			AppError::Template(error) => error.into(),
			AppError::Custom(notice) => notice,

			AppError::Zip(error) => Notice::from_preset(NoticePreset::Error, "Archive")
				.add_field("Description", "Failed to read or write a zip archive.")
				.add_field("Details", &error.to_string())
				.add_field("Suggestion", "If you passed '--template', ensure it points to a valid zip file."),

			AppError::Http(error) => Notice::from_preset(NoticePreset::Error, "Network")
				.add_field("Description", "Failed to download the base template.")
				.add_field("Details", &error.to_string())
				.add_field("Suggestion", "Check the template URL and your connection, or generate without '--template'."),

			AppError::Json(error) => Notice::from_preset(NoticePreset::Error, "Manifest")
				.add_field("Description", "Failed to render the plugin manifest.")
				.add_field("Details", &error.to_string()),

			AppError::Unknown(error) => Notice::from_preset(NoticePreset::Error, "Unknown")
				.add_field("Message", "An unknown error has occurred!")
				.add_field("Details", &format!("{error:#}")),
		}
	}
}

impl From<io::Error> for Notice {
	fn from(value: io::Error) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "IO");

		match value.kind() {
			io::ErrorKind::NotFound => notice
				.add_field("Description", "Hytemplate tried to access a file that doesn't exist.")
				.add_field("Suggestion", "Check the paths passed to '--config', '--template', and '--output'."),

			io::ErrorKind::PermissionDenied => notice
				.add_field("Description", "Hytemplate tried to access a file, but it didn't have the right permissions.")
				.add_field("Suggestion", "Ensure you can read the config and template, and write to the output location."),

			io::ErrorKind::AlreadyExists => notice
				.add_field("Description", "Hytemplate tried to create a new file, but that file already exists.")
				.add_field("Suggestion", "Choose another output path or pass '--force'."),

			_ => notice
				.add_field("Description", "An unknown error has occurred!")
				.add_field("Details", &value.to_string()),
		}
	}
}

impl From<LuaError> for Notice {
	fn from(value: LuaError) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "Lua");

		match value {
			LuaError::SyntaxError { message, .. } => notice
				.add_field("Description", "Your config contains a syntax error.")
				.add_field("Details", &message),

			LuaError::RuntimeError(msg) => notice
				.add_field("Description", "Your config caused a Lua runtime error.")
				.add_field("Details", &msg)
				.add_field("Note", "Configs run in a sandbox without access to 'io' or most of 'os'."),

			LuaError::MemoryError(msg) => notice
				.add_field("Description", "Lua ran out of memory while executing your config.")
				.add_field("Details", &msg),

			LuaError::FromLuaConversionError { from, to, message } => notice
				.add_field("Description", &format!("Failed to convert a Lua {from} into a {to}."))
				.pipe(|n| match message { Some(msg) => n.add_field("Details", &msg), None => n, }),

			LuaError::CallbackError { traceback, cause } => notice
				.add_field("Description", "A function called by your config failed.")
				.add_field("Source", &cause.to_string())
				.add_field("Traceback", &traceback),

			other => notice
				.add_field("Description", "An unknown error occurred while executing your config.")
				.add_field("Details", &other.to_string()),
		}
	}
}

impl From<ConfigError> for Notice {
	fn from(value: ConfigError) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "Config");

		match value {
			ConfigError::InvalidPackageName(package) => notice
				.add_field("Description", "Invalid package name. Use lowercase letters separated by dots.")
				.add_field("Package", &package)
				.add_field("Suggestion", "Each segment must start with a letter and hold only lowercase letters and digits, such as 'com.example'."),

			ConfigError::InvalidClassName { name, class } => notice
				.add_field("Description", &format!("The plugin name '{name}' does not produce a valid Java class name."))
				.add_field("Details", &format!("The generated class name is '{class}', but it must start with an ASCII letter."))
				.add_field("Suggestion", "Start the plugin name with a letter."),

			ConfigError::UnsupportedJavaVersion(version) => notice
				.add_field("Description", &format!("Java {version} is not supported."))
				.add_field("Supported", &display_slice(&SUPPORTED_JAVA_VERSIONS.collect_vec()))
				.add_field("Suggestion", "Java 21 (LTS) is recommended."),

			ConfigError::ConfigExists(path) => notice
				.add_field("Description", &format!("The config '{}' already exists.", path.display()))
				.add_field("Suggestion", "Pass '--force' to replace it with the starter config."),
		}
	}
}

impl From<TemplateError> for Notice {
	fn from(value: TemplateError) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "Template");

		match value {
			TemplateError::FetchFailed { location, status } => notice
				.add_field("Description", &format!("Failed to fetch template: {status}"))
				.add_field("Source", &location)
				.add_field("Suggestion", "Check the URL, or generate without '--template' to use the embedded files."),

			TemplateError::EmptyTemplate(source) => notice
				.add_field("Description", &format!("The base template '{source}' is empty."))
				.add_field("Suggestion", "Point '--template' at a zip of a plugin project."),

			TemplateError::TemplateTooLarge { location, limit } => notice
				.add_field("Description", &format!("The base template is larger than {} MiB.", limit / (1024 * 1024)))
				.add_field("Source", &location)
				.add_field("Suggestion", "Strip build outputs and runtime files from the template before using it."),

			TemplateError::OutputExists(path) => notice
				.add_field("Description", &format!("The output path '{}' already exists.", path.display()))
				.add_field("Suggestion", "Choose another path with '--output' or pass '--force' to replace it."),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fields_keep_order() {
		let notice = Notice::from_preset(NoticePreset::Warning, "Test")
			.add_field("First", "1")
			.add_field("Second", "2")
			.add_field("First", "3");

		assert_eq!(notice.field("First"), Some("1"));
		assert_eq!(notice.field("Second"), Some("2"));
		assert_eq!(notice.field("Missing"), None);
	}

	#[test]
	fn rendering_can_skip_styles() {
		let notice = Notice::from_preset(NoticePreset::Error, "Render").add_field("Description", "Plain.");

		assert_eq!(notice.render(false), "[ERROR - Render]\n  Description: Plain.\n");
		assert!(notice.render(true).starts_with("\x1B[1m\x1B[31m[ERROR - Render]\x1B[0m\n"));
	}

	#[test]
	fn package_errors_explain_format() {
		let notice: Notice = AppError::from(ConfigError::InvalidPackageName("Com.Example".to_owned())).into();

		assert_eq!(notice.field("Description"), Some("Invalid package name. Use lowercase letters separated by dots."));
		assert_eq!(notice.field("Package"), Some("Com.Example"));
	}

	#[test]
	fn java_errors_list_supported_versions() {
		let notice: Notice = ConfigError::UnsupportedJavaVersion(17).into();
		assert_eq!(notice.field("Supported"), Some("21, 22, 23, 24, 25"));
	}

	#[test]
	fn fetch_errors_carry_status() {
		let error = TemplateError::FetchFailed { location: "https://x/t.zip".to_owned(), status: "404 Not Found".to_owned() };
		assert_eq!(error.to_string(), "Failed to fetch template: 404 Not Found");

		let notice: Notice = error.into();
		assert_eq!(notice.field("Source"), Some("https://x/t.zip"));
	}
}
