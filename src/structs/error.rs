//! This module contains the errors used all over this codebase.

use std::{io, path::PathBuf};

use crate::prelude::*;

/// Convenience wrapper around *Result<T, AppError>*.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned by several functions in Hytemplate.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error returned by failing IO operations.
    /// Most of these will occur while reading templates or writing the generated project.
    #[error(transparent)]
    IO(#[from] io::Error),

    /// Error returned while running Lua code.
    /// This is mostly seen while executing a project's Lua config.
    #[error(transparent)]
    Lua(#[from] LuaError),

	/// Error returned while reading a base template or writing the output archive.
	#[error(transparent)]
	Zip(#[from] zip::result::ZipError),

	/// Error returned while fetching a remote base template.
	#[error(transparent)]
	Http(#[from] reqwest::Error),

	/// Error returned while rendering the plugin manifest.
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	/// Error returned when the provided inputs cannot describe a valid plugin.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Error returned by failing template or output operations.
	#[error(transparent)]
	Template(#[from] TemplateError),

	/// Custom error that simply wraps a *Notice*.
	#[error("{0}")]
	Custom(Notice),

    /// Error converted from any error that does not have a matching *AppError* variant.
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

/// An error caused by inputs that cannot be turned into a plugin project.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
	/// The package name is not a valid Java package.
	#[error("Invalid package name. Use lowercase letters separated by dots.")]
	InvalidPackageName(String),

	/// The plugin name does not produce a valid Java class name.
	#[error("The plugin name '{name}' produces the class name '{class}', which is not a valid Java identifier.")]
	InvalidClassName {
		/// The plugin name as provided.
		name: String,

		/// The class name generated from it.
		class: String,
	},

	/// The Java version is outside of the supported range.
	#[error("Java {0} is not supported.")]
	UnsupportedJavaVersion(u32),

	/// 'init' would overwrite an existing config.
	#[error("The config '{}' already exists.", .0.display())]
	ConfigExists(PathBuf),
}

/// An error related to base templates or the generated output.
#[derive(Error, Debug)]
pub enum TemplateError {
	/// The remote base template answered with a non-success status.
	#[error("Failed to fetch template: {status}")]
	FetchFailed {
		/// Where the template was requested from.
		location: String,

		/// The status line returned by the server.
		status: String,
	},

	/// The base template was read successfully, but it contains no data.
	#[error("The base template '{0}' is empty.")]
	EmptyTemplate(String),

	/// The base template is bigger than any plugin project should be.
	#[error("The base template '{location}' is larger than {limit} bytes.")]
	TemplateTooLarge {
		/// Where the template was read from.
		location: String,

		/// The largest accepted size, in bytes.
		limit: u64,
	},

	/// The output path is already taken.
	#[error("The output path '{}' already exists.", .0.display())]
	OutputExists(PathBuf),
}
