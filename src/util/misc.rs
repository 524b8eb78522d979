//! This module is the general place for utilities that don't need their own module.

use std::{fmt::Display, path::{Path, PathBuf}};

use crate::prelude::*;

/// Helper function to generate a pretty string based on a slice's contents.
pub fn display_slice<T: Display> (slice: &[T]) -> String {
	slice.iter().join(", ")
}

/// Builds a new *String* by replacing every `{{key}}` placeholder in a template with its value from the map.
///
/// Replacement happens in a single pass, so values are never scanned for placeholders themselves.
/// Placeholders without a matching key are left as they are.
pub fn render_template(text: &str, map: &[(&str, &str)]) -> String {
	let mut out = String::with_capacity(text.len());
	let mut rest = text;

	while let Some(start) = rest.find("{{") {
		out.push_str(&rest[..start]);
		let after = &rest[start + 2..];

		let Some(end) = after.find("}}") else {
			out.push_str(&rest[start..]);
			return out;
		};

		let key = &after[..end];
		match map.iter().find(|(k, _)| *k == key) {
			Some((_, value)) => out.push_str(value),
			None => {
				warn!("Template placeholder '{{{{{key}}}}}' has no value.");
				out.push_str(&rest[start..start + 2 + end + 2]);
			},
		}

		rest = &after[end + 2..];
	}

	out.push_str(rest);
	out
}

/// Replaces a path's prefix of '~' with the user's home directory.
/// If a path does not start with '~', this function will return a unchanged copy of that path instead.
pub fn replace_path_home_prefix(path: impl AsRef<Path>) -> AppResult<PathBuf> {
	let path = path.as_ref();

	let Ok(stripped) = path.strip_prefix("~") else { return Ok(path.to_owned()); };

	let Some(home) = dirs::home_dir() else {
		let error = Notice::from_preset(NoticePreset::Error, "Other")
			.add_field("Description", "Failed to retrieve the user's home directory.")
			.add_field("Suggestion", &format!("Use an absolute path instead of '{}'.", path.display()));

		return Err(AppError::Custom(error));
	};

	Ok(home.join(stripped))
}
