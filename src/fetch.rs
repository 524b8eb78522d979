//! This module loads base template archives from disk or over HTTP.

use std::{fs::File, io::Read, time::Duration};

use reqwest::blocking::Client;

use crate::{prelude::*, util::misc::replace_path_home_prefix};

/// User agent sent while fetching remote templates.
const APP_USER_AGENT: &str = concat!("hytemplate/", env!("CARGO_PKG_VERSION"));

/// How long a remote template may take to download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The largest base template that will be read, in bytes.
pub const MAX_TEMPLATE_SIZE: u64 = 64 * 1024 * 1024;

/// Where a base template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
	/// A URL using either HTTP or HTTPS.
	Remote(String),

	/// A path to a zip file, which may start with '~'.
	Local(String),
}

impl TemplateSource {
	/// Parses a template source from user input.
	pub fn parse(source: &str) -> Self {
		let lower = source.to_ascii_lowercase();

		if lower.starts_with("http://") || lower.starts_with("https://") {
			Self::Remote(source.to_owned())
		} else {
			Self::Local(source.to_owned())
		}
	}

	/// The source as the user wrote it.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Remote(url) => url,
			Self::Local(path) => path,
		}
	}
}

/// Reads a base template's raw bytes from its source.
pub fn load_base_template(source: &TemplateSource) -> AppResult<Vec<u8>> {
	let bytes = match source {
		TemplateSource::Remote(url) => fetch_remote(url)?,
		TemplateSource::Local(path) => {
			let path = replace_path_home_prefix(path)?;
			info!("Reading base template from '{}'.", path.display());
			read_limited(File::open(path)?, source.as_str(), MAX_TEMPLATE_SIZE)?
		},
	};

	if bytes.is_empty() {
		return Err(TemplateError::EmptyTemplate(source.as_str().to_owned()).into());
	}

	debug!("Loaded a {} byte base template from '{}'.", bytes.len(), source.as_str());
	Ok(bytes)
}

/// Downloads a template with a blocking HTTP client.
fn fetch_remote(url: &str) -> AppResult<Vec<u8>> {
	info!("Fetching base template from '{url}'.");

	let client = Client::builder()
		.user_agent(APP_USER_AGENT)
		.timeout(FETCH_TIMEOUT)
		.build()?;

	let response = client.get(url).send()?;
	let status = response.status();

	if !status.is_success() {
		let status = match status.canonical_reason() {
			Some(reason) => format!("{} {reason}", status.as_u16()),
			None => status.as_u16().to_string(),
		};

		return Err(TemplateError::FetchFailed { location: url.to_owned(), status }.into());
	}

	if response.content_length().is_some_and(|len| len > MAX_TEMPLATE_SIZE) {
		return Err(TemplateError::TemplateTooLarge { location: url.to_owned(), limit: MAX_TEMPLATE_SIZE }.into());
	}

	// The declared length may be missing or wrong, so the body is capped while reading too.
	read_limited(response, url, MAX_TEMPLATE_SIZE)
}

/// Reads everything from *reader*, failing once more than *limit* bytes arrive.
fn read_limited(reader: impl Read, location: &str, limit: u64) -> AppResult<Vec<u8>> {
	let mut bytes = Vec::new();
	reader.take(limit + 1).read_to_end(&mut bytes)?;

	if bytes.len() as u64 > limit {
		return Err(TemplateError::TemplateTooLarge { location: location.to_owned(), limit }.into());
	}

	Ok(bytes)
}

#[cfg(test)]
mod tests {
	use std::{fs, io::{Cursor, Write}};

	use tempfile::NamedTempFile;

	use super::*;

	#[test]
	fn parse_detects_urls() {
		assert_eq!(TemplateSource::parse("https://cdn.example.com/t.zip"), TemplateSource::Remote("https://cdn.example.com/t.zip".to_owned()));
		assert_eq!(TemplateSource::parse("HTTP://example.com/t.zip"), TemplateSource::Remote("HTTP://example.com/t.zip".to_owned()));
		assert_eq!(TemplateSource::parse("~/templates/t.zip"), TemplateSource::Local("~/templates/t.zip".to_owned()));
		assert_eq!(TemplateSource::parse("ftp.zip"), TemplateSource::Local("ftp.zip".to_owned()));
	}

	#[test]
	fn local_templates_are_read() {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(b"PK not really a zip").unwrap();

		let source = TemplateSource::Local(file.path().to_string_lossy().into_owned());
		assert_eq!(load_base_template(&source).unwrap(), b"PK not really a zip");

		fs::write(file.path(), b"").unwrap();
		assert!(matches!(load_base_template(&source), Err(AppError::Template(TemplateError::EmptyTemplate(_)))));

		file.close().unwrap();
		assert!(matches!(load_base_template(&source), Err(AppError::IO(_))));
	}

	#[test]
	fn reads_stop_past_the_limit() {
		assert_eq!(read_limited(Cursor::new(b"12345"), "exact", 5).unwrap(), b"12345");

		let result = read_limited(Cursor::new(b"123456"), "over", 5);
		assert!(matches!(
			result,
			Err(AppError::Template(TemplateError::TemplateTooLarge { ref location, limit: 5 })) if location == "over",
		));
	}
}
