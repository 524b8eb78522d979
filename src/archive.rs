//! This module assembles a plugin project in memory and packages it as a zip archive.

use std::{fs, io::{Cursor, Read, Write}, path::Path};

use anyhow::Context;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

use crate::{prelude::*, templates};

/// Permissions given to regular files.
pub const FILE_MODE: u32 = 0o644;

/// Permissions given to scripts, such as 'gradlew'.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Where the plugin manifest lives inside a project.
pub const MANIFEST_PATH: &str = "src/main/resources/manifest.json";

/// A single file inside a *ProjectArchive*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
	/// The file's raw contents.
	pub contents: Vec<u8>,

	/// The file's Unix permission bits.
	pub unix_mode: u32,
}

/// A generated project, held as an insertion-ordered map of archive paths to files.
/// Adding a file at an existing path replaces it but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectArchive {
	entries: IndexMap<String, ArchiveEntry>,
}

/// The path of the main class inside a project.
pub fn main_class_path(config: &PluginConfig) -> String {
	format!("src/main/java/{}/{}.java", config.package_path(), config.class_name())
}

/// The path of the example command inside a project.
pub fn command_class_path(config: &PluginConfig) -> String {
	format!("src/main/java/{}/commands/{}Command.java", config.package_path(), config.class_name())
}

/// The path of the example event handler inside a project.
pub fn event_class_path(config: &PluginConfig) -> String {
	format!("src/main/java/{}/events/{}Event.java", config.package_path(), config.class_name())
}

impl ProjectArchive {
	/// Creates an empty archive.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a complete project using only the embedded templates.
	pub fn from_scratch(config: &PluginConfig) -> AppResult<Self> {
		let mut archive = Self::new();

		archive.add_text("gradle.properties", templates::gradle_properties(config));
		archive.add_text("settings.gradle", templates::settings_gradle(config));
		archive.add_text(".gitignore", templates::GITIGNORE);
		archive.add_text("README.md", templates::readme(config));
		archive.add_text(MANIFEST_PATH, templates::manifest(config)?);
		archive.add_text(main_class_path(config), templates::main_class(config));

		if config.include_example_command {
			archive.add_text(command_class_path(config), templates::command_class(config));
		}

		if config.include_example_event {
			archive.add_text(event_class_path(config), templates::event_class(config));
		}

		archive.add_text("build.gradle", templates::BUILD_GRADLE);
		archive.add("gradlew", templates::GRADLEW.as_bytes().to_vec(), EXECUTABLE_MODE);
		archive.add_text("gradlew.bat", templates::GRADLEW_BAT);
		archive.add_text("gradle/wrapper/gradle-wrapper.properties", templates::GRADLE_WRAPPER_PROPERTIES);

		info!("Generated {} files from the embedded templates.", archive.len());
		Ok(archive)
	}

	/// Builds a project by transforming the files of a base template archive.
	///
	/// # Summary of Transformation
	/// 1. Skip directories along with build, IDE, and runtime leftovers.
	/// 2. Regenerate every file that carries plugin-specific content.
	/// 3. Copy the build script and Gradle wrapper as they are.
	/// 4. Drop anything else.
	/// 5. Add the main class, manifest, and enabled examples if the base template lacked them.
	pub fn from_base(config: &PluginConfig, base: &[u8]) -> AppResult<Self> {
		let mut template = ZipArchive::new(Cursor::new(base))?;
		let mut archive = Self::new();

		for index in 0..template.len() {
			let mut file = template.by_index(index)?;
			if file.is_dir() { continue; }

			let name = file.name().to_owned();
			let Some(role) = BaseEntry::classify(&name, config) else {
				trace!("Dropping '{name}' from the base template.");
				continue;
			};

			debug!("Base template entry '{name}' is {role:?}.");

			match role {
				BaseEntry::GradleProperties => archive.add_text("gradle.properties", templates::gradle_properties(config)),
				BaseEntry::SettingsGradle => archive.add_text("settings.gradle", templates::settings_gradle(config)),
				BaseEntry::Gitignore => archive.add_text(".gitignore", templates::GITIGNORE),
				BaseEntry::Manifest => archive.add_text(MANIFEST_PATH, templates::manifest(config)?),
				BaseEntry::MainClass => archive.add_text(main_class_path(config), templates::main_class(config)),
				BaseEntry::CommandClass => archive.add_text(command_class_path(config), templates::command_class(config)),
				BaseEntry::EventClass => archive.add_text(event_class_path(config), templates::event_class(config)),
				BaseEntry::Readme => archive.add_text("README.md", templates::readme(config)),

				BaseEntry::Copied(target) => {
					// The declared size comes from the archive itself, so it isn't used as a capacity hint.
					let mut contents = Vec::new();
					file.read_to_end(&mut contents)?;

					let default_mode = if target == "gradlew" { EXECUTABLE_MODE } else { FILE_MODE };
					let mode = file.unix_mode().map(|m| m & 0o777).filter(|m| *m != 0).unwrap_or(default_mode);

					archive.add(target, contents, mode);
				},
			}
		}

		if archive.is_empty() {
			warn!("The base template has no usable files, so the project will only hold generated ones.");
		}

		archive.ensure(main_class_path(config), || Ok(templates::main_class(config)))?;
		archive.ensure(MANIFEST_PATH.to_owned(), || templates::manifest(config))?;

		if config.include_example_command {
			archive.ensure(command_class_path(config), || Ok(templates::command_class(config)))?;
		}

		if config.include_example_event {
			archive.ensure(event_class_path(config), || Ok(templates::event_class(config)))?;
		}

		info!("Generated {} files from a base template with {} entries.", archive.len(), template.len());
		Ok(archive)
	}

	/// Adds a file, replacing any file already at that path.
	pub fn add(&mut self, path: impl Into<String>, contents: Vec<u8>, unix_mode: u32) {
		let path = path.into();

		if self.entries.insert(path.clone(), ArchiveEntry { contents, unix_mode }).is_some() {
			debug!("Replaced '{path}' in the archive.");
		}
	}

	/// Adds a regular text file.
	pub fn add_text(&mut self, path: impl Into<String>, text: impl Into<String>) {
		self.add(path, text.into().into_bytes(), FILE_MODE);
	}

	/// Adds a generated text file only if the archive doesn't have a file at that path yet.
	fn ensure(&mut self, path: String, render: impl FnOnce() -> AppResult<String>) -> AppResult<()> {
		if !self.contains(&path) {
			debug!("The base template has no counterpart for '{path}', so it will be generated.");
			self.add_text(path, render()?);
		}

		Ok(())
	}

	/// Retrieves the file at a path.
	#[cfg(test)]
	pub fn get(&self, path: &str) -> Option<&ArchiveEntry> {
		self.entries.get(path)
	}

	/// Retrieves the file at a path as text.
	/// Returns *None* if there is no such file or it isn't valid UTF-8.
	#[cfg(test)]
	pub fn get_text(&self, path: &str) -> Option<&str> {
		self.get(path).and_then(|e| std::str::from_utf8(&e.contents).ok())
	}

	/// Checks if the archive has a file at a path.
	pub fn contains(&self, path: &str) -> bool {
		self.entries.contains_key(path)
	}

	/// Iterates over the paths of this archive's files in insertion order.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Iterates over this archive's files in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ArchiveEntry)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// The number of files in this archive.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Checks if this archive has no files.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The combined size of every file's contents, in bytes.
	pub fn total_size(&self) -> usize {
		self.entries.values().map(|e| e.contents.len()).sum()
	}

	/// Packages this project as a zip archive, compressed with Deflate at its highest level.
	pub fn to_zip(&self) -> AppResult<Vec<u8>> {
		let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

		for (path, entry) in self.entries.iter() {
			let options = SimpleFileOptions::default()
				.compression_method(CompressionMethod::Deflated)
				.compression_level(Some(9))
				.unix_permissions(entry.unix_mode);

			writer.start_file(path.as_str(), options)?;
			writer.write_all(&entry.contents)?;
		}

		let bytes = writer.finish()?.into_inner();
		debug!("Packaged {} files into {} bytes.", self.len(), bytes.len());

		Ok(bytes)
	}

	/// Writes this project's files under a directory, creating any missing parent directories.
	pub fn extract_to(&self, dir: impl AsRef<Path>) -> AppResult<()> {
		let dir = dir.as_ref();

		for (path, entry) in self.entries.iter() {
			let target = dir.join(path);

			if let Some(parent) = target.parent() {
				fs::create_dir_all(parent)
					.with_context(|| format!("failed to create the directory '{}'", parent.display()))?;
			}

			fs::write(&target, &entry.contents)
				.with_context(|| format!("failed to write '{}'", target.display()))?;

			set_unix_mode(&target, entry.unix_mode)?;
		}

		debug!("Extracted {} files into '{}'.", self.len(), dir.display());
		Ok(())
	}
}

#[cfg(unix)]
fn set_unix_mode(path: &Path, mode: u32) -> AppResult<()> {
	use std::os::unix::fs::PermissionsExt;

	fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
	Ok(())
}

#[cfg(not(unix))]
fn set_unix_mode(_: &Path, _: u32) -> AppResult<()> {
	Ok(())
}

/// What an entry of a base template becomes in the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseEntry {
	GradleProperties,
	SettingsGradle,
	Gitignore,
	Manifest,
	MainClass,
	CommandClass,
	EventClass,
	Readme,

	/// Copied verbatim to the wrapped path.
	Copied(String),
}

/// Substrings marking build, IDE, and runtime leftovers that never belong in a fresh project.
const SKIPPED_DIRECTORIES: [&str; 9] = [
	".gradle/", ".idea/", ".vscode/", ".eclipse/", "build/", "run/", "logs/", "mods/", "universe/",
];

/// File name endings of runtime files and build outputs that never belong in a fresh project.
const SKIPPED_SUFFIXES: [&str; 5] = [".jar", "config.json", "bans.json", "permissions.json", "whitelist.json"];

impl BaseEntry {
	/// Decides what happens to a base template entry.
	/// Returns *None* if the entry should be dropped.
	pub fn classify(name: &str, config: &PluginConfig) -> Option<Self> {
		let is_wrapper = name.contains("gradle/wrapper/");

		if SKIPPED_DIRECTORIES.iter().any(|d| name.contains(d)) {
			return None;
		}

		// The wrapper's jar is the one build output the project needs.
		if SKIPPED_SUFFIXES.iter().any(|s| name.ends_with(s)) && !(is_wrapper && name.ends_with(".jar")) {
			return None;
		}

		let file_name = name.rsplit('/').next().unwrap_or(name);

		let role = if name.ends_with("gradle.properties") {
			Self::GradleProperties
		} else if name.ends_with("settings.gradle") {
			Self::SettingsGradle
		} else if name.ends_with(".gitignore") {
			Self::Gitignore
		} else if name.ends_with("manifest.json") {
			Self::Manifest
		} else if name.contains("ExamplePlugin.java") {
			Self::MainClass
		} else if name.contains("ExampleCommand.java") && config.include_example_command {
			Self::CommandClass
		} else if name.contains("ExampleEvent.java") && config.include_example_event {
			Self::EventClass
		} else if name.ends_with("build.gradle") {
			Self::Copied("build.gradle".to_owned())
		} else if name.ends_with("gradlew") || name.ends_with("gradlew.bat") {
			Self::Copied(file_name.to_owned())
		} else if is_wrapper {
			Self::Copied(format!("gradle/wrapper/{file_name}"))
		} else if name.ends_with("README.md") {
			Self::Readme
		} else {
			return None;
		};

		Some(role)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> PluginConfig {
		PluginConfig {
			name: "Sky Islands".to_owned(),
			id: "sky_islands".to_owned(),
			package: "io.github.sky".to_owned(),
			..Default::default()
		}
	}

	#[test]
	fn scratch_layout() {
		let archive = ProjectArchive::from_scratch(&config()).unwrap();

		let expected = [
			"gradle.properties",
			"settings.gradle",
			".gitignore",
			"README.md",
			"src/main/resources/manifest.json",
			"src/main/java/io/github/sky/SkyIslands.java",
			"src/main/java/io/github/sky/commands/SkyIslandsCommand.java",
			"src/main/java/io/github/sky/events/SkyIslandsEvent.java",
			"build.gradle",
			"gradlew",
			"gradlew.bat",
			"gradle/wrapper/gradle-wrapper.properties",
		];

		assert_eq!(archive.paths().collect_vec(), expected);
		assert_eq!(archive.get("gradlew").unwrap().unix_mode, EXECUTABLE_MODE);
		assert_eq!(archive.get("build.gradle").unwrap().unix_mode, FILE_MODE);
	}

	#[test]
	fn scratch_skips_disabled_examples() {
		let mut config = config();
		config.include_example_command = false;

		let archive = ProjectArchive::from_scratch(&config).unwrap();
		assert!(!archive.contains(&command_class_path(&config)));
		assert!(archive.contains(&event_class_path(&config)));
		assert_eq!(archive.len(), 11);
	}

	#[test]
	fn classify_skips_leftovers() {
		let config = config();

		for skipped in [
			"template/.gradle/8.5/checksums.bin",
			"template/.idea/workspace.xml",
			"template/build/libs/ExamplePlugin-1.0.jar",
			"template/run/config.json",
			"template/libs/HytaleServer.jar",
			"template/whitelist.json",
			"template/universe/worlds/default.bson",
			"template/src/main/resources/Common/notes.txt",
		] {
			assert_eq!(BaseEntry::classify(skipped, &config), None, "{skipped}");
		}
	}

	#[test]
	fn classify_maps_known_files() {
		let mut config = config();

		assert_eq!(BaseEntry::classify("t/gradle.properties", &config), Some(BaseEntry::GradleProperties));
		assert_eq!(BaseEntry::classify("t/settings.gradle", &config), Some(BaseEntry::SettingsGradle));
		assert_eq!(BaseEntry::classify("t/src/main/resources/manifest.json", &config), Some(BaseEntry::Manifest));
		assert_eq!(BaseEntry::classify("t/src/main/java/com/example/ExamplePlugin.java", &config), Some(BaseEntry::MainClass));
		assert_eq!(BaseEntry::classify("t/build.gradle", &config), Some(BaseEntry::Copied("build.gradle".to_owned())));
		assert_eq!(BaseEntry::classify("t/gradlew.bat", &config), Some(BaseEntry::Copied("gradlew.bat".to_owned())));
		assert_eq!(
			BaseEntry::classify("t/gradle/wrapper/gradle-wrapper.jar", &config),
			Some(BaseEntry::Copied("gradle/wrapper/gradle-wrapper.jar".to_owned())),
		);

		config.include_example_command = false;
		assert_eq!(BaseEntry::classify("t/src/main/java/com/example/commands/ExampleCommand.java", &config), None);
	}

	#[test]
	fn zip_keeps_order_and_modes() {
		let archive = ProjectArchive::from_scratch(&config()).unwrap();
		let bytes = archive.to_zip().unwrap();

		let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
		assert_eq!(zip.len(), archive.len());

		for (index, path) in archive.paths().enumerate() {
			assert_eq!(zip.by_index(index).unwrap().name(), path);
		}

		let gradlew = zip.by_name("gradlew").unwrap();
		assert_eq!(gradlew.compression(), CompressionMethod::Deflated);
		assert_eq!(gradlew.unix_mode().map(|m| m & 0o777), Some(EXECUTABLE_MODE));
	}

	#[test]
	fn adding_replaces_in_place() {
		let mut archive = ProjectArchive::new();
		archive.add_text("a", "one");
		archive.add_text("b", "two");
		archive.add_text("a", "three");

		assert_eq!(archive.paths().collect_vec(), ["a", "b"]);
		assert_eq!(archive.get_text("a"), Some("three"));
		assert_eq!(archive.total_size(), 8);
	}
}
