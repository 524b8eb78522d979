//! This module contains the entrypoints for Hytemplate's commands.

use std::{fs, path::{Path, PathBuf}};

use crate::{
	archive::ProjectArchive,
	fetch::{load_base_template, TemplateSource},
	lua::{eval_config_file, STARTER_CONFIG},
	prelude::*,
	util::{misc::replace_path_home_prefix, text::TextStyle},
};

/// The config file picked up from the current directory when '--config' isn't passed.
pub const CONFIG_FILE: &str = "hytemplate.lua";

/// Everything needed to build one project.
#[derive(Debug, Clone, Default)]
pub struct ProjectRequest {
	/// An explicit Lua config. If this is *None*, 'hytemplate.lua' is used when it exists.
	pub config_path: Option<PathBuf>,

	/// Values from CLI flags, which override the Lua config.
	pub overrides: RawPluginConfig,

	/// The base template to transform, if any.
	pub template: Option<TemplateSource>,
}

impl ProjectRequest {
	/// Evaluates the Lua config (if any), layers the overrides on top, and resolves the result.
	pub fn resolve_config(&self) -> AppResult<PluginConfig> {
		let base = match self.config_path {
			Some(ref path) => eval_config_file(replace_path_home_prefix(path)?)?,
			None if Path::new(CONFIG_FILE).is_file() => eval_config_file(CONFIG_FILE)?,
			None => {
				debug!("No config file found, so only flags and defaults are used.");
				RawPluginConfig::default()
			},
		};

		base.merge(self.overrides.clone()).resolve()
	}

	/// Builds the project described by this request.
	pub fn build(&self) -> AppResult<(PluginConfig, ProjectArchive)> {
		let config = self.resolve_config()?;

		let archive = match self.template {
			Some(ref source) => ProjectArchive::from_base(&config, &load_base_template(source)?)?,
			None => ProjectArchive::from_scratch(&config)?,
		};

		Ok((config, archive))
	}
}

/// Entrypoint for Hytemplate's 'init' command.
/// This writes a commented starter config to *dir*, which is the working directory when run from the CLI.
pub fn init_config(dir: impl AsRef<Path>, force: bool) -> AppResult<()> {
	let path = dir.as_ref().join(CONFIG_FILE);

	if path.exists() && !force {
		return Err(ConfigError::ConfigExists(path).into());
	}

	fs::write(&path, STARTER_CONFIG)?;
	info!("Wrote the starter config to '{}'.", path.display());

	Notice::from_preset(NoticePreset::Success, "Init")
		.add_field("Config", &path.display().to_string())
		.add_field("Next", "Edit the config, then run 'hytemplate generate'.")
		.print();

	Ok(())
}

/// Entrypoint for Hytemplate's 'generate' command.
///
/// # Summary of Generation
/// 1. Resolve the config from the Lua file, CLI flags, and defaults.
/// 2. Build the project, either from the embedded templates or a base template.
/// 3. Write it as a zip archive, or as a directory if *extract* is set.
pub fn generate(request: &ProjectRequest, output: Option<PathBuf>, extract: bool, force: bool) -> AppResult<()> {
	let (config, archive) = request.build()?;
	let class = config.class_name();

	let output = match output {
		Some(path) => replace_path_home_prefix(path)?,
		None if extract => PathBuf::from(&class),
		None => PathBuf::from(format!("{class}.zip")),
	};

	if output.exists() && !force {
		return Err(TemplateError::OutputExists(output).into());
	}

	let written = if extract {
		archive.extract_to(&output)?;
		archive.total_size()
	} else {
		let bytes = archive.to_zip()?;
		fs::write(&output, &bytes)?;
		bytes.len()
	};

	info!("Wrote '{}'.", output.display());

	Notice::from_preset(NoticePreset::Success, "Generate")
		.add_field("Plugin", &format!("{} ({})", config.name, config.id))
		.add_field("Entry Point", &config.entry_point())
		.add_field("Files", &archive.len().to_string())
		.add_field("Size", &format!("{written} bytes"))
		.add_field("Output", &output.display().to_string())
		.print();

	Ok(())
}

/// Entrypoint for Hytemplate's 'preview' command.
/// This prints the resolved config and the files that would be generated, without writing anything.
pub fn preview(request: &ProjectRequest) -> AppResult<()> {
	let (config, archive) = request.build()?;

	let toggle = |enabled: bool| if enabled { "yes" } else { "no" };

	Notice::from_preset(NoticePreset::Statistics, "Preview")
		.add_field("Name", &config.name)
		.add_field("Id", &config.id)
		.add_field("Class", &config.class_name())
		.add_field("Entry Point", &config.entry_point())
		.add_field("Version", &config.version)
		.add_field("Java", &config.java_version.to_string())
		.add_field("Server Version", &config.server_version)
		.add_field("Author", &format!("{} <{}>", config.author_name, config.author_email))
		.add_field("Website", &config.website)
		.add_field("Example Command", toggle(config.include_example_command))
		.add_field("Example Event", toggle(config.include_example_event))
		.add_field("Template", request.template.as_ref().map_or("embedded", TemplateSource::as_str))
		.print();

	println!("{}", render_file_list(&archive));
	Ok(())
}

/// Lists an archive's files, one per line, with their sizes.
fn render_file_list(archive: &ProjectArchive) -> String {
	let width = archive.paths().map(str::len).max().unwrap_or(0);

	archive.iter()
		.map(|(path, entry)| {
			let size = format!("{} bytes", entry.contents.len()).stylize(Some(TextStyle::Dim), None);
			format!("  {path:<width$}  {size}")
		})
		.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overrides_apply_without_config() {
		let request = ProjectRequest {
			config_path: None,
			overrides: RawPluginConfig {
				name: Some("Flag Plugin".to_owned()),
				package: Some("org.flags".to_owned()),
				include_example_event: Some(false),
				..Default::default()
			},
			template: None,
		};

		let (config, archive) = request.build().unwrap();
		assert_eq!(config.entry_point(), "org.flags.FlagPlugin");
		assert!(archive.contains("src/main/java/org/flags/commands/FlagPluginCommand.java"));
		assert!(!archive.contains("src/main/java/org/flags/events/FlagPluginEvent.java"));
	}

	#[test]
	fn missing_config_file_is_an_error() {
		let request = ProjectRequest {
			config_path: Some(PathBuf::from("/nonexistent/hytemplate/config.lua")),
			..Default::default()
		};

		assert!(matches!(request.resolve_config(), Err(AppError::IO(_))));
	}

	#[test]
	fn file_list_pads_paths() {
		let mut archive = ProjectArchive::new();
		archive.add_text("a", "1");
		archive.add_text("long/path", "22");

		let list = render_file_list(&archive);
		let lines = list.lines().collect_vec();

		assert_eq!(lines.len(), 2);
		assert!(lines[0].starts_with("  a          "));
		assert!(lines[1].starts_with("  long/path  "));
	}
}
