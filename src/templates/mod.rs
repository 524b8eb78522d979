//! This module renders the files of a generated plugin project.
//! Generated files are plain templates with `{{key}}` placeholders, filled from a *PluginConfig*.
//! Static boilerplate, such as the Gradle wrapper, is embedded as-is.

use serde::Serialize;

use crate::{prelude::*, util::misc::render_template};

/// The Gradle build script. It reads everything plugin-specific from 'gradle.properties'.
pub const BUILD_GRADLE: &str = include_str!("files/build.gradle");

/// The Gradle wrapper script for Unix-likes.
pub const GRADLEW: &str = include_str!("files/gradlew");

/// The Gradle wrapper script for Windows.
pub const GRADLEW_BAT: &str = include_str!("files/gradlew.bat");

/// Tells the Gradle wrapper which distribution to download.
pub const GRADLE_WRAPPER_PROPERTIES: &str = include_str!("files/gradle-wrapper.properties");

/// The generated project's '.gitignore'.
pub const GITIGNORE: &str = include_str!("files/gitignore");

const GRADLE_PROPERTIES_TEMPLATE: &str = include_str!("files/gradle.properties.tmpl");
const SETTINGS_GRADLE_TEMPLATE: &str = include_str!("files/settings.gradle.tmpl");
const PLUGIN_CLASS_TEMPLATE: &str = include_str!("files/Plugin.java.tmpl");
const COMMAND_CLASS_TEMPLATE: &str = include_str!("files/Command.java.tmpl");
const EVENT_CLASS_TEMPLATE: &str = include_str!("files/Event.java.tmpl");
const README_TEMPLATE: &str = include_str!("files/README.md.tmpl");

/// Renders 'gradle.properties', which holds the plugin's metadata for the build script.
pub fn gradle_properties(config: &PluginConfig) -> String {
	let class = config.class_name();
	let java_version = config.java_version.to_string();
	let entry_point = config.entry_point();

	render_template(GRADLE_PROPERTIES_TEMPLATE, &[
		("package", config.package.as_str()),
		("class", class.as_str()),
		("version", config.version.as_str()),
		("java_version", java_version.as_str()),
		("description", config.description.as_str()),
		("website", config.website.as_str()),
		("server_version", config.server_version.as_str()),
		("entry_point", entry_point.as_str()),
	])
}

/// Renders 'settings.gradle'.
pub fn settings_gradle(config: &PluginConfig) -> String {
	render_template(SETTINGS_GRADLE_TEMPLATE, &[("class", config.class_name().as_str())])
}

/// Renders the plugin's main class.
/// It registers whichever examples are enabled in its 'setup' method.
pub fn main_class(config: &PluginConfig) -> String {
	let class = config.class_name();

	let mut imports = vec![
		"import com.hypixel.hytale.server.core.plugin.JavaPlugin;".to_owned(),
		"import com.hypixel.hytale.server.core.plugin.JavaPluginInit;".to_owned(),
		String::new(),
		"import javax.annotation.Nonnull;".to_owned(),
	];

	// Example imports go right after the first import, with the event's ahead of the command's.
	if config.include_example_command {
		imports.insert(1, format!("import {}.commands.{class}Command;", config.package));
	}

	if config.include_example_event {
		imports.insert(1, format!("import {}.events.{class}Event;", config.package));
		imports.insert(1, "import com.hypixel.hytale.server.core.event.events.player.PlayerReadyEvent;".to_owned());
	}

	let mut setup = Vec::new();
	if config.include_example_command {
		setup.push(format!(
			"        this.getCommandRegistry().registerCommand(new {class}Command(\"{}\", \"A command for {}\"));",
			config.id, config.name,
		));
	}

	if config.include_example_event {
		setup.push(format!("        this.getEventRegistry().registerGlobal(PlayerReadyEvent.class, {class}Event::onPlayerReady);"));
	}

	if setup.is_empty() {
		setup.push("        // Register your commands and events here".to_owned());
	}

	render_template(PLUGIN_CLASS_TEMPLATE, &[
		("package", config.package.as_str()),
		("imports", imports.join("\n").as_str()),
		("class", class.as_str()),
		("setup", setup.join("\n").as_str()),
	])
}

/// Renders the example command class.
pub fn command_class(config: &PluginConfig) -> String {
	render_template(COMMAND_CLASS_TEMPLATE, &[
		("package", config.package.as_str()),
		("class", config.class_name().as_str()),
		("name", config.name.as_str()),
	])
}

/// Renders the example event handler class.
pub fn event_class(config: &PluginConfig) -> String {
	render_template(EVENT_CLASS_TEMPLATE, &[
		("package", config.package.as_str()),
		("class", config.class_name().as_str()),
		("name", config.name.as_str()),
	])
}

/// The plugin manifest, in the same key order the server expects.
/// Most values are placeholders that Gradle expands while processing resources.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Manifest<'a> {
	group: &'a str,
	name: &'a str,
	version: &'a str,
	description: &'a str,
	authors: Vec<ManifestAuthor<'a>>,
	website: &'a str,
	server_version: &'a str,
	dependencies: IndexMap<String, String>,
	optional_dependencies: IndexMap<String, String>,
	disabled_by_default: bool,
	main: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ManifestAuthor<'a> {
	name: &'a str,
	email: &'a str,
	url: &'a str,
}

/// Renders 'manifest.json' as pretty-printed JSON without a trailing newline.
pub fn manifest(config: &PluginConfig) -> AppResult<String> {
	let manifest = Manifest {
		group: "${group}",
		name: "${name}",
		version: "${version}",
		description: "${description}",
		authors: vec![ManifestAuthor {
			name: &config.author_name,
			email: &config.author_email,
			url: "${website}",
		}],
		website: "${website}",
		server_version: "${server_version}",
		dependencies: IndexMap::new(),
		optional_dependencies: IndexMap::new(),
		disabled_by_default: false,
		main: "${entry_point}",
	};

	Ok(serde_json::to_string_pretty(&manifest)?)
}

/// Renders the project's 'README.md'.
/// Its project tree only lists the example directories that are actually generated.
pub fn readme(config: &PluginConfig) -> String {
	let class = config.class_name();
	let java_version = config.java_version.to_string();

	let mut example_tree = String::new();
	if config.include_example_command {
		example_tree.push_str(&format!("│   └── commands/\n│       └── {class}Command.java  # Example command\n"));
	}

	if config.include_example_event {
		example_tree.push_str(&format!("│   └── events/\n│       └── {class}Event.java    # Example event handler\n"));
	}

	render_template(README_TEMPLATE, &[
		("name", config.name.as_str()),
		("description", config.description.as_str()),
		("java_version", java_version.as_str()),
		("class", class.as_str()),
		("package_path", config.package_path().as_str()),
		("example_tree", example_tree.as_str()),
		("website", config.website.as_str()),
	])
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(command: bool, event: bool) -> PluginConfig {
		PluginConfig {
			name: "Cool Stuff".to_owned(),
			id: "cool_stuff".to_owned(),
			package: "dev.cool".to_owned(),
			include_example_command: command,
			include_example_event: event,
			..Default::default()
		}
	}

	#[test]
	fn properties_carry_metadata() {
		let props = gradle_properties(&config(true, true));

		assert!(props.starts_with("group=dev.cool\nname=CoolStuff\nversion=1.0.0\njava_version=21\n"));
		assert!(props.contains("entry_point=dev.cool.CoolStuff\n"));
		assert!(props.contains("#   - Windows: %APPDATA%\\Hytale\\install\n"));
		assert!(props.ends_with("patchline=release\n"));
	}

	#[test]
	fn settings_names_root_project() {
		assert_eq!(settings_gradle(&config(false, false)), "rootProject.name = 'CoolStuff'\n");
	}

	#[test]
	fn main_class_with_both_examples() {
		let class = main_class(&config(true, true));

		let expected_imports = "package dev.cool;\n\n\
			import com.hypixel.hytale.server.core.plugin.JavaPlugin;\n\
			import com.hypixel.hytale.server.core.event.events.player.PlayerReadyEvent;\n\
			import dev.cool.events.CoolStuffEvent;\n\
			import dev.cool.commands.CoolStuffCommand;\n\
			import com.hypixel.hytale.server.core.plugin.JavaPluginInit;\n\
			\n\
			import javax.annotation.Nonnull;\n";

		assert!(class.starts_with(expected_imports), "{class}");
		assert!(class.contains("public class CoolStuff extends JavaPlugin {"));
		assert!(class.contains("registerCommand(new CoolStuffCommand(\"cool_stuff\", \"A command for Cool Stuff\"));"));
		assert!(class.contains("registerGlobal(PlayerReadyEvent.class, CoolStuffEvent::onPlayerReady);"));
		assert!(!class.contains("Register your commands"));
	}

	#[test]
	fn main_class_without_examples() {
		let class = main_class(&config(false, false));

		assert!(!class.contains("Command"));
		assert!(!class.contains("Event"));
		assert!(class.contains("    protected void setup() {\n        // Register your commands and events here\n    }"));
	}

	#[test]
	fn example_classes_use_package_and_name() {
		let command = command_class(&config(true, false));
		assert!(command.starts_with("package dev.cool.commands;\n"));
		assert!(command.contains("public class CoolStuffCommand extends CommandBase {"));
		assert!(command.contains("Message.raw(\"Hello from Cool Stuff!\")"));

		let event = event_class(&config(false, true));
		assert!(event.starts_with("package dev.cool.events;\n"));
		assert!(event.contains("Message.raw(\"Welcome to Cool Stuff!\")"));
	}

	#[test]
	fn manifest_layout() {
		let manifest = manifest(&config(true, true)).unwrap();

		let expected = r#"{
  "Group": "${group}",
  "Name": "${name}",
  "Version": "${version}",
  "Description": "${description}",
  "Authors": [
    {
      "Name": "Your Name",
      "Email": "your.email@example.com",
      "Url": "${website}"
    }
  ],
  "Website": "${website}",
  "ServerVersion": "${server_version}",
  "Dependencies": {},
  "OptionalDependencies": {},
  "DisabledByDefault": false,
  "Main": "${entry_point}"
}"#;

		assert_eq!(manifest, expected);
	}

	#[test]
	fn manifest_escapes_author() {
		let mut config = config(false, false);
		config.author_name = "Quote \"Me\"".to_owned();

		let manifest = manifest(&config).unwrap();
		assert!(manifest.contains(r#""Name": "Quote \"Me\"""#));
	}

	#[test]
	fn readme_tree_follows_toggles() {
		let both = readme(&config(true, true));
		assert!(both.starts_with("# Cool Stuff\n\nA Hytale server mod\n"));
		assert!(both.contains("├── src/main/java/dev/cool/\n│   ├── CoolStuff.java          # Main plugin class\n│   └── commands/\n"));
		assert!(both.contains("CoolStuffEvent.java    # Example event handler\n├── src/main/resources/"));

		let none = readme(&config(false, false));
		assert!(none.contains("# Main plugin class\n├── src/main/resources/"));
		assert!(none.contains("- Website: https://example.com\n"));
	}

	#[test]
	fn static_files_are_embedded() {
		assert!(BUILD_GRADLE.starts_with("plugins {"));
		assert!(GRADLEW.starts_with("#!/bin/sh"));
		assert!(GRADLEW_BAT.contains("GradleWrapperMain"));
		assert!(GRADLE_WRAPPER_PROPERTIES.contains("gradle-8.5-bin.zip"));
		assert!(GITIGNORE.contains("!gradle/wrapper/gradle-wrapper.jar"));
	}
}
