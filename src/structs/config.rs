//! This module defines the configuration a plugin project is generated from.

use std::ops::RangeInclusive;

use crate::{naming, prelude::*};

/// Java versions the generated Gradle toolchain is known to work with.
pub const SUPPORTED_JAVA_VERSIONS: RangeInclusive<u32> = 21..=25;

/// A fully resolved plugin configuration.
/// Every template is rendered from one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
	/// The human-readable name of the plugin, such as "Example Mod".
	pub name: String,

	/// The plugin's id, used as the name of the example command.
	pub id: String,

	/// The Java package holding the plugin's classes.
	pub package: String,

	pub version: String,
	pub description: String,
	pub author_name: String,
	pub author_email: String,
	pub website: String,

	/// The Java toolchain version written to 'gradle.properties'.
	pub java_version: u32,

	/// The server version range this plugin targets.
	/// '*' matches any server.
	pub server_version: String,

	/// Generates an example command and registers it in the main class.
	pub include_example_command: bool,

	/// Generates an example 'PlayerReadyEvent' handler and registers it in the main class.
	pub include_example_event: bool,
}

impl PluginConfig {
	/// The PascalCase class name of this plugin's main class.
	pub fn class_name(&self) -> String {
		naming::generate_class_name(&self.name)
	}

	/// The directory holding this plugin's sources, relative to 'src/main/java'.
	pub fn package_path(&self) -> String {
		naming::package_path(&self.package)
	}

	/// The fully qualified name of the main class.
	pub fn entry_point(&self) -> String {
		format!("{}.{}", self.package, self.class_name())
	}
}

impl Default for PluginConfig {
	fn default() -> Self {
		Self {
			name: "Example Mod".to_owned(),
			id: "example_mod".to_owned(),
			package: "com.example".to_owned(),
			version: "1.0.0".to_owned(),
			description: "A Hytale server mod".to_owned(),
			author_name: "Your Name".to_owned(),
			author_email: "your.email@example.com".to_owned(),
			website: "https://example.com".to_owned(),
			java_version: 21,
			server_version: "*".to_owned(),
			include_example_command: true,
			include_example_event: true,
		}
	}
}

/// A partial version of *PluginConfig* built from a Lua config or CLI flags.
/// See *PluginConfig*'s docs for information on most fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPluginConfig {
	pub name: Option<String>,

	/// A custom id. If this is unset or empty, the id is generated from the name.
	pub id: Option<String>,

	pub package: Option<String>,
	pub version: Option<String>,
	pub description: Option<String>,
	pub author_name: Option<String>,
	pub author_email: Option<String>,
	pub website: Option<String>,
	pub java_version: Option<u32>,
	pub server_version: Option<String>,
	pub include_example_command: Option<bool>,
	pub include_example_event: Option<bool>,
}

impl RawPluginConfig {
	/// Layers another raw config on top of this one.
	/// Any field set in *other* replaces the same field in this config.
	pub fn merge(self, other: RawPluginConfig) -> Self {
		Self {
			name: other.name.or(self.name),
			id: other.id.or(self.id),
			package: other.package.or(self.package),
			version: other.version.or(self.version),
			description: other.description.or(self.description),
			author_name: other.author_name.or(self.author_name),
			author_email: other.author_email.or(self.author_email),
			website: other.website.or(self.website),
			java_version: other.java_version.or(self.java_version),
			server_version: other.server_version.or(self.server_version),
			include_example_command: other.include_example_command.or(self.include_example_command),
			include_example_event: other.include_example_event.or(self.include_example_event),
		}
	}

	/// Fills unset fields with their defaults, derives the plugin id, and validates the result.
	///
	/// Empty author fields and websites fall back to their placeholders, as they are always written to the manifest.
	pub fn resolve(self) -> AppResult<PluginConfig> {
		let defaults = PluginConfig::default();

		let name = self.name.unwrap_or(defaults.name);
		let package = self.package.unwrap_or(defaults.package);

		if !naming::validate_package_name(&package) {
			return Err(ConfigError::InvalidPackageName(package).into());
		}

		let class = naming::generate_class_name(&name);
		if !naming::is_valid_class_name(&class) {
			return Err(ConfigError::InvalidClassName { name, class }.into());
		}

		// A valid class name guarantees the generated id has at least one character.
		let id = match self.id.map(|id| id.trim().to_owned()) {
			Some(id) if !id.is_empty() => id,
			_ => naming::generate_mod_id(&name),
		};

		let java_version = self.java_version.unwrap_or(defaults.java_version);
		if !SUPPORTED_JAVA_VERSIONS.contains(&java_version) {
			return Err(ConfigError::UnsupportedJavaVersion(java_version).into());
		}

		let config = PluginConfig {
			name,
			id,
			package,
			version: non_empty_or(self.version, defaults.version),
			description: self.description.unwrap_or(defaults.description),
			author_name: non_empty_or(self.author_name, defaults.author_name),
			author_email: non_empty_or(self.author_email, defaults.author_email),
			website: non_empty_or(self.website, defaults.website),
			java_version,
			server_version: non_empty_or(self.server_version, defaults.server_version),
			include_example_command: self.include_example_command.unwrap_or(defaults.include_example_command),
			include_example_event: self.include_example_event.unwrap_or(defaults.include_example_event),
		};

		debug!("Resolved plugin config: {config:?}");
		Ok(config)
	}
}

/// Returns the provided value unless it is missing or blank.
fn non_empty_or(value: Option<String>, fallback: String) -> String {
	value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

impl<'lua> FromLua<'lua> for RawPluginConfig {
	fn from_lua(value: LuaValue<'lua>, _: &'lua Lua) -> LuaResult<Self> {
		if value.is_nil() {
			return Ok(Self::default());
		}

		let Some(table) = value.as_table() else {
			return Err(LuaError::FromLuaConversionError {
				from: value.type_name(),
				to: "PluginConfig",
				message: Some("A project config must return a table.".to_owned()),
			});
		};

		// The author may be a plain name or a table with a name and email.
		let (author_name, author_email) = match table.get::<_, LuaValue>("author")? {
			LuaValue::Nil => (None, None),
			LuaValue::String(name) => (Some(name.to_str()?.to_owned()), None),
			LuaValue::Table(author) => (author.get("name")?, author.get("email")?),
			other => return Err(LuaError::FromLuaConversionError {
				from: other.type_name(),
				to: "PluginConfig",
				message: Some("The 'author' field must be a string or a table with 'name' and 'email'.".to_owned()),
			}),
		};

		// Likewise, 'examples' toggles both examples at once or each one individually.
		let (include_example_command, include_example_event) = match table.get::<_, LuaValue>("examples")? {
			LuaValue::Nil => (None, None),
			LuaValue::Boolean(toggle) => (Some(toggle), Some(toggle)),
			LuaValue::Table(examples) => (examples.get("command")?, examples.get("event")?),
			other => return Err(LuaError::FromLuaConversionError {
				from: other.type_name(),
				to: "PluginConfig",
				message: Some("The 'examples' field must be a boolean or a table with 'command' and 'event'.".to_owned()),
			}),
		};

		let config = Self {
			name: table.get("name")?,
			id: table.get("id")?,
			package: table.get("package")?,
			version: table.get("version")?,
			description: table.get("description")?,
			author_name,
			author_email,
			website: table.get("website")?,
			java_version: table.get("java")?,
			server_version: table.get("server_version")?,
			include_example_command,
			include_example_event,
		};

		Ok(config)
	}
}
