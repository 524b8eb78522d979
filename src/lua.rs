//! This module contains code related to Lua interop.

use std::{fs, path::Path};

use crate::prelude::*;

/// A commented config written by 'hytemplate init'.
pub const STARTER_CONFIG: &str = include_str!("starter.lua");

/// Evaluates a project's Lua config file.
pub fn eval_config_file(path: impl AsRef<Path>) -> AppResult<RawPluginConfig> {
	let path = path.as_ref();
	info!("Evaluating config '{}'.", path.display());

	let source = fs::read_to_string(path)?;
	eval_config_str(&source, &path.display().to_string())
}

/// Evaluates Lua source as a project config.
/// The chunk runs inside a sandbox and should return a table describing the plugin.
pub fn eval_config_str(source: &str, name: &str) -> AppResult<RawPluginConfig> {
	let lua = Lua::new();
	let sandbox = build_sandbox(&lua)?;

	let config = lua.load(source)
		.set_name(format!("@{name}"))
		.set_environment(sandbox)
		.eval::<RawPluginConfig>()?;

	Ok(config)
}

/// Builds a sandbox environment to use with the user's Lua config.
/// This sandbox is a table that forwards safe parts of Lua's standard library.
fn build_sandbox(lua: &Lua) -> AppResult<LuaTable<'_>> {
	let sandbox_env: LuaTable = lua.load(include_str!("sandbox.lua"))
		.set_name("SANDBOX")
		.eval()?;

	Ok(sandbox_env)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starter_config_matches_defaults() {
		let config = eval_config_str(STARTER_CONFIG, "starter.lua").unwrap().resolve().unwrap();
		assert_eq!(config, PluginConfig::default());
	}

	#[test]
	fn shorthand_fields() {
		let raw = eval_config_str(r#"
			return {
				name = "Shorthand",
				author = "Someone",
				examples = false,
				java = "23",
			}
		"#, "shorthand").unwrap();

		assert_eq!(raw.name.as_deref(), Some("Shorthand"));
		assert_eq!(raw.author_name.as_deref(), Some("Someone"));
		assert_eq!(raw.author_email, None);
		assert_eq!(raw.include_example_command, Some(false));
		assert_eq!(raw.include_example_event, Some(false));
		assert_eq!(raw.java_version, Some(23));
	}

	#[test]
	fn scripts_can_compute_values() {
		let raw = eval_config_str(r#"
			local base = "Forge"
			return { name = string.upper(base) .. " Tools", examples = { event = false } }
		"#, "computed").unwrap();

		assert_eq!(raw.name.as_deref(), Some("FORGE Tools"));
		assert_eq!(raw.include_example_command, None);
		assert_eq!(raw.include_example_event, Some(false));
	}

	#[test]
	fn nil_return_is_empty() {
		assert_eq!(eval_config_str("local x = 1", "empty").unwrap(), RawPluginConfig::default());
	}

	#[test]
	fn sandbox_hides_io() {
		let result = eval_config_str(r#"io.open("secret.txt")"#, "escape");
		assert!(matches!(result, Err(AppError::Lua(_))));

		let result = eval_config_str(r#"os.execute("true")"#, "escape");
		assert!(matches!(result, Err(AppError::Lua(_))));
	}

	#[test]
	fn wrong_shapes_are_rejected() {
		assert!(matches!(eval_config_str("return 5", "number"), Err(AppError::Lua(_))));
		assert!(matches!(eval_config_str("return { author = 5 }", "author"), Err(AppError::Lua(_))));
		assert!(matches!(eval_config_str("return { examples = 'yes' }", "examples"), Err(AppError::Lua(_))));
	}
}
