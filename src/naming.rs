//! This module derives identifiers from the plugin's human-readable name and checks Java package names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::prelude::*;

/// Matches dot-separated lowercase segments, each starting with a letter.
static JAVA_PACKAGE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)*$").expect("package regex should compile")
});

/// Converts a plugin name into a plugin id.
/// The id is lowercase, alphanumeric, and uses underscores in place of whitespace.
pub fn generate_mod_id(name: &str) -> String {
	name.to_lowercase()
		.chars()
		.filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
		.collect::<String>()
		.split_whitespace()
		.join("_")
}

/// Converts a plugin name into a PascalCase class name.
/// Anything that isn't an ASCII letter, digit, or whitespace is dropped.
pub fn generate_class_name(name: &str) -> String {
	name.chars()
		.filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
		.collect::<String>()
		.split_whitespace()
		.map(capitalize)
		.collect()
}

/// Checks if a string is a valid Java package name, such as 'com.example'.
pub fn validate_package_name(package: &str) -> bool {
	JAVA_PACKAGE.is_match(package)
}

/// Checks if a generated class name can be used as a Java identifier.
pub fn is_valid_class_name(class: &str) -> bool {
	class.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Turns a package name into the directory path used under 'src/main/java'.
pub fn package_path(package: &str) -> String {
	package.replace('.', "/")
}

/// Uppercases the first character of a word and lowercases the rest.
fn capitalize(word: &str) -> String {
	let mut chars = word.chars();

	match chars.next() {
		Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mod_id_from_name() {
		assert_eq!(generate_mod_id("Example Mod"), "example_mod");
		assert_eq!(generate_mod_id("  My  Cool-Mod! "), "my_coolmod");
		assert_eq!(generate_mod_id("Tabs\tand\nLines 2"), "tabs_and_lines_2");
		assert_eq!(generate_mod_id("!!!"), "");
	}

	#[test]
	fn class_name_from_name() {
		assert_eq!(generate_class_name("Example Mod"), "ExampleMod");
		assert_eq!(generate_class_name("example MOD"), "ExampleMod");
		assert_eq!(generate_class_name("super-duper tools v2"), "SuperduperToolsV2");
		assert_eq!(generate_class_name("   "), "");
	}

	#[test]
	fn package_validation() {
		for valid in ["com", "com.example", "net.foo2.bar", "a.b.c"] {
			assert!(validate_package_name(valid), "{valid} should be valid");
		}

		for invalid in ["", "Com.example", "com..example", "1com", "com.", ".com", "com.2nd", "com.my_mod", "com.example "] {
			assert!(!validate_package_name(invalid), "{invalid} should be invalid");
		}
	}

	#[test]
	fn class_name_validity() {
		assert!(is_valid_class_name("ExampleMod"));
		assert!(!is_valid_class_name("2Cool"));
		assert!(!is_valid_class_name(""));
	}

	#[test]
	fn package_to_path() {
		assert_eq!(package_path("com.example.plugin"), "com/example/plugin");
		assert_eq!(package_path("com"), "com");
	}
}
