//! Hytemplate scaffolds Hytale server plugin projects.
//! It renders a Gradle project from a few inputs and packages it as a zip archive.

mod archive;
mod commands;
mod fetch;
mod lua;
mod naming;
mod prelude;
mod structs;
mod templates;
mod util;


use std::{env, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::{commands::ProjectRequest, fetch::TemplateSource, prelude::*};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
	/// Run Hytemplate as if it was in the provided directory.
	#[arg(short = 'R', long, global = true)]
	remote: Option<PathBuf>,

	/// Print more logs. Repeat for even more detail.
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,

	/// Silence all logs.
	#[arg(short, long, global = true, conflicts_with = "verbose")]
	quiet: bool,

	/// The command to execute.
	#[command(subcommand)]
	cmd: Command,
}

#[derive(Subcommand, Clone)]
enum Command {
	/// Write a starter 'hytemplate.lua' config in the current directory.
	Init {
		/// Replace an existing config.
		#[arg(short, long)]
		force: bool,
	},

	/// Generate a plugin project.
	Generate {
		#[command(flatten)]
		project: ProjectArgs,

		/// Where to write the project. Defaults to '<ClassName>.zip', or '<ClassName>/' with '--extract'.
		#[arg(short, long)]
		output: Option<PathBuf>,

		/// Write the project as a directory instead of a zip archive.
		#[arg(short = 'x', long)]
		extract: bool,

		/// Replace the output if it already exists.
		#[arg(short, long)]
		force: bool,
	},

	/// Show the resolved config and the files that would be generated.
	Preview {
		#[command(flatten)]
		project: ProjectArgs,
	},
}

/// Inputs describing the plugin, shared by 'generate' and 'preview'.
#[derive(Args, Clone)]
struct ProjectArgs {
	/// Lua config to read before applying flags. Defaults to 'hytemplate.lua' if it exists.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Base template zip to transform, as a path or an HTTP(S) URL.
	#[arg(short, long)]
	template: Option<String>,

	/// The plugin's display name.
	#[arg(short, long)]
	name: Option<String>,

	/// A custom plugin id. Derived from the name if unset.
	#[arg(long)]
	id: Option<String>,

	/// The Java package, such as 'com.example'.
	#[arg(short, long)]
	package: Option<String>,

	/// The plugin's version.
	#[arg(long, value_name = "VERSION")]
	plugin_version: Option<String>,

	#[arg(short, long)]
	description: Option<String>,

	#[arg(long)]
	author_name: Option<String>,

	#[arg(long)]
	author_email: Option<String>,

	#[arg(short, long)]
	website: Option<String>,

	/// The Java version used for development (21 to 25).
	#[arg(short, long = "java", value_name = "VERSION")]
	java_version: Option<u32>,

	/// The server versions this plugin supports.
	#[arg(long)]
	server_version: Option<String>,

	/// Leave out the example command.
	#[arg(long)]
	no_example_command: bool,

	/// Leave out the example event handler.
	#[arg(long)]
	no_example_event: bool,
}

impl ProjectArgs {
	/// Converts these arguments into a *ProjectRequest*.
	/// Toggles are only overridden when their flag is passed, so the Lua config can still enable them.
	fn into_request(self) -> ProjectRequest {
		let overrides = RawPluginConfig {
			name: self.name,
			id: self.id,
			package: self.package,
			version: self.plugin_version,
			description: self.description,
			author_name: self.author_name,
			author_email: self.author_email,
			website: self.website,
			java_version: self.java_version,
			server_version: self.server_version,
			include_example_command: self.no_example_command.then_some(false),
			include_example_event: self.no_example_event.then_some(false),
		};

		ProjectRequest {
			config_path: self.config,
			overrides,
			template: self.template.as_deref().map(TemplateSource::parse),
		}
	}
}

/// Entrypoint for Hytemplate.
fn main() -> ExitCode {
	let args = Cli::parse();

	let level = log_level(args.quiet, args.verbose);

	if let Err(error) = SimpleLogger::new().with_colors(true).with_level(level).env().init() {
		eprintln!("Failed to start logger: {error}");
	}

	let mut old_cwd = None;
	if let Some(ref remote) = args.remote {
		old_cwd = match env::current_dir() {
			Ok(cwd) => Some(cwd),
			Err(_) => {
				Notice::from_preset(NoticePreset::Error, "Remote")
					.add_field("Description", "Failed to get the current working directory.")
					.add_field("Suggestion", "Ensure the working directory exists and is accessible to your user.")
					.eprint();

				return ExitCode::FAILURE;
			}
		};

		if env::set_current_dir(remote).is_err() {
			Notice::from_preset(NoticePreset::Error, "Remote")
				.add_field("Description", "Failed to change working directory for the remote flag.")
				.add_field("Suggestion", "Ensure the remote directory exists and is accessible to your user.")
				.eprint();

			return ExitCode::FAILURE;
		}

		debug!("Running in '{}'.", remote.display());
	}

	let mut code = ExitCode::SUCCESS;
	if let Err(error) = run_command(args.cmd) {
		debug!("Command failed: {error:?}");
		error.conv::<Notice>().eprint();
		code = ExitCode::FAILURE;
	}

	if let Some(owd) = old_cwd {
		if let Err(error) = env::set_current_dir(owd) { error.conv::<Notice>().eprint(); }
	}

	code
}

/// Picks the log level for the '--quiet' and '--verbose' flags.
fn log_level(quiet: bool, verbose: u8) -> LevelFilter {
	match (quiet, verbose) {
		(true, _) => LevelFilter::Off,
		(false, 0) => LevelFilter::Warn,
		(false, 1) => LevelFilter::Info,
		(false, 2) => LevelFilter::Debug,
		(false, _) => LevelFilter::Trace,
	}
}

/// Runs the command specified by the passed CLI arguements.
fn run_command(cmd: Command) -> AppResult<()> {
	match cmd {
		Command::Init { force } => commands::init_config(env::current_dir()?, force),
		Command::Generate { project, output, extract, force } => commands::generate(&project.into_request(), output, extract, force),
		Command::Preview { project } => commands::preview(&project.into_request()),
	}
}
