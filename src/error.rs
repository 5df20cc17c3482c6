use std::{io, path::PathBuf, string::FromUtf8Error};

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
	#[error("I/O error: {0}.")]
	Io(#[from] io::Error),

	#[error("Failed to execute command '{cmd}': {source}")]
	CommandLaunch {
		cmd: String,
		#[source]
		source: io::Error,
	},

	#[error("Command failed: {cmd} ({}).", describe_exit(.code, .stderr))]
	CommandFailed {
		cmd: String,
		code: Option<i32>,
		stderr: Option<String>,
	},

	#[error("Step '{step}' failed after attempt to set it.")]
	StepFailed { step: &'static str },

	#[error("Step '{step}' requires root privileges; rerun with sudo.")]
	Privilege { step: &'static str },

	#[error("Expected artifact is missing: {}.", .0.display())]
	MissingArtifact(PathBuf),

	#[error("Manifest patch failed: {0}.")]
	ManifestPatch(String),

	#[error("Template error: {0}.")]
	Template(#[from] askama::Error),

	#[error("Invalid configuration: {0}.")]
	Config(String),

	#[error("String error: {0}.")]
	StringError(#[from] FromUtf8Error),
}

fn describe_exit(code: &Option<i32>, stderr: &Option<String>) -> String {
	let code = match code {
		Some(code) => format!("exit code {code}"),
		None => "terminated by signal".to_owned(),
	};
	match stderr {
		Some(stderr) => format!("{code}: {stderr}"),
		None => code,
	}
}
