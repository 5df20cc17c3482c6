use crate::error::InstallError;
use std::{
	fmt, fs,
	io::ErrorKind,
	path::Path,
	process::{Command, Stdio},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
	program: String,
	args: Vec<String>,
	envs: Vec<(String, String)>,
}

impl Cmd {
	pub fn new(program: impl Into<String>) -> Self {
		Self {
			program: program.into(),
			args: Vec::new(),
			envs: Vec::new(),
		}
	}

	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.envs.push((key.into(), value.into()));
		self
	}

	pub fn program(&self) -> &str {
		&self.program
	}

	pub fn get_args(&self) -> &[String] {
		&self.args
	}
}

impl fmt::Display for Cmd {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.program)?;
		for arg in &self.args {
			write!(f, " {arg}")?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmdOutput {
	/// `None` when the process was killed by a signal.
	pub code: Option<i32>,
	pub stdout: Vec<u8>,
	pub stderr: Vec<u8>,
}

impl CmdOutput {
	pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
		Self {
			code: Some(0),
			stdout: stdout.into(),
			stderr: Vec::new(),
		}
	}

	pub fn exit(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
		Self {
			code: Some(code),
			stdout: Vec::new(),
			stderr: stderr.into(),
		}
	}

	pub fn success(&self) -> bool {
		self.code == Some(0)
	}

	pub fn stdout_trimmed(&self) -> String {
		String::from_utf8_lossy(&self.stdout).trim().to_owned()
	}

	pub fn stderr_trimmed(&self) -> Option<String> {
		let stderr = String::from_utf8_lossy(&self.stderr).trim().to_owned();
		if stderr.is_empty() {
			None
		} else {
			Some(stderr)
		}
	}
}

pub trait Executor {
	/// Runs `cmd` to completion. Only a failure to launch is an error; the
	/// exit code is left to the caller.
	fn output(&mut self, cmd: &Cmd) -> Result<CmdOutput, InstallError>;

	fn read_file(&mut self, path: &Path) -> Result<Option<Vec<u8>>, InstallError>;

	fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<(), InstallError>;

	fn path_exists(&mut self, path: &Path) -> Result<bool, InstallError>;

	/// Runs `cmd` and turns a non-zero exit into [`InstallError::CommandFailed`].
	fn run(&mut self, cmd: &Cmd) -> Result<CmdOutput, InstallError> {
		let output = self.output(cmd)?;
		if !output.success() {
			return Err(InstallError::CommandFailed {
				cmd: cmd.to_string(),
				code: output.code,
				stderr: output.stderr_trimmed(),
			});
		}
		Ok(output)
	}

	fn read_to_string(&mut self, path: &Path) -> Result<Option<String>, InstallError> {
		Ok(self
			.read_file(path)?
			.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HostExecutor;

impl Executor for HostExecutor {
	fn output(&mut self, cmd: &Cmd) -> Result<CmdOutput, InstallError> {
		debug!("Running: {cmd}");
		let launch_err = |source| InstallError::CommandLaunch {
			cmd: cmd.to_string(),
			source,
		};
		let output = Command::new(&cmd.program)
			.args(&cmd.args)
			.envs(cmd.envs.iter().map(|(key, value)| (key, value)))
			.stdin(Stdio::null())
			.output()
			.map_err(launch_err)?;
		Ok(CmdOutput {
			code: output.status.code(),
			stdout: output.stdout,
			stderr: output.stderr,
		})
	}

	fn read_file(&mut self, path: &Path) -> Result<Option<Vec<u8>>, InstallError> {
		match fs::read(path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<(), InstallError> {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		debug!("Writing {}.", path.display());
		fs::write(path, contents)?;
		Ok(())
	}

	fn path_exists(&mut self, path: &Path) -> Result<bool, InstallError> {
		Ok(path.try_exists()?)
	}
}
