use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::utils::digest;
use std::path::PathBuf;
use tracing::info;

pub fn fetch(exec: &mut dyn Executor, url: &str) -> Result<String, InstallError> {
	info!("Fetching manifest {url}.");
	let output = exec.run(&Cmd::new("curl").args(["-fsSL", url]))?;
	Ok(String::from_utf8(output.stdout)?)
}

pub fn stage(
	exec: &mut dyn Executor,
	host: &HostContext,
	file_name: &str,
	contents: &str,
) -> Result<PathBuf, InstallError> {
	let path = host.manifest_dir.join(file_name);
	exec.write_file(&path, contents.as_bytes())?;
	info!(
		"Staged {} (sha256 {}).",
		path.display(),
		digest::hex(contents.as_bytes())
	);
	Ok(path)
}
