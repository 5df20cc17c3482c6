use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use tracing::info;

pub fn is_installed(exec: &mut dyn Executor, package_name: &str) -> Result<bool, InstallError> {
	let output = exec.output(&Cmd::new("dpkg-query").args(["-W", "-f=${Status}", package_name]))?;
	if !output.success() {
		return Ok(false);
	}
	let status = output.stdout_trimmed();
	Ok(status == "install ok installed" || status == "hold ok installed")
}

pub fn update(exec: &mut dyn Executor) -> Result<(), InstallError> {
	exec.run(&Cmd::new("apt-get").arg("update"))?;
	Ok(())
}

pub fn install(exec: &mut dyn Executor, package_names: &[&str]) -> Result<(), InstallError> {
	info!("Installing packages: {}.", package_names.join(", "));
	exec.run(
		&Cmd::new("apt-get")
			.args(["install", "-y", "--no-install-recommends"])
			.args(package_names.iter().copied())
			.env("DEBIAN_FRONTEND", "noninteractive"),
	)?;
	Ok(())
}

pub fn hold(exec: &mut dyn Executor, package_names: &[&str]) -> Result<(), InstallError> {
	exec.run(&Cmd::new("apt-mark").arg("hold").args(package_names.iter().copied()))?;
	Ok(())
}
