use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::utils::pkg;
use crate::setup::{Observed, SetupStep};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct Containerd;

impl Containerd {
	pub const PACKAGE_NAME: &str = "containerd";
	pub const CONFIG_PATH: &str = "/etc/containerd/config.toml";
	const SYSTEMD_CGROUP: &str = "SystemdCgroup = true";

	pub fn write_default_config(exec: &mut dyn Executor) -> Result<PathBuf, InstallError> {
		info!("Generating default containerd config.");
		let output = exec.run(&Cmd::new(Containerd::PACKAGE_NAME).args(["config", "default"]))?;
		let config = enable_systemd_cgroup(&String::from_utf8(output.stdout)?);
		let config_path = PathBuf::from(Containerd::CONFIG_PATH);
		exec.write_file(&config_path, config.as_bytes())?;
		Ok(config_path)
	}

	fn is_active(exec: &mut dyn Executor) -> Result<bool, InstallError> {
		let cmd = Cmd::new("systemctl").args(["is-active", "--quiet", Containerd::PACKAGE_NAME]);
		Ok(exec.output(&cmd)?.success())
	}
}

impl SetupStep for Containerd {
	fn name(&self) -> &'static str {
		"Containerd"
	}

	fn check(
		&self,
		_host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		if !pkg::is_installed(exec, Containerd::PACKAGE_NAME)? {
			info!("Containerd is not installed.");
			return Ok(Observed::Missing);
		}
		let config = exec
			.read_to_string(Path::new(Containerd::CONFIG_PATH))?
			.unwrap_or_default();
		if !config.contains(Containerd::SYSTEMD_CGROUP) {
			info!("Containerd is not configured.");
			return Ok(Observed::Missing);
		}
		if !Containerd::is_active(exec)? {
			info!("Containerd is not active.");
			return Ok(Observed::Missing);
		}
		info!("Containerd is installed, configured and active.");
		Ok(Observed::Satisfied)
	}

	fn set(&self, _host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		pkg::update(exec)?;
		pkg::install(exec, &[Containerd::PACKAGE_NAME])?;
		Containerd::write_default_config(exec)?;
		info!("Restarting containerd service.");
		exec.run(&Cmd::new("systemctl").args(["restart", Containerd::PACKAGE_NAME]))?;
		exec.run(&Cmd::new("systemctl").args(["enable", Containerd::PACKAGE_NAME]))?;
		Ok(())
	}
}

fn enable_systemd_cgroup(config: &str) -> String {
	let mut patched = config.replace("SystemdCgroup = false", Containerd::SYSTEMD_CGROUP);
	if !patched.contains(Containerd::SYSTEMD_CGROUP) {
		// Older defaults omit the option entirely.
		patched.push_str(concat!(
			"\n[plugins.\"io.containerd.grpc.v1.cri\".containerd.runtimes.runc.options]\n",
			"  SystemdCgroup = true\n",
		));
	}
	patched
}
