use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::utils::digest;
use crate::setup::{Observed, SetupStep};
use crate::templates::{SysctlConf, SysctlSetting};
use askama::Template;
use std::path::Path;
use tracing::info;

pub struct Sysctl;

impl Sysctl {
	pub const CONFIG_PATH: &str = "/etc/sysctl.d/k8s.conf";
	pub const SETTINGS: &[SysctlSetting<'static>] = &[
		SysctlSetting {
			key: "net.bridge.bridge-nf-call-iptables",
			value: "1",
		},
		SysctlSetting {
			key: "net.bridge.bridge-nf-call-ip6tables",
			value: "1",
		},
		SysctlSetting {
			key: "net.ipv4.ip_forward",
			value: "1",
		},
	];

	pub fn config() -> Result<String, InstallError> {
		Ok(SysctlConf {
			settings: Sysctl::SETTINGS,
		}
		.render()?)
	}
}

impl SetupStep for Sysctl {
	fn name(&self) -> &'static str {
		"Sysctl"
	}

	fn check(
		&self,
		_host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let Some(config_txt) = exec.read_file(Path::new(Sysctl::CONFIG_PATH))? else {
			info!("Sysctl config is missing.");
			return Ok(Observed::Missing);
		};
		if config_txt != Sysctl::config()?.as_bytes() {
			info!("Sysctl is misconfigured (sha256 {}).", digest::hex(&config_txt));
			return Ok(Observed::Missing);
		}
		info!("Sysctl already configured.");
		Ok(Observed::Satisfied)
	}

	fn set(&self, _host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		info!("Configuring sysctl.");
		exec.write_file(Path::new(Sysctl::CONFIG_PATH), Sysctl::config()?.as_bytes())?;
		exec.run(&Cmd::new("sysctl").arg("--system"))?;
		info!("Sysctl has been configured.");
		Ok(())
	}
}
