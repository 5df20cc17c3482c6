use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::utils::digest;
use crate::setup::{Observed, SetupStep};
use crate::templates::ModulesLoad;
use askama::Template;
use std::path::Path;
use tracing::info;

pub struct KernelModules;

impl KernelModules {
	pub const CONFIG_PATH: &str = "/etc/modules-load.d/k8s.conf";
	pub const MODULES: &[&str] = &["overlay", "br_netfilter"];

	pub fn config() -> Result<String, InstallError> {
		Ok(ModulesLoad {
			modules: KernelModules::MODULES,
		}
		.render()?)
	}

	pub fn is_loaded(exec: &mut dyn Executor, module_name: &str) -> Result<bool, InstallError> {
		exec.path_exists(&Path::new("/sys/module").join(module_name))
	}
}

impl SetupStep for KernelModules {
	fn name(&self) -> &'static str {
		"KernelModules"
	}

	fn check(
		&self,
		_host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let Some(config_txt) = exec.read_file(Path::new(KernelModules::CONFIG_PATH))? else {
			info!("Kernel module config is missing.");
			return Ok(Observed::Missing);
		};
		if config_txt != KernelModules::config()?.as_bytes() {
			info!("Kernel modules are misconfigured (sha256 {}).", digest::hex(&config_txt));
			return Ok(Observed::Missing);
		}
		for module_name in KernelModules::MODULES {
			if !KernelModules::is_loaded(exec, module_name)? {
				info!("Kernel module {module_name} is not loaded.");
				return Ok(Observed::Missing);
			}
		}
		info!("Kernel modules are already configured and loaded.");
		Ok(Observed::Satisfied)
	}

	fn set(&self, _host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		info!("Configuring kernel modules.");
		exec.write_file(
			Path::new(KernelModules::CONFIG_PATH),
			KernelModules::config()?.as_bytes(),
		)?;
		for module_name in KernelModules::MODULES {
			info!("Loading kernel module: {module_name}.");
			exec.run(&Cmd::new("modprobe").arg(*module_name))?;
		}
		Ok(())
	}
}
