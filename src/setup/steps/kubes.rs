use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::utils::pkg;
use crate::setup::{Observed, SetupStep};
use std::path::Path;
use tracing::info;

pub struct Kubes {
	base_url: String,
}

impl Kubes {
	pub const VERSION: &str = "v1.30";
	pub const PACKAGE_NAMES: &[&str] = &["kubelet", "kubeadm", "kubectl"];
	pub const DEPENDENCIES: &[&str] = &["apt-transport-https", "ca-certificates", "curl", "gpg"];
	pub const APT_CONFIG_PATH: &str = "/etc/apt/sources.list.d/kubernetes.list";
	pub const APT_KEY_PATH: &str = "/etc/apt/keyrings/kubernetes-apt-keyring.gpg";

	pub fn new(version: &str) -> Self {
		Self {
			base_url: format!("https://pkgs.k8s.io/core:/stable:/{version}/deb"),
		}
	}
}

impl SetupStep for Kubes {
	fn name(&self) -> &'static str {
		"Kubes"
	}

	fn check(
		&self,
		_host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		for package_name in Kubes::PACKAGE_NAMES {
			if !pkg::is_installed(exec, package_name)? {
				info!("{package_name} is not installed.");
				return Ok(Observed::Missing);
			}
		}
		info!("Kubes are installed.");
		Ok(Observed::Satisfied)
	}

	fn set(&self, _host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		info!("Installing Kubernetes tooling via apt-get.");
		pkg::update(exec)?;
		pkg::install(exec, Kubes::DEPENDENCIES)?;
		let key_command = format!(
			"mkdir -p -m 755 /etc/apt/keyrings && \
			curl -fsSL {}/Release.key | gpg --dearmor --yes -o {}",
			self.base_url,
			Kubes::APT_KEY_PATH,
		);
		exec.run(&Cmd::new("sh").arg("-c").arg(key_command))?;
		let apt_config_txt = format!(
			"deb [signed-by={}] {}/ /\n",
			Kubes::APT_KEY_PATH,
			self.base_url,
		);
		exec.write_file(Path::new(Kubes::APT_CONFIG_PATH), apt_config_txt.as_bytes())?;
		pkg::update(exec)?;
		pkg::install(exec, Kubes::PACKAGE_NAMES)?;
		pkg::hold(exec, Kubes::PACKAGE_NAMES)?;
		exec.run(&Cmd::new("systemctl").args(["enable", "--now", "kubelet"]))?;
		info!("Kubernetes tooling installed.");
		Ok(())
	}
}
