use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::setup::utils::{kctl, manifest};
use crate::setup::{Observed, SetupStep};
use tracing::info;

pub struct PodNetwork {
	manifest_url: String,
}

impl PodNetwork {
	pub const MANIFEST_URL: &str =
		"https://github.com/flannel-io/flannel/releases/latest/download/kube-flannel.yml";
	pub const NAMESPACE: &str = "kube-flannel";
	pub const DAEMONSET: &str = "kube-flannel-ds";
	pub const FILE_NAME: &str = "pod-network.yaml";

	pub fn new(manifest_url: &str) -> Self {
		Self {
			manifest_url: manifest_url.to_owned(),
		}
	}
}

impl SetupStep for PodNetwork {
	fn name(&self) -> &'static str {
		"PodNetwork"
	}

	fn check(
		&self,
		host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let is_installed = kctl::resource_exists(
			exec,
			host.admin_conf(),
			"daemonset",
			PodNetwork::DAEMONSET,
			PodNetwork::NAMESPACE,
		)?;
		if is_installed {
			info!("Pod network add-on is already installed.");
		} else {
			info!("Pod network add-on is not installed.");
		}
		Ok(Observed::from_bool(is_installed))
	}

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		let contents = manifest::fetch(exec, &self.manifest_url)?;
		let path = manifest::stage(exec, host, PodNetwork::FILE_NAME, &contents)?;
		kctl::apply_manifest(exec, host.admin_conf(), &path)
	}
}
