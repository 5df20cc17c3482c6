use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::setup::utils::{kctl, manifest, patch};
use crate::setup::{Observed, SetupStep};
use tracing::info;

pub struct IngressController {
	manifest_url: String,
}

impl IngressController {
	pub const MANIFEST_URL: &str = concat!(
		"https://raw.githubusercontent.com/kubernetes/ingress-nginx/",
		"controller-v1.11.2/deploy/static/provider/baremetal/deploy.yaml"
	);
	pub const NAMESPACE: &str = "ingress-nginx";
	pub const DEPLOYMENT: &str = "ingress-nginx-controller";
	pub const FILE_NAME: &str = "ingress-nginx.yaml";

	pub fn new(manifest_url: &str) -> Self {
		Self {
			manifest_url: manifest_url.to_owned(),
		}
	}
}

impl SetupStep for IngressController {
	fn name(&self) -> &'static str {
		"IngressController"
	}

	fn check(
		&self,
		host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let is_installed = kctl::resource_exists(
			exec,
			host.admin_conf(),
			"deployment",
			IngressController::DEPLOYMENT,
			IngressController::NAMESPACE,
		)?;
		if is_installed {
			info!("Ingress controller is already installed.");
		} else {
			info!("Ingress controller is not installed.");
		}
		Ok(Observed::from_bool(is_installed))
	}

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		let fetched = manifest::fetch(exec, &self.manifest_url)?;
		let patched = patch::inject_host_network(&fetched)?;
		let path = manifest::stage(exec, host, IngressController::FILE_NAME, &patched)?;
		kctl::apply_manifest(exec, host.admin_conf(), &path)
	}
}
