use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::setup::utils::{kctl, kubeadm};
use crate::setup::{Observed, SetupStep};
use tracing::info;

pub struct ControlPlane {
	pod_cidr: String,
}

impl ControlPlane {
	/// Flannel's default network.
	pub const POD_CIDR: &str = "10.244.0.0/16";
	pub const LABEL: &str = "node-role.kubernetes.io/control-plane=";

	pub fn new(pod_cidr: &str) -> Self {
		Self {
			pod_cidr: pod_cidr.to_owned(),
		}
	}
}

impl SetupStep for ControlPlane {
	fn name(&self) -> &'static str {
		"ControlPlane"
	}

	fn check(
		&self,
		host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		if !exec.path_exists(host.admin_conf())? {
			info!("ControlPlane is not initialized.");
			return Ok(Observed::Missing);
		}
		let labels = kctl::node_labels(exec, host.admin_conf(), &host.hostname)?;
		if labels.is_some_and(|labels| labels.contains(ControlPlane::LABEL)) {
			info!("ControlPlane is already set up.");
			Ok(Observed::Satisfied)
		} else {
			info!(
				"Admin credentials exist but {} is not a control plane node.",
				host.hostname
			);
			Ok(Observed::Missing)
		}
	}

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		if exec.path_exists(host.admin_conf())? {
			kubeadm::reset(exec)?;
		}
		let admin_conf = kubeadm::init_cluster(exec, &self.pod_cidr)?;
		host.admin_conf = Some(admin_conf);
		Ok(())
	}
}
