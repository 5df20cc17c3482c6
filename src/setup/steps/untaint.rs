use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::setup::utils::kctl;
use crate::setup::{Observed, SetupStep};
use tracing::info;

pub struct Untaint;

impl Untaint {
	pub const TAINT: &str = "node-role.kubernetes.io/control-plane:NoSchedule";
}

impl SetupStep for Untaint {
	fn name(&self) -> &'static str {
		"Untaint"
	}

	fn check(
		&self,
		host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let taints = kctl::node_taints(exec, host.admin_conf())?;
		if taints.iter().any(|taint| taint == Untaint::TAINT) {
			info!("Control plane NoSchedule taint is present.");
			Ok(Observed::Missing)
		} else {
			info!("No control plane NoSchedule taint.");
			Ok(Observed::Satisfied)
		}
	}

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		info!("Removing NoSchedule taint for control plane worker mode.");
		kctl::taint_nodes(exec, host.admin_conf(), "--all", &format!("{}-", Untaint::TAINT))
	}
}
