use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::{Observed, SetupStep};
use tracing::info;

pub struct Kubeconfig;

impl SetupStep for Kubeconfig {
	fn name(&self) -> &'static str {
		"Kubeconfig"
	}

	fn check(
		&self,
		host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let Some(admin) = exec.read_file(host.admin_conf())? else {
			info!("Admin credentials are missing.");
			return Ok(Observed::Missing);
		};
		let Some(user) = exec.read_file(&host.kubeconfig())? else {
			info!("Kubeconfig for {} is missing.", host.user);
			return Ok(Observed::Missing);
		};
		if user != admin {
			info!("Kubeconfig for {} is stale.", host.user);
			return Ok(Observed::Missing);
		}
		info!("Kubeconfig set for {}.", host.user);
		Ok(Observed::Satisfied)
	}

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		let admin_conf = host.admin_conf().to_path_buf();
		let admin = exec
			.read_file(&admin_conf)?
			.ok_or(InstallError::MissingArtifact(admin_conf))?;
		let kubeconfig = host.kubeconfig();
		exec.write_file(&kubeconfig, &admin)?;
		let kube_dir = host.home.join(".kube");
		exec.run(
			&Cmd::new("chown")
				.arg("-R")
				.arg(format!("{}:", host.user))
				.arg(kube_dir.to_string_lossy()),
		)?;
		info!("Kubeconfig written to {}.", kubeconfig.display());
		Ok(())
	}
}
