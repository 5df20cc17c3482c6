use crate::context::ADMIN_CONF;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use std::path::PathBuf;
use tracing::info;

pub fn init_cluster(exec: &mut dyn Executor, pod_cidr: &str) -> Result<PathBuf, InstallError> {
	info!("Kubeadm init with pod network {pod_cidr}.");
	exec.run(
		&Cmd::new("kubeadm")
			.arg("init")
			.args(["--pod-network-cidr", pod_cidr]),
	)?;
	let admin_conf = PathBuf::from(ADMIN_CONF);
	if !exec.path_exists(&admin_conf)? {
		return Err(InstallError::MissingArtifact(admin_conf));
	}
	info!("Kubeadm initialized.");
	Ok(admin_conf)
}

/// Clears what a previous, interrupted `kubeadm init` left behind.
pub fn reset(exec: &mut dyn Executor) -> Result<(), InstallError> {
	info!("Resetting partially initialized control plane.");
	exec.run(&Cmd::new("kubeadm").args(["reset", "--force"]))?;
	Ok(())
}
