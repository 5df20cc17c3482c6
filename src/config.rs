use crate::error::InstallError;
use crate::setup::steps::{ControlPlane, IngressController, Kubes, PodNetwork, SampleWorkload};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kubeseed")]
#[command(about = "Bootstrap a single-node Kubernetes cluster, idempotently")]
pub struct Settings {
	/// CIDR handed to `kubeadm init` and expected by the pod network add-on.
	#[arg(long, env = "KUBESEED_POD_CIDR", default_value = ControlPlane::POD_CIDR)]
	pub pod_cidr: String,

	/// Manifest URL of the pod network add-on.
	#[arg(long, env = "KUBESEED_POD_NETWORK_MANIFEST", default_value = PodNetwork::MANIFEST_URL)]
	pub pod_network_manifest: String,

	/// Manifest URL of the ingress controller.
	#[arg(long, env = "KUBESEED_INGRESS_MANIFEST", default_value = IngressController::MANIFEST_URL)]
	pub ingress_manifest: String,

	/// Kubernetes minor release whose package repository is used, e.g. v1.30.
	#[arg(long, env = "KUBESEED_KUBE_VERSION", default_value = Kubes::VERSION)]
	pub kube_version: String,

	/// Directory manifests are staged in before being applied [default: ~/kubeseed].
	#[arg(long, env = "KUBESEED_MANIFEST_DIR")]
	pub manifest_dir: Option<PathBuf>,

	/// Host name the sample workload's ingress rule matches [default: any host].
	#[arg(long, env = "KUBESEED_WORKLOAD_HOST")]
	pub workload_host: Option<String>,

	/// Service port of the sample workload.
	#[arg(long, env = "KUBESEED_WORKLOAD_PORT", default_value_t = SampleWorkload::SERVICE_PORT)]
	pub workload_port: u16,

	/// Print the step plan and exit.
	#[arg(long)]
	pub list: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			pod_cidr: ControlPlane::POD_CIDR.to_owned(),
			pod_network_manifest: PodNetwork::MANIFEST_URL.to_owned(),
			ingress_manifest: IngressController::MANIFEST_URL.to_owned(),
			kube_version: Kubes::VERSION.to_owned(),
			manifest_dir: None,
			workload_host: None,
			workload_port: SampleWorkload::SERVICE_PORT,
			list: false,
		}
	}
}

impl Settings {
	pub fn validate(&self) -> Result<(), InstallError> {
		let Some((addr, prefix)) = self.pod_cidr.split_once('/') else {
			return Err(InstallError::Config(format!(
				"pod CIDR '{}' has no prefix length",
				self.pod_cidr
			)));
		};
		let valid_prefix = prefix.parse::<u8>().is_ok_and(|len| len <= 32);
		if addr.parse::<std::net::Ipv4Addr>().is_err() || !valid_prefix {
			return Err(InstallError::Config(format!(
				"pod CIDR '{}' is not an IPv4 network",
				self.pod_cidr
			)));
		}
		if !self.kube_version.starts_with('v') {
			return Err(InstallError::Config(format!(
				"kube version '{}' must look like v1.30",
				self.kube_version
			)));
		}
		if self.workload_port == 0 {
			return Err(InstallError::Config("workload port must be non-zero".to_owned()));
		}
		Ok(())
	}
}
