use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::setup::utils::{kctl, manifest};
use crate::setup::{Observed, SetupStep};
use crate::templates::Workload;
use askama::Template;
use tracing::info;

pub struct SampleWorkload {
	host: Option<String>,
	service_port: u16,
}

impl SampleWorkload {
	pub const NAME: &str = "hello-world";
	pub const NAMESPACE: &str = "default";
	pub const IMAGE: &str = "gcr.io/google-samples/hello-app:1.0";
	pub const CONTAINER_PORT: u16 = 8080;
	pub const SERVICE_PORT: u16 = 80;
	pub const INGRESS_CLASS: &str = "nginx";
	pub const FILE_NAME: &str = "hello-world.yaml";

	pub fn new(host: Option<String>, service_port: u16) -> Self {
		Self { host, service_port }
	}

	pub fn manifest(&self) -> Result<String, InstallError> {
		Ok(Workload {
			name: SampleWorkload::NAME,
			namespace: SampleWorkload::NAMESPACE,
			image: SampleWorkload::IMAGE,
			container_port: SampleWorkload::CONTAINER_PORT,
			service_port: self.service_port,
			ingress_class: SampleWorkload::INGRESS_CLASS,
			host: self.host.as_deref(),
		}
		.render()?)
	}
}

impl SetupStep for SampleWorkload {
	fn name(&self) -> &'static str {
		"SampleWorkload"
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
			SampleWorkload::NAME,
			SampleWorkload::NAMESPACE,
		)?;
		if is_installed {
			info!("Sample workload is already deployed.");
		} else {
			info!("Sample workload is not deployed.");
		}
		Ok(Observed::from_bool(is_installed))
	}

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		let path = manifest::stage(exec, host, SampleWorkload::FILE_NAME, &self.manifest()?)?;
		kctl::apply_manifest(exec, host.admin_conf(), &path)
	}
}
