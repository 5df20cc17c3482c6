use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use std::{
	env,
	path::{Path, PathBuf},
};
use tracing::info;

pub const ADMIN_CONF: &str = "/etc/kubernetes/admin.conf";

#[derive(Debug, Clone)]
pub struct HostContext {
	pub user: String,
	pub home: PathBuf,
	pub hostname: String,
	pub privileged: bool,
	/// Admin credentials discovered by the cluster init step.
	pub admin_conf: Option<PathBuf>,
	pub manifest_dir: PathBuf,
}

impl HostContext {
	pub fn detect(
		exec: &mut dyn Executor,
		manifest_dir: Option<PathBuf>,
	) -> Result<Self, InstallError> {
		let user = env::var("SUDO_USER")
			.or_else(|_| env::var("USER"))
			.map_err(|_| InstallError::Config("cannot resolve the invoking user".to_owned()))?;
		let home = exec
			.run(&Cmd::new("getent").args(["passwd", user.as_str()]))?
			.stdout_trimmed()
			.split(':')
			.nth(5)
			.filter(|home| !home.is_empty())
			.map(PathBuf::from)
			.ok_or_else(|| InstallError::Config(format!("no home directory for {user}")))?;
		let hostname = exec.run(&Cmd::new("hostname"))?.stdout_trimmed();
		let privileged = exec.run(&Cmd::new("id").arg("-u"))?.stdout_trimmed() == "0";
		let manifest_dir = manifest_dir.unwrap_or_else(|| home.join("kubeseed"));
		info!("Host {hostname}: user {user}, home {}, privileged {privileged}.", home.display());
		Ok(Self {
			user,
			home,
			hostname,
			privileged,
			admin_conf: None,
			manifest_dir,
		})
	}

	/// Falls back to the well-known path when an earlier run created it.
	pub fn admin_conf(&self) -> &Path {
		self.admin_conf
			.as_deref()
			.unwrap_or_else(|| Path::new(ADMIN_CONF))
	}

	pub fn kubeconfig(&self) -> PathBuf {
		self.home.join(".kube").join("config")
	}
}
