#![allow(dead_code)]

use kubeseed::context::{HostContext, ADMIN_CONF};
use kubeseed::error::InstallError;
use kubeseed::exec::{Cmd, CmdOutput, Executor};
use kubeseed::setup::{Observed, SetupStep};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub fn host() -> HostContext {
	HostContext {
		user: "ops".to_owned(),
		home: PathBuf::from("/home/ops"),
		hostname: NODE_NAME.to_owned(),
		privileged: true,
		admin_conf: None,
		manifest_dir: PathBuf::from("/home/ops/kubeseed"),
	}
}

/// Records every call and keeps files in memory. Commands whose program is
/// listed in `failing` exit with status 1.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
	pub calls: Vec<String>,
	pub files: BTreeMap<PathBuf, Vec<u8>>,
	pub failing: BTreeSet<String>,
}

impl RecordingExecutor {
	pub fn commands(&self) -> Vec<&str> {
		self.calls
			.iter()
			.filter_map(|call| call.strip_prefix("run "))
			.collect()
	}
}

impl Executor for RecordingExecutor {
	fn output(&mut self, cmd: &Cmd) -> Result<CmdOutput, InstallError> {
		self.calls.push(format!("run {cmd}"));
		if self.failing.contains(cmd.program()) {
			return Ok(CmdOutput::exit(1, "simulated failure"));
		}
		Ok(CmdOutput::ok(""))
	}

	fn read_file(&mut self, path: &Path) -> Result<Option<Vec<u8>>, InstallError> {
		self.calls.push(format!("read {}", path.display()));
		Ok(self.files.get(path).cloned())
	}

	fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<(), InstallError> {
		self.calls.push(format!("write {}", path.display()));
		self.files.insert(path.to_path_buf(), contents.to_vec());
		Ok(())
	}

	fn path_exists(&mut self, path: &Path) -> Result<bool, InstallError> {
		self.calls.push(format!("exists {}", path.display()));
		Ok(self.files.contains_key(path))
	}
}

/// A step whose state is a marker file; its action runs a command named
/// after the step.
pub struct MarkerStep {
	pub name: &'static str,
	pub privileged: bool,
}

impl MarkerStep {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			privileged: true,
		}
	}

	pub fn marker(name: &str) -> PathBuf {
		Path::new("/state").join(name)
	}
}

impl SetupStep for MarkerStep {
	fn name(&self) -> &'static str {
		self.name
	}

	fn privileged(&self) -> bool {
		self.privileged
	}

	fn check(
		&self,
		_host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		Ok(Observed::from_bool(exec.path_exists(&MarkerStep::marker(self.name))?))
	}

	fn set(&self, _host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		exec.run(&Cmd::new(self.name))?;
		exec.write_file(&MarkerStep::marker(self.name), b"done")
	}
}

/// In-memory model of a Debian host, enough for the whole runbook to
/// converge and for a second run to find everything in place.
#[derive(Debug)]
pub struct SimulatedHost {
	pub commands: Vec<String>,
	pub files: BTreeMap<PathBuf, Vec<u8>>,
	pub packages: BTreeSet<String>,
	pub services: BTreeSet<String>,
	pub modules: BTreeSet<String>,
	pub resources: BTreeSet<String>,
	pub taints: Vec<String>,
	pub control_plane_nodes: BTreeSet<String>,
	/// Programs that exit 1 whatever their arguments.
	pub failing: BTreeSet<String>,
	/// Command lines, matched by prefix, that exit 1.
	pub broken: BTreeSet<String>,
	/// `kubeadm init` writes admin.conf and then dies before the node registers.
	pub init_dies_after_kubeconfig: bool,
}

pub const INGRESS_MANIFEST: &str = "\
apiVersion: apps/v1
kind: Deployment
metadata:
  name: ingress-nginx-controller
spec:
  template:
    spec:
      dnsPolicy: ClusterFirst
      containers:
      - name: controller
";

pub const FLANNEL_MANIFEST: &str = "\
apiVersion: apps/v1
kind: DaemonSet
metadata:
  name: kube-flannel-ds
  namespace: kube-flannel
";

pub const NODE_NAME: &str = "node-1";

pub const CONTROL_PLANE_TAINT: &str = "node-role.kubernetes.io/control-plane:NoSchedule";

impl SimulatedHost {
	pub fn fresh() -> Self {
		let mut files = BTreeMap::new();
		files.insert(
			PathBuf::from("/proc/swaps"),
			b"Filename\tType\tSize\tUsed\tPriority\n/swap.img\tfile\t2097148\t0\t-2\n".to_vec(),
		);
		files.insert(
			PathBuf::from("/etc/fstab"),
			b"UUID=1234 / ext4 defaults 0 1\n/swap.img none swap sw 0 0\n".to_vec(),
		);
		Self {
			commands: Vec::new(),
			files,
			packages: BTreeSet::new(),
			services: BTreeSet::new(),
			modules: BTreeSet::new(),
			resources: BTreeSet::new(),
			taints: Vec::new(),
			control_plane_nodes: BTreeSet::new(),
			failing: BTreeSet::new(),
			broken: BTreeSet::new(),
			init_dies_after_kubeconfig: false,
		}
	}

	pub fn ran(&self, prefix: &str) -> bool {
		self.commands.iter().any(|cmd| cmd.starts_with(prefix))
	}

	pub fn position(&self, prefix: &str) -> Option<usize> {
		self.commands.iter().position(|cmd| cmd.starts_with(prefix))
	}

	fn kubectl(&mut self, args: &[&str]) -> CmdOutput {
		match args {
			["get", "nodes", "-o", _] => {
				let mut out = self.taints.join("\n");
				out.push('\n');
				CmdOutput::ok(out)
			}
			["get", "node", node, "--no-headers", "--show-labels"] => {
				if self.control_plane_nodes.contains(*node) {
					CmdOutput::ok(format!(
						"{node}   Ready   control-plane   1m   v1.30.4   \
						node-role.kubernetes.io/control-plane=,kubernetes.io/hostname={node}"
					))
				} else {
					CmdOutput::exit(1, format!("nodes \"{node}\" not found"))
				}
			}
			["taint", "nodes", "--all", taint] => {
				let taint = taint.trim_end_matches('-');
				self.taints.retain(|existing| existing != taint);
				CmdOutput::ok("node/node-1 untainted")
			}
			["get", kind, name, "--namespace", namespace, "-o", "name"] => {
				if self.resources.contains(&format!("{kind}/{namespace}/{name}")) {
					CmdOutput::ok(format!("{kind}/{name}"))
				} else {
					CmdOutput::exit(1, "Error from server (NotFound)")
				}
			}
			["apply", "-f", path] => {
				let file_name = Path::new(path).file_name().and_then(|name| name.to_str());
				let resource = match file_name {
					Some("pod-network.yaml") => "daemonset/kube-flannel/kube-flannel-ds",
					Some("ingress-nginx.yaml") => {
						"deployment/ingress-nginx/ingress-nginx-controller"
					}
					Some("hello-world.yaml") => "deployment/default/hello-world",
					_ => return CmdOutput::exit(1, "unknown manifest"),
				};
				if !self.files.contains_key(Path::new(path)) {
					return CmdOutput::exit(1, "the path does not exist");
				}
				self.resources.insert(resource.to_owned());
				CmdOutput::ok("created")
			}
			_ => CmdOutput::exit(1, "unexpected kubectl invocation"),
		}
	}
}

impl Executor for SimulatedHost {
	fn output(&mut self, cmd: &Cmd) -> Result<CmdOutput, InstallError> {
		let line = cmd.to_string();
		self.commands.push(line.clone());
		if self.failing.contains(cmd.program())
			|| self.broken.iter().any(|prefix| line.starts_with(prefix.as_str()))
		{
			return Ok(CmdOutput::exit(1, format!("{} exploded", cmd.program())));
		}
		let args = cmd.get_args().iter().map(String::as_str).collect::<Vec<_>>();
		let output = match (cmd.program(), args.as_slice()) {
			("swapoff", _) => {
				self.files.insert(
					PathBuf::from("/proc/swaps"),
					b"Filename\tType\tSize\tUsed\tPriority\n".to_vec(),
				);
				CmdOutput::ok("")
			}
			("modprobe", [module]) => {
				self.modules.insert((*module).to_owned());
				CmdOutput::ok("")
			}
			("dpkg-query", [.., package]) => {
				if self.packages.contains(*package) {
					CmdOutput::ok("install ok installed")
				} else {
					CmdOutput::exit(1, format!("dpkg-query: no packages found matching {package}"))
				}
			}
			("apt-get", ["install", rest @ ..]) => {
				for package in rest.iter().filter(|arg| !arg.starts_with('-')) {
					self.packages.insert((*package).to_owned());
				}
				CmdOutput::ok("")
			}
			("containerd", ["config", "default"]) => {
				CmdOutput::ok("version = 2\n[options]\n  SystemdCgroup = false\n")
			}
			("systemctl", ["is-active", "--quiet", service]) => {
				if self.services.contains(*service) {
					CmdOutput::ok("")
				} else {
					CmdOutput::exit(3, "")
				}
			}
			("systemctl", [_, .., service]) => {
				self.services.insert((*service).to_owned());
				CmdOutput::ok("")
			}
			("kubeadm", ["init", ..]) => {
				if self.files.contains_key(Path::new(ADMIN_CONF)) {
					return Ok(CmdOutput::exit(
						1,
						"[ERROR FileAvailable--etc-kubernetes-admin.conf]: already exists",
					));
				}
				self.files.insert(
					PathBuf::from(ADMIN_CONF),
					b"apiVersion: v1\nkind: Config\n".to_vec(),
				);
				if self.init_dies_after_kubeconfig {
					return Ok(CmdOutput::exit(1, "timed out waiting for the condition"));
				}
				self.control_plane_nodes.insert(NODE_NAME.to_owned());
				self.taints.push(CONTROL_PLANE_TAINT.to_owned());
				CmdOutput::ok("Your Kubernetes control-plane has initialized successfully!")
			}
			("kubeadm", ["reset", "--force"]) => {
				self.files.remove(Path::new(ADMIN_CONF));
				self.control_plane_nodes.clear();
				self.taints.clear();
				CmdOutput::ok("")
			}
			("kubectl", ["--kubeconfig", _, rest @ ..]) => self.kubectl(rest),
			("curl", ["-fsSL", url]) => {
				if url.contains("ingress-nginx") {
					CmdOutput::ok(INGRESS_MANIFEST)
				} else {
					CmdOutput::ok(FLANNEL_MANIFEST)
				}
			}
			("apt-get" | "apt-mark" | "sysctl" | "sh" | "chown", _) => CmdOutput::ok(""),
			_ => CmdOutput::exit(127, format!("{}: command not found", cmd.program())),
		};
		Ok(output)
	}

	fn read_file(&mut self, path: &Path) -> Result<Option<Vec<u8>>, InstallError> {
		Ok(self.files.get(path).cloned())
	}

	fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<(), InstallError> {
		self.files.insert(path.to_path_buf(), contents.to_vec());
		Ok(())
	}

	fn path_exists(&mut self, path: &Path) -> Result<bool, InstallError> {
		if let Ok(module) = path.strip_prefix("/sys/module") {
			return Ok(self.modules.contains(&*module.to_string_lossy()));
		}
		Ok(self.files.contains_key(path))
	}
}
