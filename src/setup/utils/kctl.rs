use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use std::path::Path;
use tracing::info;

fn kubectl<'a>(kubeconfig: &Path, args: impl IntoIterator<Item = &'a str>) -> Cmd {
	Cmd::new("kubectl")
		.arg("--kubeconfig")
		.arg(kubeconfig.to_string_lossy())
		.args(args)
}

pub fn apply_manifest(
	exec: &mut dyn Executor,
	kubeconfig: &Path,
	manifest: &Path,
) -> Result<(), InstallError> {
	info!("Applying {}.", manifest.display());
	let manifest = manifest.to_string_lossy();
	exec.run(&kubectl(kubeconfig, ["apply", "-f", &*manifest]))?;
	Ok(())
}

pub fn taint_nodes(
	exec: &mut dyn Executor,
	kubeconfig: &Path,
	selector: &str,
	taint: &str,
) -> Result<(), InstallError> {
	exec.run(&kubectl(kubeconfig, ["taint", "nodes", selector, taint]))?;
	Ok(())
}

/// Any failure to find the resource, including an unreachable API server,
/// reads as absent.
pub fn resource_exists(
	exec: &mut dyn Executor,
	kubeconfig: &Path,
	kind: &str,
	name: &str,
	namespace: &str,
) -> Result<bool, InstallError> {
	let output = exec.output(&kubectl(
		kubeconfig,
		["get", kind, name, "--namespace", namespace, "-o", "name"],
	))?;
	Ok(output.success())
}

/// Labels of `node` as printed by `--show-labels`, or `None` when the API
/// does not know the node.
pub fn node_labels(
	exec: &mut dyn Executor,
	kubeconfig: &Path,
	node: &str,
) -> Result<Option<String>, InstallError> {
	let output = exec.output(&kubectl(
		kubeconfig,
		["get", "node", node, "--no-headers", "--show-labels"],
	))?;
	if !output.success() {
		return Ok(None);
	}
	Ok(Some(output.stdout_trimmed()))
}

pub fn node_taints(
	exec: &mut dyn Executor,
	kubeconfig: &Path,
) -> Result<Vec<String>, InstallError> {
	let output = exec.run(&kubectl(
		kubeconfig,
		[
			"get",
			"nodes",
			"-o",
			r#"jsonpath={range .items[*].spec.taints[*]}{.key}:{.effect}{"\n"}{end}"#,
		],
	))?;
	Ok(parse_taints(&output.stdout_trimmed()))
}

fn parse_taints(jsonpath_out: &str) -> Vec<String> {
	jsonpath_out
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect()
}
