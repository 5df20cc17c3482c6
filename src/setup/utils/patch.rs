use crate::error::InstallError;

pub const HOST_NETWORK: &str = "hostNetwork: true";
const DNS_POLICY: &str = "dnsPolicy: ClusterFirst";

/// Inserts `hostNetwork: true` after every line ending in
/// `dnsPolicy: ClusterFirst`. Lines already followed by the field are left alone.
pub fn inject_host_network(manifest: &str) -> Result<String, InstallError> {
	let lines = manifest.lines().collect::<Vec<_>>();
	let mut patched = Vec::with_capacity(lines.len() + 1);
	let mut anchors = 0;
	for (pos, line) in lines.iter().enumerate() {
		patched.push((*line).to_owned());
		if !line.trim_end().ends_with(DNS_POLICY) {
			continue;
		}
		anchors += 1;
		let already_set = lines
			.get(pos + 1)
			.is_some_and(|next| next.trim() == HOST_NETWORK);
		if !already_set {
			patched.push(format!("{}{HOST_NETWORK}", field_indent(line)));
		}
	}
	if anchors == 0 {
		return Err(InstallError::ManifestPatch(format!(
			"no line ending in '{DNS_POLICY}'"
		)));
	}
	let mut out = patched.join("\n");
	if manifest.ends_with('\n') {
		out.push('\n');
	}
	Ok(out)
}

fn field_indent(line: &str) -> String {
	let trimmed = line.trim_start();
	let indent = &line[..line.len() - trimmed.len()];
	if trimmed.starts_with("- ") {
		format!("{indent}  ")
	} else {
		indent.to_owned()
	}
}
