use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::{Cmd, Executor};
use crate::setup::{Observed, SetupStep};
use std::path::Path;
use tracing::info;

pub struct DisableSwap;

impl DisableSwap {
	pub const SWAPS_PATH: &str = "/proc/swaps";
	pub const FSTAB_PATH: &str = "/etc/fstab";
}

impl SetupStep for DisableSwap {
	fn name(&self) -> &'static str {
		"DisableSwap"
	}

	fn check(
		&self,
		_host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		let swaps = exec
			.read_to_string(Path::new(DisableSwap::SWAPS_PATH))?
			.unwrap_or_default();
		if swaps.lines().count() > 1 {
			info!("Swap is enabled.");
			return Ok(Observed::Missing);
		}
		let fstab = exec
			.read_to_string(Path::new(DisableSwap::FSTAB_PATH))?
			.unwrap_or_default();
		if fstab.lines().any(is_swap_entry) {
			info!("Swap is enabled in fstab.");
			return Ok(Observed::Missing);
		}
		info!("Swap is disabled.");
		Ok(Observed::Satisfied)
	}

	fn set(&self, _host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError> {
		exec.run(&Cmd::new("swapoff").arg("-a"))?;
		let fstab_path = Path::new(DisableSwap::FSTAB_PATH);
		let Some(original) = exec.read_to_string(fstab_path)? else {
			return Ok(());
		};
		let cleaned = comment_out_swap(&original);
		if cleaned != original {
			info!("Commenting out swap entries in {}.", DisableSwap::FSTAB_PATH);
			exec.write_file(fstab_path, cleaned.as_bytes())?;
		}
		Ok(())
	}
}

fn is_swap_entry(line: &str) -> bool {
	!line.trim_start().starts_with('#') && line.split_whitespace().nth(2) == Some("swap")
}

fn comment_out_swap(fstab: &str) -> String {
	let mut cleaned = fstab
		.lines()
		.map(|line| {
			if is_swap_entry(line) {
				format!("#{line}")
			} else {
				line.to_owned()
			}
		})
		.collect::<Vec<_>>()
		.join("\n");
	if fstab.ends_with('\n') {
		cleaned.push('\n');
	}
	cleaned
}
