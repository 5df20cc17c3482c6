mod report;
pub mod steps;
pub mod utils;

pub use report::{RunReport, RunStatus, StepFailure, StepOutcome, StepRecord};

use crate::config::Settings;
use crate::context::HostContext;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::setup::steps::{
	Containerd, ControlPlane, DisableSwap, IngressController, KernelModules, Kubeconfig, Kubes,
	PodNetwork, SampleWorkload, Sysctl, Untaint,
};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
	Satisfied,
	Missing,
}

impl Observed {
	pub fn from_bool(satisfied: bool) -> Self {
		if satisfied {
			Observed::Satisfied
		} else {
			Observed::Missing
		}
	}
}

pub trait SetupStep {
	fn name(&self) -> &'static str;

	fn privileged(&self) -> bool {
		true
	}

	/// Precondition: is the host already in the state this step produces?
	fn check(&self, host: &HostContext, exec: &mut dyn Executor)
		-> Result<Observed, InstallError>;

	fn set(&self, host: &mut HostContext, exec: &mut dyn Executor) -> Result<(), InstallError>;

	/// Postcondition, evaluated after `set`.
	fn verify(
		&self,
		host: &HostContext,
		exec: &mut dyn Executor,
	) -> Result<Observed, InstallError> {
		self.check(host, exec)
	}
}

pub fn runbook(settings: &Settings) -> Vec<Box<dyn SetupStep>> {
	vec![
		Box::new(DisableSwap),
		Box::new(KernelModules),
		Box::new(Sysctl),
		Box::new(Containerd),
		Box::new(Kubes::new(&settings.kube_version)),
		Box::new(ControlPlane::new(&settings.pod_cidr)),
		Box::new(Kubeconfig),
		Box::new(Untaint),
		Box::new(PodNetwork::new(&settings.pod_network_manifest)),
		Box::new(IngressController::new(&settings.ingress_manifest)),
		Box::new(SampleWorkload::new(
			settings.workload_host.clone(),
			settings.workload_port,
		)),
	]
}

/// Runs `steps` in order, stopping at the first failure.
pub fn run(
	steps: &[Box<dyn SetupStep>],
	host: &mut HostContext,
	exec: &mut dyn Executor,
) -> RunReport {
	if !host.privileged {
		if let Some(step) = steps.iter().find(|step| step.privileged()) {
			error!("Refusing to run: {} needs root.", step.name());
			return RunReport {
				records: Vec::new(),
				status: RunStatus::Refused(InstallError::Privilege { step: step.name() }),
			};
		}
	}
	let total = steps.len();
	let mut records = Vec::with_capacity(total);
	for (index, step) in steps.iter().enumerate() {
		let number = index + 1;
		let name = step.name();
		info!("[{number}/{total}] {name}: checking.");
		let observed = step.check(host, exec).unwrap_or_else(|err| {
			warn!(
				"[{number}/{total}] {name}: precondition check failed, assuming unsatisfied: {err}"
			);
			Observed::Missing
		});
		if observed == Observed::Satisfied {
			info!("[{number}/{total}] {name}: already satisfied.");
			records.push(StepRecord {
				number,
				name,
				outcome: StepOutcome::AlreadySatisfied,
			});
			continue;
		}
		info!("[{number}/{total}] {name}: applying.");
		let applied = step
			.set(host, exec)
			.and_then(|()| step.verify(host, exec))
			.and_then(|observed| match observed {
				Observed::Satisfied => Ok(()),
				Observed::Missing => Err(InstallError::StepFailed { step: name }),
			});
		if let Err(err) = applied {
			error!("[{number}/{total}] {name}: failed: {err}");
			return RunReport {
				records,
				status: RunStatus::Failed(StepFailure {
					number,
					step: name,
					error: err,
				}),
			};
		}
		info!("[{number}/{total}] {name}: applied.");
		records.push(StepRecord {
			number,
			name,
			outcome: StepOutcome::Applied,
		});
	}
	let report = RunReport {
		records,
		status: RunStatus::Succeeded,
	};
	info!(
		"All {total} steps complete ({} applied, {} already satisfied).",
		report.count(StepOutcome::Applied),
		report.count(StepOutcome::AlreadySatisfied),
	);
	report
}
