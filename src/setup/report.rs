use crate::error::InstallError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
	AlreadySatisfied,
	Applied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
	/// 1-based position in the sequence.
	pub number: usize,
	pub name: &'static str,
	pub outcome: StepOutcome,
}

#[derive(Debug)]
pub struct StepFailure {
	pub number: usize,
	pub step: &'static str,
	pub error: InstallError,
}

impl fmt::Display for StepFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "step {} ({}) failed: {}", self.number, self.step, self.error)
	}
}

#[derive(Debug)]
pub enum RunStatus {
	Succeeded,
	Failed(StepFailure),
	Refused(InstallError),
}

#[derive(Debug)]
pub struct RunReport {
	pub records: Vec<StepRecord>,
	pub status: RunStatus,
}

impl RunReport {
	pub fn is_success(&self) -> bool {
		matches!(self.status, RunStatus::Succeeded)
	}

	pub fn failure(&self) -> Option<&StepFailure> {
		match &self.status {
			RunStatus::Failed(failure) => Some(failure),
			_ => None,
		}
	}

	pub fn outcome(&self, name: &str) -> Option<StepOutcome> {
		self.records
			.iter()
			.find(|record| record.name == name)
			.map(|record| record.outcome)
	}

	pub fn count(&self, outcome: StepOutcome) -> usize {
		self.records
			.iter()
			.filter(|record| record.outcome == outcome)
			.count()
	}

	pub fn exit_code(&self) -> i32 {
		match self.status {
			RunStatus::Succeeded => 0,
			RunStatus::Failed(_) => 1,
			RunStatus::Refused(_) => 2,
		}
	}
}
