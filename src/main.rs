use clap::Parser;
use kubeseed::{config::Settings, context::HostContext, exec::HostExecutor, logging, setup};
use tracing::{error, info};

fn main() {
	dotenvy::dotenv().ok();
	let settings = Settings::parse();
	logging::init();
	if let Err(err) = settings.validate() {
		error!("{err}");
		std::process::exit(2);
	}
	let steps = setup::runbook(&settings);
	if settings.list {
		for (index, step) in steps.iter().enumerate() {
			println!("{:>2}. {}", index + 1, step.name());
		}
		return;
	}
	info!("Cluster bootstrap started.");
	let mut exec = HostExecutor;
	let mut host = match HostContext::detect(&mut exec, settings.manifest_dir.clone()) {
		Ok(host) => host,
		Err(err) => {
			error!("Host detection failed: {err}");
			std::process::exit(2);
		}
	};
	let report = setup::run(&steps, &mut host, &mut exec);
	match &report.status {
		setup::RunStatus::Succeeded => info!("Cluster bootstrap finished successfully."),
		setup::RunStatus::Failed(failure) => {
			error!(
				"Bootstrap halted at {failure}. \
				Fix the cause and rerun; completed steps will be skipped."
			);
		}
		setup::RunStatus::Refused(err) => error!("Bootstrap refused: {err}"),
	}
	std::process::exit(report.exit_code());
}
