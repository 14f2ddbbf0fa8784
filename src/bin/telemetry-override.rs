use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use telemetry_override::ProcessEnv;

#[derive(Parser, Debug)]
#[command(
    name = "telemetry-override",
    version,
    about = "Set telemetry opt-out flags and bind no-op telemetry stand-ins"
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    telemetry_override::init_logging();

    // The override itself cannot fail; a broken stdout is only logged.
    if let Err(err) = run() {
        tracing::error!("telemetry-override: {err:?}");
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let mut env = ProcessEnv;
    let outcome = telemetry_override::apply(&mut env);
    tracing::debug!(registry = ?outcome.registry, "bindings installed");

    let mut out = io::stdout().lock();
    for line in outcome.report_lines() {
        writeln!(out, "{line}").context("writing override report")?;
    }
    writeln!(out, "Telemetry override script completed successfully")
        .context("writing override report")?;
    Ok(())
}
