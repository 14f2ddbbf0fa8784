use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use telemetry_override::verify;
use telemetry_override::ProcessEnv;

#[derive(Parser, Debug)]
#[command(
    name = "verify-telemetry",
    version,
    about = "Quick check that telemetry opt-out flags are set"
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    telemetry_override::init_logging();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("verify-telemetry error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let report = verify::verify_quick(&ProcessEnv);

    let mut out = io::stdout().lock();
    for line in report.render() {
        writeln!(out, "{line}").context("writing status report")?;
    }

    if report.all_disabled() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("quick telemetry check failed");
        Ok(ExitCode::from(1))
    }
}
