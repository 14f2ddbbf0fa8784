use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use telemetry_override::verify;
use telemetry_override::ProcessEnv;

#[derive(Parser, Debug)]
#[command(
    name = "test-telemetry",
    version,
    about = "Apply the telemetry override, then verify flags and no-op bindings"
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    telemetry_override::init_logging();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("test-telemetry error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut env = ProcessEnv;
    let report = verify::verify_full(&mut env);

    let mut out = io::stdout().lock();
    for line in report.render() {
        writeln!(out, "{line}").context("writing verification report")?;
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("full telemetry verification failed");
        Ok(ExitCode::from(1))
    }
}
