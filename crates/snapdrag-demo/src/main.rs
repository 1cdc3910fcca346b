//! Replays a drag scenario file and prints the resulting report as JSON.

mod scenario;

use scenario::Scenario;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: snapdrag <scenario.json>");
        return ExitCode::FAILURE;
    };
    log::info!("Replaying scenario {}", path);

    let report = match Scenario::load(&path).and_then(Scenario::run) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Failed to replay {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
