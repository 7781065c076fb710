//! Binary entrypoint for the `fsawait` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are selected in commands::dispatch via FSAWAIT_RECORD / FSAWAIT_REPLAY.
    let _ = dotenvy::dotenv();
    fsawait::logging::init();
    match fsawait::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
