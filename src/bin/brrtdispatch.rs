use brrtdispatch::cli::run_cli;
use brrtdispatch::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("warning: {err:#}");
    }
    match run_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
