use jpget_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging first; stderr if the state directory is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("jpget error: {:#}", err);
        std::process::exit(1);
    }
}
