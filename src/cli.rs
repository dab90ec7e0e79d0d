//! Start-up plumbing shared by the binaries.

use crate::AsciiArtError;
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;

/// Log to stderr; quiet unless `RUST_LOG` asks for more.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Parse argv, turning every usage problem into exit status 1.
///
/// `--help` and `--version` still print to stdout and exit 0.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let code = match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        };
        // Printing can only fail if the terminal is gone
        let _ = err.print();
        code
    })
}

/// Report a terminal error and pick the exit status.
pub fn fail(err: &AsciiArtError) -> ExitCode {
    log::debug!("{err:?}");
    eprintln!("Error: {err}");
    ExitCode::FAILURE
}
