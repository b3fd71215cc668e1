mod backlight;
mod brightness;
mod cli;
mod error;
mod privilege;

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};

use crate::backlight::{Backlight, DEVICE_PATH};
use crate::brightness::Command;
use crate::cli::CliParams;
use crate::error::BacklightError;
use crate::privilege::Privileges;

fn run(command: Command, device: &Path, out: &mut impl Write) -> Result<(), BacklightError> {
    debug!("Running {command:?}");

    let backlight = Backlight::open(device)?;
    if command.is_setting() {
        backlight.check_access()?;
    }

    backlight::process(&backlight, command, out)
}

/// Writes `err` and every underlying cause, one per line.
fn report(err: &BacklightError, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{err}")?;
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {cause}")?;
        source = cause.source();
    }
    Ok(())
}

fn main() -> ExitCode {
    // We may be installed setgid; give that up before touching anything else.
    let lowered = privilege::platform().lower();

    let params = CliParams::parse();

    env_logger::Builder::new()
        .filter_level(params.verbose)
        .parse_default_env()
        .init();

    if let Err(err) = lowered {
        warn!("Cannot lower group privileges: {err}");
    }

    match run(
        params.command(),
        Path::new(DEVICE_PATH),
        &mut io::stdout().lock(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = report(&err, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}
