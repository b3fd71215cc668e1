use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacklightError {
    #[error("Your system does not have {name}. Cannot configure backlight brightness!")]
    DeviceMissing { name: String },

    #[error("Cannot access \"{}\": {cause}", path.display())]
    Access { path: PathBuf, cause: io::Error },

    #[error("Unable to get {what}.")]
    Read {
        what: &'static str,
        #[source]
        source: ReadError,
    },

    #[error("Unable to set current brightness.")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("Unable to print current brightness.")]
    Output {
        #[source]
        source: io::Error,
    },
}

/// Why a brightness value could not be obtained from its file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read \"{}\": {cause}", path.display())]
    Io { path: PathBuf, cause: io::Error },

    #[error("\"{}\" does not hold a brightness value: {cause}", path.display())]
    Parse { path: PathBuf, cause: ParseIntError },
}
