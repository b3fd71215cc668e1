use clap::{ArgGroup, Parser};
use log::LevelFilter;

use crate::brightness::Command;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Backlight Settings\nYet another program that adjusts a laptop screen backlight.",
    group(
        ArgGroup::new("action")
            .required(true)
            .args(["inc", "dec", "set", "get"])
    )
)]
pub struct CliParams {
    #[arg(
        long,
        value_name = "PERCENTAGE",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Increments backlight brightness by a percentage of max brightness"
    )]
    pub inc: Option<u8>,

    #[arg(
        long,
        value_name = "PERCENTAGE",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Decrements backlight brightness by a percentage of max brightness"
    )]
    pub dec: Option<u8>,

    #[arg(
        long,
        value_name = "PERCENTAGE",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Sets the backlight brightness to a percentage of max brightness"
    )]
    pub set: Option<u8>,

    #[arg(long, help = "Obtains the current backlight brightness")]
    pub get: bool,

    #[arg(
        short,
        long,
        value_name = "LEVEL",
        default_value = "error",
        help = "level of logging to stderr (off, error, warn, info, debug, trace)"
    )]
    pub verbose: LevelFilter,
}

impl CliParams {
    /// The action group is required and exclusive, so exactly one branch applies.
    pub fn command(&self) -> Command {
        match (self.inc, self.dec, self.set) {
            (Some(perc), _, _) => Command::Relative(i16::from(perc)),
            (_, Some(perc), _) => Command::Relative(-i16::from(perc)),
            (_, _, Some(perc)) => Command::Absolute(perc),
            _ => Command::Get,
        }
    }
}
