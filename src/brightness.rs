use std::fmt;

/// What a single invocation asks of the backlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Signed percentage of max brightness added to the current level.
    Relative(i16),
    /// Percentage of max brightness to set outright.
    Absolute(u8),
    Get,
}

impl Command {
    pub fn is_setting(&self) -> bool {
        !matches!(self, Command::Get)
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Command::Relative(_))
    }

    pub fn percentage(&self) -> Option<i16> {
        match *self {
            Command::Relative(perc) => Some(perc),
            Command::Absolute(perc) => Some(i16::from(perc)),
            Command::Get => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrightnessState {
    pub max: u32,
    pub current: u32,
}

impl BrightnessState {
    pub fn percentage(&self) -> f64 {
        self.current as f64 * 100.0 / self.max as f64
    }

    /// Level the device should be set to for `command`, always within `[0, max]`.
    ///
    /// Returns `None` for [`Command::Get`].
    pub fn target(&self, command: Command) -> Option<u32> {
        let perc = f64::from(command.percentage()?);
        let max = self.max as f64;
        let unit = max * 0.01;
        let base = if command.is_relative() {
            self.current as f64
        } else {
            0.0
        };
        let level = (base + perc * unit).round();
        Some(level.clamp(0.0, max) as u32)
    }
}

impl fmt::Display for BrightnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Brightness: {}/{} {:.2}%",
            self.current,
            self.max,
            self.percentage()
        )
    }
}
