use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use crate::brightness::{BrightnessState, Command};
use crate::error::{BacklightError, ReadError};

pub const DEVICE_PATH: &str = "/sys/class/backlight/intel_backlight";

pub const FILE_MAX_BRIGHTNESS: &str = "max_brightness";

pub const FILE_BRIGHTNESS: &str = "brightness";

pub struct Backlight {
    dir: PathBuf,
}

impl Backlight {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, BacklightError> {
        let dir = dir.into();
        trace!("Looking for backlight device at {}", dir.display());
        if !dir.exists() {
            let name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string());
            return Err(BacklightError::DeviceMissing { name });
        }
        Ok(Self { dir })
    }

    pub fn brightness_path(&self) -> PathBuf {
        self.dir.join(FILE_BRIGHTNESS)
    }

    pub fn max_brightness_path(&self) -> PathBuf {
        self.dir.join(FILE_MAX_BRIGHTNESS)
    }

    /// Fails unless the brightness file can be both read and written.
    pub fn check_access(&self) -> Result<(), BacklightError> {
        let path = self.brightness_path();
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|cause| BacklightError::Access { path, cause })?;
        Ok(())
    }

    pub fn max_brightness(&self) -> Result<u32, BacklightError> {
        read_level(&self.max_brightness_path()).map_err(|source| BacklightError::Read {
            what: "max brightness",
            source,
        })
    }

    pub fn brightness(&self) -> Result<u32, BacklightError> {
        read_level(&self.brightness_path()).map_err(|source| BacklightError::Read {
            what: "current brightness",
            source,
        })
    }

    pub fn state(&self) -> Result<BrightnessState, BacklightError> {
        let max = self.max_brightness()?;
        let current = self.brightness()?;
        debug!("Backlight at {current}/{max}");
        Ok(BrightnessState { max, current })
    }

    pub fn set_brightness(&self, level: u32) -> Result<(), BacklightError> {
        info!("Set Brightness {level}");
        fs::write(self.brightness_path(), level.to_string())
            .map_err(|source| BacklightError::Write { source })
    }
}

fn read_level(path: &Path) -> Result<u32, ReadError> {
    let text = fs::read_to_string(path).map_err(|cause| ReadError::Io {
        path: path.to_path_buf(),
        cause,
    })?;
    text.trim().parse().map_err(|cause| ReadError::Parse {
        path: path.to_path_buf(),
        cause,
    })
}

/// Runs `command` against the device: prints the state to `out` for
/// [`Command::Get`], otherwise writes the computed level back.
pub fn process(
    backlight: &Backlight,
    command: Command,
    out: &mut impl Write,
) -> Result<(), BacklightError> {
    let state = backlight.state()?;
    match state.target(command) {
        Some(level) => {
            trace!("{command:?} moves brightness {} -> {level}", state.current);
            backlight.set_brightness(level)
        }
        None => writeln!(out, "{state}").map_err(|source| BacklightError::Output { source }),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn fake_device(max: &str, current: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILE_MAX_BRIGHTNESS), max).unwrap();
        fs::write(dir.path().join(FILE_BRIGHTNESS), current).unwrap();
        dir
    }

    fn stored(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join(FILE_BRIGHTNESS)).unwrap()
    }

    fn run(dir: &TempDir, command: Command) -> Result<String, BacklightError> {
        let backlight = Backlight::open(dir.path())?;
        let mut out = Vec::new();
        process(&backlight, command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_device_directory() {
        let dir = TempDir::new().unwrap();
        let err = Backlight::open(dir.path().join("intel_backlight"))
            .err()
            .unwrap();
        assert!(matches!(err, BacklightError::DeviceMissing { .. }));
        assert_eq!(
            err.to_string(),
            "Your system does not have intel_backlight. Cannot configure backlight brightness!"
        );
    }

    #[test]
    fn reads_trimmed_values() {
        let dir = fake_device("1000\n", "  500 \n");
        let backlight = Backlight::open(dir.path()).unwrap();
        assert_eq!(
            backlight.state().unwrap(),
            BrightnessState {
                max: 1000,
                current: 500
            }
        );
    }

    #[test]
    fn get_prints_without_writing() {
        let dir = fake_device("1000\n", "500\n");
        assert_eq!(run(&dir, Command::Get).unwrap(), "Brightness: 500/1000 50.00%\n");
        assert_eq!(stored(&dir), "500\n");
    }

    #[test]
    fn inc_writes_new_level() {
        let dir = fake_device("1000\n", "500\n");
        assert_eq!(run(&dir, Command::Relative(10)).unwrap(), "");
        assert_eq!(stored(&dir), "600");
    }

    #[test]
    fn set_zero_and_clamped_dec() {
        let dir = fake_device("1000\n", "500\n");
        run(&dir, Command::Absolute(0)).unwrap();
        assert_eq!(stored(&dir), "0");

        let dir = fake_device("1000\n", "100\n");
        run(&dir, Command::Relative(-200)).unwrap();
        assert_eq!(stored(&dir), "0");
    }

    #[test]
    fn inc_then_dec_restores_level() {
        let dir = fake_device("937\n", "400\n");
        run(&dir, Command::Relative(15)).unwrap();
        run(&dir, Command::Relative(-15)).unwrap();
        assert_eq!(stored(&dir), "400");
    }

    #[test]
    fn unparseable_max_brightness() {
        for max in ["", "-1", "bright"] {
            let dir = fake_device(max, "500");
            let err = run(&dir, Command::Get).unwrap_err();
            assert!(
                matches!(
                    err,
                    BacklightError::Read {
                        what: "max brightness",
                        ..
                    }
                ),
                "{max:?}"
            );
            assert_eq!(err.to_string(), "Unable to get max brightness.");
            assert_eq!(stored(&dir), "500");
        }
    }

    #[test]
    fn zero_max_brightness_is_a_value() {
        let dir = fake_device("0\n", "0\n");
        run(&dir, Command::Absolute(50)).unwrap();
        assert_eq!(stored(&dir), "0");

        let dir = fake_device("0\n", "0\n");
        run(&dir, Command::Relative(30)).unwrap();
        assert_eq!(stored(&dir), "0");

        let dir = fake_device("0\n", "0\n");
        assert_eq!(run(&dir, Command::Get).unwrap(), "Brightness: 0/0 NaN%\n");
        assert_eq!(stored(&dir), "0\n");
    }

    #[test]
    fn unparseable_current_brightness() {
        let dir = fake_device("1000", "-1");
        let err = run(&dir, Command::Absolute(50)).unwrap_err();
        assert_eq!(err.to_string(), "Unable to get current brightness.");
        assert_eq!(stored(&dir), "-1");
    }

    #[test]
    fn missing_value_files() {
        let dir = TempDir::new().unwrap();
        let backlight = Backlight::open(dir.path()).unwrap();
        assert!(matches!(
            backlight.max_brightness(),
            Err(BacklightError::Read {
                source: ReadError::Io { .. },
                ..
            })
        ));
        assert!(matches!(
            backlight.check_access(),
            Err(BacklightError::Access { .. })
        ));
    }

    #[test]
    fn access_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let backlight = Backlight::open(dir.path()).unwrap();
        let message = backlight.check_access().unwrap_err().to_string();
        let expected = format!(
            "Cannot access \"{}\": ",
            dir.path().join(FILE_BRIGHTNESS).display()
        );
        assert!(message.starts_with(&expected), "{message}");
    }

    #[test]
    fn check_access_leaves_contents_alone() {
        let dir = fake_device("1000", "321");
        Backlight::open(dir.path()).unwrap().check_access().unwrap();
        assert_eq!(stored(&dir), "321");
    }
}
