// Licensed under the Apache-2.0 license

//! Configuration for the source-tree layout and the generator tables.
//!
//! [`Config::with_defaults`] describes the firmware tree as it is laid out in
//! the repository. A TOML file can override any part of it; missing keys keep
//! their default values.
//!
//! ```
//! use pmc_generator::config::Config;
//!
//! let config = Config::from_toml_str(
//!     r#"
//! [registers]
//! input = "src/regfile.c"
//! "#,
//! )
//! .unwrap();
//! assert_eq!(config.registers.input.to_str(), Some("src/regfile.c"));
//! assert_eq!(config.registers.macro_name, "REG_DEF");
//! ```

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GenError, GenResult};

/// Top-level configuration, one section per generator.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub hardware: HardwareConfig,
    pub shell: ShellConfig,
    pub apps: AppConfig,
    pub registers: RegisterConfig,
    /// What to do with a macro invocation whose arguments do not parse.
    /// A section may ask for a stricter policy of its own.
    pub malformed: MalformedPolicy,
}

impl Config {
    /// The layout of the firmware source tree.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> GenResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::from_toml_str(&text).map_err(|source| GenError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn malformed(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }
}

/// A capability marker and the build-variable lines it enables.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FlagRule {
    /// Text searched for as a literal substring of each header line.
    pub marker: String,
    /// Assignment lines appended to the board's variable file, in order.
    pub assignments: Vec<String>,
}

impl FlagRule {
    pub fn new(marker: &str, assignments: &[&str]) -> Self {
        Self {
            marker: marker.to_string(),
            assignments: assignments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Hardware capability headers → build-variable fragments.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HardwareConfig {
    /// Directory holding one capability header per board.
    pub input_dir: PathBuf,
    pub input_ext: String,
    /// Directory receiving one variable file per board.
    pub output_dir: PathBuf,
    pub output_ext: String,
    /// Checked in order; the first rule matching a line wins.
    pub flags: Vec<FlagRule>,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            input_dir: "hal/hw".into(),
            input_ext: "h".to_string(),
            output_dir: "hal/mk".into(),
            output_ext: "d".to_string(),
            flags: vec![
                FlagRule::new("HW_MCU_STM32F405", &["HWMCU = STM32F405"]),
                FlagRule::new("HW_MCU_STM32F722", &["HWMCU = STM32F722"]),
                FlagRule::new("HW_HAVE_DRV_ON_PCB", &["OBJ_HAL_DRV = INCLUDE"]),
                FlagRule::new(
                    "HW_HAVE_USB_CDC_ACM",
                    &["OBJ_HAL_USB = INCLUDE", "OBJ_LIB_CHERRY = INCLUDE"],
                ),
                FlagRule::new(
                    "HW_HAVE_NETWORK_EPCAN",
                    &["OBJ_HAL_CAN = INCLUDE", "OBJ_EPCAN = INCLUDE"],
                ),
            ],
        }
    }
}

/// Shell command registrations → one consolidated header.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Scanned in this order, without recursion.
    pub roots: Vec<PathBuf>,
    pub source_ext: String,
    pub macro_name: String,
    /// Files whose name ends with this are wrapped in the network guard.
    pub network_file_suffix: String,
    pub network_guard: String,
    pub output: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            roots: vec![".".into(), "app".into(), "hal".into()],
            source_ext: "c".to_string(),
            macro_name: "SH_DEF".to_string(),
            network_file_suffix: "epcan.c".to_string(),
            network_guard: "HW_HAVE_NETWORK_EPCAN".to_string(),
            output: "shdefs.h".into(),
        }
    }
}

/// Application sources → application registration header.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub input_dir: PathBuf,
    pub source_ext: String,
    pub macro_name: String,
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: "app".into(),
            source_ext: "c".to_string(),
            macro_name: "APP_DEF".to_string(),
            output: "app/apdefs.h".into(),
        }
    }
}

/// Register table → register identifier header.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterConfig {
    pub input: PathBuf,
    pub macro_name: String,
    /// Prepended to every generated enumeration constant.
    pub prefix: String,
    /// A directive is kept while fewer than this many lines have passed
    /// since the last register definition.
    pub directive_window: u32,
    /// Distance assumed before the first register definition is seen.
    pub initial_distance: u32,
    pub output: PathBuf,
    /// Constants are numbered by position, so skipping a definition would
    /// shift every identifier after it. Aborts unless set to `warn`.
    pub malformed: MalformedPolicy,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            input: "regfile.c".into(),
            macro_name: "REG_DEF".to_string(),
            prefix: "ID_".to_string(),
            directive_window: 4,
            initial_distance: 10,
            output: "regdefs.h".into(),
            malformed: MalformedPolicy::Abort,
        }
    }
}

/// Handling of lines that name a registration macro but whose arguments do
/// not parse. Ordered from lenient to strict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log the line and carry on without it.
    #[default]
    Warn,
    /// Stop with [`GenError::Malformed`].
    Abort,
}

impl MalformedPolicy {
    pub(crate) fn apply(
        self,
        macro_name: &str,
        path: &Path,
        line: usize,
        text: &str,
    ) -> GenResult<()> {
        match self {
            MalformedPolicy::Warn => {
                warn!(
                    "{}:{}: skipping malformed {} invocation: {}",
                    path.display(),
                    line,
                    macro_name,
                    text.trim()
                );
                Ok(())
            }
            MalformedPolicy::Abort => Err(GenError::Malformed {
                path: path.to_path_buf(),
                line,
                macro_name: macro_name.to_string(),
                text: text.trim().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::with_defaults();
        assert_eq!(config.hardware.input_dir, Path::new("hal/hw"));
        assert_eq!(config.hardware.output_dir, Path::new("hal/mk"));
        assert_eq!(config.shell.roots.len(), 3);
        assert_eq!(config.shell.output, Path::new("shdefs.h"));
        assert_eq!(config.apps.output, Path::new("app/apdefs.h"));
        assert_eq!(config.registers.directive_window, 4);
        assert_eq!(config.registers.initial_distance, 10);
        assert_eq!(config.malformed, MalformedPolicy::Warn);
        assert_eq!(config.registers.malformed, MalformedPolicy::Abort);
    }

    #[test]
    fn test_register_policy_opt_out() {
        let config = Config::from_toml_str("[registers]\nmalformed = \"warn\"\n").unwrap();
        assert_eq!(config.registers.malformed, MalformedPolicy::Warn);
        assert_eq!(
            MalformedPolicy::Warn.max(MalformedPolicy::Abort),
            MalformedPolicy::Abort
        );
    }

    #[test]
    fn test_default_flag_table_order() {
        let markers: Vec<_> = HardwareConfig::default()
            .flags
            .into_iter()
            .map(|f| f.marker)
            .collect();
        assert_eq!(
            markers,
            [
                "HW_MCU_STM32F405",
                "HW_MCU_STM32F722",
                "HW_HAVE_DRV_ON_PCB",
                "HW_HAVE_USB_CDC_ACM",
                "HW_HAVE_NETWORK_EPCAN",
            ]
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
malformed = "abort"

[shell]
roots = ["src"]

[[hardware.flags]]
marker = "HW_HAVE_SPI"
assignments = ["OBJ_HAL_SPI = INCLUDE"]
"#,
        )
        .unwrap();
        assert_eq!(config.malformed, MalformedPolicy::Abort);
        assert_eq!(config.shell.roots, [PathBuf::from("src")]);
        assert_eq!(config.shell.macro_name, "SH_DEF");
        assert_eq!(
            config.hardware.flags,
            [FlagRule::new("HW_HAVE_SPI", &["OBJ_HAL_SPI = INCLUDE"])]
        );
        assert_eq!(config.hardware.input_dir, Path::new("hal/hw"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml_str("[registers]\nwindow = 3\n").is_err());
    }

    #[test]
    fn test_abort_policy_reports_location() {
        let err = MalformedPolicy::Abort
            .apply("SH_DEF", Path::new("hal/foo.c"), 12, "  SH_DEF(a, b)\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "hal/foo.c:12: malformed SH_DEF invocation: SH_DEF(a, b)"
        );
        assert!(MalformedPolicy::Warn
            .apply("SH_DEF", Path::new("hal/foo.c"), 12, "SH_DEF(a, b)")
            .is_ok());
    }
}
