// Licensed under the Apache-2.0 license

//! Hardware capability headers to build-variable fragments.
//!
//! Every `hal/hw/<board>.h` produces `hal/mk/<board>.d`. Each header line is
//! checked against the flag table in order and the first marker found as a
//! substring contributes its assignment lines. Nothing else reaches the
//! output.

use log::debug;
use std::path::Path;

use crate::config::{Config, FlagRule, HardwareConfig};
use crate::error::GenResult;
use crate::output::Artifact;
use crate::source::FileSource;
use crate::Generator;

pub struct HwConfig {
    config: HardwareConfig,
}

impl HwConfig {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.hardware.clone(),
        }
    }
}

/// Build-variable lines for one capability header.
pub fn hw_config_text(header: &str, flags: &[FlagRule]) -> String {
    let mut out = String::new();
    for line in header.lines() {
        if let Some(rule) = flags.iter().find(|rule| line.contains(rule.marker.as_str())) {
            for assignment in &rule.assignments {
                out.push_str(assignment);
                out.push('\n');
            }
        }
    }
    out
}

/// The board identifier is the header's file name without its extension.
fn board_id(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

impl Generator for HwConfig {
    fn name(&self) -> &'static str {
        "hw-config"
    }

    fn generate(&self, files: &dyn FileSource) -> GenResult<Vec<Artifact>> {
        let cfg = &self.config;
        let mut artifacts = Vec::new();
        for header in files.list(&cfg.input_dir, &cfg.input_ext)? {
            let Some(board) = board_id(&header) else {
                continue;
            };
            let text = hw_config_text(&files.read(&header)?, &cfg.flags);
            debug!("{}: {} variable lines", header.display(), text.lines().count());
            artifacts.push(Artifact::new(
                cfg.output_dir.join(format!("{board}.{}", cfg.output_ext)),
                text,
            ));
        }
        Ok(artifacts)
    }
}
