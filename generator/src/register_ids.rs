// Licensed under the Apache-2.0 license

//! Register table to `regdefs.h`.
//!
//! Each `REG_DEF(a.b, c, ...)` line in `regfile.c` becomes an enumeration
//! constant `ID_A_BC,`. Register definitions are often grouped under feature
//! conditionals in the table, so preprocessor directives are carried into the
//! output when they sit close enough after a definition:
//!
//! ```text
//! REG_DEF(pm.fault_reason,, ...)        ID_PM_FAULT_REASON,
//! #ifdef HW_HAVE_DRV_ON_PCB       →     #ifdef HW_HAVE_DRV_ON_PCB
//! REG_DEF(hal.DRV.part,, ...)           ID_HAL_DRV_PART,
//! #endif /* HW_HAVE_DRV_ON_PCB */       #endif /* HW_HAVE_DRV_ON_PCB */
//! ```
//!
//! The window only looks back at the previous definition. A directive that
//! precedes the first definition, or that comes after a long run of other
//! lines, is dropped even if a definition follows right after it.
//!
//! A `REG_DEF` line whose arguments do not parse stops generation unless the
//! register section's policy is relaxed to `warn`.

use log::debug;
use std::fmt::Write;
use std::path::Path;

use crate::config::{Config, MalformedPolicy, RegisterConfig};
use crate::error::GenResult;
use crate::macro_call::{classify, register_components, MacroCall};
use crate::output::Artifact;
use crate::source::FileSource;
use crate::Generator;

/// Tracks how many lines have passed since the last register definition.
#[derive(Clone, Copy, Debug)]
struct DirectiveWindow {
    distance: u32,
    width: u32,
}

impl DirectiveWindow {
    fn new(config: &RegisterConfig) -> Self {
        Self {
            distance: config.initial_distance,
            width: config.directive_window,
        }
    }

    fn keeps_directive(&self) -> bool {
        self.distance < self.width
    }

    fn definition_seen(&mut self) {
        self.distance = 0;
    }

    /// Called once at the end of every line, whatever it held.
    fn advance(&mut self) {
        self.distance = self.distance.saturating_add(1);
    }
}

/// Enumeration constant name for the concatenated first two arguments.
pub fn register_constant(prefix: &str, components: &str) -> String {
    format!("{prefix}{}", components.replace('.', "_").to_uppercase())
}

/// Generate the identifier list for one register table.
///
/// `path` is only used to report malformed definitions.
pub fn register_ids_text(
    table: &str,
    path: &Path,
    config: &RegisterConfig,
    malformed: MalformedPolicy,
) -> GenResult<String> {
    let mut out = String::new();
    let mut window = DirectiveWindow::new(config);

    for (idx, line) in table.lines().enumerate() {
        if line.starts_with('#') {
            if window.keeps_directive() {
                writeln!(out, "{line}").unwrap();
            }
        } else {
            match classify(line, &config.macro_name, register_components) {
                MacroCall::Matched(components) => {
                    writeln!(out, "{},", register_constant(&config.prefix, &components)).unwrap();
                    window.definition_seen();
                }
                MacroCall::NotAMacroCall => {}
                MacroCall::MalformedArgs => {
                    malformed.apply(&config.macro_name, path, idx + 1, line)?
                }
            }
        }
        window.advance();
    }
    Ok(out)
}

pub struct RegisterIds {
    config: RegisterConfig,
    malformed: MalformedPolicy,
}

impl RegisterIds {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.registers.clone(),
            malformed: config.malformed.max(config.registers.malformed),
        }
    }
}

impl Generator for RegisterIds {
    fn name(&self) -> &'static str {
        "register-ids"
    }

    fn generate(&self, files: &dyn FileSource) -> GenResult<Vec<Artifact>> {
        let cfg = &self.config;
        let table = files.read(&cfg.input)?;
        let text = register_ids_text(&table, &cfg.input, cfg, self.malformed)?;
        debug!(
            "{}: {} identifiers",
            cfg.input.display(),
            text.lines().filter(|l| !l.starts_with('#')).count()
        );
        Ok(vec![Artifact::new(cfg.output.clone(), text)])
    }
}
