// Licensed under the Apache-2.0 license

//! Shell command registrations to `shdefs.h`.
//!
//! Every `SH_DEF(name)` at the start of a line in the scanned roots becomes
//! one `SH_DEF(name)` line in the consolidated header, in root order and then
//! file name order. The network driver's registrations are always wrapped in
//! the network feature guard, even when it registers nothing.

use log::debug;
use std::fmt::Write;
use std::path::Path;

use crate::config::{Config, MalformedPolicy, ShellConfig};
use crate::error::GenResult;
use crate::macro_call::{bare_ident, classify, MacroCall};
use crate::output::Artifact;
use crate::source::FileSource;
use crate::Generator;

pub struct ShellRegistry {
    config: ShellConfig,
    malformed: MalformedPolicy,
}

impl ShellRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.shell.clone(),
            malformed: config.malformed,
        }
    }

    fn is_network_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(self.config.network_file_suffix.as_str()))
    }

    /// Append the registrations found in one source file to `out`.
    pub fn scan_file(&self, path: &Path, source: &str, out: &mut String) -> GenResult<()> {
        let cfg = &self.config;
        let guarded = self.is_network_file(path);
        if guarded {
            writeln!(out, "#ifdef {}", cfg.network_guard).unwrap();
        }

        let mut found = 0;
        for (idx, line) in source.lines().enumerate() {
            match classify(line, &cfg.macro_name, bare_ident) {
                MacroCall::Matched(name) => {
                    writeln!(out, "{}({})", cfg.macro_name, name).unwrap();
                    found += 1;
                }
                MacroCall::NotAMacroCall => {}
                MacroCall::MalformedArgs => {
                    self.malformed
                        .apply(&cfg.macro_name, path, idx + 1, line)?
                }
            }
        }

        if guarded {
            writeln!(out, "#endif /* {} */", cfg.network_guard).unwrap();
        }
        debug!("{}: {} commands", path.display(), found);
        Ok(())
    }
}

impl Generator for ShellRegistry {
    fn name(&self) -> &'static str {
        "shell-registry"
    }

    fn generate(&self, files: &dyn FileSource) -> GenResult<Vec<Artifact>> {
        let cfg = &self.config;
        let mut out = String::new();
        for root in &cfg.roots {
            for path in files.list(root, &cfg.source_ext)? {
                let source = files.read(&path)?;
                self.scan_file(&path, &source, &mut out)?;
            }
        }
        Ok(vec![Artifact::new(cfg.output.clone(), out)])
    }
}
