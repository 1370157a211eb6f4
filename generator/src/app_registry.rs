// Licensed under the Apache-2.0 license

//! Application sources to `app/apdefs.h`: one `APP_DEF(NAME)` per file,
//! where `NAME` is the upper-cased file stem.

use std::fmt::Write;

use crate::config::{AppConfig, Config};
use crate::error::GenResult;
use crate::output::Artifact;
use crate::source::FileSource;
use crate::Generator;

pub struct AppRegistry {
    config: AppConfig,
}

impl AppRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.apps.clone(),
        }
    }
}

impl Generator for AppRegistry {
    fn name(&self) -> &'static str {
        "app-registry"
    }

    fn generate(&self, files: &dyn FileSource) -> GenResult<Vec<Artifact>> {
        let cfg = &self.config;
        let suffix = format!(".{}", cfg.source_ext);
        let mut out = String::new();
        for path in files.list(&cfg.input_dir, &cfg.source_ext)? {
            let Some(stem) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(suffix.as_str()))
            else {
                continue;
            };
            writeln!(out, "{}({})", cfg.macro_name, stem.to_uppercase()).unwrap();
        }
        Ok(vec![Artifact::new(cfg.output.clone(), out)])
    }
}
