// Licensed under the Apache-2.0 license

//! Pre-build code generator for the Phobia motor controller firmware.
//!
//! This crate scans the firmware source tree and derives the files the build
//! system and the C compiler consume:
//!
//! - `hal/mk/<board>.d`: build-variable fragments, one per hardware header
//! - `shdefs.h`: shell command registrations gathered from every `SH_DEF`
//! - `app/apdefs.h`: one `APP_DEF` per application source file
//! - `regdefs.h`: register identifiers extracted from the `REG_DEF` table
//!
//! ## Usage
//!
//! ```no_run
//! use pmc_generator::{config::Config, source::FsFileSource};
//!
//! let config = Config::with_defaults();
//! let files = FsFileSource::new(".");
//! for generator in pmc_generator::all(&config) {
//!     for artifact in generator.generate(&files).unwrap() {
//!         artifact.write(files.root()).unwrap();
//!     }
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Source-tree layout, flag table and malformed-line policy
//! - [`source`]: The [`FileSource`] capability and its file system backend
//! - [`macro_call`]: Grammar for registration macro invocations
//! - [`output`]: Generated [`Artifact`]s and how they reach the disk
//! - [`hw_config`], [`shell_registry`], [`app_registry`], [`register_ids`]:
//!   the four generators

pub mod app_registry;
pub mod config;
pub mod error;
pub mod hw_config;
pub mod macro_call;
pub mod output;
pub mod register_ids;
pub mod shell_registry;
pub mod source;

pub use app_registry::AppRegistry;
pub use config::{Config, MalformedPolicy};
pub use error::{GenError, GenResult};
pub use hw_config::HwConfig;
pub use output::Artifact;
pub use register_ids::RegisterIds;
pub use shell_registry::ShellRegistry;
pub use source::{FileSource, FsFileSource};

/// A single pre-build generator.
///
/// Generators share no state; each reads its own inputs through the
/// [`FileSource`] and returns the artifacts it would write.
pub trait Generator {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    fn generate(&self, files: &dyn FileSource) -> GenResult<Vec<Artifact>>;
}

/// All generators, in the order they must run.
pub fn all(config: &Config) -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(HwConfig::new(config)),
        Box::new(ShellRegistry::new(config)),
        Box::new(AppRegistry::new(config)),
        Box::new(RegisterIds::new(config)),
    ]
}
