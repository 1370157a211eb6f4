// Licensed under the Apache-2.0 license

use anyhow::{bail, Context, Result};
use log::info;
use pmc_generator::{Config, FsFileSource};
use std::path::Path;

/// Run the generators against the source tree at `root`.
///
/// With `only`, just the generator of that name runs. In check mode nothing
/// is written; the run fails if any file on disk differs from what would be
/// generated.
pub(crate) fn generate(root: &Path, config: &Config, only: Option<&str>, check: bool) -> Result<()> {
    let files = FsFileSource::new(root);
    let mut generated = 0;
    let mut stale = Vec::new();

    for generator in pmc_generator::all(config) {
        if only.is_some_and(|name| name != generator.name()) {
            continue;
        }
        info!("Running {} in {}", generator.name(), root.display());
        let artifacts = generator
            .generate(&files)
            .with_context(|| format!("{} failed", generator.name()))?;

        for artifact in artifacts {
            if check {
                if artifact.is_current(root)? {
                    println!("  ✓ {} is up to date", artifact.path.display());
                } else {
                    println!("  ✗ {} is out of date", artifact.path.display());
                    stale.push(artifact.path);
                    continue;
                }
            } else {
                artifact.write(root)?;
                println!(
                    "  ✓ Generated {} ({} bytes)",
                    artifact.path.display(),
                    artifact.contents.len()
                );
            }
            generated += 1;
        }
    }

    println!("\n=== Generation Summary ===");
    if check {
        println!("Up to date: {} files", generated);
    } else {
        println!("Generated: {} files", generated);
    }
    if !stale.is_empty() {
        bail!(
            "{} generated file(s) out of date, first: {}",
            stale.len(),
            stale[0].display()
        );
    }

    Ok(())
}
