use anyhow::{Context, Result};
use std::path::Path;
use syncconf_core::{ConfigDocument, MutationSet};
use tracing::info;

/// Load the document, apply the requested mutations, and rewrite the file
/// only when something actually changed.
pub fn run(config_path: &Path, mutations: &MutationSet) -> Result<()> {
    info!("Reading {}", config_path.display());
    let mut document = ConfigDocument::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    info!("Current sync.conf is:\n{}", document);

    if mutations.apply(&mut document) {
        document
            .save(config_path)
            .with_context(|| format!("failed to save {}", config_path.display()))?;
        info!("New sync.conf is:\n{}", document);
    }

    Ok(())
}
