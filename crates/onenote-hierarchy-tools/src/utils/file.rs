use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use onenote_hierarchy::{HierarchyParser, Item, Strategy};

/// Load a hierarchy export, automatically decompressing if it's a .zst file
pub fn load_hierarchy_file(path: &Path) -> Result<String> {
    if path.extension().and_then(|s| s.to_str()) == Some("zst") {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open compressed file: {:?}", path))?;

        let mut decoder = zstd::Decoder::new(file).context("Failed to create zstd decoder")?;
        let mut content = String::new();
        decoder
            .read_to_string(&mut content)
            .context("Failed to decompress file")?;

        Ok(content)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }
}

/// Load and parse a full hierarchy export.
pub fn parse_hierarchy_file(path: &Path, strategy: Strategy) -> Result<Vec<Arc<Item>>> {
    let content = load_hierarchy_file(path)?;
    debug!("Loaded {} bytes from {}", content.len(), path.display());

    let notebooks = strategy
        .parse_all(&content)
        .with_context(|| format!("Failed to parse hierarchy in {:?}", path))?;
    debug!("Parsed {} notebooks with {:?} parser", notebooks.len(), strategy);

    Ok(notebooks)
}
