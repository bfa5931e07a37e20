//! The `fonts.json` manifest read by the generated pages

use std::io::{Read, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::FontStyle;
use crate::copy::CopiedFiles;
use crate::discovery::FontVariant;

/// Manifest file name at the output root.
pub const MANIFEST_FILE: &str = "fonts.json";

/// One variant as published; field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestVariant {
    pub base: String,
    pub weight: u16,
    pub style: FontStyle,
    pub woff2: Option<String>,
    pub ttf: Option<String>,
}

impl ManifestVariant {
    pub fn new(variant: &FontVariant, files: CopiedFiles) -> Self {
        Self {
            base: variant.base.clone(),
            weight: variant.weight,
            style: variant.style,
            woff2: files.woff2,
            ttf: files.ttf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub family: String,
    pub css: String,
    pub variants: Vec<ManifestVariant>,
}

/// Ordered list of family entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }
}

/// Write the manifest as a prettified JSON array (two-space indent, no trailing newline).
pub fn write_manifest_json(manifest: &Manifest, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

/// Parse a manifest previously written by [`write_manifest_json`].
pub fn read_manifest(r: impl Read) -> Result<Manifest> {
    serde_json::from_reader(r).context("parsing font manifest")
}
