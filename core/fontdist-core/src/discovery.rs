//! Family discovery: one subdirectory per family, one variant per base name

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::classify::{classify, FontStyle};

/// Source files backing one variant, as file names inside the family directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilePair {
    pub ttf: Option<String>,
    pub woff2: Option<String>,
}

impl FilePair {
    pub fn is_empty(&self) -> bool {
        self.ttf.is_none() && self.woff2.is_none()
    }
}

/// One weight/style combination of a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontVariant {
    pub base: String,
    pub weight: u16,
    pub style: FontStyle,
    pub files: FilePair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontFamily {
    /// Directory name; used for output paths.
    pub key: String,
    /// Display name with whitespace collapsed.
    pub name: String,
    pub source_dir: PathBuf,
    pub variants: Vec<FontVariant>,
}

/// Trait for enumerating font families from some backing store.
pub trait FamilyDiscovery {
    fn discover(&self) -> Result<Vec<FontFamily>>;
}

/// Scans the immediate subdirectories of an input root.
///
/// Hidden directories (`.git`, `.cache`, ...) are not families and are skipped,
/// as are hidden files inside a family. `follow_symlinks` only controls whether
/// symlinked family directories are entered; symlinked font files are always
/// kept when they point at a regular file.
#[derive(Debug, Clone)]
pub struct FamilyScanner {
    root: PathBuf,
    follow_symlinks: bool,
}

impl FamilyScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn scan(&self) -> Result<Vec<FontFamily>> {
        if !self.root.is_dir() {
            return Err(anyhow!(
                "input directory does not exist: {}",
                self.root.display()
            ));
        }

        let mut families = Vec::new();
        for entry in self.children(&self.root) {
            let entry =
                entry.with_context(|| format!("reading input directory {}", self.root.display()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(key) = visible_name(&entry) else {
                continue;
            };
            families.push(self.scan_family(key, entry.path())?);
        }

        log::debug!(
            "scanned {} families under {}",
            families.len(),
            self.root.display()
        );
        Ok(families)
    }

    fn scan_family(&self, key: &str, dir: &Path) -> Result<FontFamily> {
        let mut pairs: Vec<(String, FilePair)> = Vec::new();

        for entry in self.children(dir) {
            let entry = entry.with_context(|| format!("reading family {}", dir.display()))?;
            if !is_regular_file(&entry) {
                continue;
            }
            let Some(file_name) = visible_name(&entry) else {
                continue;
            };
            let Some((base, kind)) = split_font_name(file_name) else {
                continue;
            };

            let idx = match pairs.iter().position(|(b, _)| b == base) {
                Some(idx) => idx,
                None => {
                    pairs.push((base.to_string(), FilePair::default()));
                    pairs.len() - 1
                }
            };
            let slot = &mut pairs[idx].1;
            match kind {
                FontKind::Ttf => slot.ttf = Some(file_name.to_string()),
                FontKind::Woff2 => slot.woff2 = Some(file_name.to_string()),
            }
        }

        let variants = pairs
            .into_iter()
            .map(|(base, files)| {
                let class = classify(&base);
                FontVariant {
                    base,
                    weight: class.weight,
                    style: class.style,
                    files,
                }
            })
            .collect();

        Ok(FontFamily {
            key: key.to_string(),
            name: sanitize_family_name(key),
            source_dir: dir.to_path_buf(),
            variants,
        })
    }

    fn children(&self, dir: &Path) -> walkdir::IntoIter {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
    }
}

impl FamilyDiscovery for FamilyScanner {
    fn discover(&self) -> Result<Vec<FontFamily>> {
        self.scan()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontKind {
    Ttf,
    Woff2,
}

// Symlinked files count when their target is a regular file.
fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    if entry.path_is_symlink() {
        if entry.path().is_file() {
            return true;
        }
        log::warn!("skipping dangling or non-file link {}", entry.path().display());
    }
    false
}

/// Base name of a `.ttf`/`.woff2` file name, `None` for anything else.
///
/// ```
/// use fontdist_core::discovery::font_base_name;
///
/// assert_eq!(font_base_name("Acme-Bold.WOFF2"), Some("Acme-Bold"));
/// assert_eq!(font_base_name("Acme-Bold.otf"), None);
/// ```
pub fn font_base_name(file_name: &str) -> Option<&str> {
    split_font_name(file_name).map(|(base, _)| base)
}

/// Split `Acme-Bold.TTF` into (`Acme-Bold`, Ttf); `None` for other extensions.
fn split_font_name(file_name: &str) -> Option<(&str, FontKind)> {
    let (base, ext) = file_name.rsplit_once('.')?;
    if base.is_empty() {
        return None;
    }
    match ext.to_ascii_lowercase().as_str() {
        "ttf" => Some((base, FontKind::Ttf)),
        "woff2" => Some((base, FontKind::Woff2)),
        _ => None,
    }
}

fn visible_name(entry: &DirEntry) -> Option<&str> {
    let Some(name) = entry.file_name().to_str() else {
        log::warn!("skipping non UTF-8 path {}", entry.path().display());
        return None;
    };
    if name.starts_with('.') {
        None
    } else {
        Some(name)
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn sanitize_family_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
