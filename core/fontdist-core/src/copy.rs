//! Copying font binaries into the output asset tree

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::discovery::{FilePair, FontFamily};

/// Directory (relative to the output root) holding copied font binaries.
pub const FILES_DIR: &str = "files";

/// Output-relative, forward-slash paths of the files copied for one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedFiles {
    pub woff2: Option<String>,
    pub ttf: Option<String>,
}

impl CopiedFiles {
    pub fn is_empty(&self) -> bool {
        self.woff2.is_none() && self.ttf.is_none()
    }

    pub fn count(&self) -> usize {
        usize::from(self.woff2.is_some()) + usize::from(self.ttf.is_some())
    }
}

/// Copy the files of one variant into `files/<family key>/` under `output_root`.
///
/// Existing files are overwritten. A missing source is an error.
pub fn copy_variant_files(
    family: &FontFamily,
    pair: &FilePair,
    output_root: &Path,
) -> Result<CopiedFiles> {
    let out_dir = output_root.join(FILES_DIR).join(&family.key);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating directory {}", out_dir.display()))?;

    Ok(CopiedFiles {
        woff2: copy_one(family, pair.woff2.as_deref(), &out_dir)?,
        ttf: copy_one(family, pair.ttf.as_deref(), &out_dir)?,
    })
}

fn copy_one(
    family: &FontFamily,
    file_name: Option<&str>,
    out_dir: &Path,
) -> Result<Option<String>> {
    let Some(file_name) = file_name else {
        return Ok(None);
    };

    let src = family.source_dir.join(file_name);
    let dst = out_dir.join(file_name);
    fs::copy(&src, &dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    log::debug!("copied {}", dst.display());

    Ok(Some(asset_path(&family.key, file_name)))
}

/// Build the output-relative path of a copied asset, always with `/`.
pub fn asset_path(family_key: &str, file_name: &str) -> String {
    format!("{FILES_DIR}/{family_key}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn family_at(dir: PathBuf) -> FontFamily {
        FontFamily {
            key: "Acme".into(),
            name: "Acme".into(),
            source_dir: dir,
            variants: Vec::new(),
        }
    }

    #[test]
    fn copies_present_files_and_reports_posix_paths() {
        let tmp = tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).expect("mkdir");
        fs::write(src.join("Acme-Bold.ttf"), b"ttf-bytes").expect("write");
        let out = tmp.path().join("out");

        let pair = FilePair {
            ttf: Some("Acme-Bold.ttf".into()),
            woff2: None,
        };
        let copied = copy_variant_files(&family_at(src), &pair, &out).expect("copy");

        assert_eq!(copied.ttf.as_deref(), Some("files/Acme/Acme-Bold.ttf"));
        assert_eq!(copied.woff2, None);
        assert_eq!(copied.count(), 1);
        let bytes = fs::read(out.join("files/Acme/Acme-Bold.ttf")).expect("read copy");
        assert_eq!(bytes, b"ttf-bytes");
    }

    #[test]
    fn overwrites_existing_destination() {
        let tmp = tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).expect("mkdir");
        fs::write(src.join("Acme.woff2"), b"new").expect("write");
        let out = tmp.path().join("out");
        fs::create_dir_all(out.join("files/Acme")).expect("mkdir out");
        fs::write(out.join("files/Acme/Acme.woff2"), b"stale").expect("write stale");

        let pair = FilePair {
            ttf: None,
            woff2: Some("Acme.woff2".into()),
        };
        copy_variant_files(&family_at(src), &pair, &out).expect("copy");

        let bytes = fs::read(out.join("files/Acme/Acme.woff2")).expect("read copy");
        assert_eq!(bytes, b"new");
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = tempdir().expect("tempdir");
        let pair = FilePair {
            ttf: Some("Gone.ttf".into()),
            woff2: None,
        };
        let result = copy_variant_files(&family_at(tmp.path().join("src")), &pair, tmp.path());
        assert!(result.is_err());
    }
}
