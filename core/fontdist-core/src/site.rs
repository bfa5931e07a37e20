//! The build: scan, copy, generate, write

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::config::BuildConfig;
use crate::copy::{copy_variant_files, CopiedFiles, FILES_DIR};
use crate::css::{family_css_path, render_font_face, CssBundle, ALL_CSS, CSS_DIR};
use crate::discovery::{FamilyScanner, FontFamily};
use crate::manifest::{write_manifest_json, Manifest, ManifestEntry, ManifestVariant, MANIFEST_FILE};
use crate::pages::{render_console, render_index, CONSOLE_PAGE, INDEX_PAGE};

/// Files copied verbatim from the project root when present.
pub const ROOT_EXTRAS: [&str; 2] = ["CNAME", ".nojekyll"];

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub families: usize,
    pub variants: usize,
    pub files_copied: usize,
}

/// Run a full build. The output directory is removed and regenerated.
pub fn build_site(config: &BuildConfig) -> Result<BuildReport> {
    let mut config = config.clone();
    config.validate()?;

    log::info!(
        "building {} from {}",
        config.output_dir.display(),
        config.input_dir.display()
    );

    prepare_output(&config.output_dir)?;
    copy_root_extras(&config.project_root, &config.output_dir);

    let families = FamilyScanner::new(&config.input_dir)
        .follow_symlinks(config.follow_symlinks)
        .scan()?;
    log::info!("found {} families", families.len());

    let copied = copy_families(&families, &config)?;

    let mut ctx = BuildContext::new(&config.output_dir);
    for (family, files) in families.iter().zip(copied) {
        ctx.add_family(family, files)?;
    }
    ctx.finish(&config)
}

/// Accumulators for one build invocation.
struct BuildContext<'a> {
    output_dir: &'a Path,
    css: CssBundle,
    manifest: Manifest,
    files_copied: usize,
}

impl<'a> BuildContext<'a> {
    fn new(output_dir: &'a Path) -> Self {
        Self {
            output_dir,
            css: CssBundle::new(),
            manifest: Manifest::new(),
            files_copied: 0,
        }
    }

    /// Render one family's rules and manifest entry, then write its stylesheet.
    fn add_family(&mut self, family: &FontFamily, copied: Vec<CopiedFiles>) -> Result<()> {
        let mut variants = Vec::new();
        for (variant, files) in family.variants.iter().zip(copied) {
            let Some(rule) = render_font_face(&family.name, variant, &files) else {
                continue;
            };
            self.css.push_rule(&rule);
            self.files_copied += files.count();
            variants.push(ManifestVariant::new(variant, files));
        }

        let css_path = family_css_path(&family.key);
        write_output(self.output_dir, &css_path, self.css.finish_family().as_bytes())?;
        log::debug!("{}: {} variants", family.key, variants.len());

        self.manifest.push(ManifestEntry {
            family: family.name.clone(),
            css: css_path,
            variants,
        });
        Ok(())
    }

    fn finish(self, config: &BuildConfig) -> Result<BuildReport> {
        write_output(
            self.output_dir,
            &format!("{CSS_DIR}/{ALL_CSS}"),
            self.css.all().as_bytes(),
        )?;

        let mut json = Vec::new();
        write_manifest_json(&self.manifest, &mut json)?;
        write_output(self.output_dir, MANIFEST_FILE, &json)?;

        write_output(self.output_dir, INDEX_PAGE, render_index(&config.site).as_bytes())?;
        write_output(
            self.output_dir,
            CONSOLE_PAGE,
            render_console(&config.site).as_bytes(),
        )?;

        let report = BuildReport {
            output_dir: self.output_dir.to_path_buf(),
            families: self.manifest.entries.len(),
            variants: self.manifest.variant_count(),
            files_copied: self.files_copied,
        };
        log::info!(
            "wrote {} families, {} variants, {} font files",
            report.families,
            report.variants,
            report.files_copied
        );
        Ok(report)
    }
}

fn prepare_output(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("clearing output directory {}", output_dir.display()))?;
    }
    for dir in [output_dir.to_path_buf(), output_dir.join(FILES_DIR), output_dir.join(CSS_DIR)] {
        fs::create_dir_all(&dir).with_context(|| format!("creating directory {}", dir.display()))?;
    }
    Ok(())
}

// Absent extras are the common case, so failures only reach the debug log.
fn copy_root_extras(project_root: &Path, output_dir: &Path) {
    for name in ROOT_EXTRAS {
        let src = project_root.join(name);
        match fs::copy(&src, output_dir.join(name)) {
            Ok(_) => log::debug!("copied {}", src.display()),
            Err(err) => log::debug!("skipping {}: {err}", src.display()),
        }
    }
}

/// Copy every family's files; results come back in scan order.
#[cfg(feature = "parallel")]
fn copy_families(families: &[FontFamily], config: &BuildConfig) -> Result<Vec<Vec<CopiedFiles>>> {
    let output_dir = config.output_dir.as_path();
    let run = || -> Result<Vec<Vec<CopiedFiles>>> {
        families
            .par_iter()
            .map(|family| copy_family(family, output_dir))
            .collect()
    };

    if let Some(jobs) = config.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(run)
    } else {
        run()
    }
}

#[cfg(not(feature = "parallel"))]
fn copy_families(families: &[FontFamily], config: &BuildConfig) -> Result<Vec<Vec<CopiedFiles>>> {
    families
        .iter()
        .map(|family| copy_family(family, &config.output_dir))
        .collect()
}

fn copy_family(family: &FontFamily, output_dir: &Path) -> Result<Vec<CopiedFiles>> {
    family
        .variants
        .iter()
        .map(|variant| {
            if variant.files.is_empty() {
                Ok(CopiedFiles::default())
            } else {
                copy_variant_files(family, &variant.files, output_dir)
            }
        })
        .collect()
}

fn write_output(output_dir: &Path, rel: &str, contents: &[u8]) -> Result<()> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}
