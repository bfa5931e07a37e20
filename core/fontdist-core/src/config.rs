//! Build configuration

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Title used by both generated pages unless overridden.
pub const DEFAULT_TITLE: &str = "Online Fonts";

/// Environment variable consulted by the CLI for [`SiteOptions::public_url`].
pub const PUBLIC_URL_ENV: &str = "FONTDIST_PUBLIC_URL";

/// Presentation options for the generated HTML pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOptions {
    pub title: String,
    /// Where the site will be served from, used in copyable usage snippets.
    pub public_url: Option<String>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            public_url: None,
        }
    }
}

/// Everything a single build run needs to know.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    /// Wiped and regenerated on every build.
    pub output_dir: PathBuf,
    /// Directory holding the optional `CNAME` and `.nojekyll` files.
    pub project_root: PathBuf,
    pub site: SiteOptions,
    pub jobs: Option<usize>,
    pub follow_symlinks: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new("data", "dist")
    }
}

impl BuildConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            project_root: PathBuf::from("."),
            site: SiteOptions::default(),
            jobs: None,
            follow_symlinks: false,
        }
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.site.title = title.into();
        self
    }

    pub fn with_public_url(mut self, url: Option<String>) -> Self {
        self.site.public_url = url;
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Check the configuration and normalize the public URL.
    ///
    /// The output directory is deleted by every build, so it may not be (or
    /// contain) the input directory or the project root. It may not sit inside
    /// the input directory either, where it would be scanned as a family.
    pub fn validate(&mut self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(anyhow!("jobs must be at least 1"));
        }

        if let Some(url) = self.site.public_url.take() {
            self.site.public_url = Some(normalize_public_url(&url)?);
        }

        let output = absolute(&self.output_dir)?;
        let input = absolute(&self.input_dir)?;
        if input.starts_with(&output) {
            return Err(anyhow!(
                "output directory {} would overwrite input directory {}",
                self.output_dir.display(),
                self.input_dir.display()
            ));
        }
        if output.starts_with(&input) {
            return Err(anyhow!(
                "output directory {} is inside input directory {}",
                self.output_dir.display(),
                self.input_dir.display()
            ));
        }

        let root = absolute(&self.project_root)?;
        if root.starts_with(&output) {
            return Err(anyhow!(
                "output directory {} would overwrite project root {}",
                self.output_dir.display(),
                self.project_root.display()
            ));
        }

        Ok(())
    }
}

/// Validate a public base URL and strip trailing slashes.
pub fn normalize_public_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("public url must start with http:// or https://: {raw}"));
    }
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '<' | '>' | '\\'))
    {
        return Err(anyhow!("public url contains unsupported characters: {raw}"));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    // Canonicalize what exists; the output directory may not exist yet.
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("resolving current directory")?
            .join(path)
    };
    match (joined.parent(), joined.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(joined),
        },
        _ => Ok(joined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn normalizes_public_url() {
        let url = normalize_public_url("https://fonts.example.com/").expect("valid");
        assert_eq!(url, "https://fonts.example.com");
        assert!(normalize_public_url("fonts.example.com").is_err());
        assert!(normalize_public_url("https://x.com/a b").is_err());
        assert!(normalize_public_url("https://x.com/'").is_err());
    }

    #[test]
    fn rejects_zero_jobs() {
        let tmp = tempdir().expect("tempdir");
        let mut config = BuildConfig::new(tmp.path().join("data"), tmp.path().join("dist"))
            .with_project_root(tmp.path())
            .with_jobs(Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_output_containing_input() {
        let tmp = tempdir().expect("tempdir");
        let input = tmp.path().join("site/data");
        std::fs::create_dir_all(&input).expect("mkdir");
        let mut config = BuildConfig::new(&input, tmp.path().join("site"))
            .with_project_root(tmp.path());
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_output_inside_input() {
        let tmp = tempdir().expect("tempdir");
        let input = tmp.path().join("data");
        std::fs::create_dir_all(&input).expect("mkdir");
        let mut config =
            BuildConfig::new(&input, input.join("dist")).with_project_root(tmp.path());
        let err = config.validate().expect_err("nested output");
        assert!(err.to_string().contains("inside input directory"));
    }

    #[test]
    fn rejects_output_equal_to_project_root() {
        let tmp = tempdir().expect("tempdir");
        let input = tmp.path().join("data");
        std::fs::create_dir_all(&input).expect("mkdir");
        let mut config = BuildConfig::new(&input, tmp.path()).with_project_root(tmp.path());
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_sibling_directories() {
        let tmp = tempdir().expect("tempdir");
        let input = tmp.path().join("data");
        std::fs::create_dir_all(&input).expect("mkdir");
        let mut config = BuildConfig::new(&input, tmp.path().join("dist"))
            .with_project_root(tmp.path())
            .with_public_url(Some("https://fonts.example.com/".into()));
        config.validate().expect("valid config");
        assert_eq!(
            config.site.public_url.as_deref(),
            Some("https://fonts.example.com")
        );
    }
}
