//! fontdist-core: turns a folder of font families into a static font site
//!
//! Drop one directory per family into `data/`, fill it with `.ttf` and
//! `.woff2` files, and this crate produces everything a static host needs:
//! copied font binaries, `@font-face` stylesheets, a `fonts.json` manifest and
//! two small HTML pages that read that manifest in the browser.
//!
//! ## The pipeline
//!
//! **Scanning** ([`discovery`]): every subdirectory is a family, every base
//! name is a variant, and `.ttf`/`.woff2` siblings share a variant.
//!
//! **Classifying** ([`classify`]): weight and style are guessed from the file
//! name alone. `Acme-700` is bold, `Acme-ExtraBold` is 800, `Acme-It` leans.
//! No font tables are opened; it is a heuristic and it knows it.
//!
//! **Generating** ([`copy`], [`css`], [`manifest`], [`pages`]): binaries are
//! copied under `files/`, rules collected into `css/<family>.css` and
//! `css/all.css`, and the manifest written in scan order.
//!
//! ## A quick build
//!
//! ```rust,no_run
//! use fontdist_core::config::BuildConfig;
//! use fontdist_core::site::build_site;
//!
//! let config = BuildConfig::new("data", "dist").with_title("House Fonts");
//! let report = build_site(&config)?;
//! println!(
//!     "{} families, {} variants, {} files",
//!     report.families, report.variants, report.files_copied
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Re-running a build on unchanged input produces byte-identical output: the
//! output directory is wiped first and every listing is visited in file-name
//! order.

pub mod classify;
pub mod config;
pub mod copy;
pub mod css;
pub mod discovery;
pub mod manifest;
pub mod pages;
pub mod site;
