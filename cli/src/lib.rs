//! fontdist CLI

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use serde::Serialize;

use fontdist_core::classify::{classify, FontStyle};
use fontdist_core::config::{BuildConfig, DEFAULT_TITLE, PUBLIC_URL_ENV};
use fontdist_core::discovery::font_base_name;
use fontdist_core::site::{build_site, BuildReport};

/// CLI entrypoint for fontdist.
#[derive(Debug, Parser)]
#[command(
    name = "fontdist",
    about = "Build a static font-distribution site from a directory of font families"
)]
pub struct Cli {
    /// Log every copied file and skipped optional file
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Defaults to `build`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan the input directory and regenerate the output site
    Build(BuildArgs),
    /// Show the weight and style inferred from font base names
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Directory containing one subdirectory per font family
    #[arg(short = 'i', long = "input", default_value = "data", value_hint = ValueHint::DirPath)]
    input: PathBuf,

    /// Output directory (removed and regenerated on every build)
    #[arg(short = 'o', long = "output", default_value = "dist", value_hint = ValueHint::DirPath)]
    output: PathBuf,

    /// Directory holding optional CNAME and .nojekyll files
    #[arg(long = "root", default_value = ".", value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// Title shown on the generated pages
    #[arg(long = "title", default_value = DEFAULT_TITLE)]
    title: String,

    /// Public base URL used in usage snippets (falls back to FONTDIST_PUBLIC_URL)
    #[arg(long = "public-url", value_hint = ValueHint::Url)]
    public_url: Option<String>,

    /// Number of threads used to copy font files
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Follow symlinked family directories and font files
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Print the build report as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data"),
            output: PathBuf::from("dist"),
            root: PathBuf::from("."),
            title: DEFAULT_TITLE.to_string(),
            public_url: None,
            jobs: None,
            follow_symlinks: false,
            json: false,
        }
    }
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    /// Base names (or file names) to classify
    #[arg(required = true)]
    names: Vec<String>,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command.unwrap_or_else(|| Command::Build(BuildArgs::default())) {
        Command::Build(args) => run_build(args),
        Command::Classify(args) => run_classify(args),
    }
}

/// Initialize logging based on the verbosity flag.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run_build(args: BuildArgs) -> Result<()> {
    let config = build_config(&args, env::var(PUBLIC_URL_ENV).ok());
    let report = build_site(&config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        write_report_json(&report, &mut handle)
    } else {
        write_report(&report, &mut handle)
    }
}

fn build_config(args: &BuildArgs, env_public_url: Option<String>) -> BuildConfig {
    let public_url = args
        .public_url
        .clone()
        .or(env_public_url.filter(|url| !url.trim().is_empty()));

    BuildConfig::new(&args.input, &args.output)
        .with_project_root(&args.root)
        .with_title(args.title.clone())
        .with_public_url(public_url)
        .with_jobs(args.jobs)
        .follow_symlinks(args.follow_symlinks)
}

fn write_report(report: &BuildReport, mut w: impl Write) -> Result<()> {
    writeln!(
        w,
        "built {}: {} families, {} variants, {} font files",
        report.output_dir.display(),
        report.families,
        report.variants,
        report.files_copied
    )?;
    Ok(())
}

fn write_report_json(report: &BuildReport, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(w, "{json}")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ClassifiedName<'a> {
    name: &'a str,
    weight: u16,
    style: FontStyle,
}

fn run_classify(args: ClassifyArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_classified(&args.names, args.ndjson, &mut handle)
}

fn write_classified(names: &[String], ndjson: bool, mut w: impl Write) -> Result<()> {
    for name in names {
        // `Acme-Bold.ttf` and `Acme-Bold` classify the same way.
        let base = font_base_name(name).unwrap_or(name);
        let class = classify(base);
        if ndjson {
            let line = serde_json::to_string(&ClassifiedName {
                name: base,
                weight: class.weight,
                style: class.style,
            })?;
            writeln!(w, "{line}")?;
        } else {
            writeln!(w, "{base}\t{}\t{}", class.weight, class.style)?;
        }
    }
    Ok(())
}
