extern crate pxls;

mod error;
mod extract;
mod logfile;
mod manifest;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use miette::{IntoDiagnostic, Result};
use pxls::{Report, ReportSink, Severity};

use crate::error::ToolError;
use crate::extract::Extractor;
use crate::manifest::ManifestEntry;

#[derive(Parser, Debug)]
#[command(name = "PXLS Unpack")]
#[command(about, author, version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check if the descriptor file can be parsed
    #[command(arg_required_else_help = true)]
    Check {
        /// Descriptor file
        file: String,
    },
    /// Extract sprites of every descriptor in a directory
    Extract(ExtractOptions),
    /// Print a list of sprites in the descriptor file
    #[command(arg_required_else_help = true)]
    Ls {
        /// Descriptor file
        file: String,
    },
}

#[derive(Args, Debug, Clone)]
struct ExtractOptions {
    /// Inbound directory with descriptors and textures
    #[arg(short, long, default_value = "files", value_name = "DIR")]
    input: String,
    /// Outbound directory
    #[arg(short, long, default_value = "unpack", value_name = "DIR")]
    out: String,
    /// Descriptor file name suffix
    #[arg(long, default_value = ".pxls.bytes")]
    suffix: String,
    /// Suffix appended to a descriptor path to get its texture
    #[arg(long, default_value = ".texture_0.png")]
    texture_suffix: String,
    /// Append-only log of warnings and errors
    #[arg(long, default_value = "log.txt", value_name = "FILE")]
    log: String,
    /// Write an index.json next to the extracted sprites
    #[arg(long, default_value_t = false)]
    manifest: bool,
}

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info";

pub fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER));

    let stdout = console::Term::stdout();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => command_check(stdout, file)?,
        Commands::Extract(options) => command_extract(stdout, options)?,
        Commands::Ls { file } => command_ls(stdout, file)?,
    }

    Ok(())
}

fn command_check(stdout: console::Term, file: String) -> Result<()> {
    let bytes = std::fs::read(file).into_diagnostic()?;
    let catalog = pxls::build_catalog(&bytes)?;

    for diagnostic in &catalog.diagnostics {
        let text = format!(
            "{} Record {} ({}): {}",
            styled_tag(diagnostic.issue.severity()),
            diagnostic.index,
            diagnostic.fingerprint,
            diagnostic.issue
        );
        stdout.write_line(&text).into_diagnostic()?;
    }

    let text = format!(
        "Total records: {};\nResolved sprites: {};\nSkipped records: {};",
        catalog.entries.len() + catalog.diagnostics.len(),
        catalog.entries.len(),
        catalog.diagnostics.len()
    );
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn command_extract(stdout: console::Term, options: ExtractOptions) -> Result<()> {
    let mut sink = logfile::LogFile::open(&options.log).into_diagnostic()?;
    let descriptors = find_descriptors(Path::new(&options.input), &options.suffix).into_diagnostic()?;
    let bar = ProgressBar::new(descriptors.len() as u64);

    bar.set_style(get_bar_style()?);

    for path in descriptors {
        let file_name = get_file_name(&path);
        bar.set_message(file_name.clone());
        bar.println(format!(
            "{} Processing file: {}",
            styled_tag(Severity::Done),
            file_name
        ));

        match process_descriptor(&bar, &path, &file_name, &options, &mut sink) {
            Ok(()) => bar.println(format!("{} File processed.", styled_tag(Severity::Done))),
            Err(error) => {
                sink.report(Report {
                    severity: Severity::Error,
                    source: file_name.clone(),
                    message: format!("processing failed: {error}"),
                });
                bar.println(format!(
                    "{} Failed to process {}, see {} for details.",
                    styled_tag(Severity::Error),
                    file_name,
                    options.log
                ));
            }
        }

        bar.inc(1);
    }

    bar.finish();

    let text = format!("{} All files processed.", styled_tag(Severity::Done));
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn command_ls(stdout: console::Term, file: String) -> Result<()> {
    let bytes = std::fs::read(file).into_diagnostic()?;
    let catalog = pxls::build_catalog(&bytes)?;

    for entry in catalog.entries {
        let text = format!(
            "{} {} {} {} {}",
            entry.name, entry.x, entry.y, entry.width, entry.height
        );
        stdout.write_line(&text).into_diagnostic()?;
    }

    Ok(())
}

/// Extract every sprite of one descriptor. Record and crop failures go to
/// `sink`; only failures that stop the whole file are returned.
fn process_descriptor(
    bar: &ProgressBar,
    path: &Path,
    file_name: &str,
    options: &ExtractOptions,
    sink: &mut dyn ReportSink,
) -> Result<(), ToolError> {
    let bytes = std::fs::read(path)?;
    let Some(catalog) = pxls::report_catalog(file_name, &bytes, sink) else {
        return Ok(());
    };

    let texture = get_texture_path(path, &options.texture_suffix);
    let out_dir = Path::new(&options.out).join(get_output_name(file_name, &options.suffix));
    let extractor = Extractor::open(&texture, &out_dir)?;
    let mut saved: Vec<ManifestEntry> = Vec::new();

    for entry in &catalog.entries {
        match extractor.extract(entry) {
            Ok(target) => {
                bar.println(format!(
                    "{} Saved: {}",
                    styled_tag(Severity::Success),
                    target.display()
                ));
                saved.push(ManifestEntry::new(entry, &target));
            }
            Err(error) => sink.report(Report {
                severity: Severity::Error,
                source: file_name.to_string(),
                message: format!("{}: {error}", entry.name),
            }),
        }
    }

    if options.manifest && !saved.is_empty() {
        manifest::write_manifest(extractor.out_dir(), &saved)?;
    }

    Ok(())
}

/// Descriptor files in `dir` whose name ends with `suffix`, sorted by name.
fn find_descriptors(dir: &Path, suffix: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && get_file_name(&path).ends_with(suffix) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn get_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn get_output_name<'a>(file_name: &'a str, suffix: &str) -> &'a str {
    file_name.strip_suffix(suffix).unwrap_or(file_name)
}

fn get_texture_path(descriptor: &Path, texture_suffix: &str) -> PathBuf {
    let mut path = OsString::from(descriptor.as_os_str());
    path.push(texture_suffix);
    PathBuf::from(path)
}

fn styled_tag(severity: Severity) -> console::StyledObject<&'static str> {
    let tag = console::style(severity.tag());
    match severity {
        Severity::Success => tag.green(),
        Severity::Warning => tag.yellow(),
        Severity::Error => tag.red(),
        Severity::Done => tag.cyan(),
    }
}

fn get_bar_style() -> Result<indicatif::ProgressStyle> {
    Ok(
        indicatif::ProgressStyle::with_template("[{bar:32}] {pos:>7}/{len:7} {msg}")
            .into_diagnostic()?
            .progress_chars("=>-"),
    )
}
