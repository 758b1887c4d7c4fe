use chrome_export::batch::{self, BatchExporter, BatchReport, OsFilesystem, SubprocessExporter};
use chrome_export::config::Config;
use chrome_export::locator::Platform;
use chrome_export::{utils, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Export the bookmarks of every Chrome and Brave profile to HTML files.
#[derive(Parser)]
#[command(name = "export-all-chrome-bookmarks", long_about = None, disable_version_flag = true)]
struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Optional custom configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the exported files (default: ./output)
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Program run for each profile as `<program> <Bookmarks> <output>`
    #[arg(long)]
    exporter: Option<PathBuf>,
}

fn print_report(report: &BatchReport) {
    for (profile, output) in &report.exported {
        println!(
            "{} {} -> {}",
            "✓".green(),
            profile.display_string().bold(),
            output.display()
        );
    }
    for (browser, reason) in &report.unreadable {
        eprintln!(
            "{} {}: {}",
            "✗".red(),
            browser.name.bold(),
            reason
        );
    }
    for (profile, reason) in &report.failed {
        eprintln!(
            "{} {}: {}",
            "✗".red(),
            profile.display_string().bold(),
            reason
        );
    }
    eprintln!(
        "Exported {} profile(s), {} failed",
        report.exported.len(),
        report.failed.len() + report.unreadable.len()
    );
}

fn run(args: &Cli) -> Result<BatchReport> {
    let cfg = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };

    let browsers = cfg
        .browsers
        .clone()
        .unwrap_or_else(|| batch::default_browsers(&Platform::current(), utils::process_env));
    if browsers.is_empty() {
        eprintln!("No browser locations known for this system; set `browsers` in the config file.");
    }

    let exporter = match args.exporter.as_ref().or(cfg.exporter.as_ref()) {
        Some(program) => SubprocessExporter::new(program),
        None => SubprocessExporter::sibling(),
    };
    log::debug!("Using exporter {}", exporter.program().display());

    let output_dir = args.output_dir.clone().unwrap_or(cfg.output_dir);
    let batch = BatchExporter::new(&OsFilesystem, &exporter, output_dir);
    batch.run(&browsers)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    // Initialize logger
    env_logger::init();

    if args.version {
        println!("export-all-chrome-bookmarks {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(report) => {
            print_report(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
