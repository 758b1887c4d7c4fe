use chrome_export::config::Config;
use chrome_export::export::{HistoryExport, RenderOptions};
use chrome_export::locator::{self, Platform, StoreKind};
use chrome_export::{utils, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Convert Google Chrome's history file to the standard HTML-based bookmarks format.
#[derive(Parser)]
#[command(
    name = "export-chrome-history",
    long_about = None,
    disable_version_flag = true,
    override_usage = "export-chrome-history [OPTIONS] [input_file] <output_file>",
    after_help = "If input_file is omitted, Chrome's default History location is used."
)]
struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Optional custom configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also export history entries without a title, using the URL as text
    #[arg(long)]
    include_untitled: bool,

    /// [input_file] output_file
    #[arg(value_name = "FILE", num_args = 0..=2)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn input_file(&self) -> Option<&Path> {
        match self.files.as_slice() {
            [input, _] => Some(input),
            _ => None,
        }
    }

    fn output_file(&self) -> Option<&Path> {
        self.files.last().map(PathBuf::as_path)
    }
}

fn run(args: &Cli, output: &Path) -> Result<usize> {
    let cfg = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load(),
    };

    let input = locator::resolve_input(
        args.input_file(),
        &Platform::current(),
        StoreKind::History,
        utils::process_env,
    )?;

    let options = RenderOptions {
        include_untitled: args.include_untitled || cfg.include_untitled,
    };
    HistoryExport::new(options).run(&input, output)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    // Initialize logger
    env_logger::init();

    if args.version {
        println!("export-chrome-history {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let Some(output) = args.output_file() else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided: <output_file>",
            )
            .exit();
    };

    match run(&args, output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
