use chrome_export::export;
use chrome_export::locator::{self, Platform, StoreKind};
use chrome_export::{utils, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Convert Google Chrome's bookmarks file to the standard HTML-based format.
#[derive(Parser)]
#[command(
    name = "export-chrome-bookmarks",
    long_about = None,
    disable_version_flag = true,
    override_usage = "export-chrome-bookmarks [OPTIONS] [input_file] <output_file>",
    after_help = "If input_file is omitted, Chrome's default Bookmarks location is used."
)]
struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// [input_file] output_file
    #[arg(value_name = "FILE", num_args = 0..=2)]
    files: Vec<PathBuf>,
}

fn run(input: Option<&Path>, output: &Path) -> Result<usize> {
    let input = locator::resolve_input(
        input,
        &Platform::current(),
        StoreKind::Bookmarks,
        utils::process_env,
    )?;
    export::export_bookmarks(&input, output)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    // Initialize logger
    env_logger::init();

    if args.version {
        println!("export-chrome-bookmarks {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let (input, output) = match args.files.as_slice() {
        [input, output] => (Some(input.as_path()), output.as_path()),
        [output] => (None, output.as_path()),
        _ => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided: <output_file>",
            )
            .exit(),
    };

    match run(input, output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
