//! Export the bookmarks of every profile of every configured browser
//!
//! Each profile is exported by a separate process, one after another. A
//! failing profile is logged and reported but never stops the batch.

use crate::config::BrowserRoot;
use crate::error::{ExportError, Result};
use crate::locator::Platform;
use chrono::{DateTime, Local, TimeZone};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the single-profile bookmarks exporter binary
pub const BOOKMARKS_EXPORTER: &str = "export-chrome-bookmarks";

const BOOKMARKS_FILE: &str = "Bookmarks";

/// Filesystem operations profile discovery needs
pub trait ProfileFilesystem {
    /// Names of the directories directly under `root`
    fn list_dirs(&self, root: &Path) -> io::Result<Vec<String>>;
    fn is_file(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`ProfileFilesystem`] over the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl ProfileFilesystem for OsFilesystem {
    fn list_dirs(&self, root: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(root)? {
            // One unreadable entry must not hide the other profiles
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

/// A browser profile that has a bookmarks file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub browser: String,
    pub name: String,
    pub bookmarks: PathBuf,
}

impl Profile {
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.browser, self.name)
    }
}

/// Runs the export of a single profile
pub trait ProfileExporter {
    fn export(&self, profile: &Profile, output: &Path) -> Result<()>;
}

/// Runs an external program as `<program> <Bookmarks> <output>`
#[derive(Debug, Clone)]
pub struct SubprocessExporter {
    program: PathBuf,
}

impl SubprocessExporter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The bookmarks exporter installed next to the running executable,
    /// or looked up on `PATH` when there is none
    pub fn sibling() -> Self {
        let file_name = format!("{}{}", BOOKMARKS_EXPORTER, std::env::consts::EXE_SUFFIX);
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(&file_name)))
            .filter(|path| path.is_file());
        Self::new(beside_exe.unwrap_or_else(|| PathBuf::from(file_name)))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ProfileExporter for SubprocessExporter {
    fn export(&self, profile: &Profile, output: &Path) -> Result<()> {
        debug!(
            "Running {} {} {}",
            self.program.display(),
            profile.bookmarks.display(),
            output.display()
        );
        let status = Command::new(&self.program)
            .arg(&profile.bookmarks)
            .arg(output)
            .status()
            .map_err(|e| ExportError::ProfileExport {
                profile: profile.display_string(),
                reason: format!("could not run {}: {}", self.program.display(), e),
            })?;

        if !status.success() {
            return Err(ExportError::ProfileExport {
                profile: profile.display_string(),
                reason: format!("{} exited with {}", self.program.display(), status),
            });
        }
        Ok(())
    }
}

/// Chrome and Brave configuration roots for a platform
pub fn default_browsers<E>(platform: &Platform, env: E) -> Vec<BrowserRoot>
where
    E: Fn(&str) -> Option<String>,
{
    let roots: [(&str, PathBuf); 2] = match platform {
        Platform::Linux => match env("HOME") {
            Some(home) => {
                let home = PathBuf::from(home);
                [
                    ("chrome", home.join(".config/google-chrome")),
                    ("brave", home.join(".config/BraveSoftware/Brave-Browser")),
                ]
            }
            None => return Vec::new(),
        },
        Platform::MacOs => match env("HOME") {
            Some(home) => {
                let support = PathBuf::from(home).join("Library/Application Support");
                [
                    ("chrome", support.join("Google/Chrome")),
                    ("brave", support.join("BraveSoftware/Brave-Browser")),
                ]
            }
            None => return Vec::new(),
        },
        Platform::Windows => match env("LOCALAPPDATA") {
            Some(base) => {
                let base = PathBuf::from(base);
                [
                    ("chrome", base.join("Google").join("Chrome").join("User Data")),
                    (
                        "brave",
                        base.join("BraveSoftware")
                            .join("Brave-Browser")
                            .join("User Data"),
                    ),
                ]
            }
            None => return Vec::new(),
        },
        Platform::Other(_) => return Vec::new(),
    };

    roots
        .into_iter()
        .map(|(name, path)| BrowserRoot {
            name: name.to_string(),
            path,
        })
        .collect()
}

/// Profiles under `browser.path` that contain a `Bookmarks` file, sorted by name
pub fn discover_profiles(
    fs: &dyn ProfileFilesystem,
    browser: &BrowserRoot,
) -> io::Result<Vec<Profile>> {
    let mut names = fs.list_dirs(&browser.path)?;
    names.sort();

    Ok(names
        .into_iter()
        .filter_map(|name| {
            let bookmarks = browser.path.join(&name).join(BOOKMARKS_FILE);
            if fs.is_file(&bookmarks) {
                Some(Profile {
                    browser: browser.name.clone(),
                    name,
                    bookmarks,
                })
            } else {
                None
            }
        })
        .collect())
}

/// `{browser}-{profile}-bookmarks-{YYYY-MM-DD-HH-MM-SS}.html`
pub fn output_file_name<Tz>(browser: &str, profile: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}-{}-bookmarks-{}.html",
        browser,
        profile,
        timestamp.format("%Y-%m-%d-%H-%M-%S")
    )
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub exported: Vec<(Profile, PathBuf)>,
    pub failed: Vec<(Profile, String)>,
    /// Browser roots that exist but could not be listed
    pub unreadable: Vec<(BrowserRoot, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.unreadable.is_empty()
    }
}

/// Drives [`ProfileExporter`] over every discovered profile
pub struct BatchExporter<'a> {
    fs: &'a dyn ProfileFilesystem,
    exporter: &'a dyn ProfileExporter,
    output_dir: PathBuf,
    clock: Box<dyn Fn() -> DateTime<Local> + 'a>,
}

impl<'a> BatchExporter<'a> {
    pub fn new(
        fs: &'a dyn ProfileFilesystem,
        exporter: &'a dyn ProfileExporter,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            exporter,
            output_dir: output_dir.into(),
            clock: Box::new(Local::now),
        }
    }

    /// Use a fixed or fake clock for output file names
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Local> + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Export every profile of every browser; only output directory
    /// creation failing aborts the batch
    pub fn run(&self, browsers: &[BrowserRoot]) -> Result<BatchReport> {
        self.fs
            .create_dir_all(&self.output_dir)
            .map_err(|source| ExportError::CreateDirFailed {
                path: self.output_dir.clone(),
                source,
            })?;

        let mut report = BatchReport::default();
        for browser in browsers {
            info!("Exporting bookmarks for {}", browser.name);

            let profiles = match discover_profiles(self.fs, browser) {
                Ok(profiles) => profiles,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(
                        "Skipping {}: {} does not exist",
                        browser.name,
                        browser.path.display()
                    );
                    continue;
                }
                Err(e) => {
                    let reason = format!("cannot list {}: {}", browser.path.display(), e);
                    warn!("{}: {}", browser.name, reason);
                    report.unreadable.push((browser.clone(), reason));
                    continue;
                }
            };

            for profile in profiles {
                let now = (self.clock)();
                let file_name = output_file_name(&profile.browser, &profile.name, &now);
                let output = self.output_dir.join(file_name);

                match self.exporter.export(&profile, &output) {
                    Ok(()) => {
                        info!("Exported bookmarks for profile: {}", profile.name);
                        report.exported.push((profile, output));
                    }
                    Err(e) => {
                        warn!("{}", e);
                        report.failed.push((profile, e.to_string()));
                    }
                }
            }
        }

        Ok(report)
    }
}
