use serde::Deserialize;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::consts::*;
use crate::core::artifacts::Artifact;
use crate::core::exitcode::ExitcodeMode;
use crate::error::AnalyzerError;

/// A struct representing the resolved settings of one analyzer run.
///
/// Built from the command line, optionally backed by a TOML defaults
/// file. Explicit flags win over file defaults, file defaults win over
/// the built-in ones.
///
/// # Example
///
/// ``` toml
/// [defaults]
/// trace_file = "trace.txt"
/// exitcode_mode = "lenient"
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub workdir: PathBuf,
    pub use_trace: bool,
    pub trace: PathBuf,
    pub list_files: Artifact,
    pub exitcode: i32,
    pub status: String,
    pub invert: bool,
    pub ignore_missing: bool,
    pub exitcode_mode: ExitcodeMode,
}

impl Config {
    /// Resolve a Config from parsed arguments.
    ///
    /// # Arguments
    ///
    /// * `args` - The parsed command line arguments.
    ///
    /// # Returns
    ///
    /// A Result containing a validated Config or an error.
    ///
    /// # Example
    ///
    /// ``` rust, no_run
    /// use clap::Parser;
    /// use nf_analyzer::{cli::Args, config::Config};
    ///
    /// let args = Args::parse();
    /// let config = Config::resolve(args).unwrap();
    /// ```
    pub fn resolve(args: Args) -> Result<Self, AnalyzerError> {
        let defaults = match &args.config {
            Some(path) => Defaults::read(path)?,
            None => Defaults::default(),
        };

        let trace = args.trace.unwrap_or_else(|| {
            PathBuf::from(
                defaults
                    .defaults
                    .trace_file
                    .unwrap_or_else(|| TRACE_FILE.to_string()),
            )
        });

        let exitcode_mode = if args.strict_exitcodes {
            ExitcodeMode::Strict
        } else {
            defaults
                .defaults
                .exitcode_mode
                .unwrap_or(ExitcodeMode::Lenient)
        };

        let config = Self {
            workdir: args.workdir,
            use_trace: args.use_trace,
            trace,
            list_files: args.list_files,
            exitcode: args.exitcode,
            status: args.status,
            invert: args.invert,
            ignore_missing: args.ignore_missing,
            exitcode_mode,
        };

        config.check()?;

        Ok(config)
    }

    /// Validate jointly-required option combinations.
    ///
    /// # Returns
    ///
    /// A Result containing () or an error naming the offending options.
    fn check(&self) -> Result<(), AnalyzerError> {
        if self.status != ANY_STATUS && !self.use_trace {
            return Err(AnalyzerError::InvalidOptions(
                "--status requires --use-trace".into(),
            ));
        }

        if self.ignore_missing && self.list_files == Artifact::None {
            return Err(AnalyzerError::InvalidOptions(
                "--ignore-missing requires --list-files".into(),
            ));
        }

        Ok(())
    }
}

/// File-level defaults, read from an optional TOML file.
#[derive(Deserialize, Debug, Default)]
pub struct Defaults {
    #[serde(default)]
    pub defaults: DefaultsSection,
}

#[derive(Deserialize, Debug, Default)]
pub struct DefaultsSection {
    pub trace_file: Option<String>,
    pub exitcode_mode: Option<ExitcodeMode>,
}

impl Defaults {
    /// Read a defaults file and return a Defaults struct.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML defaults file.
    ///
    /// # Returns
    ///
    /// A Result containing a Defaults struct or an error.
    ///
    /// # Example
    ///
    /// ``` rust, no_run
    /// use std::path::Path;
    /// use nf_analyzer::config::Defaults;
    ///
    /// let defaults = Defaults::read(Path::new("analyzer.toml")).unwrap();
    /// ```
    pub fn read(path: &Path) -> Result<Self, AnalyzerError> {
        let mut file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalyzerError::missing_file(path),
            _ => AnalyzerError::io(path, e),
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AnalyzerError::io(path, e))?;

        toml::from_str(&contents).map_err(|e| AnalyzerError::ParseConfig {
            path: path.display().to_string(),
            source: e,
        })
    }
}
