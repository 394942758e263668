use clap::Parser;
use std::path::PathBuf;

use crate::core::artifacts::Artifact;

/// Analyze the output of a Nextflow run
///
/// # Example
///
/// ```bash,no_run
/// nf-analyzer --workdir work
/// nf-analyzer --workdir work --exitcode 0 --invert
/// nf-analyzer --workdir work --use-trace --trace trace.txt --status FAILED
/// nf-analyzer --workdir work --list-files log --ignore-missing
/// ```
///
/// # Note
///
/// * Matching directories (or artifact files) are printed to stdout,
///   one per line; diagnostics go to the logger.
/// * `--exitcode -1` and `--status any` mean "no filter".
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        short = 'w',
        long = "workdir",
        help = "Nextflow work directory",
        value_name = "DIR",
        required = true
    )]
    pub workdir: PathBuf,

    #[arg(
        short = 'u',
        long = "use-trace",
        help = "Resolve task directories from a trace file instead of walking the work directory"
    )]
    pub use_trace: bool,

    #[arg(
        short = 't',
        long = "trace",
        help = "Path to the trace file",
        value_name = "FILE",
        requires = "use_trace"
    )]
    pub trace: Option<PathBuf>,

    #[arg(
        short = 'l',
        long = "list-files",
        help = "Per-task file kind to list instead of the task directory",
        value_name = "KIND",
        default_value = "none"
    )]
    pub list_files: Artifact,

    #[arg(
        short = 'e',
        long = "exitcode",
        help = "Select only tasks with this exit code. If -1, keep all tasks.",
        value_name = "CODE",
        default_value = "-1",
        allow_hyphen_values = true
    )]
    pub exitcode: i32,

    #[arg(
        short = 's',
        long = "status",
        help = "Select only tasks with this trace status. If 'any', keep all tasks.",
        value_name = "STATUS",
        default_value = "any",
        requires = "use_trace"
    )]
    pub status: String,

    #[arg(
        short = 'i',
        long = "invert",
        help = "Invert the active exit code or status filter"
    )]
    pub invert: bool,

    #[arg(
        long = "ignore-missing",
        help = "Skip task directories lacking the requested file instead of failing"
    )]
    pub ignore_missing: bool,

    #[arg(
        long = "strict-exitcodes",
        help = "Fail on a missing .exitcode file instead of recording the -100 sentinel"
    )]
    pub strict_exitcodes: bool,

    #[arg(
        short = 'c',
        long = "config",
        help = "Path to an optional TOML defaults file",
        value_name = "FILE"
    )]
    pub config: Option<PathBuf>,
}
