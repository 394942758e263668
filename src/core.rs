use std::path::PathBuf;

use crate::config::Config;
use crate::consts::*;
use crate::core::artifacts::{list_artifacts, Artifact};
use crate::core::exitcode::{collect_exitcodes, select_by_exitcode};
use crate::core::locator::list_work_dirs;
use crate::core::trace::{parse_trace, resolve_trace_dirs};
use crate::error::AnalyzerError;

pub mod artifacts;
pub mod exitcode;
pub mod locator;
pub mod trace;

/// Run one analyzer invocation end to end.
///
/// Task directories come either from walking the work directory layout
/// or from correlating the trace file, are then narrowed by the exit
/// code filter, and finally either the directories themselves or one
/// artifact file per directory are printed to stdout, one per line.
///
/// # Arguments
///
/// * `config` - The resolved run settings.
///
/// # Example
///
/// ``` rust, no_run
/// use clap::Parser;
/// use nf_analyzer::{cli::Args, config::Config, core::run};
///
/// let config = Config::resolve(Args::parse()).unwrap();
/// run(config).unwrap();
/// ```
pub fn run(config: Config) -> Result<(), AnalyzerError> {
    let dirs = select_dirs(&config)?;

    if config.list_files == Artifact::None {
        for dir in &dirs {
            println!("{}", dir.display());
        }
        return Ok(());
    }

    let files = list_artifacts(&dirs, config.list_files, config.ignore_missing)?;
    log::info!(
        "INFO: {} of {} task directories carry a {} file",
        files.len(),
        dirs.len(),
        config.list_files
    );

    for file in &files {
        println!("{}", file.display());
    }

    Ok(())
}

/// Produce the filtered set of task directories for this invocation.
fn select_dirs(config: &Config) -> Result<Vec<PathBuf>, AnalyzerError> {
    let dirs = if config.use_trace {
        let table = parse_trace(&config.trace)?;
        log::info!("INFO: parsed {} trace rows from {}", table.len(), config.trace.display());

        resolve_trace_dirs(&table, &config.workdir, &config.status, config.invert)?
    } else {
        list_work_dirs(&config.workdir)?
    };

    log::info!("INFO: {} task directories selected", dirs.len());

    if config.exitcode == ANY_EXITCODE {
        return Ok(dirs);
    }

    let codes = collect_exitcodes(&dirs, config.exitcode_mode)?;
    let kept = select_by_exitcode(&codes, config.exitcode, config.invert);
    log::info!(
        "INFO: exit code filter {} kept {} of {} directories",
        config.exitcode,
        kept.len(),
        codes.len()
    );

    Ok(kept)
}
