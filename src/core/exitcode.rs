use serde::Deserialize;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::consts::*;
use crate::error::AnalyzerError;

/// Policy for task directories lacking an `.exitcode` file.
///
/// Nextflow only writes `.exitcode` once a task has finished, so a run
/// that was killed mid-flight legitimately contains directories without
/// one. Lenient mode records the -100 sentinel for those and keeps
/// going; strict mode fails the whole batch.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExitcodeMode {
    Strict,
    Lenient,
}

impl FromStr for ExitcodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(format!(
                "ERROR: Unknown exit code mode '{}', expected one of {:?}",
                s, EXITCODE_MODES
            )),
        }
    }
}

impl std::fmt::Display for ExitcodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// For a list of task directories, read the value of the `.exitcode`
/// file in each.
///
/// The map is rebuilt from scratch per invocation and keyed 1:1 with
/// its input: every directory yields exactly one entry, in input order.
/// A directory is never silently dropped; what happens on a missing
/// file is decided by `mode`. A present but unparseable file is fatal
/// in both modes.
///
/// # Arguments
///
/// * `dirs` - Task directories to read.
/// * `mode` - Policy for missing `.exitcode` files.
///
/// # Returns
///
/// A Result containing one `(directory, exit code)` pair per input
/// directory, or an error.
///
/// # Example
///
/// ``` rust, no_run
/// use std::path::PathBuf;
/// use nf_analyzer::core::exitcode::{collect_exitcodes, ExitcodeMode};
///
/// let dirs = vec![PathBuf::from("work/ab/cdef...")];
/// let codes = collect_exitcodes(&dirs, ExitcodeMode::Lenient).unwrap();
/// ```
pub fn collect_exitcodes(
    dirs: &[PathBuf],
    mode: ExitcodeMode,
) -> Result<Vec<(PathBuf, i32)>, AnalyzerError> {
    let mut codes = Vec::with_capacity(dirs.len());

    for dir in dirs {
        let path = dir.join(EXITCODE_FILE);

        if !path.is_file() {
            match mode {
                ExitcodeMode::Strict => return Err(AnalyzerError::missing_file(&path)),
                ExitcodeMode::Lenient => {
                    log::warn!("WARN: no {} file at {}", EXITCODE_FILE, dir.display());
                    codes.push((dir.clone(), MISSING_EXITCODE));
                    continue;
                }
            }
        }

        let contents = fs::read_to_string(&path).map_err(|e| AnalyzerError::io(&path, e))?;
        let code = contents
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<i32>()
            .map_err(|e| AnalyzerError::InvalidExitcode {
                path: path.display().to_string(),
                source: e,
            })?;

        codes.push((dir.clone(), code));
    }

    Ok(codes)
}

/// Select the directories whose exit code matches `exitcode`, or the
/// complement when `invert` is set.
///
/// Only meaningful when `exitcode` is not the -1 sentinel; the caller
/// is expected to skip the call entirely when no filter is requested.
/// Input order is preserved.
///
/// # Arguments
///
/// * `codes` - Per-directory exit codes, as built by `collect_exitcodes`.
/// * `exitcode` - The exit code to select.
/// * `invert` - Select the complement instead.
///
/// # Returns
///
/// The matching directories, in input order.
///
/// # Example
///
/// ``` rust, no_run
/// use nf_analyzer::core::exitcode::select_by_exitcode;
///
/// let failed = select_by_exitcode(&codes, 0, true);
/// ```
pub fn select_by_exitcode(codes: &[(PathBuf, i32)], exitcode: i32, invert: bool) -> Vec<PathBuf> {
    codes
        .iter()
        .filter(|(_, code)| (*code == exitcode) != invert)
        .map(|(dir, _)| dir.clone())
        .collect()
}
