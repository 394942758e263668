use std::path::PathBuf;
use std::str::FromStr;

use crate::consts::*;
use crate::error::AnalyzerError;

/// Per-task files written by Nextflow into every work directory.
///
/// The exit code marker is the lone `.exitcode` dotfile; every other
/// kind lives under the `.command.<kind>` convention. `None` is the
/// sentinel for "list the directories themselves".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    None,
    Exitcode,
    Log,
    Out,
    Err,
    Begin,
    Run,
    Sh,
    Trace,
}

impl Artifact {
    /// The fixed filename of this artifact inside a task directory.
    ///
    /// # Example
    ///
    /// ``` rust, no_run
    /// use nf_analyzer::core::artifacts::Artifact;
    ///
    /// assert_eq!(Artifact::Log.filename(), Some(".command.log".to_string()));
    /// assert_eq!(Artifact::None.filename(), None);
    /// ```
    pub fn filename(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Exitcode => Some(EXITCODE_FILE.to_string()),
            Self::Log => Some(format!("{}.log", COMMAND_PREFIX)),
            Self::Out => Some(format!("{}.out", COMMAND_PREFIX)),
            Self::Err => Some(format!("{}.err", COMMAND_PREFIX)),
            Self::Begin => Some(format!("{}.begin", COMMAND_PREFIX)),
            Self::Run => Some(format!("{}.run", COMMAND_PREFIX)),
            Self::Sh => Some(format!("{}.sh", COMMAND_PREFIX)),
            Self::Trace => Some(format!("{}.trace", COMMAND_PREFIX)),
        }
    }
}

impl FromStr for Artifact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "exitcode" => Ok(Self::Exitcode),
            "log" => Ok(Self::Log),
            "out" => Ok(Self::Out),
            "err" => Ok(Self::Err),
            "begin" => Ok(Self::Begin),
            "run" => Ok(Self::Run),
            "sh" => Ok(Self::Sh),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "ERROR: Unknown artifact kind '{}', expected one of {:?}",
                s, ARTIFACT_KINDS
            )),
        }
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Exitcode => write!(f, "exitcode"),
            Self::Log => write!(f, "log"),
            Self::Out => write!(f, "out"),
            Self::Err => write!(f, "err"),
            Self::Begin => write!(f, "begin"),
            Self::Run => write!(f, "run"),
            Self::Sh => write!(f, "sh"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Resolve one artifact kind to its concrete path in each task
/// directory.
///
/// Input directory order is preserved. An absent file fails the whole
/// listing unless `ignore_missing` is set, in which case the directory
/// is skipped for this kind only.
///
/// # Arguments
///
/// * `dirs` - Task directories to resolve against.
/// * `kind` - The artifact kind to list; must not be `Artifact::None`.
/// * `ignore_missing` - Skip directories lacking the file.
///
/// # Returns
///
/// A Result containing the artifact paths, or an error naming the first
/// absent file.
///
/// # Example
///
/// ``` rust, no_run
/// use std::path::PathBuf;
/// use nf_analyzer::core::artifacts::{list_artifacts, Artifact};
///
/// let dirs = vec![PathBuf::from("work/ab/cdef...")];
/// let logs = list_artifacts(&dirs, Artifact::Log, true).unwrap();
/// ```
pub fn list_artifacts(
    dirs: &[PathBuf],
    kind: Artifact,
    ignore_missing: bool,
) -> Result<Vec<PathBuf>, AnalyzerError> {
    let filename = kind.filename().ok_or_else(|| {
        AnalyzerError::InvalidOptions("cannot list files without an artifact kind".into())
    })?;

    let mut files = Vec::new();

    for dir in dirs {
        let path = dir.join(&filename);

        if path.is_file() {
            files.push(path);
        } else if !ignore_missing {
            return Err(AnalyzerError::missing_file(&path));
        }
    }

    Ok(files)
}
