use std::path::Path;

/// Error taxonomy for a single analyzer invocation.
///
/// Every variant is fatal: errors propagate to `main`, are logged once
/// and terminate the batch. There is no partial-success reporting.
///
/// # Example
///
/// ``` rust, no_run
/// use nf_analyzer::error::AnalyzerError;
///
/// let err = AnalyzerError::missing_file("/work/ab/cdef.../.exitcode");
/// eprintln!("{}", err);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("invalid work directory layout at {path}: {reason}")]
    InvalidLayout { path: String, reason: String },

    #[error("expected file missing: {path}")]
    MissingFile { path: String },

    #[error("trace hash '{hash}' matched {matches} directories under {root}")]
    HashResolution {
        hash: String,
        matches: usize,
        root: String,
    },

    #[error("trace row {line} has no '{column}' column")]
    MissingColumn { column: String, line: usize },

    #[error("could not parse exit code in {path}: {source}")]
    InvalidExitcode {
        path: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid option combination: {0}")]
    InvalidOptions(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl AnalyzerError {
    pub fn invalid_layout(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_file(path: impl AsRef<Path>) -> Self {
        Self::MissingFile {
            path: path.as_ref().display().to_string(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
