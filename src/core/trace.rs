use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::*;
use crate::error::AnalyzerError;

/// In-memory form of a Nextflow trace file.
///
/// The first line of the file declares the column set; every following
/// line is one executed task. No schema is enforced beyond what the
/// header declares: `hash` and `status` are only required by the
/// operations that consume them.
///
/// # Fields
///
/// * `columns` - Column names, in header order.
/// * `rows` - One column-to-value mapping per task, in file order.
#[derive(Debug, Clone)]
pub struct TraceTable {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl TraceTable {
    /// Number of task rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse a tab-separated Nextflow trace file into a TraceTable.
///
/// Fields of each row are zipped positionally against the header. A row
/// shorter than the header keeps only the fields present; the trailing
/// columns are simply absent for that row, not empty strings. A row
/// longer than the header drops the surplus fields.
///
/// # Arguments
///
/// * `path` - Path to the trace file.
///
/// # Returns
///
/// A Result containing a TraceTable or an error.
///
/// # Example
///
/// ``` rust, no_run
/// use std::path::Path;
/// use nf_analyzer::core::trace::parse_trace;
///
/// let table = parse_trace(Path::new("trace.txt")).unwrap();
/// println!("{} tasks traced", table.len());
/// ```
pub fn parse_trace(path: &Path) -> Result<TraceTable, AnalyzerError> {
    if !path.is_file() {
        return Err(AnalyzerError::missing_file(path));
    }

    let contents = fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
    let mut lines = contents.lines();

    let columns = match lines.next() {
        Some(header) => header.split('\t').map(str::to_string).collect::<Vec<_>>(),
        None => Vec::new(),
    };

    let rows = lines
        .map(|line| {
            columns
                .iter()
                .cloned()
                .zip(line.split('\t').map(str::to_string))
                .collect::<HashMap<_, _>>()
        })
        .collect();

    Ok(TraceTable { columns, rows })
}

/// Resolve every traced task to its on-disk work directory, filtered by
/// status.
///
/// The trace `hash` is a directory prefix under the work root, usually
/// of the form `ab/cdef12` with the 2-character level spelled out. Each
/// hash must resolve to exactly one directory; zero or multiple matches
/// abort the whole resolution, since guessing would select the wrong
/// task.
///
/// If `status_filter` is the sentinel "any", every resolved directory is
/// kept and `invert` has no effect. Otherwise a directory is kept iff
/// `(row.status == status_filter) XOR invert`.
///
/// # Arguments
///
/// * `table` - The parsed trace table.
/// * `workdir` - The Nextflow work directory root.
/// * `status_filter` - Status to select, or "any" for no filter.
/// * `invert` - Select the complement of the status filter.
///
/// # Returns
///
/// A Result containing the selected work directories, in trace file
/// order, or an error.
///
/// # Example
///
/// ``` rust, no_run
/// use std::path::Path;
/// use nf_analyzer::core::trace::{parse_trace, resolve_trace_dirs};
///
/// let table = parse_trace(Path::new("trace.txt")).unwrap();
/// let failed = resolve_trace_dirs(&table, Path::new("work"), "FAILED", false).unwrap();
/// ```
pub fn resolve_trace_dirs(
    table: &TraceTable,
    workdir: &Path,
    status_filter: &str,
    invert: bool,
) -> Result<Vec<PathBuf>, AnalyzerError> {
    let mut dirs = Vec::new();

    for (i, row) in table.rows.iter().enumerate() {
        // line 1 is the header
        let line = i + 2;

        let hash = row.get(HASH).ok_or_else(|| AnalyzerError::MissingColumn {
            column: HASH.to_string(),
            line,
        })?;

        let dir = resolve_hash(workdir, hash)?;

        if status_filter == ANY_STATUS {
            dirs.push(dir);
            continue;
        }

        let status = row
            .get(STATUS)
            .ok_or_else(|| AnalyzerError::MissingColumn {
                column: STATUS.to_string(),
                line,
            })?;

        if (status == status_filter) != invert {
            dirs.push(dir);
        }
    }

    Ok(dirs)
}

/// Resolve a trace hash prefix to exactly one directory under the work
/// root by an explicit directory scan, avoiding shell glob semantics.
fn resolve_hash(workdir: &Path, hash: &str) -> Result<PathBuf, AnalyzerError> {
    let (parent, prefix) = match hash.rsplit_once('/') {
        Some((lv1, fragment)) => (workdir.join(lv1), fragment.to_string()),
        None => (workdir.to_path_buf(), hash.to_string()),
    };

    let mut matches = Vec::new();

    if let Ok(entries) = fs::read_dir(&parent) {
        for entry in entries {
            let entry = entry.map_err(|e| AnalyzerError::io(&parent, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if name.starts_with(&prefix) && entry.path().is_dir() {
                matches.push(entry.path());
            }
        }
    }

    match matches.len() {
        1 => Ok(matches.remove(0)),
        n => Err(AnalyzerError::HashResolution {
            hash: hash.to_string(),
            matches: n,
            root: workdir.display().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn write_trace(dir: &Path, lines: &[&str]) -> PathBuf {
        let path = dir.join(TRACE_FILE);
        let mut file = fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn task_dir(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_trace_file_is_fatal() {
        let err = parse_trace(Path::new("/no/such/trace.txt")).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingFile { .. }));
    }

    #[test]
    fn zips_rows_against_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_trace(
            dir.path(),
            &["hash\tstatus\texit", "abc123\tCOMPLETED\t0", "def456\tFAILED\t1"],
        );

        let table = parse_trace(&path).unwrap();

        assert_eq!(table.columns, vec!["hash", "status", "exit"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["status"], "COMPLETED");
        assert_eq!(table.rows[1]["exit"], "1");
    }

    #[test]
    fn short_rows_leave_trailing_columns_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_trace(dir.path(), &["hash\tstatus\texit", "abc123\tFAILED"]);

        let table = parse_trace(&path).unwrap();

        assert_eq!(table.rows[0]["hash"], "abc123");
        assert_eq!(table.rows[0]["status"], "FAILED");
        assert!(!table.rows[0].contains_key("exit"));
    }

    #[test]
    fn selects_directories_by_status() {
        let root = tempfile::tempdir().unwrap();
        let completed = task_dir(root.path(), &format!("abc123{}", "x".repeat(24)));
        let failed = task_dir(root.path(), &format!("def456{}", "x".repeat(24)));

        let path = write_trace(
            root.path(),
            &["hash\tstatus", "abc123\tCOMPLETED", "def456\tFAILED"],
        );
        let table = parse_trace(&path).unwrap();

        let dirs = resolve_trace_dirs(&table, root.path(), "COMPLETED", false).unwrap();
        assert_eq!(dirs, vec![completed]);

        let dirs = resolve_trace_dirs(&table, root.path(), "COMPLETED", true).unwrap();
        assert_eq!(dirs, vec![failed]);
    }

    #[test]
    fn any_status_keeps_everything_even_when_inverted() {
        let root = tempfile::tempdir().unwrap();
        task_dir(root.path(), &format!("abc123{}", "x".repeat(24)));
        task_dir(root.path(), &format!("def456{}", "x".repeat(24)));

        let path = write_trace(
            root.path(),
            &["hash\tstatus", "abc123\tCOMPLETED", "def456\tFAILED"],
        );
        let table = parse_trace(&path).unwrap();

        let dirs = resolve_trace_dirs(&table, root.path(), ANY_STATUS, true).unwrap();
        assert_eq!(dirs.len(), 2);
    }

    #[test]
    fn two_level_hashes_resolve_through_the_layout() {
        let root = tempfile::tempdir().unwrap();
        let leaf = task_dir(root.path(), &format!("ab/cdef12{}", "x".repeat(22)));

        let path = write_trace(root.path(), &["hash\tstatus", "ab/cdef12\tCOMPLETED"]);
        let table = parse_trace(&path).unwrap();

        let dirs = resolve_trace_dirs(&table, root.path(), ANY_STATUS, false).unwrap();
        assert_eq!(dirs, vec![leaf]);
    }

    #[test]
    fn unmatched_hash_is_fatal() {
        let root = tempfile::tempdir().unwrap();

        let path = write_trace(root.path(), &["hash\tstatus", "abc123\tCOMPLETED"]);
        let table = parse_trace(&path).unwrap();

        let err = resolve_trace_dirs(&table, root.path(), ANY_STATUS, false).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::HashResolution { matches: 0, .. }
        ));
    }

    #[test]
    fn ambiguous_hash_is_fatal_regardless_of_other_rows() {
        let root = tempfile::tempdir().unwrap();
        task_dir(root.path(), &format!("abc123{}", "x".repeat(24)));
        task_dir(root.path(), &format!("abc123{}", "y".repeat(24)));
        task_dir(root.path(), &format!("def456{}", "x".repeat(24)));

        let path = write_trace(
            root.path(),
            &["hash\tstatus", "def456\tCOMPLETED", "abc123\tCOMPLETED"],
        );
        let table = parse_trace(&path).unwrap();

        let err = resolve_trace_dirs(&table, root.path(), ANY_STATUS, false).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::HashResolution { matches: 2, .. }
        ));
    }

    #[test]
    fn row_without_hash_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_trace(dir.path(), &["status\thash", "COMPLETED"]);
        let table = parse_trace(&path).unwrap();

        let err = resolve_trace_dirs(&table, dir.path(), ANY_STATUS, false).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingColumn { .. }));
    }
}
