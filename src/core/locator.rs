use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::*;
use crate::error::AnalyzerError;

/// Find the path of every task work directory under a Nextflow work root.
///
/// Nextflow stores one directory per executed task two levels below the
/// work root: a 2-character hash prefix, then a 30-character hash
/// fragment. Any entry violating those lengths means the wrong root was
/// supplied, so the whole walk fails instead of skipping the entry.
///
/// # Arguments
///
/// * `workdir` - The Nextflow work directory root.
///
/// # Returns
///
/// A Result containing the full path of every task directory, in OS
/// enumeration order, or an error.
///
/// # Example
///
/// ``` rust, no_run
/// use std::path::Path;
/// use nf_analyzer::core::locator::list_work_dirs;
///
/// let dirs = list_work_dirs(Path::new("work")).unwrap();
/// ```
pub fn list_work_dirs(workdir: &Path) -> Result<Vec<PathBuf>, AnalyzerError> {
    let mut dirs = Vec::new();

    for lv1 in read_level(workdir, LV1_LEN)? {
        dirs.extend(read_level(&lv1, LV2_LEN)?);
    }

    Ok(dirs)
}

/// List the children of one layout level, validating the name length.
fn read_level(dir: &Path, len: usize) -> Result<Vec<PathBuf>, AnalyzerError> {
    let mut children = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| AnalyzerError::io(dir, e))? {
        let entry = entry.map_err(|e| AnalyzerError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if name.len() != len {
            return Err(AnalyzerError::invalid_layout(
                &entry.path(),
                format!("directory name is not of length {}", len),
            ));
        }

        if !entry.path().is_dir() {
            return Err(AnalyzerError::invalid_layout(
                &entry.path(),
                "entry is not a directory",
            ));
        }

        children.push(entry.path());
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn task_dir(root: &Path, lv1: &str, lv2: &str) -> PathBuf {
        let dir = root.join(lv1).join(lv2);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn yields_every_leaf_of_a_valid_layout() {
        let root = tempfile::tempdir().unwrap();

        let a = task_dir(root.path(), "ab", &"x".repeat(30));
        let b = task_dir(root.path(), "ab", &"y".repeat(30));
        let c = task_dir(root.path(), "cd", &"z".repeat(30));

        let mut dirs = list_work_dirs(root.path()).unwrap();
        dirs.sort();

        let mut expected = vec![a, b, c];
        expected.sort();

        assert_eq!(dirs, expected);
    }

    #[test]
    fn rejects_wrong_length_level1_name() {
        let root = tempfile::tempdir().unwrap();
        task_dir(root.path(), "abc", &"x".repeat(30));

        let err = list_work_dirs(root.path()).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidLayout { .. }));
    }

    #[test]
    fn rejects_wrong_length_level2_name() {
        let root = tempfile::tempdir().unwrap();
        task_dir(root.path(), "ab", "tooshort");

        let err = list_work_dirs(root.path()).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidLayout { .. }));
    }

    #[test]
    fn rejects_plain_files_in_the_layout() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("ab"), "not a directory").unwrap();

        let err = list_work_dirs(root.path()).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidLayout { .. }));
    }
}
