//! Input file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

/// Errors that can occur while scanning for input files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no CSV files found in {folder}")]
    NoCsvFiles { folder: PathBuf },
}

/// Collect all CSV files in a directory, sorted by path.
///
/// Matching is by extension, case-insensitive. The sorted order makes
/// batch processing deterministic: the same directory always yields the
/// same source order, and therefore the same day numbering.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or contains no CSV
/// files.
pub fn find_csv_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory).map_err(|e| DiscoveryError::ReadDir {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let mut csv_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();

    csv_files.sort();

    if csv_files.is_empty() {
        return Err(DiscoveryError::NoCsvFiles {
            folder: directory.to_path_buf(),
        }
        .into());
    }

    Ok(csv_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_find_csv_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("b.csv")).unwrap();
        File::create(temp_dir.path().join("a.csv")).unwrap();
        File::create(temp_dir.path().join("c.CSV")).unwrap();

        let files = find_csv_files(temp_dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.CSV"]);
    }

    #[test]
    fn test_find_csv_files_ignores_other_extensions() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("data.csv")).unwrap();
        File::create(temp_dir.path().join("notes.txt")).unwrap();
        File::create(temp_dir.path().join("table.xlsx")).unwrap();

        let files = find_csv_files(temp_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("data.csv"));
    }

    #[test]
    fn test_find_csv_files_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = find_csv_files(temp_dir.path());

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiscoveryError>(),
            Some(DiscoveryError::NoCsvFiles { .. })
        ));
    }

    #[test]
    fn test_find_csv_files_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does_not_exist");

        let result = find_csv_files(&missing);

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiscoveryError>(),
            Some(DiscoveryError::ReadDir { .. })
        ));
    }
}
