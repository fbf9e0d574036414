use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("input path does not exist: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("no markdown documents found in {}", path.display())]
    NoDocumentsFound { path: PathBuf },

    #[error("failed to read directory {}", path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves `input` to the markdown documents to process, sorted by path.
pub fn discover_documents(input: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(DiscoveryError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let read_error = |source| DiscoveryError::ReadDirectory {
        path: input.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(input).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let path = entry.path();

        if !entry.file_type().map_err(read_error)?.is_file() {
            continue;
        }

        if is_markdown(&path) {
            documents.push(path);
        }
    }

    if documents.is_empty() {
        return Err(DiscoveryError::NoDocumentsFound {
            path: input.to_path_buf(),
        });
    }

    documents.sort();
    Ok(documents)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{DiscoveryError, discover_documents};

    #[test]
    fn directory_scan_returns_sorted_markdown_files_only() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        fs::write(dir.path().join("b.md"), "b").expect("write b");
        fs::write(dir.path().join("a.MD"), "a").expect("write a");
        fs::write(dir.path().join("notes.txt"), "n").expect("write notes");
        fs::create_dir(dir.path().join("nested.md")).expect("create nested dir");

        let documents = discover_documents(dir.path()).expect("documents should be found");

        let names = documents
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect::<Vec<String>>();
        assert_eq!(names, vec!["a.MD", "b.md"]);
    }

    #[test]
    fn explicit_file_is_returned_as_is() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("report.txt");
        fs::write(&path, "x").expect("write report");

        let documents = discover_documents(&path).expect("file should be accepted");
        assert_eq!(documents, vec![path]);
    }

    #[test]
    fn missing_input_and_empty_directory_are_distinct_errors() {
        let dir = tempfile::tempdir().expect("tempdir should be created");

        let missing = discover_documents(&dir.path().join("missing"));
        assert!(matches!(missing, Err(DiscoveryError::InputNotFound { .. })));

        let empty = discover_documents(dir.path());
        assert!(matches!(empty, Err(DiscoveryError::NoDocumentsFound { .. })));
    }
}
