use crate::domain::ports::EntrySource;
use crate::utils::error::{Result, RunnerError};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalDirectory {
    path: PathBuf,
}

impl LocalDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntrySource for LocalDirectory {
    fn list_entries(&self) -> Result<Vec<String>> {
        let directory_error = |source| RunnerError::DirectoryError {
            path: self.path.display().to_string(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(directory_error)? {
            let entry = entry.map_err(directory_error)?;
            match entry.file_name().into_string() {
                Ok(name) => entries.push(name),
                Err(name) => tracing::debug!("Skipping non UTF-8 entry {:?}", name),
            }
        }
        Ok(entries)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
