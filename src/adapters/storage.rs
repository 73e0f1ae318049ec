use crate::core::Storage;
use crate::utils::error::{Result, ScraperError};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, name: &str) -> PathBuf {
        Path::new(&self.base_path).join(name)
    }
}

impl Storage for LocalStorage {
    type Writer = File;

    fn create(&self, name: &str) -> Result<File> {
        let full_path = self.full_path(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ScraperError::OutputOpen {
                path: full_path.display().to_string(),
                source,
            })?;
        }

        File::create(&full_path).map_err(|source| ScraperError::OutputOpen {
            path: full_path.display().to_string(),
            source,
        })
    }

    fn remove(&self, name: &str) -> Result<()> {
        fs::remove_file(self.full_path(name))?;
        Ok(())
    }

    fn location(&self, name: &str) -> String {
        self.full_path(name).display().to_string()
    }
}
