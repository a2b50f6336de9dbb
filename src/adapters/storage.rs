use crate::domain::ports::Storage;
use crate::utils::error::{Result, StockError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    path: PathBuf,
    display: String,
}

impl LocalFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }

    fn write_error(&self, source: std::io::Error) -> StockError {
        StockError::WriteError {
            path: self.display.clone(),
            source,
        }
    }
}

impl Storage for LocalFileStorage {
    fn read_to_string(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StockError::NotFound {
                path: self.display.clone(),
            }),
            Err(e) => Err(StockError::IoError(e)),
        }
    }

    fn write_all(&self, data: &[u8]) -> Result<()> {
        fs::write(&self.path, data).map_err(|e| self.write_error(e))
    }

    fn append(&self, data: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(data).map_err(|e| self.write_error(e))
    }

    fn location(&self) -> &str {
        &self.display
    }
}
