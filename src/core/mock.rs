use crate::core::Storage;
use crate::utils::error::{Result, StockError};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the backing file.
#[derive(Clone, Default)]
pub(crate) struct MockStorage {
    contents: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MockStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_contents(contents: &str) -> Self {
        let storage = Self::new();
        *storage.contents.lock().unwrap() = Some(contents.to_string());
        storage
    }

    pub(crate) fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub(crate) fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StockError::WriteError {
                path: "mock".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        Ok(())
    }
}

impl Storage for MockStorage {
    fn read_to_string(&self) -> Result<String> {
        self.contents()
            .ok_or_else(|| StockError::NotFound {
                path: "mock".to_string(),
            })
    }

    fn write_all(&self, data: &[u8]) -> Result<()> {
        self.check_writable()?;
        *self.contents.lock().unwrap() = Some(String::from_utf8_lossy(data).into_owned());
        Ok(())
    }

    fn append(&self, data: &[u8]) -> Result<()> {
        self.check_writable()?;
        let mut contents = self.contents.lock().unwrap();
        contents
            .get_or_insert_with(String::new)
            .push_str(&String::from_utf8_lossy(data));
        Ok(())
    }

    fn location(&self) -> &str {
        "mock"
    }
}
