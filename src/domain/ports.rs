use crate::domain::model::MalformedLinePolicy;
use crate::utils::error::Result;

/// Persistence for a single backing file. Each call opens and closes the file.
pub trait Storage: Send + Sync {
    /// Fails with `StockError::NotFound` when the file does not exist.
    fn read_to_string(&self) -> Result<String>;
    /// Truncates, then writes `data`.
    fn write_all(&self, data: &[u8]) -> Result<()>;
    fn append(&self, data: &[u8]) -> Result<()>;
    /// Human-readable location, used in messages and logs.
    fn location(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    fn backing_file_path(&self) -> &str;
    fn malformed_line_policy(&self) -> MalformedLinePolicy;
    fn color_enabled(&self) -> bool;
}
