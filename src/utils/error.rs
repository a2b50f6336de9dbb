use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("Backing file not found: {path}")]
    NotFound { path: String },

    #[error("Malformed line {line}: {reason}")]
    FormatError { line: u64, reason: String },

    #[error("Invalid {field}: '{value}' is not a whole number")]
    ParseError { field: String, value: String },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot {operation}: the store has no records")]
    EmptyStoreError { operation: String },

    #[error("Product code '{code}' already exists")]
    DuplicateCode { code: String },

    #[error("Restocking '{code}' by {amount} would overflow its quantity")]
    QuantityOverflow { code: String, amount: i64 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StockError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StockError::NotFound { .. } | StockError::WriteError { .. } => ErrorCategory::Storage,
            StockError::FormatError { .. }
            | StockError::CsvError(_)
            | StockError::EmptyStoreError { .. }
            | StockError::QuantityOverflow { .. } => ErrorCategory::Data,
            StockError::ParseError { .. } | StockError::DuplicateCode { .. } => {
                ErrorCategory::Input
            }
            StockError::ConfigError { .. } | StockError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            StockError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StockError::NotFound { .. }
            | StockError::ParseError { .. }
            | StockError::DuplicateCode { .. }
            | StockError::EmptyStoreError { .. }
            | StockError::QuantityOverflow { .. } => ErrorSeverity::Low,
            StockError::WriteError { .. } => ErrorSeverity::Medium,
            StockError::FormatError { .. }
            | StockError::CsvError(_)
            | StockError::ConfigError { .. }
            | StockError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            StockError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Errors the interactive session reports and survives.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StockError::NotFound { .. }
                | StockError::FormatError { .. }
                | StockError::ParseError { .. }
                | StockError::WriteError { .. }
                | StockError::EmptyStoreError { .. }
                | StockError::DuplicateCode { .. }
                | StockError::QuantityOverflow { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StockError::NotFound { .. } => "Please ensure the file is saved correctly",
            StockError::FormatError { .. } => {
                "Each line needs exactly 5 comma-separated fields: Country,Code,Product,Cost,Quantity"
            }
            StockError::ParseError { .. } => "Please enter a valid number",
            StockError::WriteError { .. } => {
                "Check that the backing file is writable and the disk is not full"
            }
            StockError::EmptyStoreError { .. } => "Add a record first (menu option 1)",
            StockError::DuplicateCode { .. } => "Try a different code",
            StockError::QuantityOverflow { .. } => "Enter a smaller amount",
            StockError::CsvError(_) => "Check the backing file for invalid UTF-8 or stray bytes",
            StockError::IoError(_) => "Check that the terminal and file system are available",
            StockError::ConfigError { .. } | StockError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StockError::NotFound { path } => format!("No stock file found at '{}'", path),
            StockError::FormatError { line, reason } => {
                format!("Stock file line {} could not be read: {}", line, reason)
            }
            StockError::ParseError { field, value } => {
                format!("'{}' is not a valid whole number for {}", value, field)
            }
            StockError::WriteError { path, source } => {
                format!("Error writing to file '{}': {}", path, source)
            }
            StockError::EmptyStoreError { .. } => "There are no records in stock yet.".to_string(),
            StockError::DuplicateCode { .. } => "That code already exists.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors_are_not_critical() {
        let errors = vec![
            StockError::NotFound {
                path: "inventory.txt".to_string(),
            },
            StockError::ParseError {
                field: "cost".to_string(),
                value: "abc".to_string(),
            },
            StockError::EmptyStoreError {
                operation: "find the highest quantity".to_string(),
            },
        ];

        for error in errors {
            assert!(error.is_recoverable());
            assert!(error.severity() < ErrorSeverity::Critical);
        }
    }

    #[test]
    fn test_console_io_error_is_fatal() {
        let error = StockError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ));
        assert!(!error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert_eq!(error.category(), ErrorCategory::System);
    }

    #[test]
    fn test_parse_error_message_names_field() {
        let error = StockError::ParseError {
            field: "quantity".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(
            error.user_friendly_message(),
            "'ten' is not a valid whole number for quantity"
        );
    }
}
