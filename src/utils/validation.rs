use crate::utils::error::{Result, StockError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(StockError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StockError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Boundary check for every integer the user or the backing file supplies.
pub fn parse_integer(field_name: &str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| StockError::ParseError {
            field: field_name.to_string(),
            value: text.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("backing_file_path", "inventory.txt").is_ok());
        assert!(validate_path("backing_file_path", "").is_err());
        assert!(validate_path("backing_file_path", "   ").is_err());
        assert!(validate_path("backing_file_path", "bad\0path").is_err());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("cost", "100").unwrap(), 100);
        assert_eq!(parse_integer("cost", "  42 ").unwrap(), 42);
        assert_eq!(parse_integer("quantity", "-3").unwrap(), -3);

        match parse_integer("quantity", "12.5") {
            Err(StockError::ParseError { field, value }) => {
                assert_eq!(field, "quantity");
                assert_eq!(value, "12.5");
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
        assert!(parse_integer("cost", "").is_err());
    }
}
