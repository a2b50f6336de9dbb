use crate::utils::error::Result;
use crate::utils::validation::parse_integer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column headers, in file and table order.
pub const HEADERS: [&str; 5] = ["Country", "Code", "Product", "Cost", "Quantity"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecord {
    pub country: String,
    pub code: String,
    pub product: String,
    pub cost: i64,
    pub quantity: i64,
}

impl StockRecord {
    pub fn new(
        country: impl Into<String>,
        code: impl Into<String>,
        product: impl Into<String>,
        cost: i64,
        quantity: i64,
    ) -> Self {
        Self {
            country: country.into(),
            code: code.into(),
            product: product.into(),
            cost,
            quantity,
        }
    }

    /// Stock value; widened so the product of two `i64` cannot overflow.
    pub fn value(&self) -> i128 {
        i128::from(self.cost) * i128::from(self.quantity)
    }

    pub fn fields(&self) -> [String; 5] {
        [
            self.country.clone(),
            self.code.clone(),
            self.product.clone(),
            self.cost.to_string(),
            self.quantity.to_string(),
        ]
    }
}

impl fmt::Display for StockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.country, self.code, self.product, self.cost, self.quantity
        )
    }
}

/// A record as typed at the prompt, before the numeric fields are validated.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub country: String,
    pub code: String,
    pub product: String,
    pub cost: String,
    pub quantity: String,
}

impl RecordDraft {
    pub fn into_record(self) -> Result<StockRecord> {
        let cost = parse_integer("cost", &self.cost)?;
        let quantity = parse_integer("quantity", &self.quantity)?;
        Ok(StockRecord {
            country: self.country,
            code: self.code,
            product: self.product,
            cost,
            quantity,
        })
    }
}

/// A record paired with its computed stock value.
#[derive(Debug, Clone, Copy)]
pub struct ValuedRecord<'a> {
    pub record: &'a StockRecord,
    pub value: i128,
}

/// What to do with a backing-file line that is not a valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Stop loading at the bad line and return the error; earlier records stay loaded.
    #[default]
    Abort,
    /// Log the bad line, skip it and keep loading.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { records: usize, skipped: Vec<u64> },
    MissingFile,
}
