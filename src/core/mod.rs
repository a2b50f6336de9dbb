pub mod operations;
pub mod store;

#[cfg(test)]
pub(crate) mod mock;

pub use crate::domain::model::{
    LoadOutcome, MalformedLinePolicy, RecordDraft, StockRecord, ValuedRecord, HEADERS,
};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use store::Store;
