//! The user-invokable operations, as plain functions over a [`Store`].
//!
//! Nothing here reads from or writes to the console; the menu session owns
//! all prompting and rendering.

use crate::core::{RecordDraft, StockRecord, Storage, Store, ValuedRecord};
use crate::utils::error::{Result, StockError};

pub fn code_exists<S: Storage>(store: &Store<S>, code: &str) -> bool {
    store.records().iter().any(|record| record.code == code)
}

/// Validates the draft, persists it with an append and only then adds it to
/// the in-memory list, so a failed write leaves both sides unchanged.
pub fn add_record<S: Storage>(store: &mut Store<S>, draft: RecordDraft) -> Result<&StockRecord> {
    if code_exists(store, &draft.code) {
        return Err(StockError::DuplicateCode { code: draft.code });
    }

    let record = draft.into_record()?;
    store.append_one(&record)?;
    tracing::info!("Added record {}", record.code);

    let index = store.len();
    store.push(record);
    Ok(&store.records()[index])
}

pub fn list_all<S: Storage>(store: &Store<S>) -> &[StockRecord] {
    store.records()
}

/// First record with the smallest quantity, with its position in the store.
pub fn lowest_stock<S: Storage>(store: &Store<S>) -> Result<(usize, &StockRecord)> {
    store
        .records()
        .iter()
        .enumerate()
        .min_by_key(|(_, record)| record.quantity)
        .ok_or_else(|| StockError::EmptyStoreError {
            operation: "restock the lowest-stock record".to_string(),
        })
}

/// Adds `amount` to the current lowest-stock record and rewrites the file.
///
/// The lowest record is recomputed on every call. If the rewrite fails the
/// in-memory quantity is restored before the error is returned.
pub fn restock_lowest<S: Storage>(store: &mut Store<S>, amount: i64) -> Result<&StockRecord> {
    let (index, _) = lowest_stock(store)?;
    let record = store
        .record_mut(index)
        .ok_or_else(|| StockError::EmptyStoreError {
            operation: "restock the lowest-stock record".to_string(),
        })?;

    let previous = record.quantity;
    let Some(updated) = previous.checked_add(amount) else {
        return Err(StockError::QuantityOverflow {
            code: record.code.clone(),
            amount,
        });
    };
    record.quantity = updated;

    if let Err(e) = store.save_all() {
        if let Some(record) = store.record_mut(index) {
            record.quantity = previous;
        }
        tracing::warn!("Restock rolled back: {}", e);
        return Err(e);
    }

    let record = &store.records()[index];
    tracing::info!("Restocked {} to {}", record.code, record.quantity);
    Ok(record)
}

/// Every record whose code matches exactly (case-sensitive), in store order.
///
/// Loading does not enforce unique codes, so there can be more than one.
pub fn find_by_code<'a, S: Storage>(store: &'a Store<S>, code: &str) -> Vec<&'a StockRecord> {
    store
        .records()
        .iter()
        .filter(|record| record.code == code)
        .collect()
}

pub fn value_per_item<S: Storage>(store: &Store<S>) -> Vec<ValuedRecord<'_>> {
    store
        .records()
        .iter()
        .map(|record| ValuedRecord {
            record,
            value: record.value(),
        })
        .collect()
}

/// First record with the largest quantity.
pub fn highest_quantity<S: Storage>(store: &Store<S>) -> Result<&StockRecord> {
    store
        .records()
        .iter()
        .reduce(|best, record| {
            if record.quantity > best.quantity {
                record
            } else {
                best
            }
        })
        .ok_or_else(|| StockError::EmptyStoreError {
            operation: "find the highest-quantity record".to_string(),
        })
}
