//! Shared store for bound context fields
//!
//! One `FieldStore` is shared by every sink handle derived from a common
//! root; binding through any handle is visible through all of them.

use super::field::FieldValue;
use parking_lot::Mutex;
use std::collections::HashMap;

/// The mutable mapping of contextual fields accumulated by `with` calls.
///
/// All access goes through the internal mutex. Fields are consumed by
/// [`take`](FieldStore::take): the write path drains the store into exactly
/// one document, after which bound context must be re-supplied.
#[derive(Debug, Default)]
pub struct FieldStore {
    fields: Mutex<HashMap<String, FieldValue>>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self {
            fields: Mutex::new(HashMap::new()),
        }
    }

    /// Merge fields into the store; existing keys are overwritten
    pub fn bind(&self, fields: HashMap<String, FieldValue>) {
        let mut guard = self.fields.lock();
        for (key, value) in fields {
            guard.insert(key, value);
        }
    }

    /// Drain the store, returning everything bound since the last take
    pub fn take(&self) -> HashMap<String, FieldValue> {
        std::mem::take(&mut *self.fields.lock())
    }

    /// Get a clone of the currently bound fields
    pub fn get_fields(&self) -> HashMap<String, FieldValue> {
        self.fields.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.lock().len()
    }
}
