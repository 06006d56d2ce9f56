//! The durable string storage the review store writes through.
//!
//! Production binds [`DurableStorage`] to LMDB via
//! [`AppDbState`](crate::local_db_state::AppDbState); tests and ephemeral
//! hosts use [`MemoryStorage`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::app_response::AppResponse;

/// Get/set a string blob by key.
///
/// `set` must replace the value as a whole: after a failed `set` the previous
/// value is still readable.
pub trait DurableStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppResponse>;

    fn set(&self, key: &str, value: &str) -> Result<(), AppResponse>;
}

impl<S: DurableStorage + ?Sized> DurableStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, AppResponse> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // The map is always left consistent, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppResponse> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppResponse> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
