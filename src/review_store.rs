//! Persistent, newest-first collection of reviews.
//!
//! The whole collection lives in one JSON array under a single storage key.
//! Reads never fail the caller: a missing, empty, unreadable, or malformed
//! blob reads as an empty collection. Writes propagate storage errors.

use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::config::{StoreConfig, DEFAULT_STORAGE_KEY};
use crate::local_db_state::AppDbState;
use crate::review_model::Review;
use crate::storage::DurableStorage;

/// The store as the C ABI hands it out.
pub type LocalReviewStore = ReviewStore<AppDbState>;

pub struct ReviewStore<S: DurableStorage> {
    storage: S,
    key: String,
    // Held across the read-modify-write span of `append`.
    write_lock: Mutex<()>,
}

impl<S: DurableStorage> ReviewStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        ReviewStore {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every review, newest first.
    pub fn get_all(&self) -> Vec<Review> {
        match self.read_all() {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Reading reviews under {} failed, treating as empty: {e}", self.key);
                Vec::new()
            }
        }
    }

    /// Like `get_all`, but a storage read error is returned instead of
    /// being swallowed. A blob that reads fine but fails to decode still
    /// yields an empty collection.
    fn read_all(&self) -> Result<Vec<Review>, AppResponse> {
        let Some(blob) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match decode_reviews(&blob) {
            Ok(reviews) => Ok(reviews),
            Err(e) => {
                warn!("Stored reviews under {} are unreadable, treating as empty: {e}", self.key);
                Ok(Vec::new())
            }
        }
    }

    /// Reviews for one court, in the collection's newest-first order.
    pub fn get_for(&self, court_id: &str) -> Vec<Review> {
        self.get_all()
            .into_iter()
            .filter(|r| r.court_id == court_id)
            .collect()
    }

    /// Prepends `review` and rewrites the whole blob.
    ///
    /// Concurrent appends are serialized, so none is lost. If reading the
    /// current blob or writing the new one fails, nothing is written and the
    /// error is returned. A blob that reads but does not decode is replaced by
    /// a collection holding only `review`.
    pub fn append(&self, review: Review) -> Result<(), AppResponse> {
        let _guard = self.lock_writes();

        let mut all = self.read_all()?;
        debug!("Appending review {} for {} to {} existing", review.id, review.court_id, all.len());
        all.insert(0, review);

        let blob = serde_json::to_string(&all)?;
        self.storage.set(&self.key, &blob)?;
        info!("Saved review collection ({} reviews)", all.len());
        Ok(())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LocalReviewStore {
    /// Opens the LMDB environment described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self, AppResponse> {
        let state = AppDbState::init(config)?;
        Ok(ReviewStore::with_key(state, config.storage_key.clone()))
    }

    pub fn close(&self) -> Result<(), AppResponse> {
        self.storage.close_database()
    }
}

/// Strict decode: any malformed entry rejects the whole blob.
pub fn decode_reviews(blob: &str) -> Result<Vec<Review>, AppResponse> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }
    let reviews: Vec<Review> = serde_json::from_str(blob)?;
    for review in &reviews {
        review.validate()?;
    }
    Ok(reviews)
}
