//! # Court Reviews Core
//!
//! Local court directory and review store for mobile apps, exposed over a C
//! ABI so a Flutter or React Native shell can link it directly. Reviews are
//! persisted in LMDB as one JSON blob; the court catalog is static.
//!
//! ## Layers
//!
//! - [`court_model`]: the immutable court catalog
//! - [`review_store`]: newest-first review persistence over a [`storage::DurableStorage`]
//! - [`query`]: court search and per-court review views
//! - [`submission`]: validation and construction of new reviews
//!
//! ## Quick Start
//!
//! ```no_run
//! use court_reviews_core::{create_store, search_courts, submit_review};
//! use std::ffi::CString;
//!
//! let name = CString::new("reviews").unwrap();
//! let store = create_store(name.as_ptr());
//!
//! let query = CString::new("austin").unwrap();
//! let courts = search_courts(query.as_ptr());
//!
//! let draft = CString::new(r#"{"courtId":"court-1","rating":4,"text":"Great nets"}"#).unwrap();
//! let saved = submit_review(store, draft.as_ptr());
//! ```
//!
//! ## FFI Functions
//!
//! Every function except the constructors returns a JSON-serialized
//! [`AppResponse`] that must be released with [`free_response`].
//!
//! - [`create_store`] / [`create_store_with_config`] - open a store
//! - [`search_courts`] - filter the catalog by free text
//! - [`get_court`] - look up one court
//! - [`get_all_reviews`] - every stored review, newest first
//! - [`get_reviews_for`] / [`get_reviews_sorted`] - reviews of one court
//! - [`submit_review`] - validate and persist a new review
//! - [`close_store`] - flush and release a store

pub mod app_response;
pub mod config;
pub mod court_model;
pub mod local_db_state;
pub mod query;
pub mod review_model;
pub mod review_store;
pub mod storage;
pub mod submission;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::config::StoreConfig;
use crate::court_model::Catalog;
use crate::query::ReviewOrder;
use crate::review_model::ReviewDraft;
use crate::review_store::LocalReviewStore;

/// Opens (or creates) the store `{name}.lmdb` with default settings.
///
/// # Returns
///
/// A pointer to the store, or null if the name is invalid or LMDB fails to
/// open. Release it with [`close_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use court_reviews_core::create_store;
///
/// let name = CString::new("reviews").unwrap();
/// let store = create_store(name.as_ptr());
/// assert!(!store.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(name: *const c_char) -> *mut LocalReviewStore {
    let name_str = match c_ptr_to_str(name) {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            warn!("Invalid name passed to create_store");
            return std::ptr::null_mut();
        }
    };

    open_store(&StoreConfig::for_name(name_str))
}

/// Opens a store from a JSON [`StoreConfig`].
///
/// ```json
/// { "path": "/data/reviews.lmdb", "storageKey": "byob.tennis.reviews.v1" }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store_with_config(config_json: *const c_char) -> *mut LocalReviewStore {
    let Some(json) = c_ptr_to_str(config_json) else {
        warn!("Invalid config passed to create_store_with_config");
        return std::ptr::null_mut();
    };

    match StoreConfig::from_json(json) {
        Ok(config) => open_store(&config),
        Err(e) => {
            warn!("Rejected store config: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Filters the built-in catalog by name or city.
///
/// Returns `Ok` with a JSON array of courts; a blank query returns all of them.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_courts(query: *const c_char) -> *const c_char {
    let query = match c_ptr_to_string(query, "query") {
        Ok(q) => q,
        Err(err) => return err,
    };

    let courts = query::filter_courts(Catalog::generated(), &query);
    json_response(&courts)
}

/// Looks up one court of the built-in catalog.
///
/// # Parameters
///
/// * `id` - Null-terminated C string with the court id, e.g. `court-1`
///
/// # Returns
///
/// `Ok` with the court as JSON, or `NotFound` if no court has that id.
///
/// # Safety
///
/// `id` must be null or a valid null-terminated string. Null and invalid
/// UTF-8 yield `BadRequest`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_court(id: *const c_char) -> *const c_char {
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    match Catalog::generated().court(&id) {
        Some(court) => json_response(court),
        None => response_to_c_string(&AppResponse::NotFound(format!("No court found with id: {id}"))),
    }
}

/// Retrieves every stored review, newest first.
///
/// # Parameters
///
/// * `state` - Pointer returned by [`create_store`]
///
/// # Returns
///
/// `Ok` with a JSON array of reviews. Unreadable storage reads as an empty
/// array.
///
/// # Safety
///
/// `state` must be null or a live pointer from [`create_store`] that has not
/// been passed to [`close_store`]. Null yields `BadRequest`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_all_reviews(state: *mut LocalReviewStore) -> *const c_char {
    let Some(store) = (unsafe { state.as_ref() }) else {
        return bad_request("Null state pointer passed to get_all_reviews");
    };

    json_response(&store.get_all())
}

/// Retrieves the reviews of one court, newest first.
///
/// # Parameters
///
/// * `state` - Pointer returned by [`create_store`]
/// * `court_id` - Null-terminated C string with the court id
///
/// # Returns
///
/// `Ok` with a JSON array of reviews, empty if the court has none.
///
/// # Safety
///
/// `state` must be null or a live store pointer, and `court_id` null or a
/// valid null-terminated string. Null pointers yield `BadRequest`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_reviews_for(
    state: *mut LocalReviewStore,
    court_id: *const c_char,
) -> *const c_char {
    let Some(store) = (unsafe { state.as_ref() }) else {
        return bad_request("Null state pointer passed to get_reviews_for");
    };
    let court_id = match c_ptr_to_string(court_id, "courtId") {
        Ok(id) => id,
        Err(err) => return err,
    };

    json_response(&query::reviews_for(store, &court_id))
}

/// Reviews of one court ordered by `order`: `newest`, `highest` or `lowest`.
///
/// # Safety
///
/// Same pointer rules as [`get_reviews_for`]; `order` must be null or a valid
/// null-terminated string. An unknown order yields `BadRequest`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_reviews_sorted(
    state: *mut LocalReviewStore,
    court_id: *const c_char,
    order: *const c_char,
) -> *const c_char {
    let Some(store) = (unsafe { state.as_ref() }) else {
        return bad_request("Null state pointer passed to get_reviews_sorted");
    };
    let court_id = match c_ptr_to_string(court_id, "courtId") {
        Ok(id) => id,
        Err(err) => return err,
    };
    let order = match c_ptr_to_string(order, "order").map(|o| ReviewOrder::parse(&o)) {
        Ok(Ok(order)) => order,
        Ok(Err(e)) => return response_to_c_string(&e),
        Err(err) => return err,
    };

    json_response(&query::reviews_sorted(store, &court_id, order))
}

/// Validates and saves a review.
///
/// # JSON Format
///
/// ```json
/// { "courtId": "court-1", "rating": 4, "text": "Great nets" }
/// ```
///
/// `rating` defaults to 5. Blank text yields a `ValidationError` and nothing
/// is written; a storage failure yields a `DatabaseError`.
///
/// # Safety
///
/// `state` must be null or a live store pointer, and `draft_json` null or a
/// valid null-terminated string. Null pointers yield `BadRequest`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn submit_review(state: *mut LocalReviewStore, draft_json: *const c_char) -> *const c_char {
    let Some(store) = (unsafe { state.as_ref() }) else {
        return bad_request("Null state pointer passed to submit_review");
    };
    let json = match c_ptr_to_string(draft_json, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let draft: ReviewDraft = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid review JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    match submission::submit_review(store, draft) {
        Ok(review) => json_response(&review),
        Err(e) => response_to_c_string(&e),
    }
}

/// Flushes the store to disk and releases it.
///
/// # Safety
///
/// `state` must be null or a live pointer from [`create_store`]. It is freed
/// here and must not be used afterwards, not even passed to `close_store` again.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut LocalReviewStore) -> *const c_char {
    if state.is_null() {
        return bad_request("Null state pointer passed to close_store");
    }

    let store = unsafe { Box::from_raw(state) };
    match store.close() {
        Ok(()) => response_to_c_string(&AppResponse::success("Store closed successfully")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Releases a string returned by any other function of this library.
///
/// # Safety
///
/// `ptr` must be null or a response pointer from this library that has not
/// been freed yet.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn open_store(config: &StoreConfig) -> *mut LocalReviewStore {
    match LocalReviewStore::open(config) {
        Ok(store) => {
            info!("✅ Review store opened at {}", config.path.display());
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("❌ Failed to open review store at {}: {e}", config.path.display());
            std::ptr::null_mut()
        }
    }
}

/// Wraps `value` as `Ok(<json>)`.
fn json_response<T: Serialize + ?Sized>(value: &T) -> *const c_char {
    match serde_json::to_string(value) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

fn bad_request(msg: &str) -> *const c_char {
    response_to_c_string(&AppResponse::BadRequest(msg.to_string()))
}

/// Serializes `response` into an owned C string; null if that fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

fn c_ptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Converts a C string argument, or returns a ready `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
