//! The submit action of the review form.
//!
//! Input is validated here, before anything reaches the store: a draft with
//! blank text or an out-of-range rating never triggers an append.

use chrono::{DateTime, Utc};
use log::info;

use crate::app_response::AppResponse;
use crate::review_model::{validate_rating, Review, ReviewDraft};
use crate::review_store::ReviewStore;
use crate::storage::DurableStorage;

pub const EMPTY_TEXT_MESSAGE: &str = "Please write a short review.";

pub fn submit_review<S: DurableStorage>(
    store: &ReviewStore<S>,
    draft: ReviewDraft,
) -> Result<Review, AppResponse> {
    submit_review_at(store, draft, Utc::now())
}

/// [`submit_review`] with an explicit creation time.
pub fn submit_review_at<S: DurableStorage>(
    store: &ReviewStore<S>,
    draft: ReviewDraft,
    now: DateTime<Utc>,
) -> Result<Review, AppResponse> {
    let review = build_review(draft, now)?;
    store.append(review.clone())?;
    info!("Review {} saved for {}", review.id, review.court_id);
    Ok(review)
}

fn build_review(draft: ReviewDraft, now: DateTime<Utc>) -> Result<Review, AppResponse> {
    let text = draft.text.trim();
    if text.is_empty() {
        return Err(AppResponse::ValidationError(EMPTY_TEXT_MESSAGE.to_string()));
    }
    validate_rating(draft.rating)?;
    Ok(Review::new(draft.court_id, draft.rating, text, now))
}
