//! Read-only views over the catalog and the review store.

use crate::app_response::AppResponse;
use crate::court_model::{Catalog, Court};
use crate::review_model::Review;
use crate::review_store::ReviewStore;
use crate::storage::DurableStorage;

/// Courts whose name or city contains `query`, ignoring case.
///
/// A blank query returns the whole catalog. Order is always catalog order.
pub fn filter_courts<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Court> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.courts().iter().collect();
    }
    catalog.courts().iter().filter(|c| c.matches(&needle)).collect()
}

pub fn reviews_for<S: DurableStorage>(store: &ReviewStore<S>, court_id: &str) -> Vec<Review> {
    store.get_for(court_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewOrder {
    #[default]
    Newest,
    HighestRated,
    LowestRated,
}

impl ReviewOrder {
    pub fn parse(value: &str) -> Result<Self, AppResponse> {
        match value.trim().to_lowercase().as_str() {
            "" | "newest" => Ok(ReviewOrder::Newest),
            "highest" | "highestrated" => Ok(ReviewOrder::HighestRated),
            "lowest" | "lowestrated" => Ok(ReviewOrder::LowestRated),
            other => Err(AppResponse::BadRequest(format!("Unknown review order: {other}"))),
        }
    }
}

/// Reviews for a court in the requested order; ties stay newest-first.
pub fn reviews_sorted<S: DurableStorage>(
    store: &ReviewStore<S>,
    court_id: &str,
    order: ReviewOrder,
) -> Vec<Review> {
    let mut reviews = reviews_for(store, court_id);
    match order {
        ReviewOrder::Newest => {}
        ReviewOrder::HighestRated => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewOrder::LowestRated => reviews.sort_by_key(|r| r.rating),
    }
    reviews
}
