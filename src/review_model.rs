//! Review records and the draft the UI submits.
//!
//! A [`Review`] is created once, persisted as part of the review blob, and
//! never edited afterwards. The JSON shape is fixed: `{id, courtId, rating,
//! text, dateISO}`, which is what earlier app versions already wrote under
//! the `.v1` storage key.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const DEFAULT_RATING: u8 = 5;

/// A user review of one court.
///
/// # Examples
///
/// ```rust
/// use court_reviews_core::review_model::Review;
///
/// let review = Review {
///     id: "1704067200000".to_string(),
///     court_id: "court-1".to_string(),
///     rating: 4,
///     text: "Great nets".to_string(),
///     date_iso: "2024-01-01T00:00:00.000Z".to_string(),
/// };
///
/// let json = serde_json::to_string(&review)?;
/// assert!(json.contains("\"courtId\":\"court-1\""));
/// assert!(json.contains("\"dateISO\":\"2024-01-01T00:00:00.000Z\""));
/// # Ok::<(), serde_json::Error>(())
/// ```
///
/// # Field Constraints
///
/// - `id` is the creation time in epoch milliseconds. Two reviews written in
///   the same millisecond collide; that is accepted on a single device.
/// - `court_id` is not checked against the catalog.
/// - `rating` is within `1..=5`.
/// - `text` is trimmed and non-empty.
/// - `date_iso` is RFC 3339 UTC with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Review {
    pub id: String,

    #[serde(rename = "courtId")]
    pub court_id: String,

    pub rating: u8,

    pub text: String,

    #[serde(rename = "dateISO")]
    pub date_iso: String,
}

impl Review {
    /// Builds a review stamped with `created_at`.
    pub fn new(
        court_id: impl Into<String>,
        rating: u8,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Review {
            id: created_at.timestamp_millis().to_string(),
            court_id: court_id.into(),
            rating,
            text: text.into(),
            date_iso: format_iso(created_at),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date_iso)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Checks the invariants a persisted review must hold.
    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.id.is_empty() {
            return Err(AppResponse::ValidationError("Review id is empty".to_string()));
        }
        validate_rating(self.rating)?;
        if self.text.trim().is_empty() {
            return Err(AppResponse::ValidationError(format!(
                "Review {} has empty text",
                self.id
            )));
        }
        if self.text.trim() != self.text {
            return Err(AppResponse::ValidationError(format!(
                "Review {} has untrimmed text",
                self.id
            )));
        }
        if self.created_at().is_none() {
            return Err(AppResponse::ValidationError(format!(
                "Review {} has an invalid dateISO: {}",
                self.id, self.date_iso
            )));
        }
        Ok(())
    }

    /// "2024-01-01 • 4★", the header line of a review in the detail view.
    pub fn summary_line(&self) -> String {
        let date = self
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.date_iso.clone());
        format!("{} • {}★", date, self.rating)
    }
}

/// What the review form hands over on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    #[serde(rename = "courtId")]
    pub court_id: String,

    #[serde(default = "default_rating")]
    pub rating: u8,

    pub text: String,
}

impl ReviewDraft {
    pub fn new(court_id: impl Into<String>, rating: u8, text: impl Into<String>) -> Self {
        ReviewDraft {
            court_id: court_id.into(),
            rating,
            text: text.into(),
        }
    }
}

fn default_rating() -> u8 {
    DEFAULT_RATING
}

pub(crate) fn validate_rating(rating: u8) -> Result<(), AppResponse> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(AppResponse::ValidationError(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// `2024-01-01T00:00:00.000Z`
pub fn format_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
