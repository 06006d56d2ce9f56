//! Court records and the fixed catalog they live in.
//!
//! The catalog is built once and never mutated. [`Catalog::generated`] yields
//! the shared default catalog of sixty courts; [`Catalog::from_courts`] lets a
//! host (or a test) supply its own list.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

const CATALOG_SIZE: usize = 60;

const CITIES: [&str; 8] = [
    "Austin",
    "Dallas",
    "Houston",
    "San Antonio",
    "Plano",
    "Round Rock",
    "Cedar Park",
    "Georgetown",
];

const NAME_PREFIXES: [&str; 10] = [
    "Lone Star",
    "Riverwalk",
    "Cedar Ridge",
    "Maple",
    "Oakview",
    "Sunset",
    "Mission",
    "Summit",
    "Creekside",
    "Heritage",
];

const NAME_SUFFIXES: [&str; 5] = [
    "Tennis Center",
    "Courts",
    "Racquet Club",
    "Sports Park",
    "Rec Center",
];

/// A tennis court as listed in the catalog.
///
/// `rating` carries one fractional digit, in the range 3.0..=4.9 for the
/// generated catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: String,
    pub name: String,
    pub city: String,
    pub rating: f64,
    pub indoor: bool,
}

impl Court {
    fn generated(index: usize) -> Self {
        let tenths = 30 + (index % 20) as u32;
        Court {
            id: format!("court-{}", index + 1),
            name: format!(
                "{} {}",
                NAME_PREFIXES[index % NAME_PREFIXES.len()],
                NAME_SUFFIXES[index % NAME_SUFFIXES.len()]
            ),
            city: CITIES[index % CITIES.len()].to_string(),
            rating: f64::from(tenths) / 10.0,
            indoor: index % 3 == 0,
        }
    }

    pub fn facility_label(&self) -> &'static str {
        if self.indoor {
            "Indoor"
        } else {
            "Outdoor"
        }
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Case-insensitive substring test against name or city.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.city.to_lowercase().contains(needle)
    }
}

/// Immutable, ordered sequence of courts with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    courts: Vec<Court>,
}

impl Catalog {
    /// The default catalog, generated on first use and shared afterwards.
    pub fn generated() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Catalog {
            courts: (0..CATALOG_SIZE).map(Court::generated).collect(),
        })
    }

    /// Builds a catalog from an explicit list, rejecting duplicate ids.
    pub fn from_courts(courts: Vec<Court>) -> Result<Self, AppResponse> {
        let mut seen = HashSet::with_capacity(courts.len());
        for court in &courts {
            if !seen.insert(court.id.as_str()) {
                return Err(AppResponse::ValidationError(format!(
                    "Duplicate court id in catalog: {}",
                    court.id
                )));
            }
        }
        Ok(Catalog { courts })
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn len(&self) -> usize {
        self.courts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courts.is_empty()
    }

    pub fn court(&self, id: &str) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }
}

/// "1 result" / "N results", as shown above the court list.
pub fn result_count_label(count: usize) -> String {
    if count == 1 {
        "1 result".to_string()
    } else {
        format!("{count} results")
    }
}
