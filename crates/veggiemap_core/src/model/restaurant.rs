//! Restaurant domain model.
//!
//! # Responsibility
//! - Define the canonical recommendation record and its draft form.
//! - Map price tiers to an explicit sortable ordinal.
//! - Reject unrepresentable values at the data boundary.
//!
//! # Invariants
//! - `id` and `timestamp` are assigned once, by submission, never by callers.
//! - `rating` is always within `1..=5`.
//! - Price tiers serialize as `€`..`€€€€`; symbol count equals `tier()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque identity assigned at creation time.
pub type RestaurantId = String;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Validation failures for restaurant records and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestaurantValidationError {
    RatingOutOfRange(i64),
    BlankName,
    UnknownCuisine(String),
    UnknownPriceRange(String),
}

impl Display for RestaurantValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RatingOutOfRange(value) => write!(
                f,
                "rating ({value}) must be between {MIN_RATING} and {MAX_RATING}"
            ),
            Self::BlankName => write!(f, "restaurant name cannot be blank"),
            Self::UnknownCuisine(value) => write!(f, "unknown cuisine `{value}`"),
            Self::UnknownPriceRange(value) => write!(f, "unknown price range `{value}`"),
        }
    }
}

impl Error for RestaurantValidationError {}

/// Closed set of cuisines a record can carry.
///
/// The filter-only `All` sentinel lives in `search::pipeline::CuisineFilter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Japanese,
    Mexican,
    Indian,
    American,
    French,
    Thai,
    Other,
}

impl Cuisine {
    pub const ALL: [Cuisine; 8] = [
        Cuisine::Italian,
        Cuisine::Japanese,
        Cuisine::Mexican,
        Cuisine::Indian,
        Cuisine::American,
        Cuisine::French,
        Cuisine::Thai,
        Cuisine::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Italian => "Italian",
            Self::Japanese => "Japanese",
            Self::Mexican => "Mexican",
            Self::Indian => "Indian",
            Self::American => "American",
            Self::French => "French",
            Self::Thai => "Thai",
            Self::Other => "Other",
        }
    }
}

impl Display for Cuisine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = RestaurantValidationError;

    /// Exact, case-sensitive match on the wire name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cuisine| cuisine.as_str() == value)
            .ok_or_else(|| RestaurantValidationError::UnknownCuisine(value.to_string()))
    }
}

/// Four-level price tier, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "€")]
    Budget,
    #[serde(rename = "€€")]
    Moderate,
    #[serde(rename = "€€€")]
    Upscale,
    #[serde(rename = "€€€€")]
    Luxury,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Budget,
        PriceRange::Moderate,
        PriceRange::Upscale,
        PriceRange::Luxury,
    ];

    /// Sortable ordinal, `1..=4`.
    pub fn tier(self) -> u8 {
        match self {
            Self::Budget => 1,
            Self::Moderate => 2,
            Self::Upscale => 3,
            Self::Luxury => 4,
        }
    }

    /// Wire and display symbol; its char count equals `tier()`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Budget => "€",
            Self::Moderate => "€€",
            Self::Upscale => "€€€",
            Self::Luxury => "€€€€",
        }
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PriceRange {
    type Err = RestaurantValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|price| price.symbol() == value)
            .ok_or_else(|| RestaurantValidationError::UnknownPriceRange(value.to_string()))
    }
}

/// Star rating constrained to `1..=5`.
///
/// Deserialization goes through `TryFrom<i64>`, so out-of-range payloads are
/// rejected instead of propagating into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, RestaurantValidationError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RestaurantValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < i64::from(MIN_RATING) || value > i64::from(MAX_RATING) {
            return Err(RestaurantValidationError::RatingOutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map placement only; coordinates are not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// Restaurant recommendation as stored by the API and the local cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: String,
    pub cuisine: Cuisine,
    pub price_range: PriceRange,
    pub rating: Rating,
    pub recommended_by: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub location: Location,
}

impl Restaurant {
    /// Completes a draft with its assigned identity and creation time.
    pub fn from_draft(draft: RestaurantDraft, id: RestaurantId, timestamp: i64) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            cuisine: draft.cuisine,
            price_range: draft.price_range,
            rating: draft.rating,
            recommended_by: draft.recommended_by,
            timestamp,
            location: draft.location,
        }
    }
}

/// Restaurant without identity or timestamp, as produced by the add form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cuisine: Cuisine,
    pub price_range: PriceRange,
    pub rating: Rating,
    #[serde(default)]
    pub recommended_by: String,
    pub location: Location,
}

impl RestaurantDraft {
    /// Checks constraints that the type system does not already encode.
    pub fn validate(&self) -> Result<(), RestaurantValidationError> {
        if self.name.trim().is_empty() {
            return Err(RestaurantValidationError::BlankName);
        }
        Ok(())
    }
}
