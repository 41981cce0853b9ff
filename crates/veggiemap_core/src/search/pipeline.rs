//! Filter and sort pipeline.
//!
//! # Invariants
//! - Pure and deterministic; the input slice is never reordered.
//! - Filters are ANDed: search, cuisine, price.
//! - Sorting is stable, so ties keep collection (insertion) order.
//! - An unrecognized sort key leaves the filtered order untouched.

use crate::model::restaurant::{Cuisine, PriceRange, Restaurant};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Filter-control value meaning "no cuisine restriction".
pub const CUISINE_ALL: &str = "All";
/// Filter-control value meaning "no price restriction". Lowercase on purpose.
pub const PRICE_ALL: &str = "all";

/// Cuisine axis of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CuisineFilter {
    #[default]
    All,
    Only(Cuisine),
    /// A control value that names no cuisine; matches nothing.
    Unknown(String),
}

impl CuisineFilter {
    pub fn parse(value: &str) -> Self {
        if value == CUISINE_ALL {
            return Self::All;
        }
        value
            .parse::<Cuisine>()
            .map(Self::Only)
            .unwrap_or_else(|_| Self::Unknown(value.to_string()))
    }

    pub fn matches(&self, cuisine: Cuisine) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => *expected == cuisine,
            Self::Unknown(_) => false,
        }
    }
}

impl Display for CuisineFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(CUISINE_ALL),
            Self::Only(cuisine) => write!(f, "{cuisine}"),
            Self::Unknown(value) => f.write_str(value),
        }
    }
}

/// Price axis of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    Only(PriceRange),
    Unknown(String),
}

impl PriceFilter {
    pub fn parse(value: &str) -> Self {
        if value == PRICE_ALL {
            return Self::All;
        }
        value
            .parse::<PriceRange>()
            .map(Self::Only)
            .unwrap_or_else(|_| Self::Unknown(value.to_string()))
    }

    pub fn matches(&self, price: PriceRange) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => *expected == price,
            Self::Unknown(_) => false,
        }
    }
}

impl Display for PriceFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(PRICE_ALL),
            Self::Only(price) => write!(f, "{price}"),
            Self::Unknown(value) => f.write_str(value),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Rating,
    PriceAsc,
    PriceDesc,
    /// Any unrecognized key: keep filtered order.
    Unsorted,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "rating" => Self::Rating,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Unsorted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Rating => "rating",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Unsorted => "none",
        }
    }

    /// Comparator for this key; `Equal` for ties and for `Unsorted`.
    pub fn compare(self, a: &Restaurant, b: &Restaurant) -> Ordering {
        match self {
            Self::Newest => b.timestamp.cmp(&a.timestamp),
            Self::Oldest => a.timestamp.cmp(&b.timestamp),
            Self::Rating => b.rating.cmp(&a.rating),
            Self::PriceAsc => a.price_range.tier().cmp(&b.price_range.tier()),
            Self::PriceDesc => b.price_range.tier().cmp(&a.price_range.tier()),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five pipeline inputs besides the collection itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestaurantQuery {
    /// Case-insensitive substring; empty matches everything.
    pub search_term: String,
    pub cuisine: CuisineFilter,
    pub price: PriceFilter,
    pub sort: SortKey,
}

impl RestaurantQuery {
    /// Builds a query from raw filter-control strings.
    pub fn from_controls(search_term: &str, cuisine: &str, price: &str, sort: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            cuisine: CuisineFilter::parse(cuisine),
            price: PriceFilter::parse(price),
            sort: SortKey::parse(sort),
        }
    }

    /// Returns whether one record passes all three filters.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        matches_search(restaurant, &self.search_term)
            && self.cuisine.matches(restaurant.cuisine)
            && self.price.matches(restaurant.price_range)
    }
}

/// Filters then sorts `restaurants`, borrowing the matching records.
pub fn filter_and_sort<'a>(
    restaurants: &'a [Restaurant],
    query: &RestaurantQuery,
) -> Vec<&'a Restaurant> {
    let mut visible = restaurants
        .iter()
        .filter(|restaurant| query.matches(restaurant))
        .collect::<Vec<_>>();

    if query.sort != SortKey::Unsorted {
        visible.sort_by(|a, b| query.sort.compare(a, b));
    }

    visible
}

fn matches_search(restaurant: &Restaurant, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    restaurant.name.to_lowercase().contains(&needle)
        || restaurant.description.to_lowercase().contains(&needle)
}
