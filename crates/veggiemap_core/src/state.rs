//! Explicit application state with pure transitions.
//!
//! # Responsibility
//! - Hold the collection, filter controls, selection, loading flag, error
//!   slot and view mode in one value.
//! - Expose every change as an [`Action`] applied by [`AppState::reduce`].
//!
//! # Invariants
//! - Only `Action::Loaded` replaces the collection, and it clears the error.
//! - The error slot holds at most one message; newer failures replace it.
//! - A selection never points at an id missing from the collection.

use crate::model::restaurant::{Restaurant, RestaurantId};
use crate::search::pipeline::{
    filter_and_sort, CuisineFilter, PriceFilter, RestaurantQuery, SortKey,
};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which collaborators render the pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    List,
    Map,
    #[default]
    Both,
}

impl ViewMode {
    pub fn shows_list(self) -> bool {
        matches!(self, Self::List | Self::Both)
    }

    pub fn shows_map(self) -> bool {
        matches!(self, Self::Map | Self::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Map => "map",
            Self::Both => "both",
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "map" => Ok(Self::Map),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unsupported view mode `{other}`; expected list|map|both"
            )),
        }
    }
}

/// State transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    /// Replaces the collection and clears the error slot.
    Loaded(Vec<Restaurant>),
    /// Sets the error slot and keeps the current collection.
    Failed(String),
    DismissError,
    SetSearchTerm(String),
    SetCuisineFilter(CuisineFilter),
    SetPriceFilter(PriceFilter),
    SetSortKey(SortKey),
    Select(Option<RestaurantId>),
    SetViewMode(ViewMode),
}

/// Whole client state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    restaurants: Vec<Restaurant>,
    query: RestaurantQuery,
    selected_id: Option<RestaurantId>,
    is_loading: bool,
    error: Option<String>,
    view_mode: ViewMode,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one transition and returns the next state.
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::LoadStarted => {
                self.is_loading = true;
            }
            Action::Loaded(restaurants) => {
                self.restaurants = restaurants;
                self.error = None;
                self.is_loading = false;
                let selection_missing = self.selected_id.as_deref().is_some_and(|id| {
                    !self.restaurants.iter().any(|restaurant| restaurant.id == id)
                });
                if selection_missing {
                    self.selected_id = None;
                }
            }
            Action::Failed(message) => {
                self.error = Some(message);
                self.is_loading = false;
            }
            Action::DismissError => {
                self.error = None;
            }
            Action::SetSearchTerm(term) => {
                self.query.search_term = term;
            }
            Action::SetCuisineFilter(cuisine) => {
                self.query.cuisine = cuisine;
            }
            Action::SetPriceFilter(price) => {
                self.query.price = price;
            }
            Action::SetSortKey(sort) => {
                self.query.sort = sort;
            }
            Action::Select(id) => {
                self.selected_id = id.filter(|id| {
                    self.restaurants
                        .iter()
                        .any(|restaurant| &restaurant.id == id)
                });
            }
            Action::SetViewMode(mode) => {
                self.view_mode = mode;
            }
        }
        self
    }

    /// In-place form of [`AppState::reduce`].
    pub fn dispatch(&mut self, action: Action) {
        *self = std::mem::take(self).reduce(action);
    }

    /// Pipeline output for the current filter controls.
    pub fn visible_restaurants(&self) -> Vec<&Restaurant> {
        filter_and_sort(&self.restaurants, &self.query)
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn query(&self) -> &RestaurantQuery {
        &self.query
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Restaurant> {
        let id = self.selected_id()?;
        self.restaurants.iter().find(|restaurant| restaurant.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, AppState, ViewMode};

    #[test]
    fn failure_keeps_collection_and_sets_single_message() {
        let state = AppState::new()
            .reduce(Action::LoadStarted)
            .reduce(Action::Failed("first".to_string()))
            .reduce(Action::Failed("second".to_string()));

        assert_eq!(state.error(), Some("second"));
        assert!(!state.is_loading());
        assert!(state.restaurants().is_empty());
    }

    #[test]
    fn loaded_clears_error_and_loading_flag() {
        let state = AppState::new()
            .reduce(Action::Failed("boom".to_string()))
            .reduce(Action::LoadStarted)
            .reduce(Action::Loaded(Vec::new()));

        assert_eq!(state.error(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn selecting_unknown_id_clears_selection() {
        let state = AppState::new().reduce(Action::Select(Some("missing".to_string())));
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!(" Map ".parse::<ViewMode>().unwrap(), ViewMode::Map);
        assert!("grid".parse::<ViewMode>().is_err());
        assert!(ViewMode::Both.shows_list() && ViewMode::Both.shows_map());
        assert!(!ViewMode::List.shows_map());
    }
}
