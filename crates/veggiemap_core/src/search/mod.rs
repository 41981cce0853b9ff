//! In-memory filter/sort pipeline over the restaurant collection.
//!
//! # Responsibility
//! - Turn filter-control state into an ordered view of the collection.
//! - Keep view shaping pure so list and map renderers share one result.

pub mod pipeline;
