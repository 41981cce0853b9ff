//! Domain model for restaurant recommendations.
//!
//! # Responsibility
//! - Define the record shape shared by the API, the local cache and views.
//! - Keep enumerations closed so invalid values fail at deserialization.
//!
//! # Invariants
//! - Every record is identified by an opaque `RestaurantId`.
//! - Records are never edited or deleted after creation.

pub mod restaurant;
