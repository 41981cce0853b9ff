//! Client use-case services.
//!
//! # Responsibility
//! - Orchestrate API, snapshot store and state transitions.
//! - Collapse every failure into the single user-visible error slot.
//!
//! # Invariants
//! - Services never panic and never propagate transport errors to views.
//! - The cache is rewritten after every collection change.

pub mod retrieval_service;
pub mod submission_service;
