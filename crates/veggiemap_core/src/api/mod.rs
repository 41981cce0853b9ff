//! Remote restaurant API access.
//!
//! # Responsibility
//! - Define the transport contract used by retrieval and submission.
//! - Keep reqwest details out of the services.
//!
//! # Invariants
//! - Any non-2xx status, transport failure or undecodable body is an error.
//! - POST responses are never read beyond their status line.

pub mod client;
