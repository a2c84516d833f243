//! # roster-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `/api` (`/api/users`, `/api/logs`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and [`RosterError`](roster_domain::error::RosterError)
//!   variants into HTTP responses
//!
//! ## Dependency rule
//! Depends on `roster-app` (for port traits and services) and `roster-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
