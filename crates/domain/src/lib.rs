//! # roster-domain
//!
//! Pure domain model for the roster user-management service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** (name, email, role, soft-delete flag)
//! - Define **Logs** (login/logout activity owned by a user)
//! - Validate caller-supplied payloads before they reach storage
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod log;
pub mod user;
