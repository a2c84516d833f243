//! # roster-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository`: CRUD, scoped lookups and substring search for users
//!   - `LogRepository`: append, list and delete activity logs
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UserService`: create, list, look up, update, archive, delete, search
//!   - `LogService`: record activity, list a user's logs, delete logs
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `roster-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
