//! # roster-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `roster-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Create the `users` and `logs` tables on startup (embedded sqlx migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `roster-app` (for port traits) and `roster-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod log_repo;
pub mod pool;
pub mod user_repo;

pub use error::StorageError;
pub use log_repo::SqliteLogRepository;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
