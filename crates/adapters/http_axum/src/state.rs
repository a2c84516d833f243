//! Shared application state for axum handlers.

use std::sync::Arc;

use roster_app::ports::{LogRepository, UserRepository};
use roster_app::services::log_service::LogService;
use roster_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<UR, LR> {
    /// User CRUD and search service.
    pub user_service: Arc<UserService<UR>>,
    /// Activity log service.
    pub log_service: Arc<LogService<UR, LR>>,
}

impl<UR, LR> Clone for AppState<UR, LR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            log_service: Arc::clone(&self.log_service),
        }
    }
}

impl<UR, LR> AppState<UR, LR>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(user_service: UserService<UR>, log_service: LogService<UR, LR>) -> Self {
        Self {
            user_service: Arc::new(user_service),
            log_service: Arc::new(log_service),
        }
    }
}
