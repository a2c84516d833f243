//! JSON REST handlers for activity logs.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use roster_app::ports::{LogRepository, UserRepository};
use roster_domain::id::LogId;
use roster_domain::log::{Log, LogDraft};

use super::{json_body, parse_id};
use crate::error::{ApiError, MessageBody};
use crate::state::AppState;

/// Request body for recording a log entry.
#[derive(Default, Deserialize)]
pub struct LogRequest {
    pub action: Option<String>,
    /// RFC 3339 timestamp of the activity.
    pub timestamp: Option<String>,
}

impl From<LogRequest> for LogDraft {
    fn from(req: LogRequest) -> Self {
        Self {
            action: req.action,
            timestamp: req.timestamp,
        }
    }
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Log>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Log>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(MessageBody::new("Log deleted successfully")).into_response(),
        }
    }
}

/// `POST /api/users/:email/log`
pub async fn create<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(email): Path<String>,
    payload: Result<Json<LogRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let draft = LogDraft::from(json_body(payload)?);
    let log = state.log_service.record(&email, draft).await?;
    Ok(CreateResponse::Created(Json(log)))
}

/// `GET /api/users/:email/logs`
pub async fn list<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(email): Path<String>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let logs = state.log_service.logs_for(&email).await?;
    Ok(ListResponse::Ok(Json(logs)))
}

/// `GET /api/users/:email/logs/recent`
pub async fn recent<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(email): Path<String>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let logs = state.log_service.recent_logs(&email).await?;
    Ok(ListResponse::Ok(Json(logs)))
}

/// `DELETE /api/logs/:id`
pub async fn delete<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let id: LogId = parse_id(&id, "Log")?;
    state.log_service.delete_log(id).await?;
    Ok(DeleteResponse::Deleted)
}
