//! JSON REST handlers for users.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use roster_app::ports::{LogRepository, UserRepository};
use roster_domain::id::UserId;
use roster_domain::user::{User, UserProfile};

use super::{json_body, parse_id};
use crate::error::{ApiError, MessageBody};
use crate::state::AppState;

/// Request body for creating or overwriting a user.
///
/// Fields are optional so that an absent field surfaces as a validation
/// error instead of an extractor rejection.
#[derive(Default, Deserialize)]
pub struct UserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserRequest {
    fn into_profile(self) -> Result<UserProfile, ApiError> {
        let mut builder = UserProfile::builder();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(email) = self.email {
            builder = builder.email(email);
        }
        if let Some(role) = self.role {
            builder = builder.role(role);
        }
        Ok(builder.build()?)
    }

    /// Absent fields become empty strings, left for the service to judge.
    fn into_draft(self) -> UserProfile {
        UserProfile {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
        }
    }
}

/// Query string of `GET /api/users-searchName`.
#[derive(Deserialize)]
pub struct NameSearch {
    pub name: Option<String>,
}

/// Query string of `GET /api/users-searchEmail`.
#[derive(Deserialize)]
pub struct EmailSearch {
    pub email: Option<String>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<User>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from single-user endpoints.
pub enum GetResponse {
    Ok(Json<User>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<User>),
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
            Self::Deleted => Json(MessageBody::new("User deleted successfully.")).into_response(),
        }
    }
}

/// `POST /api/users`
pub async fn create<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let profile = json_body(payload)?.into_profile()?;
    let user = state.user_service.create_user(profile).await?;
    Ok(CreateResponse::Created(Json(user)))
}

/// `GET /api/users`
pub async fn list<UR, LR>(
    State(state): State<AppState<UR, LR>>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let users = state.user_service.list_active_users().await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /api/users/:email`
pub async fn get_by_email<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(email): Path<String>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let user = state.user_service.get_active_user_by_email(&email).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `PUT /api/users/:id`
pub async fn update<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(id): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let id: UserId = parse_id(&id, "User")?;
    let profile = json_body(payload)?.into_draft();
    let user = state.user_service.update_user(id, profile).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `PUT /api/users/archive/:id`
pub async fn archive<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let id: UserId = parse_id(&id, "User")?;
    let user = state.user_service.archive_user(id).await?;
    Ok(GetResponse::Ok(Json(user)))
}

/// `GET /api/users/role/:role`
pub async fn list_by_role<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(role): Path<String>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let users = state.user_service.list_users_by_role(&role).await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `DELETE /api/users/:id`
pub async fn delete<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let id: UserId = parse_id(&id, "User")?;
    state.user_service.delete_user(id).await?;
    Ok(DeleteResponse::Deleted)
}

/// `GET /api/users-searchName?name=`
pub async fn search_name<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Query(params): Query<NameSearch>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let fragment = params.name.unwrap_or_default();
    let users = state.user_service.search_by_name(&fragment).await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /api/users-searchEmail?email=`
pub async fn search_email<UR, LR>(
    State(state): State<AppState<UR, LR>>,
    Query(params): Query<EmailSearch>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let fragment = params.email.unwrap_or_default();
    let users = state.user_service.search_by_email(&fragment).await?;
    Ok(ListResponse::Ok(Json(users)))
}

/// `GET /api/users-archived`
pub async fn list_archived<UR, LR>(
    State(state): State<AppState<UR, LR>>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    let users = state.user_service.list_archived_users().await?;
    Ok(ListResponse::Ok(Json(users)))
}
