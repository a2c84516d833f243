//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod logs;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use roster_app::ports::{LogRepository, UserRepository};
use roster_domain::error::{NotFoundError, RosterError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// `/users/{user}` carries an email on `GET` and a numeric id on `PUT` and
/// `DELETE`.
pub fn routes<UR, LR>() -> Router<AppState<UR, LR>>
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    Router::new()
        // Users
        .route(
            "/users",
            get(users::list::<UR, LR>).post(users::create::<UR, LR>),
        )
        .route(
            "/users/{user}",
            get(users::get_by_email::<UR, LR>)
                .put(users::update::<UR, LR>)
                .delete(users::delete::<UR, LR>),
        )
        .route("/users/archive/{id}", put(users::archive::<UR, LR>))
        .route("/users/role/{role}", get(users::list_by_role::<UR, LR>))
        .route("/users-searchName", get(users::search_name::<UR, LR>))
        .route("/users-searchEmail", get(users::search_email::<UR, LR>))
        .route("/users-archived", get(users::list_archived::<UR, LR>))
        // Logs
        .route("/users/{user}/log", post(logs::create::<UR, LR>))
        .route("/users/{user}/logs", get(logs::list::<UR, LR>))
        .route("/users/{user}/logs/recent", get(logs::recent::<UR, LR>))
        .route("/logs/{id}", delete(logs::delete::<UR, LR>))
}

/// Parse a numeric path id; anything unparseable addresses no record.
fn parse_id<T: FromStr>(raw: &str, entity: &'static str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(RosterError::from(NotFoundError {
            entity,
            key: raw.to_string(),
        }))
    })
}

/// Unwrap a JSON body extracted as `Result`.
///
/// A body sent without a JSON content type reads as an empty object. A body
/// that does not decode is a [`ValidationError::MalformedBody`].
fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => {
            Err(RosterError::from(ValidationError::MalformedBody(rejection.body_text())).into())
        }
    }
}
