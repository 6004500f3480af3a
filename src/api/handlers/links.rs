//! Handlers for link management endpoints (create, list, get, update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a rotation link with its ordered destination set.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "key": "summer-sale",
///   "name": "Summer sale",           // optional
///   "destinations": [
///     { "url": "https://a.example/landing" },
///     { "url": "https://b.example/landing" }
///   ]
/// }
/// ```
///
/// Destination order in the request is rotation order.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the key is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create(payload.into_new_link()).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists all links with their rotation sets, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list().await?;

    Ok(Json(links.into_iter().map(Into::into).collect()))
}

/// Fetches a single link by id.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link matches.
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get(id).await?;

    Ok(Json(link.into()))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// {
///   "key": "autumn-sale",
///   "name": "Autumn sale",
///   "is_active": false,
///   "destinations": [ { "url": "https://c.example" } ]
/// }
/// ```
///
/// Providing `destinations` replaces the whole set: positions are renumbered
/// from 0 and per-destination counters reset.
///
/// # Cache
///
/// Cache entries for the affected key (both keys on rename) are purged
/// before the response is sent, so the next redirect sees the new set.
///
/// # Errors
///
/// Returns 404 Not Found if no link matches.
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if renaming to a taken key.
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update(id, payload.into_update())
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link and its destinations.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Behavior
///
/// - The link row and its destinations are removed; click rows are kept for
///   analytics and age out via retention.
/// - Cache entries for the key are purged before the response is sent.
///
/// # Errors
///
/// Returns 404 Not Found if no link matches.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
