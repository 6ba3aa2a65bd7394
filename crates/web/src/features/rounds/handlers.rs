use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::round::{
    CreateRoundRequest, EventFilter, RoundListEntry, RoundResponse, UpdateRoundRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rounds",
    params(EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all rounds, optionally scoped to one event", body = Vec<RoundListEntry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rounds"
)]
pub async fn list_rounds(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<RoundListEntry>>, WebError> {
    let rounds = services::list_rounds(state.db.pool(), filter.event_id).await?;

    Ok(Json(rounds))
}

#[utoipa::path(
    get,
    path = "/api/rounds/{id}",
    params(
        ("id" = Uuid, Path, description = "Round id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Round found", body = RoundResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Round not found")
    ),
    tag = "rounds"
)]
pub async fn get_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let round = services::get_round(state.db.pool(), id).await?;

    Ok(Json(round).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rounds",
    request_body = CreateRoundRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Round created successfully", body = RoundResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Event not found")
    ),
    tag = "rounds"
)]
pub async fn create_round(
    State(state): State<AppState>,
    Json(req): Json<CreateRoundRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let round = services::create_round(state.db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(round)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/rounds/{id}",
    params(
        ("id" = Uuid, Path, description = "Round id")
    ),
    request_body = UpdateRoundRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Round updated successfully", body = RoundResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Round not found"),
        (status = 409, description = "Round type cannot change once scores exist")
    ),
    tag = "rounds"
)]
pub async fn update_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoundRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let round = services::update_round(state.db.pool(), id, &req).await?;

    Ok(Json(round).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/rounds/{id}",
    params(
        ("id" = Uuid, Path, description = "Round id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Round deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Round not found"),
        (status = 409, description = "Round has recorded scores")
    ),
    tag = "rounds"
)]
pub async fn delete_round(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_round(state.db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
