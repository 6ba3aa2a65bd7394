use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use storage::dto::{
    analytics::{
        ContestantAnalyticsEntry, ContestantRoundEntry, JudgeBreakdownEntry, RoundSummaryEntry,
        ScoreEntryResponse,
    },
    round::EventFilter,
    score::{ScoreResponse, SubmitScoreRequest, SubmitScoreResponse},
};
use storage::services::aggregation;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};
use validator::Validate;

use crate::error::WebError;
use crate::live::ScorePosted;
use crate::middleware::auth::JudgeIdentity;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/scores",
    request_body = SubmitScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Score recorded", body = SubmitScoreResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Judge role required"),
        (status = 404, description = "Round, question or contestant not found"),
        (status = 409, description = "Question already used")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(state): State<AppState>,
    Extension(judge): Extension<JudgeIdentity>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (score, asked_question) = services::submit_score(state.db.pool(), judge.0, &req).await?;

    let response = ScoreResponse::from(score);

    // Best-effort broadcast; live dashboards may or may not be listening.
    state.feed.publish(ScorePosted {
        score_id: response.score_id,
        round_id: response.round_id,
        contestant_id: response.contestant_id,
        judge_id: response.judge_id,
        score: response.score,
    });

    Ok((
        StatusCode::CREATED,
        Json(SubmitScoreResponse {
            score: response,
            asked_question,
        }),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/scores",
    params(EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Full score ledger with display identity", body = Vec<ScoreEntryResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "scores"
)]
pub async fn list_scores(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<ScoreEntryResponse>>, WebError> {
    let entries = services::list_score_details(state.db.pool(), filter.event_id).await?;

    let response: Vec<ScoreEntryResponse> =
        entries.into_iter().map(ScoreEntryResponse::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/scores/analytics",
    params(EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Per-contestant totals ranked as a leaderboard", body = Vec<ContestantAnalyticsEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "scores"
)]
pub async fn contestant_analytics(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<ContestantAnalyticsEntry>>, WebError> {
    let entries = services::list_score_details(state.db.pool(), filter.event_id).await?;

    Ok(Json(aggregation::contestant_analytics(&entries)))
}

#[utoipa::path(
    get,
    path = "/api/scores/per-contestant-round",
    params(EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Aggregates grouped by contestant and round", body = Vec<ContestantRoundEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "scores"
)]
pub async fn contestant_round_breakdown(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<ContestantRoundEntry>>, WebError> {
    let entries = services::list_score_details(state.db.pool(), filter.event_id).await?;

    Ok(Json(aggregation::contestant_round_breakdown(&entries)))
}

#[utoipa::path(
    get,
    path = "/api/scores/judge-breakdown",
    params(EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every entry grouped per judge", body = Vec<JudgeBreakdownEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "scores"
)]
pub async fn judge_breakdown(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<JudgeBreakdownEntry>>, WebError> {
    let entries = services::list_score_details(state.db.pool(), filter.event_id).await?;

    Ok(Json(aggregation::judge_breakdown(&entries)))
}

#[utoipa::path(
    get,
    path = "/api/scores/round-summary",
    params(EventFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Per contestant and round: all judges' scores with sum, average and the round ceiling", body = Vec<RoundSummaryEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    tag = "scores"
)]
pub async fn round_summary(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<RoundSummaryEntry>>, WebError> {
    let entries = services::list_score_details(state.db.pool(), filter.event_id).await?;

    Ok(Json(aggregation::round_summary(&entries)))
}

/// SSE stream of `ScorePosted` events. Lagged receivers skip ahead rather
/// than terminating the stream.
pub async fn live_scores(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    let stream = BroadcastStream::new(state.feed.subscribe())
        .filter_map(|message| message.ok())
        .map(|event| Event::default().event("score").json_data(&event));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
