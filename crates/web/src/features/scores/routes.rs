use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth;
use crate::state::AppState;

use super::handlers::{
    contestant_analytics, contestant_round_breakdown, judge_breakdown, list_scores, live_scores,
    round_summary, submit_score,
};

pub fn routes(state: &AppState) -> Router<AppState> {
    let judge = Router::new()
        .route("/", post(submit_score))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_judge,
        ));

    let admin = Router::new()
        .route("/", get(list_scores))
        .route("/analytics", get(contestant_analytics))
        .route("/per-contestant-round", get(contestant_round_breakdown))
        .route("/judge-breakdown", get(judge_breakdown))
        .route("/round-summary", get(round_summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    let live = Router::new()
        .route("/live", get(live_scores))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_any_role,
        ));

    judge.merge(admin).merge(live)
}
