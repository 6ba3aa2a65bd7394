use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth;
use crate::state::AppState;

use super::handlers::{create_round, delete_round, get_round, list_rounds, update_round};

pub fn routes(state: &AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_rounds))
        .route("/:id", get(get_round))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_any_role,
        ));

    let writes = Router::new()
        .route("/", post(create_round))
        .route("/:id", put(update_round).delete(delete_round))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    reads.merge(writes)
}
