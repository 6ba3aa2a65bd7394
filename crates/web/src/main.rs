use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod live;
mod middleware;
mod state;

use config::Config;
use live::ScoreFeed;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::rounds::handlers::list_rounds,
        features::rounds::handlers::get_round,
        features::rounds::handlers::create_round,
        features::rounds::handlers::update_round,
        features::rounds::handlers::delete_round,
        features::scores::handlers::submit_score,
        features::scores::handlers::list_scores,
        features::scores::handlers::contestant_analytics,
        features::scores::handlers::contestant_round_breakdown,
        features::scores::handlers::judge_breakdown,
        features::scores::handlers::round_summary,
    ),
    components(
        schemas(
            storage::dto::round::CreateRoundRequest,
            storage::dto::round::UpdateRoundRequest,
            storage::dto::round::QuestionsInput,
            storage::dto::round::QuestionEntry,
            storage::dto::round::RoundResponse,
            storage::dto::round::QuestionResponse,
            storage::dto::round::RoundListEntry,
            storage::dto::round::EventInfo,
            storage::dto::score::SubmitScoreRequest,
            storage::dto::score::ScoreResponse,
            storage::dto::score::SubmitScoreResponse,
            storage::dto::analytics::ScoreEntryResponse,
            storage::dto::analytics::ContestantAnalyticsEntry,
            storage::dto::analytics::ContestantRoundEntry,
            storage::dto::analytics::JudgeBreakdownEntry,
            storage::dto::analytics::RoundSummaryEntry,
            storage::dto::analytics::JudgeScore,
            storage::dto::analytics::ContestantInfo,
            storage::dto::analytics::JudgeInfo,
            storage::dto::analytics::RoundInfo,
            live::ScorePosted,
        )
    ),
    tags(
        (name = "rounds", description = "Round definitions and their question lists"),
        (name = "scores", description = "Score submission and aggregated analytics"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting judging API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        db,
        feed: ScoreFeed::new(),
        api_keys: ApiKeys::from_env_values(&config.admin_api_keys, &config.judge_api_keys),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/rounds", features::rounds::routes::routes(&state))
        .nest("/api/scores", features::scores::routes::routes(&state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
