//! Hustle API server entry point.

use std::sync::Arc;

use axum::Router;
use hustle_core::clock::SystemClock;
use hustle_core::messaging::MessagingGateway;
use hustle_narrative::domain::hustle::HUSTLE;
use hustle_store::pg_progress_repository::PgProgressRepository;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hustle_api::config::AppConfig;
use hustle_api::error::AppError;
use hustle_api::gateway::{AfricasTalkingGateway, UnconfiguredGateway};
use hustle_api::routes;
use hustle_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Hustle SMS game server");

    let config = AppConfig::from_env()?;

    // Refuse to serve a script with dangling references.
    HUSTLE.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let gateway: Arc<dyn MessagingGateway> = match config.sms.clone() {
        Some(settings) => Arc::new(AfricasTalkingGateway::new(settings)?),
        None => {
            tracing::warn!(
                "AFRICASTALKING_USERNAME/AFRICASTALKING_API_KEY not set; replies will not be delivered"
            );
            Arc::new(UnconfiguredGateway)
        }
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgProgressRepository::new(pool)),
        gateway,
        &HUSTLE,
    );

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/sms", routes::sms::router())
        .nest("/api/v1/players", routes::players::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
