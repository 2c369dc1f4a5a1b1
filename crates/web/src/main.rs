use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use chess_replay_core::{Game, Orientation, PredictionClient, PredictionGate};

mod config;
mod error;
mod routes;

use error::AppError;

/// The game built from the most recent scrape.
pub struct CurrentGame {
    pub game: Game,
    pub url: Option<String>,
    pub orientation: Orientation,
}

pub struct AppState {
    pub current: Mutex<Option<CurrentGame>>,
    pub predictor: PredictionClient,
    pub gate: PredictionGate,
}

impl AppState {
    pub fn new(predictor: PredictionClient) -> Self {
        Self {
            current: Mutex::new(None),
            predictor,
            gate: PredictionGate::new(),
        }
    }

    pub fn current(&self) -> Result<MutexGuard<'_, Option<CurrentGame>>, AppError> {
        self.current
            .lock()
            .map_err(|_| AppError::Internal("game state lock poisoned".to_string()))
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/game", get(routes::current_game).post(routes::load_game))
        .route("/api/game/position", get(routes::position))
        .route("/api/game/pgn", get(routes::export_pgn))
        .route("/api/predict", post(routes::predict::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    let predictor =
        PredictionClient::with_timeout(config.prediction_url.clone(), config.prediction_timeout())
            .expect("Failed to create prediction client");
    tracing::info!("Prediction service at {}", predictor.base_url());

    let state = Arc::new(AppState::new(predictor));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Server running at http://{addr}");

    axum::serve(listener, app(state)).await.expect("Server error");
}
