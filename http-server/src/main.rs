use axum::{
    Router,
    routing::{get, post},
};
use ledger::Platform;
use std::sync::{Arc, Mutex};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

mod middleware;
mod models;
mod routes;

use routes::coins::get_coins;
use routes::deposits::{confirm_deposit, generate_deposit_address, get_deposit_history};
use routes::portfolio::get_portfolio;
use routes::staking::{stake, unstake};
use routes::users::{get_profile, login, logout, register};

// Application state: the single platform instance and the token of the one
// active session
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<Mutex<Platform>>,
    pub session_token: Arc<Mutex<Option<String>>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    // Initialize the in-memory platform
    let state = AppState {
        platform: Arc::new(Mutex::new(Platform::new())),
        session_token: Arc::new(Mutex::new(None)),
    };
    tracing::info!("In-memory ledger initialized successfully");

    // build our application with routes
    let app = Router::new()
        .route("/", get(root))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(get_profile))
        .route("/coins", get(get_coins))
        .route("/portfolio", get(get_portfolio))
        .route("/deposits/address", post(generate_deposit_address))
        .route("/deposits", post(confirm_deposit).get(get_deposit_history))
        .route("/stake", post(stake))
        .route("/unstake", post(unstake))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state);

    // run our app with hyper, listening globally on port 6959
    let listener = tokio::net::TcpListener::bind("0.0.0.0:6959").await?;
    tracing::info!("Server running on http://0.0.0.0:6959");
    axum::serve(listener, app).await?;

    Ok(())
}

// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// Root endpoint
async fn root() -> &'static str {
    "Staking Portfolio API - Use POST /register or /login to authenticate, POST /deposits to credit funds, POST /stake and /unstake to manage staking"
}
