use axum::{Json, extract::State, http::StatusCode};
use hex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AppState, middleware::AuthUser, models::AuthenticatedUser, routes::error_status};

// Registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Shared response shape for register and login
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub session_id: Option<String>,
    pub user: Option<AuthenticatedUser>,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

// Generate a session id hash from email + password
fn session_token(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

// Registration endpoint - creates the account and signs it in
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let mut platform = state.platform.lock().unwrap();

    match platform.register(&payload.username, &payload.email, &payload.password) {
        Ok(account) => {
            let user = AuthenticatedUser::from(account);
            drop(platform);

            let session_id = session_token(&payload.email, &payload.password);
            *state.session_token.lock().unwrap() = Some(session_id.clone());

            tracing::info!("Account {} registered for {}", user.user_id, user.email);
            let response = AuthResponse {
                success: true,
                message: "Registration successful! Welcome aboard.".to_string(),
                session_id: Some(session_id),
                user: Some(user),
            };
            (StatusCode::CREATED, Json(response))
        }
        Err(error) => {
            let response = AuthResponse {
                success: false,
                message: error.to_string(),
                session_id: None,
                user: None,
            };
            (error_status(&error), Json(response))
        }
    }
}

// Login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let mut platform = state.platform.lock().unwrap();

    match platform.authenticate(&payload.email, &payload.password) {
        Ok(account) => {
            let user = AuthenticatedUser::from(account);
            drop(platform);

            let session_id = session_token(&payload.email, &payload.password);
            *state.session_token.lock().unwrap() = Some(session_id.clone());

            tracing::info!("Account {} logged in", user.user_id);
            let response = AuthResponse {
                success: true,
                message: "Login successful".to_string(),
                session_id: Some(session_id),
                user: Some(user),
            };
            (StatusCode::OK, Json(response))
        }
        Err(error) => {
            tracing::warn!("Failed login attempt for {}", payload.email);
            let response = AuthResponse {
                success: false,
                message: error.to_string(),
                session_id: None,
                user: None,
            };
            (error_status(&error), Json(response))
        }
    }
}

// Logout endpoint (protected route)
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> (StatusCode, Json<LogoutResponse>) {
    state.platform.lock().unwrap().logout();
    *state.session_token.lock().unwrap() = None;

    tracing::info!("Account {} logged out", user.user_id);
    let response = LogoutResponse {
        success: true,
        message: "Logged out".to_string(),
    };
    (StatusCode::OK, Json(response))
}

// User profile response
#[derive(Serialize)]
pub struct UserProfileResponse {
    pub success: bool,
    pub user: Option<AuthenticatedUser>,
    pub message: String,
}

// Get user profile endpoint (protected route)
pub async fn get_profile(AuthUser(user): AuthUser) -> (StatusCode, Json<UserProfileResponse>) {
    let response = UserProfileResponse {
        success: true,
        user: Some(user),
        message: "Profile retrieved successfully".to_string(),
    };
    (StatusCode::OK, Json(response))
}
