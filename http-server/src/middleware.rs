use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::{AppState, models::AuthenticatedUser};

// Axum extractor for the authenticated user of the active session
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(|| {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header").into_response()
            })?;

        // Check if it's a Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            )
                .into_response());
        }

        // Extract the token (session id)
        let token = &auth_header[7..]; // Remove "Bearer " prefix

        // There is exactly one session per running process; the token must
        // match the one issued at the most recent register/login.
        {
            let active_token = state.session_token.lock().unwrap();
            match active_token.as_deref() {
                Some(current) if current == token => {}
                _ => {
                    return Err(
                        (StatusCode::UNAUTHORIZED, "Invalid or expired session").into_response()
                    );
                }
            }
        }

        let platform = state.platform.lock().unwrap();
        match platform.current_account() {
            Some(account) => Ok(AuthUser(AuthenticatedUser::from(account))),
            None => Err((StatusCode::UNAUTHORIZED, "Invalid or expired session").into_response()),
        }
    }
}
