// ============================
// credgate-backend-lib/src/http.rs
// ============================
//! HTTP surface: `POST /login` and `GET /health`.
use std::sync::Arc;

use ::metrics::counter;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use credgate_common::{HealthResponse, LoginRequest, LoginResponse};
use tower_http::trace::TraceLayer;

use crate::auth::AuthResult;
use crate::error::AppError;
use crate::metrics::HTTP_LOGIN;
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for login requests
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    counter!(HTTP_LOGIN).increment(1);

    let Json(req) = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;

    match state.auth.authenticate(&req.username, &req.password).await {
        AuthResult::Accepted { real_name, email } => Ok(Json(LoginResponse::accepted(real_name, email))),
        AuthResult::Rejected => Err(AppError::InvalidCredentials),
        AuthResult::InvalidRequest => Err(AppError::InvalidInput(
            "username and password must not be empty".to_string(),
        )),
        AuthResult::ServiceError(cause) => Err(cause.into()),
    }
}

/// Liveness probe
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
