use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::{clear_session_cookie, session_token};
use crate::error::AppError;
use crate::middleware::audit;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

/// Check credentials against the session gate, applying the login throttle.
/// On success the session cookie is added to `jar`.
///
/// Shared by the JSON API and the login form.
pub async fn attempt_login(
    state: &SharedState,
    jar: CookieJar,
    username: &str,
    password: &str,
) -> Result<CookieJar, AppError> {
    if state.login_limiter.check(username).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(token) = state.session.login(username, password).await? else {
        state.login_limiter.record_failure(username);
        tracing::warn!("Rejected login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    state.login_limiter.reset(username);
    audit::log_event("session.login", None, None);
    Ok(jar.add(state.session.session_cookie(token)))
}

/// Close the session named by the request's cookie and drop the cookie.
pub async fn end_session(state: &SharedState, jar: CookieJar) -> Result<CookieJar, AppError> {
    state.session.logout(session_token(&jar)).await?;
    audit::log_event("session.logout", None, None);
    Ok(clear_session_cookie(jar))
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let jar = attempt_login(&state, jar, &req.username, &req.password).await?;
    Ok((
        jar,
        Json(SessionResponse {
            authenticated: true,
        }),
    ))
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let jar = end_session(&state, jar).await?;
    Ok((
        jar,
        Json(SessionResponse {
            authenticated: false,
        }),
    ))
}

pub async fn session(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<SessionResponse>, AppError> {
    let authenticated = state.session.is_authenticated(session_token(&jar)).await?;
    Ok(Json(SessionResponse { authenticated }))
}
