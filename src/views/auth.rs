use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::html;
use crate::auth::session_token;
use crate::error::AppError;
use crate::middleware::auth_redirect::is_local_path;
use crate::routes::auth::{attempt_login, end_session};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "admin/login.html")]
struct LoginTemplate {
    error: Option<String>,
    username: String,
    next: String,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// Where to go after logging in; anything not on this site goes to the dashboard.
fn landing_path(next: &str) -> &str {
    if is_local_path(next) && next != "/login" {
        next
    } else {
        "/dashboard"
    }
}

pub async fn index(State(state): State<SharedState>, jar: CookieJar) -> Result<Response, AppError> {
    if state.session.is_authenticated(session_token(&jar)).await? {
        Ok(Redirect::to("/dashboard").into_response())
    } else {
        Ok(Redirect::to("/login").into_response())
    }
}

pub async fn login_page(
    State(state): State<SharedState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    let next = query.next.unwrap_or_default();

    // Already logged in
    if state.session.is_authenticated(session_token(&jar)).await? {
        return Ok(Redirect::to(landing_path(&next)).into_response());
    }

    let template = LoginTemplate {
        error: None,
        username: String::new(),
        next,
    };
    Ok(html(&template)?.into_response())
}

pub async fn login_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let status = match attempt_login(&state, jar, &form.username, &form.password).await {
        Ok(jar) => return Ok((jar, Redirect::to(landing_path(&form.next))).into_response()),
        Err(AppError::RateLimited(_)) => StatusCode::TOO_MANY_REQUESTS,
        Err(AppError::Unauthorized(_)) => StatusCode::OK,
        Err(e) => return Err(e),
    };

    let message = if status == StatusCode::TOO_MANY_REQUESTS {
        "Too many login attempts. Please try again later."
    } else {
        "Invalid username or password."
    };
    let template = LoginTemplate {
        error: Some(message.to_string()),
        username: form.username,
        next: form.next,
    };
    Ok((status, html(&template)?).into_response())
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let jar = end_session(&state, jar).await?;
    Ok((jar, Redirect::to("/login")))
}
