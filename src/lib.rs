pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod models;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod store;
pub mod upload;
pub mod views;
pub mod rate_limit;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth_redirect::redirect_unauthorized;

use crate::auth::{AdminCredentials, SessionGate};
use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::render::{RenderOptions, TemplateRegistry};
use crate::state::{AppState, SharedState};
use crate::store::{KeyValueStore, ProjectStore};
use crate::upload::ImageHost;

const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub fn build_app(config: Config, kv: Arc<dyn KeyValueStore>, images: Arc<dyn ImageHost>) -> Router {
    let templates = TemplateRegistry::builtin(RenderOptions {
        redirect_delay: config.redirect_delay,
        copyright_year: config.copyright_year,
    });

    let credentials = AdminCredentials {
        username: config.admin_username.clone(),
        password_hash: config.admin_password_hash.clone(),
    };

    let max_upload_size = config.max_upload_size;
    let secure_cookies = config.secure_cookies;

    let state: SharedState = Arc::new(AppState {
        config,
        projects: ProjectStore::new(kv.clone()),
        session: SessionGate::new(kv, credentials, secure_cookies),
        templates,
        images,
        login_limiter: LoginRateLimiter::new(),
    });

    spawn_limiter_cleanup(&state);

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    Router::new()
        .merge(routes::api_routes())
        .merge(routes::upload_routes(max_upload_size))
        .merge(views::view_routes().layer(axum::middleware::from_fn(redirect_unauthorized)))
        .route("/health", axum::routing::get(health))
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop expired login failure windows. The task ends once the
/// app (and with it the state) is dropped.
fn spawn_limiter_cleanup(state: &SharedState) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return;
    };
    let weak = Arc::downgrade(state);
    runtime.spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let Some(state) = weak.upgrade() else {
                break;
            };
            state.login_limiter.cleanup(LIMITER_CLEANUP_INTERVAL);
        }
    });
}

async fn health() -> &'static str {
    "ok"
}
