use std::sync::Arc;

use crate::auth::SessionGate;
use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::render::TemplateRegistry;
use crate::store::ProjectStore;
use crate::upload::ImageHost;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub projects: ProjectStore,
    pub session: SessionGate,
    pub templates: TemplateRegistry,
    pub images: Arc<dyn ImageHost>,
    pub login_limiter: LoginRateLimiter,
}
