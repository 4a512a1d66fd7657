use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use super::session::session_token;
use crate::error::AppError;
use crate::state::SharedState;

/// Proof that the request carries the operator's session cookie. Add it to a
/// handler's arguments to protect the route.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<SharedState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if state.session.is_authenticated(session_token(&jar)).await? {
            Ok(AdminSession)
        } else {
            Err(AppError::Unauthorized("Login required".to_string()))
        }
    }
}
