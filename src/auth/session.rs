use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::password;
use crate::store::{KeyValueStore, StoreError, SESSION_KEY};

/// Cookie carrying the browser's session token.
pub const SESSION_COOKIE: &str = "lander_session";

/// The single operator account.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

/// Authenticated/unauthenticated state of the admin tool.
///
/// A login hands the browser a random token and keeps its SHA-256 in the
/// key-value store, so the session survives restarts until an explicit
/// [`SessionGate::logout`]. Only the most recent login is valid.
pub struct SessionGate {
    kv: Arc<dyn KeyValueStore>,
    credentials: AdminCredentials,
    secure_cookies: bool,
}

impl SessionGate {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        credentials: AdminCredentials,
        secure_cookies: bool,
    ) -> Self {
        Self {
            kv,
            credentials,
            secure_cookies,
        }
    }

    /// Check credentials and open a session on success, returning its token.
    ///
    /// Username and password are always both checked so a wrong username is
    /// indistinguishable from a wrong password.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, StoreError> {
        let username_ok: bool = username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes())
            .into();
        let password_ok = password::verify(password, &self.credentials.password_hash)
            .unwrap_or_else(|e| {
                tracing::error!("Admin password hash unusable: {e}");
                false
            });

        if !(username_ok && password_ok) {
            return Ok(None);
        }

        let token = generate_token();
        self.kv
            .set(SESSION_KEY, Value::String(hash_token(&token)))
            .await?;
        Ok(Some(token))
    }

    /// Close the session, but only when `token` is the one that opened it.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), StoreError> {
        if self.is_authenticated(token).await? {
            self.kv.remove(SESSION_KEY).await?;
        }
        Ok(())
    }

    pub async fn is_authenticated(&self, token: Option<&str>) -> Result<bool, StoreError> {
        let Some(token) = token else {
            return Ok(false);
        };
        match self.kv.get(SESSION_KEY).await? {
            Some(Value::String(stored)) => Ok(stored
                .as_bytes()
                .ct_eq(hash_token(token).as_bytes())
                .into()),
            _ => Ok(false),
        }
    }

    /// Cookie that hands `token` to the browser.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Strict)
            .build()
    }
}

/// The session token the request carries, if any.
pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(|c| c.value())
}

/// Drop the session cookie from the browser.
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
