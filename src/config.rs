use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Utc};

use crate::auth::password;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";
pub const DEFAULT_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub admin_username: String,
    pub admin_password_hash: String,
    /// True when no hash was configured and the built-in password is in use.
    pub default_password: bool,
    pub imgbb_api_key: Option<String>,
    pub upload_url: String,
    pub redirect_delay: Option<Duration>,
    pub copyright_year: i32,
    pub max_upload_size: usize,
    pub log_level: String,
    /// Mark the session cookie `Secure`. Only turn off when serving plain HTTP.
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("LANDER_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid LANDER_HOST: {e}"))?;

        let port: u16 = env_or("LANDER_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid LANDER_PORT: {e}"))?;

        let data_dir = PathBuf::from(env_or("LANDER_DATA_DIR", "data"));

        let admin_username = env_or("LANDER_ADMIN_USERNAME", "admin");

        let (admin_password_hash, default_password) =
            match env_optional("LANDER_ADMIN_PASSWORD_HASH") {
                Some(hash) => {
                    password::validate_hash(&hash)
                        .map_err(|e| format!("Invalid LANDER_ADMIN_PASSWORD_HASH: {e}"))?;
                    (hash, false)
                }
                None => (password::hash(DEFAULT_ADMIN_PASSWORD)?, true),
            };

        let imgbb_api_key = env_optional("IMGBB_API_KEY");
        let upload_url = env_or("LANDER_UPLOAD_URL", DEFAULT_UPLOAD_URL);

        let redirect_delay = env_optional("LANDER_REDIRECT_DELAY_MS")
            .map(|ms| {
                ms.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| format!("Invalid LANDER_REDIRECT_DELAY_MS: {e}"))
            })
            .transpose()?;

        let copyright_year: i32 = match env_optional("LANDER_COPYRIGHT_YEAR") {
            Some(year) => year
                .parse()
                .map_err(|e| format!("Invalid LANDER_COPYRIGHT_YEAR: {e}"))?,
            None => Utc::now().year(),
        };

        let max_upload_size: usize = env_or("LANDER_MAX_UPLOAD_SIZE", "33554432")
            .parse()
            .map_err(|e| format!("Invalid LANDER_MAX_UPLOAD_SIZE: {e}"))?;

        let log_level = env_or("LANDER_LOG_LEVEL", "info");

        let secure_cookies: bool = env_or("LANDER_SECURE_COOKIES", "true")
            .parse()
            .map_err(|e| format!("Invalid LANDER_SECURE_COOKIES: {e}"))?;

        Ok(Config {
            host,
            port,
            data_dir,
            admin_username,
            admin_password_hash,
            default_password,
            imgbb_api_key,
            upload_url,
            redirect_delay,
            copyright_year,
            max_upload_size,
            log_level,
            secure_cookies,
        })
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
