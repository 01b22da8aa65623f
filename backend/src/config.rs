//! Runtime configuration read from `ARTICLES_*` environment variables.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

pub const BIND_ADDR_VAR: &str = "ARTICLES_BIND_ADDR";
pub const DATABASE_URL_VAR: &str = "ARTICLES_DATABASE_URL";
pub const APP_URL_VAR: &str = "ARTICLES_APP_URL";
pub const CORS_ORIGIN_VAR: &str = "ARTICLES_CORS_ORIGIN";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:articles.db";
const DEFAULT_APP_URL: &str = "http://localhost:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Base for every `links.self`, without a trailing slash
    pub app_url: String,
    pub cors_origin: HeaderValue,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or blank
    /// variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = read(BIND_ADDR_VAR, DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: '{}'", BIND_ADDR_VAR, bind_addr))?;

        let cors_origin = read(CORS_ORIGIN_VAR, DEFAULT_CORS_ORIGIN);
        let cors_origin = HeaderValue::from_str(&cors_origin)
            .with_context(|| format!("{} is not a valid origin: '{}'", CORS_ORIGIN_VAR, cors_origin))?;

        let app_url = read(APP_URL_VAR, DEFAULT_APP_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            bind_addr,
            database_url: read(DATABASE_URL_VAR, DEFAULT_DATABASE_URL),
            app_url,
            cors_origin,
        })
    }
}
