use rouge_core::media::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Public site origin used to build invitation links.
    pub site_url: String,
    /// Root directory of the local media store.
    pub storage_dir: String,
    pub max_upload_bytes: usize,
    pub image_check: ImageCheckConfig,
    pub invite: InviteConfig,
    pub jwt: JwtConfig,
}

/// Remote image URL validation settings.
#[derive(Debug, Clone)]
pub struct ImageCheckConfig {
    /// Issue a HEAD request to the image host. The static URL policy
    /// applies regardless.
    pub enabled: bool,
    /// Hostnames (exact or `*.suffix`) trusted without address checks.
    pub allowed_hosts: Vec<String>,
    pub timeout_secs: u64,
}

/// Invitation saga settings.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    pub expiry_hours: i64,
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
}

impl Default for ImageCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_hosts: Vec::new(),
            timeout_secs: 5,
        }
    }
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            expiry_hours: 72,
            poll_attempts: 5,
            poll_interval_ms: 200,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `3000`                   |
    /// | `CORS_ORIGINS`            | `http://localhost:3001`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                     |
    /// | `SITE_URL`                | `http://localhost:3001`  |
    /// | `STORAGE_DIR`             | `./storage`              |
    /// | `MAX_UPLOAD_BYTES`        | `10485760`               |
    /// | `IMAGE_URL_CHECK`         | `true`                   |
    /// | `IMAGE_URL_ALLOWED_HOSTS` | (empty)                  |
    /// | `IMAGE_URL_TIMEOUT_SECS`  | `5`                      |
    /// | `INVITE_EXPIRY_HOURS`     | `72`                     |
    /// | `INVITE_POLL_ATTEMPTS`    | `5`                      |
    /// | `INVITE_POLL_INTERVAL_MS` | `200`                    |
    pub fn from_env() -> Self {
        let image_defaults = ImageCheckConfig::default();
        let invite_defaults = InviteConfig::default();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("PORT", 3000),
            cors_origins: parse_list(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3001".into()),
            ),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_parse("SHUTDOWN_TIMEOUT_SECS", 30),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "http://localhost:3001".into())
                .trim_end_matches('/')
                .to_string(),
            storage_dir: std::env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".into()),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            image_check: ImageCheckConfig {
                enabled: std::env::var("IMAGE_URL_CHECK")
                    .map(|v| parse_bool(&v).expect("IMAGE_URL_CHECK must be true or false"))
                    .unwrap_or(image_defaults.enabled),
                allowed_hosts: std::env::var("IMAGE_URL_ALLOWED_HOSTS")
                    .map(|v| parse_list(&v))
                    .unwrap_or_default(),
                timeout_secs: env_parse("IMAGE_URL_TIMEOUT_SECS", image_defaults.timeout_secs),
            },
            invite: InviteConfig {
                expiry_hours: env_parse("INVITE_EXPIRY_HOURS", invite_defaults.expiry_hours),
                poll_attempts: env_parse("INVITE_POLL_ATTEMPTS", invite_defaults.poll_attempts),
                poll_interval_ms: env_parse(
                    "INVITE_POLL_INTERVAL_MS",
                    invite_defaults.poll_interval_ms,
                ),
            },
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} is invalid ('{raw}'): {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated list, trimming blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
