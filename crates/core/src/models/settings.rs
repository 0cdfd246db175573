use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Base URL used in development: the backend runs on its own port.
pub const DEV_API_BASE_URL: &str = "http://localhost:8080/api";

/// Base path used in production, behind a reverse proxy on the same origin.
pub const PROD_API_BASE_URL: &str = "/api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "FINANCE_API_URL";
pub const ENV_PROFILE: &str = "FINANCE_ENV";
pub const ENV_ORIGIN: &str = "FINANCE_API_ORIGIN";
pub const ENV_TIMEOUT: &str = "FINANCE_API_TIMEOUT_SECS";

/// Where the REST backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root prepended to every resource route. Absolute URL or a path
    /// starting with `/`.
    pub api_base_url: String,

    /// Scheme and host a relative `api_base_url` is resolved against.
    pub origin: Option<String>,

    /// Per-request timeout (native builds only).
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEV_API_BASE_URL.to_string(),
            origin: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiSettings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Relative `/api` base behind a reverse proxy.
    pub fn production() -> Self {
        Self::new(PROD_API_BASE_URL)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build settings from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. An explicit API URL wins over
    /// the profile default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup(ENV_PROFILE)
            .map(|p| p.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let mut settings = match lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            Some(url) => Self::new(url.trim()),
            None if production => Self::production(),
            None => Self::default(),
        };

        if let Some(origin) = lookup(ENV_ORIGIN).filter(|o| !o.trim().is_empty()) {
            settings = settings.with_origin(origin.trim());
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds, got '{raw}'"))
            })?;
            settings = settings.with_timeout_secs(secs);
        }

        Ok(settings)
    }

    /// Absolute base URL, without a trailing slash.
    pub fn resolved_base_url(&self) -> Result<String, CoreError> {
        let base = self.api_base_url.trim().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            return Ok(base.to_string());
        }
        if !base.starts_with('/') {
            return Err(CoreError::Config(format!(
                "API base URL must be absolute or start with '/', got '{}'",
                self.api_base_url
            )));
        }
        match &self.origin {
            Some(origin) => Ok(format!("{}{}", origin.trim_end_matches('/'), base)),
            None => Err(CoreError::Config(format!(
                "relative API base URL '{base}' needs an origin"
            ))),
        }
    }
}
