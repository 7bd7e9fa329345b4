//! Server configuration read from the environment.
//!
//! Unparsable numeric values fall back to their defaults rather than failing
//! startup.

use precis_core::defaults;

/// Global request throttle settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub enabled: bool,
    pub requests: u32,
    pub period_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            requests: defaults::RATE_LIMIT_REQUESTS,
            period_secs: defaults::RATE_LIMIT_PERIOD_SECS,
        }
    }
}

/// HTTP front configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `TEST_MODE=true`: the refine endpoint answers without calling upstream.
    pub test_mode: bool,
    /// Whether `GEMINI_API_KEY` is set. Only reported in the startup log.
    pub api_key_present: bool,
    /// Per-client call limit on the refine endpoint.
    pub usage_limit: u64,
    /// CORS whitelist; `None` allows any origin.
    pub allowed_origins: Option<String>,
    pub body_limit_bytes: usize,
    pub throttle: ThrottleConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            test_mode: false,
            api_key_present: false,
            usage_limit: defaults::USAGE_LIMIT,
            allowed_origins: None,
            body_limit_bytes: defaults::BODY_LIMIT_BYTES,
            throttle: ThrottleConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
            value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
        }
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| defaults::HOST.to_string()),
            port: parsed(lookup("PORT"), defaults::PORT),
            // Only the exact string "true" enables test mode.
            test_mode: lookup("TEST_MODE").as_deref() == Some("true"),
            api_key_present: lookup("GEMINI_API_KEY").is_some_and(|k| !k.is_empty()),
            usage_limit: parsed(lookup("USAGE_LIMIT"), defaults::USAGE_LIMIT),
            allowed_origins: lookup("ALLOWED_ORIGINS").filter(|v| !v.trim().is_empty()),
            body_limit_bytes: parsed(lookup("BODY_LIMIT_BYTES"), defaults::BODY_LIMIT_BYTES),
            throttle: ThrottleConfig {
                enabled: flag("RATE_LIMIT_ENABLED"),
                requests: parsed(
                    lookup("RATE_LIMIT_REQUESTS"),
                    defaults::RATE_LIMIT_REQUESTS,
                ),
                period_secs: parsed(
                    lookup("RATE_LIMIT_PERIOD_SECS"),
                    defaults::RATE_LIMIT_PERIOD_SECS,
                ),
            },
        }
    }

    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
