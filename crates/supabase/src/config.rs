//! Connection settings for the managed backend.

/// Env var holding the project base URL, e.g. `https://abcd.supabase.co`.
pub const ENV_URL: &str = "SUPABASE_URL";

/// Env var holding the public (anon) API key.
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Errors raised while loading configuration. Any of these aborts startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Backend URL and public API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Base URL without a trailing slash.
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Build and validate a config from explicit values.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        let anon_key = anon_key.trim();
        if url.is_empty() {
            return Err(ConfigError::Missing(ENV_URL));
        }
        if anon_key.is_empty() {
            return Err(ConfigError::Missing(ENV_ANON_KEY));
        }

        let parsed = url::Url::parse(url).map_err(|e| ConfigError::Invalid {
            name: ENV_URL,
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: ENV_URL,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Load from a key lookup (the process environment in production).
    ///
    /// | Env Var             | Required |
    /// |---------------------|----------|
    /// | `SUPABASE_URL`      | **yes**  |
    /// | `SUPABASE_ANON_KEY` | **yes**  |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_URL).ok_or(ConfigError::Missing(ENV_URL))?;
        let anon_key = lookup(ENV_ANON_KEY).ok_or(ConfigError::Missing(ENV_ANON_KEY))?;
        Self::new(&url, &anon_key)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
