use storefront_supabase::{ConfigError, SupabaseConfig};

/// Server configuration loaded from environment variables.
///
/// Everything except the managed-backend credentials has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Managed-backend project URL and public key.
    pub supabase: SupabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Required | Default                    |
    /// |------------------------|----------|----------------------------|
    /// | `SUPABASE_URL`         | **yes**  | --                         |
    /// | `SUPABASE_ANON_KEY`    | **yes**  | --                         |
    /// | `HOST`                 | no       | `0.0.0.0`                  |
    /// | `PORT`                 | no       | `3000`                     |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supabase = SupabaseConfig::from_lookup(&lookup)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_or("PORT", lookup("PORT"), 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", lookup("REQUEST_TIMEOUT_SECS"), 30u64)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            supabase,
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
