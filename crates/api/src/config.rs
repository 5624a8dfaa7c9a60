use std::str::FromStr;

use filmcat_core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. `DATABASE_URL`
/// is read separately by the binary since tests supply their own pool.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Page size for film and person listings when none is given (default: `50`).
    pub default_page_size: i64,
    /// Largest accepted page size for film and person listings (default: `100`).
    pub max_page_size: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 30,
            db_max_connections: 20,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `DB_MAX_CONNECTIONS`   | `20`                    |
    /// | `DEFAULT_PAGE_SIZE`    | `50`                    |
    /// | `MAX_PAGE_SIZE`        | `100`                   |
    ///
    /// Values that fail to parse fall back to the default with a warning, as
    /// do page sizes outside `1 <= DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let (default_page_size, max_page_size) = checked_page_sizes(
            env_or("DEFAULT_PAGE_SIZE", defaults.default_page_size),
            env_or("MAX_PAGE_SIZE", defaults.max_page_size),
        );

        Self {
            host,
            port: env_or("PORT", defaults.port),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            default_page_size,
            max_page_size,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    parse_or(name, std::env::var(name).ok().as_deref(), default)
}

/// Parse `raw` or fall back to `default`, warning when a value was present
/// but unusable.
fn parse_or<T: FromStr>(name: &str, raw: Option<&str>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value, "Invalid configuration value, using default");
            default
        }),
    }
}

/// Keep `1 <= default <= max` so requests without `page_size` stay valid.
fn checked_page_sizes(default_page_size: i64, max_page_size: i64) -> (i64, i64) {
    let max_page_size = if max_page_size < 1 {
        tracing::warn!(value = max_page_size, "MAX_PAGE_SIZE must be at least 1, using default");
        MAX_PAGE_SIZE
    } else {
        max_page_size
    };

    let default_page_size = if default_page_size < 1 || default_page_size > max_page_size {
        let fallback = DEFAULT_PAGE_SIZE.min(max_page_size);
        tracing::warn!(
            value = default_page_size,
            max_page_size,
            fallback,
            "DEFAULT_PAGE_SIZE out of range, using fallback"
        );
        fallback
    } else {
        default_page_size
    };

    (default_page_size, max_page_size)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_value_when_valid() {
        assert_eq!(parse_or("PORT", Some(" 9001 "), 8000u16), 9001);
    }

    #[test]
    fn parse_or_falls_back_when_missing_or_invalid() {
        assert_eq!(parse_or("PORT", None, 8000u16), 8000);
        assert_eq!(parse_or("PORT", Some("eighty"), 8000u16), 8000);
        assert_eq!(parse_or("PORT", Some("70000"), 8000u16), 8000);
    }

    #[test]
    fn page_sizes_within_bounds_are_kept() {
        assert_eq!(checked_page_sizes(25, 60), (25, 60));
        assert_eq!(checked_page_sizes(60, 60), (60, 60));
    }

    #[test]
    fn page_sizes_out_of_range_fall_back() {
        assert_eq!(checked_page_sizes(0, 100), (DEFAULT_PAGE_SIZE, 100));
        assert_eq!(checked_page_sizes(500, 100), (DEFAULT_PAGE_SIZE, 100));
        assert_eq!(checked_page_sizes(40, 20), (20, 20));
        assert_eq!(checked_page_sizes(10, 0), (10, MAX_PAGE_SIZE));
    }

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
