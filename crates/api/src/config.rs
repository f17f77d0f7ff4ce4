use std::str::FromStr;

use climatiza_core::validation::Locale;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{key} must be {expected} (got '{value}')")]
pub struct ConfigError {
    pub key: &'static str,
    pub expected: &'static str,
    pub value: String,
}

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
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size (default: `65536`).
    pub body_limit_bytes: usize,
    /// Message language when a request does not pick one (default: `pt-BR`).
    pub default_locale: Locale,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 30,
            body_limit_bytes: 64 * 1024,
            default_locale: Locale::PtBr,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `BODY_LIMIT_BYTES`     | `65536`                 |
    /// | `DEFAULT_LOCALE`       | `pt-BR`                 |
    /// | `LOG_FORMAT`           | `text`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "a valid u16")?.unwrap_or(defaults.port);

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "a valid u64")?
            .unwrap_or(defaults.request_timeout_secs);
        let body_limit_bytes = parse_var(&lookup, "BODY_LIMIT_BYTES", "a valid byte count")?
            .unwrap_or(defaults.body_limit_bytes);

        let default_locale = match lookup("DEFAULT_LOCALE") {
            Some(tag) => Locale::from_tag(&tag).ok_or(ConfigError {
                key: "DEFAULT_LOCALE",
                expected: "one of 'pt-BR', 'en'",
                value: tag,
            })?,
            None => defaults.default_locale,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => defaults.log_format,
            Some(ref f) if f == "text" => LogFormat::Text,
            Some(ref f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    key: "LOG_FORMAT",
                    expected: "one of 'text', 'json'",
                    value: other,
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            default_locale,
            log_format,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError {
                key,
                expected,
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use assert_matches::assert_matches;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, ["http://localhost:3000"]);
        assert_eq!(config.default_locale, Locale::PtBr);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://climatiza.com.br, https://www.climatiza.com.br,"),
            ("DEFAULT_LOCALE", "en"),
            ("LOG_FORMAT", "JSON"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            ["https://climatiza.com.br", "https://www.climatiza.com.br"]
        );
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.body_limit_bytes, 1024);
    }

    #[test]
    fn invalid_values_fail_fast() {
        assert_matches!(config_from(&[("PORT", "http")]), Err(ConfigError { key: "PORT", .. }));
        assert_matches!(
            config_from(&[("DEFAULT_LOCALE", "fr")]),
            Err(ConfigError { key: "DEFAULT_LOCALE", .. })
        );
        assert_matches!(
            config_from(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError { key: "LOG_FORMAT", .. })
        );
    }
}
