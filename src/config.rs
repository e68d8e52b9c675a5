use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SERVER_URL: &str = "http://localhost:8081";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 64 * 1024;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown sentiment backend: {0} (expected \"lexicon\" or \"remote\")")]
    UnknownBackend(String),
}

// Which analyzer answers polarity requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Lexicon,
    Remote,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicon" => Ok(Backend::Lexicon),
            "remote" => Ok(Backend::Remote),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub server_url: String,
    pub timeout: Duration,
    pub lexicon_path: Option<PathBuf>,
    pub max_payload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend: Backend::Lexicon,
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            lexicon_path: None,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl Settings {
    // Reads settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let backend = match lookup("SENTIMENT_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.backend,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            backend,
            server_url: lookup("SENTIMENT_SERVER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "SENTIMENT_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            lexicon_path: lookup("LEXICON_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            max_payload_bytes: parse_or(&lookup, "MAX_PAYLOAD_BYTES", defaults.max_payload_bytes)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.backend, Backend::Lexicon);
        assert_eq!(settings.server_url, "http://localhost:8081");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.lexicon_path.is_none());
        assert_eq!(settings.max_payload_bytes, 65536);
    }

    #[test]
    fn reads_overrides() {
        let settings = settings_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("SENTIMENT_BACKEND", "Remote"),
            ("SENTIMENT_SERVER_URL", "http://scorer:7000/"),
            ("SENTIMENT_TIMEOUT_SECS", "3"),
            ("LEXICON_PATH", "words.json"),
        ])
        .unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.backend, Backend::Remote);
        assert_eq!(settings.server_url, "http://scorer:7000");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.lexicon_path, Some(PathBuf::from("words.json")));
    }

    #[test]
    fn rejects_bad_port() {
        let err = settings_from(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = settings_from(&[("SENTIMENT_BACKEND", "oracle")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownBackend("oracle".to_string()));
    }
}
