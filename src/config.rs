// src/config.rs

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::scrapers::ScraperConfig;
use crate::services::ntfy::DEFAULT_NTFY_BASE_URL;

pub const DEFAULT_TARGET_URL: &str = "https://cavenacional.com.br/247-degustacoes-";
pub const DEFAULT_NTFY_TOPIC: &str = "wineScrapper-caveNacional-sabado";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a boolean (true/false, 1/0, yes/no, on/off), got '{value}'")]
    InvalidBool { key: &'static str, value: String },

    #[error("{key} must be a positive whole number of seconds, got '{value}'")]
    InvalidSeconds { key: &'static str, value: String },
}

/// Everything a run needs, resolved once at startup and passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub target_url: String,
    /// Empty disables notifications
    pub notification_topic: String,
    pub notify_on_empty: bool,
    pub ntfy_base_url: String,
    pub fetch_timeout: Duration,
    pub notify_timeout: Duration,
    pub user_agent: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        let scraper = ScraperConfig::default();
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            notification_topic: DEFAULT_NTFY_TOPIC.to_string(),
            notify_on_empty: true,
            ntfy_base_url: DEFAULT_NTFY_BASE_URL.to_string(),
            fetch_timeout: scraper.timeout,
            notify_timeout: Duration::from_secs(10),
            user_agent: scraper.user_agent,
        }
    }
}

impl WatchConfig {
    /// Load from process environment (call `dotenvy::dotenv()` first to pick up `.env`).
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Unset and blank fall back to defaults, except the topic where blank means "off"
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let notify_on_empty = match non_blank("NOTIFY_ON_NO_RESULTS") {
            Some(value) => or_default(parse_bool("NOTIFY_ON_NO_RESULTS", &value), defaults.notify_on_empty),
            None => defaults.notify_on_empty,
        };

        let fetch_timeout = match non_blank("FETCH_TIMEOUT_SECS") {
            Some(value) => or_default(parse_secs("FETCH_TIMEOUT_SECS", &value), defaults.fetch_timeout),
            None => defaults.fetch_timeout,
        };

        let notify_timeout = match non_blank("NOTIFY_TIMEOUT_SECS") {
            Some(value) => or_default(parse_secs("NOTIFY_TIMEOUT_SECS", &value), defaults.notify_timeout),
            None => defaults.notify_timeout,
        };

        Self {
            target_url: non_blank("TARGET_URL").unwrap_or(defaults.target_url),
            notification_topic: lookup("NTFY_TOPIC")
                .map(|t| t.trim().to_string())
                .unwrap_or(defaults.notification_topic),
            notify_on_empty,
            ntfy_base_url: non_blank("NTFY_BASE_URL").unwrap_or(defaults.ntfy_base_url),
            fetch_timeout,
            notify_timeout,
            user_agent: non_blank("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            timeout: self.fetch_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

fn or_default<T: std::fmt::Debug>(parsed: Result<T, ConfigError>, default: T) -> T {
    parsed.unwrap_or_else(|e| {
        tracing::warn!("{}; using default {:?}", e, default);
        default
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> WatchConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WatchConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = load(&[]);
        assert_eq!(config, WatchConfig::default());
        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
        assert_eq!(config.notification_topic, DEFAULT_NTFY_TOPIC);
        assert!(config.notify_on_empty);
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.notify_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_bool_flag_values() {
        for value in ["true", "TRUE", "1", "yes", "On"] {
            assert!(load(&[("NOTIFY_ON_NO_RESULTS", value)]).notify_on_empty);
        }
        for value in ["false", "False", "0", "no", "off"] {
            assert!(!load(&[("NOTIFY_ON_NO_RESULTS", value)]).notify_on_empty);
        }
        // Blank behaves like unset
        assert!(load(&[("NOTIFY_ON_NO_RESULTS", "  ")]).notify_on_empty);
    }

    #[test]
    fn test_invalid_bool_falls_back_to_default() {
        let config = load(&[("NOTIFY_ON_NO_RESULTS", "maybe")]);
        assert!(config.notify_on_empty);
        assert_eq!(
            parse_bool("NOTIFY_ON_NO_RESULTS", "maybe"),
            Err(ConfigError::InvalidBool {
                key: "NOTIFY_ON_NO_RESULTS",
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn test_blank_topic_disables_notifications() {
        let config = load(&[("NTFY_TOPIC", "  ")]);
        assert_eq!(config.notification_topic, "");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("TARGET_URL", "http://localhost:8080/list"),
            ("NTFY_TOPIC", "my-topic"),
            ("NTFY_BASE_URL", "http://localhost:9090"),
            ("FETCH_TIMEOUT_SECS", "5"),
            ("NOTIFY_TIMEOUT_SECS", "3"),
            ("SCRAPER_USER_AGENT", "test-agent"),
        ]);

        assert_eq!(config.target_url, "http://localhost:8080/list");
        assert_eq!(config.notification_topic, "my-topic");
        assert_eq!(config.ntfy_base_url, "http://localhost:9090");
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.notify_timeout, Duration::from_secs(3));

        let scraper = config.scraper_config();
        assert_eq!(scraper.timeout, Duration::from_secs(5));
        assert_eq!(scraper.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_timeouts_fall_back_to_defaults() {
        let config = load(&[
            ("FETCH_TIMEOUT_SECS", "0"),
            ("NOTIFY_TIMEOUT_SECS", "ten"),
            ("NTFY_TOPIC", "still-read"),
        ]);

        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.notify_timeout, Duration::from_secs(10));
        assert_eq!(config.notification_topic, "still-read");
    }
}
