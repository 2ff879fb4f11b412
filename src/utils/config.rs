use std::env;
use std::time::Duration;

use crate::views::ViewOptions;

const MAX_ANIMATION_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_url: String,
    pub fade_ms: u64,
    pub pulse_ms: u64,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with(None)
    }

    /// Like [`Self::from_env`], with a data URL that takes precedence over
    /// `STORE_DATA_URL`. The override is applied before validation.
    pub fn from_env_with(data_url: Option<String>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            data_url: data_url
                .or_else(|| env::var("STORE_DATA_URL").ok())
                .unwrap_or("data/items.json".to_string()),
            fade_ms: parse_millis("STORE_FADE_MS", 200)?,
            pulse_ms: parse_millis("STORE_PULSE_MS", 400)?,
            log_level: env::var("LOG_LEVEL").unwrap_or("info".to_string()),
            environment: env::var("APP_ENV").unwrap_or("development".to_string()),
        };

        config.validate()?;
        tracing::debug!("Config: loaded for {} environment", config.environment);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.data_url.trim().is_empty() {
            return Err(anyhow::anyhow!("STORE_DATA_URL is empty"));
        }

        if self.fade_ms > MAX_ANIMATION_MS {
            return Err(anyhow::anyhow!(
                "STORE_FADE_MS must be at most {} ms",
                MAX_ANIMATION_MS
            ));
        }

        if self.pulse_ms > MAX_ANIMATION_MS {
            return Err(anyhow::anyhow!(
                "STORE_PULSE_MS must be at most {} ms",
                MAX_ANIMATION_MS
            ));
        }

        Ok(())
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            fade: Duration::from_millis(self.fade_ms),
            pulse_step: Duration::from_millis(self.pulse_ms),
        }
    }
}

fn parse_millis(key: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a number of milliseconds, got '{}'", key, value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            data_url: "data/items.json".to_string(),
            fade_ms: 200,
            pulse_ms: 400,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_validate_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_url_and_long_animations() {
        let mut empty = config();
        empty.data_url = " ".to_string();
        assert!(empty.validate().is_err());

        let mut slow = config();
        slow.fade_ms = 60_000;
        assert!(slow.validate().is_err());
    }

    #[test]
    fn test_data_url_override_applies_before_validation() {
        std::env::set_var("STORE_DATA_URL", "");

        let overridden = Config::from_env_with(Some("https://shop.example.com/items.json".to_string()));
        let from_env = Config::from_env_with(None);

        std::env::remove_var("STORE_DATA_URL");

        assert_eq!(overridden.unwrap().data_url, "https://shop.example.com/items.json");
        assert!(from_env.is_err());
    }

    #[test]
    fn test_view_options_from_millis() {
        let options = config().view_options();
        assert_eq!(options.fade, Duration::from_millis(200));
        assert_eq!(options.pulse_step, Duration::from_millis(400));
    }
}
