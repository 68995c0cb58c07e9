// src/config.rs
// Environment-driven configuration, read once at process start. `.env` is
// honored by the binaries via dotenvy before this module is consulted.

use crate::error::{PipelineError, PipelineResult};
use crate::store::StoreAddress;

const ENV_API_KEY: &str = "NEWS_API_KEY";
const ENV_CITY: &str = "CITY";
const ENV_PAGE_SIZE: &str = "NEWS_PAGE_SIZE";
const ENV_MONGO_URI: &str = "MONGODB_URI";
const ENV_DATABASE: &str = "MOOD_DB";
const ENV_COLLECTION: &str = "MOOD_COLLECTION";

pub const DEFAULT_CITY: &str = "New York";
pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const DEFAULT_MONGO_URI: &str = "mongodb://hadoop-master:27017";
pub const DEFAULT_DATABASE: &str = "sentiment";
pub const DEFAULT_COLLECTION: &str = "city_emotions";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// NewsAPI credential. Secret; keep it out of logs.
    pub news_api_key: String,
    /// Place name used as the query term.
    pub city: String,
    /// Result-count limit for one fetch.
    pub page_size: usize,
    pub mongo_uri: String,
    pub store: StoreAddress,
}

impl AppConfig {
    pub fn from_env() -> PipelineResult<Self> {
        let news_api_key = std::env::var(ENV_API_KEY)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                PipelineError::Configuration(format!("{ENV_API_KEY} is not set"))
            })?;

        let city = env_or(ENV_CITY, DEFAULT_CITY);

        let page_size = match std::env::var(ENV_PAGE_SIZE) {
            Err(_) => DEFAULT_PAGE_SIZE,
            Ok(raw) => {
                let parsed: usize = raw.trim().parse().map_err(|_| {
                    PipelineError::Configuration(format!(
                        "{ENV_PAGE_SIZE} must be a positive integer, got {raw:?}"
                    ))
                })?;
                if parsed == 0 {
                    return Err(PipelineError::Configuration(format!(
                        "{ENV_PAGE_SIZE} must be positive"
                    )));
                }
                parsed
            }
        };

        Ok(Self {
            news_api_key,
            city,
            page_size,
            mongo_uri: env_or(ENV_MONGO_URI, DEFAULT_MONGO_URI),
            store: StoreAddress::new(
                env_or(ENV_DATABASE, DEFAULT_DATABASE),
                env_or(ENV_COLLECTION, DEFAULT_COLLECTION),
            ),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_all() {
        for key in [
            ENV_API_KEY,
            ENV_CITY,
            ENV_PAGE_SIZE,
            ENV_MONGO_URI,
            ENV_DATABASE,
            ENV_COLLECTION,
        ] {
            env::remove_var(key);
        }
    }

    #[serial_test::serial]
    #[test]
    fn missing_api_key_is_a_configuration_error() {
        clear_all();
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[serial_test::serial]
    #[test]
    fn defaults_fill_everything_but_the_key() {
        clear_all();
        env::set_var(ENV_API_KEY, "k-123");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.city, DEFAULT_CITY);
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.mongo_uri, DEFAULT_MONGO_URI);
        assert_eq!(cfg.store.to_string(), "sentiment.city_emotions");
        clear_all();
    }

    #[serial_test::serial]
    #[test]
    fn explicit_values_override_defaults() {
        clear_all();
        env::set_var(ENV_API_KEY, "k-123");
        env::set_var(ENV_CITY, "Brno");
        env::set_var(ENV_PAGE_SIZE, "10");
        env::set_var(ENV_DATABASE, "moods");
        env::set_var(ENV_COLLECTION, "records");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.city, "Brno");
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.store.to_string(), "moods.records");
        clear_all();
    }

    #[serial_test::serial]
    #[test]
    fn zero_or_garbage_page_size_is_rejected() {
        clear_all();
        env::set_var(ENV_API_KEY, "k-123");

        env::set_var(ENV_PAGE_SIZE, "0");
        assert!(matches!(
            AppConfig::from_env().unwrap_err(),
            PipelineError::Configuration(_)
        ));

        env::set_var(ENV_PAGE_SIZE, "three");
        assert!(matches!(
            AppConfig::from_env().unwrap_err(),
            PipelineError::Configuration(_)
        ));
        clear_all();
    }
}
