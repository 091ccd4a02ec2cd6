use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub search: SearchSettings,
}

/// Tunables handed to the search engine. Passed by value so the engine never
/// reads global state.
#[derive(Debug, Clone, Validate)]
pub struct SearchSettings {
    #[validate(range(min = 1, max = 100))]
    pub page_size: i64,
    #[validate(range(min = 1, max = 50))]
    pub facet_limit: i64,
    #[validate(range(min = 100))]
    pub timeout_ms: u64,
}

impl SearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            facet_limit: 4,
            timeout_ms: 5_000,
        }
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = SearchSettings::default();
        let search = SearchSettings {
            page_size: get_env_parse_or("SEARCH_PAGE_SIZE", defaults.page_size)?,
            facet_limit: get_env_parse_or("SEARCH_FACET_LIMIT", defaults.facet_limit)?,
            timeout_ms: get_env_parse_or("SEARCH_TIMEOUT_MS", defaults.timeout_ms)?,
        };
        search.validate()?;

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            search,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
