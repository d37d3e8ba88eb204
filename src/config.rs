use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub llm_min_interval_ms: u64,
    pub judge0_url: String,
    pub judge0_api_key: String,
    pub judge_max_polls: u32,
    pub judge_poll_interval_ms: u64,
    pub eval_cache_ttl_secs: u64,
    pub eval_cache_sweep_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            openai_api_key: get_env("OPENAI_API_KEY")?,
            openai_base_url: get_env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: get_env_or("OPENAI_MODEL", "gpt-3.5-turbo"),
            llm_min_interval_ms: get_env_parse_or("LLM_MIN_INTERVAL_MS", 1000)?,
            judge0_url: get_env_or("JUDGE0_URL", "https://judge0-ce.p.rapidapi.com"),
            judge0_api_key: get_env_or("JUDGE0_API_KEY", ""),
            judge_max_polls: at_least_one(
                "JUDGE_MAX_POLLS",
                get_env_parse_or("JUDGE_MAX_POLLS", 10)?,
            )?,
            judge_poll_interval_ms: get_env_parse_or("JUDGE_POLL_INTERVAL_MS", 1000)?,
            eval_cache_ttl_secs: get_env_parse_or("EVAL_CACHE_TTL_SECS", 3600)?,
            eval_cache_sweep_secs: get_env_parse_or("EVAL_CACHE_SWEEP_SECS", 600)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn at_least_one(name: &str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(Error::Config(format!("{} must be at least 1", name)));
    }
    Ok(value)
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
