//! Process configuration read from the environment

use crate::agent::DEFAULT_MAX_RESULTS;
use crate::llm::GROQ_BASE_URL;
use thiserror::Error;

const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_GUARD_MODEL: &str = "meta-llama/llama-guard-4-12b";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Everything needed to wire the collaborators at start-up
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub tavily_api_key: String,
    /// Absent key is not fatal: weather questions get the weather apology
    pub openweathermap_api_key: Option<String>,
    pub generation_model: String,
    pub router_model: String,
    pub guard_model: String,
    pub safety_check: bool,
    pub search_max_results: usize,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            groq_api_key: required("GROQ_API_KEY")?,
            groq_base_url: var("GROQ_BASE_URL").unwrap_or_else(|| GROQ_BASE_URL.to_string()),
            tavily_api_key: required("TAVILY_API_KEY")?,
            openweathermap_api_key: var("OPENWEATHERMAP_API_KEY"),
            generation_model: var("GENERATION_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            router_model: var("ROUTER_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            guard_model: var("GUARD_MODEL").unwrap_or_else(|| DEFAULT_GUARD_MODEL.to_string()),
            safety_check: match var("SAFETY_CHECK") {
                Some(value) => parse_flag("SAFETY_CHECK", &value)?,
                None => true,
            },
            search_max_results: parse_or("SEARCH_MAX_RESULTS", var("SEARCH_MAX_RESULTS"), DEFAULT_MAX_RESULTS)?,
            port: parse_or("GRAM_SAHAYAK_PORT", var("GRAM_SAHAYAK_PORT"), DEFAULT_PORT)?,
        })
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
