//! Settings loaded from environment variables.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Default search query: food-related hashtags, English, originals only.
pub const DEFAULT_QUERY: &str = "(\"#meal\" OR \"#diet\" OR \"#eating\" OR \"#junkfood\" OR \"#fastfood\") lang:en -filter:retweets since:2020-01-01 until:2025-12-31";

/// Service credentials and endpoints, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_base_url: String,
    pub source_token: String,
    pub model_base_url: String,
    pub model_token: String,
}

impl Settings {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            source_base_url: env::var("SOURCE_BASE_URL")
                .context("SOURCE_BASE_URL must be set")?,
            source_token: env::var("SOURCE_TOKEN")
                .context("SOURCE_TOKEN must be set")?,
            model_base_url: env::var("MODEL_BASE_URL")
                .context("MODEL_BASE_URL must be set")?,
            model_token: env::var("MODEL_TOKEN")
                .context("MODEL_TOKEN must be set")?,
        })
    }
}
