use serde::Deserialize;

use crate::models::RecommendationCount;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Recommendation service base URL
    pub base_url: String,

    /// Client timeout for a single recommendation call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Count used when the caller does not pick one
    #[serde(default = "default_num_recommendations")]
    pub default_num_recommendations: i64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_num_recommendations() -> i64 {
    3
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map(Config::normalized)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map(Config::normalized)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn default_count(&self) -> RecommendationCount {
        RecommendationCount::new(self.default_num_recommendations)
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}
