/// HTTP recommendation provider
///
/// Posts JSON to `{base_url}/recommend` or `{base_url}/recommend_by_tracks`
/// with an explicit client timeout. No retries.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::RecommendationRequest,
    services::providers::RecommendationProvider,
};

#[derive(Clone)]
pub struct HttpRecommendationProvider {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRecommendationProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url_for(&self, request: &RecommendationRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint())
    }

    /// Logs the underlying error and converts it to the request's failure kind
    fn transport_failure(&self, request: &RecommendationRequest, err: reqwest::Error) -> AppError {
        let endpoint = request.endpoint();

        if err.is_timeout() {
            tracing::error!(error = %err, endpoint, "Recommendation request timed out");
            return AppError::Timeout { endpoint };
        }

        tracing::error!(error = %err, endpoint, "Error fetching recommendations");
        AppError::Transport {
            endpoint,
            message: request.failure_message(),
        }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpRecommendationProvider {
    async fn fetch_recommendations(&self, request: &RecommendationRequest) -> AppResult<Value> {
        let endpoint = request.endpoint();
        let url = self.url_for(request);

        let response = self
            .http_client
            .post(&url)
            .json(&request.body())
            .send()
            .await
            .map_err(|e| self.transport_failure(request, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                endpoint,
                "Recommendation service returned an error status"
            );
            return Err(AppError::Transport {
                endpoint,
                message: request.failure_message(),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| self.transport_failure(request, e))?;
        tracing::debug!(response = %response_text, "Raw recommendation response");

        let body: Value = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize recommendation response"
            );
            AppError::Schema(format!("response body is not valid JSON: {}", e))
        })?;

        tracing::info!(
            endpoint,
            status = %status,
            num_recommendations = request.count().get(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendationCount;

    fn create_test_provider() -> HttpRecommendationProvider {
        HttpRecommendationProvider::new("http://test.local/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_for_genre_request() {
        let provider = create_test_provider();
        let request = RecommendationRequest::by_genre("rock", RecommendationCount::default()).unwrap();
        assert_eq!(provider.url_for(&request), "http://test.local/recommend");
    }

    #[test]
    fn test_url_for_tracks_request() {
        let provider = create_test_provider();
        let request =
            RecommendationRequest::by_tracks(["Hurt"], RecommendationCount::default()).unwrap();
        assert_eq!(
            provider.url_for(&request),
            "http://test.local/recommend_by_tracks"
        );
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = Config::from_vars(vec![(
            "BASE_URL".to_string(),
            "https://discov.example.com".to_string(),
        )])
        .unwrap();
        let provider = HttpRecommendationProvider::from_config(&config).unwrap();
        assert_eq!(provider.base_url, "https://discov.example.com");
    }
}
