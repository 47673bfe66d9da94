/// Recommendation service abstraction
///
/// The recommendation service is an external collaborator; the rest of the
/// crate only depends on this trait so it can be swapped for a mock in tests.
use serde_json::Value;

use crate::{error::AppResult, models::RecommendationRequest};

pub mod http;

pub use http::HttpRecommendationProvider;

/// Trait for recommendation data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Performs exactly one call for the request and returns the raw JSON body
    ///
    /// Failures are reported with the request's static failure message, or as
    /// a timeout; transport details are only logged.
    async fn fetch_recommendations(&self, request: &RecommendationRequest) -> AppResult<Value>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
