use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

pub mod record;
pub mod request;

pub use record::RecommendationRecord;
pub use request::{DiscoveryInput, RecommendationCount, RecommendationRequest, MAX_TRACKS};

/// Shown in place of the record list when nothing could be parsed
pub const NO_STRUCTURED_RECOMMENDATIONS: &str = "No structured recommendations available.";

// ============================================================================
// Recommendation Service Types
// ============================================================================

/// Raw success body from the recommendation service
///
/// The service keys its two payload fields by labels that embed the user's
/// query, so the body is kept as an ordered JSON object and the fields are
/// located by prefix (see `services::keys`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecommendationResponse(Map<String, Value>);

impl RecommendationResponse {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for RecommendationResponse {
    type Error = AppError;

    fn try_from(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(AppError::Schema(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parsed outcome of one successful submission, held as display state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Genre or joined track list the user asked about
    pub query: String,
    /// Top songs list, passed through untouched
    pub top_songs: Vec<String>,
    /// Free-text recommendation block as returned by the service
    pub raw_recommendations: String,
    pub recommendations: Vec<RecommendationRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl DiscoveryResult {
    pub fn top_songs_heading(&self) -> String {
        format!("Top 10 Songs Based on {}", self.query)
    }

    pub fn recommendations_heading(&self) -> String {
        format!("Song Recommendations Based on {}", self.query)
    }

    pub fn has_structured_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }
}
