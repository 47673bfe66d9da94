use serde_json::{Map, Value};

use crate::models::RecommendationResponse;

/// Prefix of the key holding the top songs list
pub const TOP_SONGS_PREFIX: &str = "Top 10 Songs Based on";

/// Prefix of the key holding the free-text recommendation block
pub const RECOMMENDATIONS_PREFIX: &str = "Song Recommendations Based on";

/// Payload fields located in a raw service response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub top_songs: Vec<String>,
    pub recommendations: String,
}

/// Returns the first key, in document order, that starts with `prefix`
///
/// Service keys embed the user's query, so only the prefix is stable. When
/// several keys share the prefix the earliest one wins.
pub fn find_first_key_with_prefix<'a>(fields: &'a Map<String, Value>, prefix: &str) -> Option<&'a str> {
    fields
        .keys()
        .find(|key| key.starts_with(prefix))
        .map(String::as_str)
}

/// Pulls the top songs list and recommendation text out of a response
///
/// Missing keys yield an empty list / empty string rather than an error.
pub fn extract_fields(response: &RecommendationResponse) -> ExtractedFields {
    let fields = response.fields();

    let top_songs_key = find_first_key_with_prefix(fields, TOP_SONGS_PREFIX);
    let recommendations_key = find_first_key_with_prefix(fields, RECOMMENDATIONS_PREFIX);

    if top_songs_key.is_none() && recommendations_key.is_none() {
        tracing::warn!(
            keys = ?fields.keys().collect::<Vec<_>>(),
            "Response has neither top songs nor recommendations"
        );
    }

    let top_songs = top_songs_key
        .and_then(|key| fields.get(key))
        .map(song_labels)
        .unwrap_or_default();

    let recommendations = recommendations_key
        .and_then(|key| fields.get(key))
        .map(recommendation_text)
        .unwrap_or_default();

    ExtractedFields {
        top_songs,
        recommendations,
    }
}

fn song_labels(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(label) => label.clone(),
                other => other.to_string(),
            })
            .collect(),
        other => {
            tracing::warn!(value = %other, "Top songs field is not a list");
            Vec::new()
        }
    }
}

fn recommendation_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => {
            tracing::warn!(value = %other, "Recommendations field is not text");
            String::new()
        }
    }
}
