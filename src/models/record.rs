use serde::{Deserialize, Serialize};

/// Description used when a recommendation line carries none
pub const NO_DESCRIPTION: &str = "No description provided.";

/// One song recommendation parsed out of the service's free-text block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationRecord {
    pub song: String,
    pub artist: String,
    pub description: String,
}

impl RecommendationRecord {
    pub fn new(
        song: impl Into<String>,
        artist: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            song: song.into(),
            artist: artist.into(),
            description: description.into(),
        }
    }

    /// Creates a record whose description is the placeholder text
    pub fn without_description(song: impl Into<String>, artist: impl Into<String>) -> Self {
        Self::new(song, artist, NO_DESCRIPTION)
    }
}
