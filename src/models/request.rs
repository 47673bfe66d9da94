use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Most track/artist strings a track query may carry
pub const MAX_TRACKS: usize = 10;

pub const MIN_RECOMMENDATIONS: u8 = 1;
pub const MAX_RECOMMENDATIONS: u8 = 30;

pub const GENRE_ENDPOINT: &str = "/recommend";
pub const TRACKS_ENDPOINT: &str = "/recommend_by_tracks";

/// Number of recommendations to ask for, always within [1, 30]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecommendationCount(u8);

impl RecommendationCount {
    /// Clamps any integer into the accepted range
    pub fn new(requested: i64) -> Self {
        let clamped = requested.clamp(MIN_RECOMMENDATIONS as i64, MAX_RECOMMENDATIONS as i64);
        Self(clamped as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for RecommendationCount {
    fn default() -> Self {
        Self(3)
    }
}

/// A validated request for recommendations
///
/// Genre and track queries are mutually exclusive; build one with
/// [`RecommendationRequest::by_genre`] or [`RecommendationRequest::by_tracks`]
/// so the genre is non-blank and the track list holds 1..=10 trimmed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationRequest {
    ByGenre {
        genre: String,
        count: RecommendationCount,
    },
    ByTracks {
        tracks: Vec<String>,
        count: RecommendationCount,
    },
}

/// JSON body posted to the recommendation service
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestBody<'a> {
    Genre {
        genre: &'a str,
        num_recommendations: u8,
    },
    Tracks {
        tracks: &'a [String],
        num_recommendations: u8,
    },
}

impl RecommendationRequest {
    pub fn by_genre(genre: &str, count: RecommendationCount) -> AppResult<Self> {
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(AppError::Validation("Please enter a genre.".to_string()));
        }

        Ok(Self::ByGenre {
            genre: genre.to_string(),
            count,
        })
    }

    /// Blank entries are dropped and the rest trimmed before validation
    pub fn by_tracks<I, S>(tracks: I, count: RecommendationCount) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tracks: Vec<String> = tracks
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if tracks.is_empty() {
            return Err(AppError::Validation(
                "Please enter at least one track.".to_string(),
            ));
        }

        if tracks.len() > MAX_TRACKS {
            return Err(AppError::Validation(format!(
                "You can enter up to {} tracks.",
                MAX_TRACKS
            )));
        }

        Ok(Self::ByTracks { tracks, count })
    }

    /// Path appended to the service base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::ByGenre { .. } => GENRE_ENDPOINT,
            Self::ByTracks { .. } => TRACKS_ENDPOINT,
        }
    }

    /// Static message reported when the call fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::ByGenre { .. } => "Failed to fetch data",
            Self::ByTracks { .. } => "Failed to fetch recommendations",
        }
    }

    pub fn count(&self) -> RecommendationCount {
        match self {
            Self::ByGenre { count, .. } | Self::ByTracks { count, .. } => *count,
        }
    }

    /// Human-readable query used in headings and logs
    pub fn query_label(&self) -> String {
        match self {
            Self::ByGenre { genre, .. } => genre.clone(),
            Self::ByTracks { tracks, .. } => tracks.join(", "),
        }
    }

    pub fn body(&self) -> RequestBody<'_> {
        match self {
            Self::ByGenre { genre, count } => RequestBody::Genre {
                genre,
                num_recommendations: count.get(),
            },
            Self::ByTracks { tracks, count } => RequestBody::Tracks {
                tracks,
                num_recommendations: count.get(),
            },
        }
    }
}

/// Unvalidated form input for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryInput {
    Genre {
        genre: String,
        count: i64,
    },
    Tracks {
        tracks: Vec<String>,
        count: i64,
    },
}

impl DiscoveryInput {
    pub fn genre(genre: impl Into<String>, count: i64) -> Self {
        Self::Genre {
            genre: genre.into(),
            count,
        }
    }

    pub fn tracks<I, S>(tracks: I, count: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tracks {
            tracks: tracks.into_iter().map(Into::into).collect(),
            count,
        }
    }

    pub fn into_request(self) -> AppResult<RecommendationRequest> {
        match self {
            Self::Genre { genre, count } => {
                RecommendationRequest::by_genre(&genre, RecommendationCount::new(count))
            }
            Self::Tracks { tracks, count } => {
                RecommendationRequest::by_tracks(tracks, RecommendationCount::new(count))
            }
        }
    }
}
