use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{DiscoveryInput, DiscoveryResult, RecommendationResponse},
    services::{keys::extract_fields, parser::format_recommendations, providers::RecommendationProvider},
};

/// Display state for one discovery session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryState {
    /// Set while a request is in flight; submissions are refused meanwhile
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<DiscoveryResult>,
}

/// Clears `loading` if a submission is dropped before it finishes
struct LoadingGuard {
    state: Arc<RwLock<DiscoveryState>>,
    armed: bool,
}

impl LoadingGuard {
    fn new(state: Arc<RwLock<DiscoveryState>>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        tracing::warn!("Submission dropped before completion, clearing loading flag");
        if let Ok(mut state) = self.state.try_write() {
            state.loading = false;
            return;
        }

        // Lock is contended; finish the reset once it frees up
        let state = self.state.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                state.write().await.loading = false;
            });
        }
    }
}

/// Runs submissions against a provider, one at a time
pub struct Discovery<P> {
    provider: P,
    state: Arc<RwLock<DiscoveryState>>,
}

impl<P: RecommendationProvider> Discovery<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Arc::new(RwLock::new(DiscoveryState::default())),
        }
    }

    /// Copy of the current display state
    pub async fn snapshot(&self) -> DiscoveryState {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Validates the input, performs one call, and parses the result
    ///
    /// Returns [`AppError::Busy`] without touching state if another submission
    /// is in flight. Every other path clears the loading flag and records either
    /// `data` or a user-facing `error`.
    pub async fn submit(&self, input: DiscoveryInput) -> AppResult<DiscoveryResult> {
        {
            let mut state = self.state.write().await;
            if state.loading {
                tracing::warn!("Submission ignored while a request is in flight");
                return Err(AppError::Busy);
            }
            state.loading = true;
            state.error = None;
            state.data = None;
        }

        let guard = LoadingGuard::new(self.state.clone());
        let outcome = self.run(input).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match &outcome {
            Ok(result) => state.data = Some(result.clone()),
            Err(e) => state.error = Some(e.user_message()),
        }
        guard.disarm();

        outcome
    }

    async fn run(&self, input: DiscoveryInput) -> AppResult<DiscoveryResult> {
        let request = input.into_request()?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "recommendation_request",
            request_id = %request_id,
            endpoint = request.endpoint(),
            provider = self.provider.name(),
        );

        async move {
            tracing::info!(
                query = %request.query_label(),
                num_recommendations = request.count().get(),
                "Processing recommendation request"
            );

            let raw = self.provider.fetch_recommendations(&request).await?;
            let response = RecommendationResponse::try_from(raw)?;
            let fields = extract_fields(&response);
            let recommendations = format_recommendations(&fields.recommendations);

            tracing::info!(
                top_songs = fields.top_songs.len(),
                recommendations = recommendations.len(),
                "Recommendation request completed"
            );

            Ok::<_, AppError>(DiscoveryResult {
                query: request.query_label(),
                top_songs: fields.top_songs,
                raw_recommendations: fields.recommendations,
                recommendations,
                fetched_at: Utc::now(),
            })
        }
        .instrument(span)
        .await
    }
}
