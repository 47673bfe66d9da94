use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use track_discov::{
    models::{DiscoveryInput, RecommendationCount, RecommendationRequest},
    services::providers::RecommendationProvider,
    AppError, Discovery, ErrorBody, HttpRecommendationProvider,
};

/// Serves the router on an ephemeral local port and returns its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn create_provider(base_url: &str) -> HttpRecommendationProvider {
    HttpRecommendationProvider::new(base_url, Duration::from_secs(5)).unwrap()
}

async fn recommend_by_genre(Json(body): Json<Value>) -> Json<Value> {
    let genre = body["genre"].as_str().unwrap_or_default().to_string();
    Json(json!({
        format!("Top 10 Songs Based on {}", genre): ["Paranoid Android - Radiohead"],
        format!("Song Recommendations Based on {}", genre):
            "1. \"Reckoner\" by Radiohead: Shimmering.\nThese picks should keep you busy!",
        "echo": body,
    }))
}

async fn recommend_by_tracks(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "Top 10 Songs Based on your tracks": [],
        "Song Recommendations Based on your tracks":
            "1. \"Everlong\" - Foo Fighters\n- Big chorus.",
        "echo": body,
    }))
}

fn stub_router() -> Router {
    Router::new()
        .route("/recommend", post(recommend_by_genre))
        .route("/recommend_by_tracks", post(recommend_by_tracks))
}

#[tokio::test]
async fn test_genre_request_returns_raw_body() {
    let base_url = spawn_stub(stub_router()).await;
    let provider = create_provider(&base_url);

    let request = RecommendationRequest::by_genre("art rock", RecommendationCount::new(5)).unwrap();
    let body = provider.fetch_recommendations(&request).await.unwrap();

    assert_eq!(
        body["echo"],
        json!({ "genre": "art rock", "num_recommendations": 5 })
    );
    assert_eq!(
        body["Top 10 Songs Based on art rock"],
        json!(["Paranoid Android - Radiohead"])
    );
}

#[tokio::test]
async fn test_tracks_request_posts_track_list() {
    let base_url = spawn_stub(stub_router()).await;
    let provider = create_provider(&base_url);

    let request = RecommendationRequest::by_tracks(
        ["My Hero - Foo Fighters", "Lithium - Nirvana"],
        RecommendationCount::new(2),
    )
    .unwrap();
    let body = provider.fetch_recommendations(&request).await.unwrap();

    assert_eq!(
        body["echo"],
        json!({
            "tracks": ["My Hero - Foo Fighters", "Lithium - Nirvana"],
            "num_recommendations": 2
        })
    );
}

#[tokio::test]
async fn test_error_status_maps_to_static_message() {
    let router = Router::new()
        .route(
            "/recommend",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "upstream exploded" })),
                )
            }),
        )
        .route(
            "/recommend_by_tracks",
            post(|| async { StatusCode::BAD_GATEWAY }),
        );
    let base_url = spawn_stub(router).await;
    let provider = create_provider(&base_url);

    let genre = RecommendationRequest::by_genre("rock", RecommendationCount::default()).unwrap();
    let err = provider.fetch_recommendations(&genre).await.unwrap_err();
    assert_eq!(
        ErrorBody::from(&err),
        ErrorBody {
            error: "Failed to fetch data".to_string()
        }
    );

    let tracks =
        RecommendationRequest::by_tracks(["Hurt"], RecommendationCount::default()).unwrap();
    let err = provider.fetch_recommendations(&tracks).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to fetch recommendations");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = create_provider(&format!("http://{}", addr));
    let request = RecommendationRequest::by_genre("rock", RecommendationCount::default()).unwrap();
    let err = provider.fetch_recommendations(&request).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Transport {
            endpoint: "/recommend",
            message: "Failed to fetch data"
        }
    ));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let router = Router::new().route(
        "/recommend",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let base_url = spawn_stub(router).await;
    let provider = HttpRecommendationProvider::new(&base_url, Duration::from_millis(200)).unwrap();

    let request = RecommendationRequest::by_genre("rock", RecommendationCount::default()).unwrap();
    let err = provider.fetch_recommendations(&request).await.unwrap_err();

    assert!(matches!(err, AppError::Timeout { endpoint: "/recommend" }));
    assert_eq!(err.user_message(), "Request timed out");
}

#[tokio::test]
async fn test_non_json_body_is_schema_error() {
    let router = Router::new().route("/recommend", post(|| async { "not json at all" }));
    let base_url = spawn_stub(router).await;
    let provider = create_provider(&base_url);

    let request = RecommendationRequest::by_genre("rock", RecommendationCount::default()).unwrap();
    let err = provider.fetch_recommendations(&request).await.unwrap_err();

    assert!(matches!(err, AppError::Schema(_)));
}

#[tokio::test]
async fn test_discovery_end_to_end() {
    let base_url = spawn_stub(stub_router()).await;
    let discovery = Discovery::new(create_provider(&base_url));

    let result = discovery
        .submit(DiscoveryInput::genre("art rock", 3))
        .await
        .unwrap();
    assert_eq!(result.top_songs, vec!["Paranoid Android - Radiohead"]);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].song, "Reckoner");
    assert_eq!(result.recommendations[0].description, "Shimmering.");

    let result = discovery
        .submit(DiscoveryInput::tracks(["Everlong", "  "], 3))
        .await
        .unwrap();
    assert!(result.top_songs.is_empty());
    assert_eq!(result.recommendations[0].artist, "Foo Fighters");
    assert_eq!(result.recommendations[0].description, "Big chorus.");
    assert!(!discovery.is_loading().await);
}
