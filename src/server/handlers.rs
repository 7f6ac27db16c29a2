//! HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::AppState;
use crate::transcript::ExtractedSubtitles;
use crate::ExtractError;

/// Body of `POST /api/extract`
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,

    #[serde(default)]
    pub lang: Option<String>,
}

/// HTTP error type, rendered as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(StatusCode, String),
    InvalidUrl(String),
    NotFound(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(status, msg) => (status, msg),
            ApiError::InvalidUrl(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidUrl => ApiError::InvalidUrl(err.to_string()),
            ExtractError::NoCaptionsAvailable => ApiError::NotFound(err.to_string()),
            ExtractError::Provider(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.status(), rejection.body_text())
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Extraction endpoint
/// POST /api/extract
pub async fn extract_subtitles(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractedSubtitles>, ApiError> {
    let Json(request) = payload?;

    let span = tracing::info_span!("extract", request_id = %Uuid::new_v4(), url = %request.url);
    let result = state
        .pipeline
        .extract(&request.url, request.lang.as_deref())
        .instrument(span.clone())
        .await;

    match result {
        Ok(subtitles) => Ok(Json(subtitles)),
        Err(err) => {
            span.in_scope(|| match &err {
                ExtractError::Provider(source) => {
                    tracing::error!(error = ?source, "Error processing video: {}", source)
                }
                _ => tracing::info!("{}", err),
            });
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provider::{MockTranscriptProvider, ProviderError, TranscriptTrack};
    use crate::server::create_router;
    use crate::transcript::{Cue, TranscriptPipeline};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn english_track() -> TranscriptTrack {
        TranscriptTrack {
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: false,
            url: "https://example.com/en".to_string(),
        }
    }

    async fn post(provider: MockTranscriptProvider, body: &str) -> (StatusCode, Value) {
        post_with_config(provider, &Config::default(), body).await
    }

    async fn post_with_config(
        provider: MockTranscriptProvider,
        config: &Config,
        body: &str,
    ) -> (StatusCode, Value) {
        let pipeline = TranscriptPipeline::new(Arc::new(provider), config);
        let app = create_router(Arc::new(AppState::new(pipeline)), config).unwrap();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/extract")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_extract_success() {
        let mut provider = MockTranscriptProvider::new();
        provider
            .expect_list_tracks()
            .returning(|_| Ok(vec![english_track()]));
        provider.expect_fetch().returning(|_| {
            Ok(vec![
                Cue::new("Never gonna", 0.0, 1.5),
                Cue::new("give you up", 1.5, 2.0),
            ])
        });

        let (status, body) = post(
            provider,
            r#"{"url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["video_id"], "dQw4w9WgXcQ");
        assert_eq!(body["language"], "English");
        assert_eq!(body["language_code"], "en");
        assert_eq!(body["is_generated"], false);

        let subtitles = body["subtitles"].as_array().unwrap();
        assert_eq!(subtitles.len(), 2);
        assert_eq!(subtitles[0]["text"], "Never gonna");
        assert_eq!(subtitles[0]["start"], 0.0);
        assert_eq!(subtitles[0]["duration"], 1.5);

        let srt = body["srt"].as_str().unwrap();
        assert_eq!(srt.matches(" --> ").count(), subtitles.len());
        assert_eq!(body["txt"], "Never gonna\ngive you up");
    }

    #[tokio::test]
    async fn test_null_lang_uses_configured_default() {
        let mut provider = MockTranscriptProvider::new();
        provider.expect_list_tracks().returning(|_| {
            let mut german = english_track();
            german.language = "German".to_string();
            german.language_code = "de".to_string();
            Ok(vec![english_track(), german])
        });
        provider
            .expect_fetch()
            .withf(|t| t.language_code == "de")
            .returning(|_| Ok(vec![Cue::new("Hallo", 0.0, 1.0)]));

        let mut config = Config::default();
        config.default_language = "de".to_string();

        let (status, body) = post_with_config(
            provider,
            &config,
            r#"{"url": "https://youtu.be/dQw4w9WgXcQ", "lang": null}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language_code"], "de");
        assert_eq!(body["language"], "German");
        assert_eq!(body["txt"], "Hallo");
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let (status, body) = post(MockTranscriptProvider::new(), r#"{"url": "not a url", "lang": "en"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid YouTube URL");
    }

    #[tokio::test]
    async fn test_no_caption_tracks() {
        let mut provider = MockTranscriptProvider::new();
        provider.expect_list_tracks().returning(|_| Ok(Vec::new()));

        let (status, body) = post(provider, r#"{"url": "https://youtu.be/dQw4w9WgXcQ"}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["detail"],
            "No subtitles found for this video. Please ensure the video has CC enabled."
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_internal_error() {
        let mut provider = MockTranscriptProvider::new();
        provider
            .expect_list_tracks()
            .returning(|_| Ok(vec![english_track()]));
        provider
            .expect_fetch()
            .returning(|_| Err(ProviderError::Command("HTTP Error 429: Too Many Requests".into())));

        let (status, body) = post(provider, r#"{"url": "https://youtu.be/dQw4w9WgXcQ", "lang": null}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "yt-dlp failed: HTTP Error 429: Too Many Requests");
    }

    #[tokio::test]
    async fn test_missing_url_field() {
        let (status, body) = post(MockTranscriptProvider::new(), r#"{"lang": "en"}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("url"));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (status, body) = post(MockTranscriptProvider::new(), "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }
}
