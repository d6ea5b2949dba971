//! HTTP view: `GET`/`POST /api/stt/:provider`.

use crate::host::Providers;
use crate::metadata::metadata_from_headers;
use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use futures::{StreamExt, TryStreamExt};
use hubkit_core::{AudioCodec, AudioFormat, MetadataError, SttError};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
struct SttState {
    providers: Providers,
    api_token: Option<Arc<str>>,
}

/// Capability sets of one provider as returned to clients.
#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub languages: Vec<String>,
    pub formats: Vec<AudioFormat>,
    pub codecs: Vec<AudioCodec>,
    pub samplerate: Vec<u32>,
    pub bitrate: Vec<u32>,
}

#[derive(Debug)]
pub enum ViewError {
    Unauthorized,
    ProviderNotFound(String),
    Metadata(MetadataError),
    UnsupportedMetadata,
    NoResult,
    Processing(SttError),
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        match self {
            ViewError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ViewError::ProviderNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("unknown STT provider: {name}")).into_response()
            }
            ViewError::Metadata(e) if e.is_unsupported() => {
                (StatusCode::NOT_IMPLEMENTED, e.to_string()).into_response()
            }
            ViewError::Metadata(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            ViewError::UnsupportedMetadata => StatusCode::NOT_IMPLEMENTED.into_response(),
            ViewError::NoResult => StatusCode::BAD_REQUEST.into_response(),
            ViewError::Processing(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

/// Build the STT router. With `api_token` set, every request must carry
/// `Authorization: Bearer <token>`.
pub fn router(providers: Providers, api_token: Option<String>) -> Router {
    let state = SttState {
        providers,
        api_token: api_token.map(Arc::from),
    };

    Router::new()
        .route("/api/stt/:provider", get(provider_info).post(process_audio))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

async fn require_token(
    State(state): State<SttState>,
    request: Request,
    next: Next,
) -> Result<Response, ViewError> {
    if let Some(token) = state.api_token.as_deref() {
        let authorized = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|presented| presented == token);
        if !authorized {
            return Err(ViewError::Unauthorized);
        }
    }
    Ok(next.run(request).await)
}

async fn process_audio(
    State(state): State<SttState>,
    Path(provider_key): Path<String>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ViewError> {
    let provider = state
        .providers
        .get(&provider_key)
        .ok_or_else(|| ViewError::ProviderNotFound(provider_key.clone()))?;

    let metadata = metadata_from_headers(&headers).map_err(ViewError::Metadata)?;
    if !provider.check_metadata(&metadata) {
        tracing::debug!(provider = %provider_key, ?metadata, "unsupported speech metadata");
        return Err(ViewError::UnsupportedMetadata);
    }

    let stream = body
        .into_data_stream()
        .map_err(|e| SttError::StreamRead(e.to_string()))
        .boxed();

    match provider.process_audio_stream(&metadata, stream).await {
        Ok(Some(text)) => Ok((StatusCode::OK, text).into_response()),
        Ok(None) => Err(ViewError::NoResult),
        Err(e) => {
            tracing::error!(provider = %provider_key, "speech processing failed: {e}");
            Err(ViewError::Processing(e))
        }
    }
}

async fn provider_info(
    State(state): State<SttState>,
    Path(provider_key): Path<String>,
) -> Result<Json<ProviderInfo>, ViewError> {
    let provider = state
        .providers
        .get(&provider_key)
        .ok_or(ViewError::ProviderNotFound(provider_key))?;

    Ok(Json(ProviderInfo {
        languages: provider.supported_languages().to_vec(),
        formats: provider.supported_formats().to_vec(),
        codecs: provider.supported_codecs().to_vec(),
        samplerate: provider.supported_samplerates().to_vec(),
        bitrate: provider.supported_bitrates().to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DemoProvider, SttProvider};
    use axum::http::Request as HttpRequest;
    use tower::ServiceExt;

    const HEADER: &str =
        "format=audio/wav; codecs=audio/pcm; samplerate=16000; bitrate=16; language=en";

    fn demo_router(token: Option<&str>) -> Router {
        let providers: Providers = [(
            "demo".to_string(),
            Arc::new(DemoProvider::new()) as Arc<dyn SttProvider>,
        )]
        .into_iter()
        .collect();
        router(providers, token.map(str::to_string))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_capabilities() {
        let response = demo_router(None)
            .oneshot(
                HttpRequest::get("/api/stt/demo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "languages": ["en", "de"],
                "formats": ["wav"],
                "codecs": ["pcm"],
                "samplerate": [16000],
                "bitrate": [16],
            })
        );
    }

    #[tokio::test]
    async fn test_post_with_token_required_rejects_missing_token() {
        let response = demo_router(Some("s3cret"))
            .oneshot(
                HttpRequest::post("/api/stt/demo")
                    .header("x-speech-content", HEADER)
                    .body(Body::from("audio"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_with_token_required_accepts_bearer() {
        let response = demo_router(Some("s3cret"))
            .oneshot(
                HttpRequest::post("/api/stt/demo")
                    .header("authorization", "Bearer s3cret")
                    .header("x-speech-content", HEADER)
                    .body(Body::from("audio"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Turn the Kitchen Lights on");
    }

    #[tokio::test]
    async fn test_get_with_wrong_token_is_unauthorized() {
        let response = demo_router(Some("s3cret"))
            .oneshot(
                HttpRequest::get("/api/stt/demo")
                    .header("authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_missing_header_is_bad_request() {
        let response = demo_router(None)
            .oneshot(
                HttpRequest::post("/api/stt/demo")
                    .body(Body::from("audio"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_unknown_codec_is_not_implemented() {
        let response = demo_router(None)
            .oneshot(
                HttpRequest::post("/api/stt/demo")
                    .header("x-speech-content", HEADER.replace("audio/pcm", "audio/aac"))
                    .body(Body::from("audio"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_view_error_status_codes() {
        let cases = [
            (ViewError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ViewError::ProviderNotFound("x".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ViewError::Metadata(MetadataError::MissingHeader),
                StatusCode::BAD_REQUEST,
            ),
            (
                ViewError::Metadata(MetadataError::Unsupported {
                    key: "codec",
                    value: "aac".to_string(),
                }),
                StatusCode::NOT_IMPLEMENTED,
            ),
            (ViewError::UnsupportedMetadata, StatusCode::NOT_IMPLEMENTED),
            (ViewError::NoResult, StatusCode::BAD_REQUEST),
            (
                ViewError::Processing(SttError::StreamRead("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
