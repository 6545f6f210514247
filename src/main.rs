//! OCR Server - extracts text from images fetched by URL.

mod config;
mod download;
mod error;
mod ocr;
mod schema;

use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use reqwest::Url;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Settings;
use error::ApiError;
use ocr::paddle::PaddleEngine;
use ocr::{filter, OcrEngine};
use schema::{OcrRequest, OcrResponse, TextResponse};

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    engine: Arc<dyn OcrEngine>,
    http: reqwest::Client,
    settings: Arc<Settings>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    let settings = Settings::from_env();

    // Initialize tracing
    let default_filter = if settings.debug {
        "ocr_server=debug,tower_http=debug"
    } else {
        "ocr_server=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The HTTP client is shared by the downloader and the engine client.
    // Recognition gets no timeout; the downloader sets its own per request.
    let http = reqwest::Client::new();
    let engine = PaddleEngine::from_env(http.clone());
    info!("OCR engine '{}' initialized", engine.name());

    let state = AppState {
        engine: Arc::new(engine),
        http,
        settings: Arc::new(settings.clone()),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
    info!(
        "{} listening on http://{}",
        settings.app_name,
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ocr/extract", post(extract_text))
        .route("/ocr/extract-text-only", post(extract_text_only))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to {}", state.settings.app_name)
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Download the image, run recognition, filter by confidence.
async fn extract_text(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<OcrResponse>, ApiError> {
    let url = parse_image_url(&request.image_url)?;

    // The guard owns the downloaded file until the end of the request, so it
    // is removed on success and on every error path below.
    let image = download::fetch_image(&state.http, &url)
        .await
        .map_err(|e| ApiError::Download(e.to_string()))?;

    let detections = ocr::recognize(state.engine.as_ref(), image.path())
        .await
        .map_err(ApiError::Recognition)?;

    let total = detections.len();
    let kept = filter::filter_by_confidence(detections, request.min_confidence);
    info!(
        "extract: kept {}/{} detections at min_confidence {}",
        kept.len(),
        total,
        request.min_confidence
    );

    Ok(Json(OcrResponse::new(kept)))
}

/// Download the image, run recognition, return newline-joined text.
///
/// `min_confidence` from the request body is not applied on this path; every
/// recognized line is included.
async fn extract_text_only(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let url = parse_image_url(&request.image_url)?;

    let image = download::fetch_image(&state.http, &url)
        .await
        .map_err(|e| ApiError::Download(e.to_string()))?;

    let detections = ocr::recognize(state.engine.as_ref(), image.path())
        .await
        .map_err(ApiError::Recognition)?;

    info!("extract-text-only: joined {} lines", detections.len());

    Ok(Json(TextResponse {
        success: true,
        text: filter::text_only(&detections),
    }))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Validate the request URL: must parse and be absolute http(s).
fn parse_image_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}
