//! OCR engine abstraction and recognition adapter.
//!
//! Defines the [`OcrEngine`] trait plus the unified [`Detection`] type so the
//! concrete backend (PaddleOCR sidecar in production, fakes in tests) can be
//! swapped via constructor injection.

pub mod filter;
pub mod normalize;
pub mod paddle;

use std::path::Path;

use serde::Serialize;

/// One recognized text region: polygon + text + confidence.
///
/// Built by the normalizer from raw engine output and immutable afterward.
/// Points are kept in engine order; nothing here forces the polygon to be
/// axis-aligned.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Polygon vertices as `[x, y]` pairs.
    #[serde(rename = "box")]
    pub points: Vec<[f64; 2]>,
    pub text: String,
    pub confidence: f64,
}

/// Async trait implemented by each OCR backend.
///
/// `predict` returns the engine's raw per-page results as loosely typed JSON;
/// field naming drifts between engine versions, so interpretation is left to
/// the normalizer.
#[async_trait::async_trait]
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn predict(&self, path: &Path) -> anyhow::Result<Vec<serde_json::Value>>;
}

/// Run recognition on an image file and normalize the output.
///
/// The engine is invoked exactly once. Only the first page of the result is
/// used; multi-page input degrades to single-page semantics. An empty or
/// absent result yields an empty list — no text is not a failure.
pub async fn recognize(engine: &dyn OcrEngine, path: &Path) -> anyhow::Result<Vec<Detection>> {
    let pages = engine.predict(path).await?;
    tracing::debug!(
        "engine '{}' returned {} page(s) for {:?}",
        engine.name(),
        pages.len(),
        path
    );
    Ok(pages
        .first()
        .map(normalize::normalize_page)
        .unwrap_or_default())
}
