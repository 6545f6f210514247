//! HTTP wire types for the OCR endpoints.

use serde::{Deserialize, Serialize};

use crate::ocr::Detection;

/// Request body shared by both extraction endpoints.
#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    pub image_url: String,
    /// Detections scoring below this are dropped by `/ocr/extract`.
    /// Accepted unclamped; out-of-range values trivially pass or reject all.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_min_confidence() -> f64 {
    0.5
}

/// Full extraction response: every surviving detection plus a line count.
#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub success: bool,
    pub results: Vec<Detection>,
    pub total_lines: usize,
}

impl OcrResponse {
    /// `total_lines` always equals the number of results.
    pub fn new(results: Vec<Detection>) -> Self {
        let total_lines = results.len();
        Self {
            success: true,
            results,
            total_lines,
        }
    }
}

/// Text-only extraction response.
#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub success: bool,
    pub text: String,
}
