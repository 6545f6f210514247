//! Confidence filtering and text-only shaping of detections.
//!
//! Pure functions, no async. Both keep the original detection order and
//! never mutate a detection. They are separate entry points; composing them
//! (filter, then join) is up to the caller.

use super::Detection;

/// Keep detections whose confidence is at least `min_confidence` (inclusive).
///
/// A threshold of `0.0` passes everything with a non-negative score; the
/// threshold is not clamped, so out-of-range values simply pass or reject
/// the whole list.
pub fn filter_by_confidence(detections: Vec<Detection>, min_confidence: f64) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| d.confidence >= min_confidence)
        .collect()
}

/// Join every detection's text with newlines.
///
/// Detections with empty text still contribute an empty line.
pub fn text_only(detections: &[Detection]) -> String {
    detections
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
