//! Normalization of raw engine page results into [`Detection`]s.
//!
//! Engine versions disagree on field names: recognized text may arrive under
//! `rec_text` or `rec_texts`, scores under `rec_score` or `rec_scores`. Each
//! field is resolved through an ordered candidate-key list, preferring the
//! primary key but falling back when its container is empty.

use serde_json::Value;

use super::Detection;

const TEXT_KEYS: [&str; 2] = ["rec_text", "rec_texts"];
const SCORE_KEYS: [&str; 2] = ["rec_score", "rec_scores"];

/// Turn one raw page result into detections.
///
/// The polygon list governs the output count. Texts and scores are parallel
/// sequences that may run short: a missing text defaults to `""`, a missing
/// score to `1.0`. Output keeps the engine's detection order.
pub fn normalize_page(page: &Value) -> Vec<Detection> {
    let polys = match page.get("dt_polys").and_then(Value::as_array) {
        Some(polys) => polys,
        None => return Vec::new(),
    };

    let texts = first_non_empty(page, &TEXT_KEYS);
    let scores = first_non_empty(page, &SCORE_KEYS);

    polys
        .iter()
        .enumerate()
        .map(|(idx, poly)| Detection {
            points: parse_poly(poly),
            text: texts
                .and_then(|t| t.get(idx))
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            confidence: scores
                .and_then(|s| s.get(idx))
                .and_then(Value::as_f64)
                .unwrap_or(1.0),
        })
        .collect()
}

/// Resolve the first candidate key whose value is a non-empty array.
fn first_non_empty<'a>(page: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| page.get(*key).and_then(Value::as_array))
        .find(|arr| !arr.is_empty())
}

fn parse_poly(value: &Value) -> Vec<[f64; 2]> {
    value
        .as_array()
        .map(|points| {
            points
                .iter()
                .filter_map(|p| {
                    let p = p.as_array()?;
                    Some([p.first()?.as_f64()?, p.get(1)?.as_f64()?])
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Value {
        json!([[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]])
    }

    #[test]
    fn test_primary_key_preferred() {
        let page = json!({
            "dt_polys": [square()],
            "rec_text": ["primary"],
            "rec_texts": ["fallback"],
            "rec_score": [0.7],
        });
        let detections = normalize_page(&page);
        assert_eq!(detections[0].text, "primary");
    }

    #[test]
    fn test_fallback_key_honored_when_primary_empty() {
        let page = json!({
            "dt_polys": [square()],
            "rec_text": [],
            "rec_texts": ["hola"],
            "rec_scores": [0.9],
        });
        let detections = normalize_page(&page);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "hola");
    }

    #[test]
    fn test_missing_score_defaults_to_full_confidence() {
        let page = json!({
            "dt_polys": [square(), square(), square()],
            "rec_texts": ["a", "b", "c"],
            "rec_scores": [0.4, 0.6],
        });
        let detections = normalize_page(&page);
        assert_eq!(detections.len(), 3);
        assert_eq!(detections[2].confidence, 1.0);
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let page = json!({
            "dt_polys": [square(), square(), square()],
            "rec_texts": ["a", "b"],
            "rec_scores": [0.4, 0.6, 0.8],
        });
        let detections = normalize_page(&page);
        assert_eq!(detections.len(), 3);
        assert_eq!(detections[2].text, "");
        assert_eq!(detections[2].confidence, 0.8);
    }

    #[test]
    fn test_polygon_points_preserved_in_order() {
        let page = json!({
            "dt_polys": [[[3.0, 4.0], [9.0, 4.0], [9.0, 8.0], [3.0, 8.0]]],
            "rec_texts": ["x"],
            "rec_scores": [0.5],
        });
        let detections = normalize_page(&page);
        assert_eq!(
            detections[0].points,
            vec![[3.0, 4.0], [9.0, 4.0], [9.0, 8.0], [3.0, 8.0]]
        );
    }

    #[test]
    fn test_page_without_polys_yields_nothing() {
        assert!(normalize_page(&json!({})).is_empty());
        assert!(normalize_page(&json!({"rec_texts": ["orphan"]})).is_empty());
    }
}
