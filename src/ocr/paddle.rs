//! PaddleOCR sidecar engine client.
//!
//! The engine runs out-of-process behind a small HTTP endpoint: the image
//! file is posted as multipart and the sidecar answers with the raw
//! PaddleOCR page array (`dt_polys` / `rec_text(s)` / `rec_score(s)`).

use std::path::Path;

use serde_json::Value;
use tracing::info;

use super::OcrEngine;

pub struct PaddleEngine {
    url: String,
    client: reqwest::Client,
}

impl PaddleEngine {
    /// Build the engine client from `PADDLE_OCR_URL`, defaulting to the
    /// local sidecar port.
    pub fn from_env(client: reqwest::Client) -> Self {
        let url = std::env::var("PADDLE_OCR_URL")
            .unwrap_or_else(|_| "http://localhost:8868".to_string());
        Self { url, client }
    }
}

#[async_trait::async_trait]
impl OcrEngine for PaddleEngine {
    fn name(&self) -> &str {
        "paddle_ocr"
    }

    async fn predict(&self, path: &Path) -> anyhow::Result<Vec<Value>> {
        use reqwest::multipart::{Form, Part};

        let data = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        info!(
            "PaddleEngine: sending {} ({} bytes) to sidecar",
            filename,
            data.len()
        );

        let part = Part::bytes(data)
            .file_name(filename)
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/predict", self.url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("PaddleOCR sidecar error ({}): {}", status, error_text);
        }

        // A null body means the engine found nothing, same as an empty array.
        let pages: Option<Vec<Value>> = response.json().await?;
        Ok(pages.unwrap_or_default())
    }
}
