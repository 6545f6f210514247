//! Image download to a uniquely named temporary file.
//!
//! The returned [`NamedTempFile`] owns the file on disk: dropping the guard
//! removes it, so callers hold it for exactly the span the path is needed
//! and cleanup happens on every exit path.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;
use tempfile::NamedTempFile;
use tracing::{debug, info};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Suffixes accepted verbatim from the URL path; anything else becomes `.jpg`.
const IMAGE_SUFFIXES: [&str; 7] = [".jpg", ".jpeg", ".png", ".bmp", ".gif", ".tiff", ".webp"];

const TEMP_PREFIX: &str = "ocr-img-";

/// Fetch the image at `url` into a temporary file and return its guard.
///
/// The request carries a 30 second timeout; a non-2xx status is an error.
pub async fn fetch_image(client: &reqwest::Client, url: &Url) -> anyhow::Result<NamedTempFile> {
    let response = client
        .get(url.clone())
        .timeout(DOWNLOAD_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("request to {url} was rejected"))?;

    let body = response.bytes().await.context("failed to read image body")?;

    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(suffix_for(url))
        .tempfile()
        .context("failed to create temporary file")?;
    file.write_all(&body)
        .and_then(|_| file.flush())
        .context("failed to write image to temporary file")?;

    info!("downloaded {} ({} bytes) to {:?}", url, body.len(), file.path());
    Ok(file)
}

/// Infer a file suffix from the URL path (query string excluded), matched
/// case-insensitively against the image allow-list.
fn suffix_for(url: &Url) -> &'static str {
    let path = url.path();
    let suffix = match path.rfind('.') {
        Some(dot) if !path[dot + 1..].contains('/') => &path[dot..],
        _ => {
            debug!("no suffix in URL path {:?}, defaulting to .jpg", path);
            return ".jpg";
        }
    };
    let lowered = suffix.to_ascii_lowercase();
    IMAGE_SUFFIXES
        .iter()
        .find(|s| **s == lowered)
        .copied()
        .unwrap_or(".jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_suffix_from_path() {
        assert_eq!(suffix_for(&url("https://example.com/photo.png")), ".png");
        assert_eq!(suffix_for(&url("https://example.com/a/b/scan.tiff")), ".tiff");
    }

    #[test]
    fn test_suffix_case_insensitive() {
        assert_eq!(suffix_for(&url("https://example.com/PHOTO.JPG")), ".jpg");
    }

    #[test]
    fn test_suffix_ignores_query_string() {
        assert_eq!(
            suffix_for(&url("https://example.com/img.webp?size=large&fmt=png")),
            ".webp"
        );
    }

    #[test]
    fn test_unknown_or_missing_suffix_defaults_to_jpg() {
        assert_eq!(suffix_for(&url("https://example.com/download")), ".jpg");
        assert_eq!(suffix_for(&url("https://example.com/archive.pdf")), ".jpg");
        assert_eq!(suffix_for(&url("https://example.com/")), ".jpg");
    }

    #[test]
    fn test_dot_in_directory_not_mistaken_for_suffix() {
        assert_eq!(suffix_for(&url("https://example.com/v1.2/image")), ".jpg");
    }

    #[tokio::test]
    async fn test_temp_file_removed_on_drop() {
        let file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".jpg")
            .tempfile()
            .unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());
        drop(file);
        assert!(!path.exists());
    }
}
