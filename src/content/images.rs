//! Sample images from a public repository folder.

use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::ContentError;

/// Recognized image extensions (compared case-insensitively).
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// One entry of the repository contents listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    pub download_url: Option<String>,
}

/// An image file that can be downloaded and re-uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub name: String,
    pub download_url: String,
}

/// Whether a file name carries a recognized image extension.
pub fn has_image_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Keep only downloadable image files.
pub fn filter_images(entries: Vec<RepoEntry>) -> Vec<ImageCandidate> {
    entries
        .into_iter()
        .filter(|e| e.kind == "file" && has_image_extension(&e.name))
        .filter_map(|e| {
            e.download_url.map(|download_url| ImageCandidate {
                name: e.name,
                download_url,
            })
        })
        .collect()
}

/// Unauthenticated client for the repository contents API.
pub struct ImageRepository {
    listing_url: String,
    http_client: reqwest::Client,
}

impl ImageRepository {
    pub fn new(config: &Config, http_client: reqwest::Client) -> Self {
        Self {
            listing_url: config.image_listing_url(),
            http_client,
        }
    }

    /// List image files in the configured folder.
    pub async fn list_images(&self) -> Result<Vec<ImageCandidate>, ContentError> {
        let response = self
            .http_client
            .get(&self.listing_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| ContentError::Listing(e.to_string()))?
            .error_for_status()
            .map_err(|e| ContentError::Listing(e.to_string()))?;

        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ContentError::Listing(format!("unexpected listing format: {e}")))?;

        // Entries that are not objects are skipped rather than failing the listing.
        let entries: Vec<RepoEntry> = raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();

        debug!("Repository listing has {} entries", entries.len());

        Ok(filter_images(entries))
    }

    /// Download the raw bytes of one image.
    pub async fn download(&self, image: &ImageCandidate) -> Result<Vec<u8>, ContentError> {
        let download_error = |reason: String| ContentError::Download {
            name: image.name.clone(),
            reason,
        };

        let response = self
            .http_client
            .get(&image.download_url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?
            .error_for_status()
            .map_err(|e| download_error(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
