//! Per-user cloud storage (OneDrive) operations.
//!
//! The activity code only sees [`DriveStorage`]; how a folder is made to
//! exist, or how a name conflict is resolved, stays with the implementation.

use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::{debug, info};

use super::client::{expect_status, GraphClient};
use crate::error::ApiError;

/// Storage capability used by the keep-alive actions.
pub trait DriveStorage: Send + Sync {
    /// Whether the user's drive is provisioned and reachable.
    fn is_ready(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, ApiError>> + Send;

    /// Make sure a top-level folder exists. Calling it again is a no-op.
    fn ensure_folder(
        &self,
        user_id: &str,
        folder: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Create or replace `folder/file_name` with `content`.
    fn upload(
        &self,
        user_id: &str,
        folder: &str,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}

/// Path-addressed drive item URL segment: `drive/root:/{path}`.
fn item_path(segments: &[&str]) -> String {
    let encoded: Vec<String> = segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("drive/root:/{}", encoded.join("/"))
}

impl DriveStorage for GraphClient {
    async fn is_ready(&self, user_id: &str) -> Result<bool, ApiError> {
        let url = self.user_url(user_id, "drive");
        let response = self.send(self.request(Method::GET, &url)).await?;
        let status = response.status();

        debug!("Drive readiness for {}: HTTP {}", user_id, status);
        Ok(status == StatusCode::OK)
    }

    async fn ensure_folder(&self, user_id: &str, folder: &str) -> Result<(), ApiError> {
        let url = self.user_url(user_id, &item_path(&[folder]));
        let response = self.send(self.request(Method::GET, &url)).await?;

        match response.status() {
            StatusCode::OK => {
                debug!("Folder '{}' already exists", folder);
                return Ok(());
            }
            StatusCode::NOT_FOUND => {}
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_status(status.as_u16(), body));
            }
        }

        let url = self.user_url(user_id, "drive/root/children");
        let payload = json!({
            "name": folder,
            "folder": {},
            "@microsoft.graph.conflictBehavior": "rename"
        });

        let response = self
            .send(self.request(Method::POST, &url).json(&payload))
            .await?;
        expect_status(response, &[StatusCode::OK, StatusCode::CREATED]).await?;

        info!("Created folder '{}'", folder);
        Ok(())
    }

    async fn upload(
        &self,
        user_id: &str,
        folder: &str,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<(), ApiError> {
        let rest = format!("{}:/content", item_path(&[folder, file_name]));
        let url = self.user_url(user_id, &rest);

        let request = self
            .request(Method::PUT, &url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(content);

        let response = self.send(request).await?;
        expect_status(response, &[StatusCode::OK, StatusCode::CREATED]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path() {
        assert_eq!(item_path(&["E5Auto"]), "drive/root:/E5Auto");
        assert_eq!(
            item_path(&["CopilotChat", "copilot_b_contoso.com.txt"]),
            "drive/root:/CopilotChat/copilot_b_contoso.com.txt"
        );
        assert_eq!(
            item_path(&["E5Auto", "my photo.png"]),
            "drive/root:/E5Auto/my%20photo.png"
        );
    }
}
