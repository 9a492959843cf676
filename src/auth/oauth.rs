//! OAuth2 client-credentials grant against Azure AD.

use serde::Deserialize;
use tracing::{debug, error, info};

use super::secret::AccessToken;
use crate::config::{Config, Credentials};
use crate::error::AuthError;

/// OAuth2 client for the app-only (client-credentials) flow.
pub struct OAuth2Client {
    token_url: String,
    scope: String,
    credentials: Credentials,
    http_client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a new OAuth2 client.
    ///
    /// `credentials` is already validated, so no request can ever go out
    /// with an empty tenant, client id or secret.
    pub fn new(config: &Config, credentials: Credentials, http_client: reqwest::Client) -> Self {
        Self {
            token_url: config.token_url(&credentials.tenant_id),
            scope: config.api.graph_scope.clone(),
            credentials,
            http_client,
        }
    }

    /// Request an app-only access token for Microsoft Graph.
    pub async fn acquire_token(&self) -> Result<AccessToken, AuthError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        debug!("Requesting client-credentials token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::TokenRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!("Token request failed: HTTP {} - {}", status, error_body);
            return Err(AuthError::TokenRejected {
                status: status.as_u16(),
            });
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;

        if token_response.access_token.is_empty() {
            return Err(AuthError::InvalidTokenResponse(
                "access_token is empty".to_string(),
            ));
        }

        info!(
            "Acquired access token (expires in {} seconds)",
            token_response.expires_in
        );

        Ok(AccessToken::new(token_response.access_token))
    }
}

/// Token response from Azure AD.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}
