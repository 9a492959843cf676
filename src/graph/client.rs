//! Microsoft Graph API client for the tenant-wide keep-alive actions.
//!
//! Every call is app-only: the bearer token is acquired once per run and
//! attached to every request.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{
    CalendarEvent, ListResponse, NewEvent, NewTask, SendMailRequest, TodoList, User,
};
use crate::auth::AccessToken;
use crate::error::ApiError;

/// Microsoft Graph API client.
pub struct GraphClient {
    base_url: String,
    token: AccessToken,
    http_client: reqwest::Client,
}

impl GraphClient {
    /// Create a new Graph client bound to one access token.
    pub fn new(base_url: &str, token: AccessToken, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http_client,
        }
    }

    /// Build a URL under `/users/{id}`.
    pub(crate) fn user_url(&self, user: &str, rest: &str) -> String {
        format!(
            "{}/users/{}/{}",
            self.base_url,
            urlencoding::encode(user),
            rest
        )
    }

    /// List every user in the tenant.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = format!("{}/users", self.base_url);
        self.get_list(&url).await
    }

    /// List events in a user's default calendar.
    pub async fn list_events(&self, user_id: &str) -> Result<Vec<CalendarEvent>, ApiError> {
        let url = self.user_url(user_id, "calendar/events");
        self.get_list(&url).await
    }

    /// Create an event in a user's default calendar.
    pub async fn create_event(&self, user_id: &str, event: &NewEvent) -> Result<(), ApiError> {
        let url = self.user_url(user_id, "events");
        let response = self.send(self.http_client.post(&url).json(event)).await?;
        expect_status(response, &[StatusCode::OK, StatusCode::CREATED]).await?;
        Ok(())
    }

    /// List a user's Microsoft To Do task lists.
    pub async fn list_todo_lists(&self, user_id: &str) -> Result<Vec<TodoList>, ApiError> {
        let url = self.user_url(user_id, "todo/lists");
        self.get_list(&url).await
    }

    /// Create a task in one of a user's To Do lists.
    pub async fn create_task(
        &self,
        user_id: &str,
        list_id: &str,
        task: &NewTask,
    ) -> Result<(), ApiError> {
        let rest = format!("todo/lists/{}/tasks", urlencoding::encode(list_id));
        let url = self.user_url(user_id, &rest);
        let response = self.send(self.http_client.post(&url).json(task)).await?;
        expect_status(response, &[StatusCode::OK, StatusCode::CREATED]).await?;
        Ok(())
    }

    /// Send a message on behalf of `sender` (principal name or id).
    ///
    /// Graph accepts the message with 202 and delivers asynchronously.
    pub async fn send_mail(&self, sender: &str, request: &SendMailRequest) -> Result<(), ApiError> {
        let url = self.user_url(sender, "sendMail");
        let response = self.send(self.http_client.post(&url).json(request)).await?;
        expect_status(response, &[StatusCode::ACCEPTED]).await?;
        Ok(())
    }

    pub(super) fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http_client.request(method, url)
    }

    /// Attach the bearer token and send.
    pub(crate) async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        request
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(|e| ApiError::GraphRequestFailed(e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        debug!("GET {}", url);

        let response = self.send(self.http_client.get(url)).await?;
        let response = expect_status(response, &[StatusCode::OK]).await?;

        let body: ListResponse<T> = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(body.value)
    }
}

/// Pass the response through if its status is accepted, otherwise turn it
/// into an [`ApiError`] carrying the response body.
pub(crate) async fn expect_status(
    response: Response,
    accepted: &[StatusCode],
) -> Result<Response, ApiError> {
    let status = response.status();
    if accepted.contains(&status) {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), body))
}
