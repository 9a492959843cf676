//! m365-keepalive - keep-alive activity for Microsoft 365 tenant accounts.
//!
//! Authenticates once with the client-credentials grant, lists the tenant's
//! users and, for each of them, reads the calendar, creates an event and a
//! To Do task, mails a digest to a few colleagues and drops files into
//! OneDrive.
//!
//! Runs are not idempotent: every run creates new events, tasks, mails and
//! files.

#![deny(clippy::all)]

pub mod activity;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod graph;
pub mod http;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use activity::{Orchestrator, RunSummary};
use auth::OAuth2Client;
use config::{Config, Credentials};
use content::{ImageRepository, NewsFeed};
use error::{ActivityError, ConfigError};
use graph::GraphClient;

/// Run every keep-alive action for every user in the tenant.
pub async fn run(config: &Config, credentials: Credentials) -> Result<RunSummary, ActivityError> {
    let mut rng = StdRng::from_entropy();
    run_with_rng(config, credentials, &mut rng).await
}

/// [`run`] with a caller-provided source of randomness.
pub async fn run_with_rng<R: Rng + ?Sized>(
    config: &Config,
    credentials: Credentials,
    rng: &mut R,
) -> Result<RunSummary, ActivityError> {
    let http_client =
        http::build_client().map_err(|e| ConfigError::HttpClient(e.to_string()))?;

    let oauth_client = OAuth2Client::new(config, credentials, http_client.clone());
    let token = oauth_client.acquire_token().await?;

    let graph_client = GraphClient::new(&config.api.graph_base_url, token, http_client.clone());

    let users = graph_client
        .list_users()
        .await
        .map_err(ActivityError::Directory)?;

    info!("Found {} users", users.len());
    for user in &users {
        info!("  {}", user.user_principal_name);
    }

    let news = NewsFeed::new(&config.news, http_client.clone());
    let images = ImageRepository::new(config, http_client);

    let summary = Orchestrator::new(&graph_client, &news, &images, config)
        .run(&users, rng)
        .await?;

    info!(
        "Run finished: {} users, {} actions completed, {} skipped, {} failed",
        summary.users, summary.completed, summary.skipped, summary.failed
    );

    Ok(summary)
}
