//! Digest mail and its copies in cloud storage.

use std::io::Write;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use crate::config::MailConfig;
use crate::content::digest::{compose_body, pick_assistant_message, recipient_slug};
use crate::content::NewsFeed;
use crate::error::{ActivityError, ContentError};
use crate::graph::{DriveStorage, GraphClient, SendMailRequest};

/// MIME type the report copy is uploaded with. The content is plain UTF-8 text.
const WORD_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Where a copy of a digest is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    /// Plain-text chat transcript.
    Chat,
    /// Report saved with a Word content type.
    Report,
}

impl CopyKind {
    pub fn folder<'a>(&self, config: &'a MailConfig) -> &'a str {
        match self {
            Self::Chat => &config.chat_folder,
            Self::Report => &config.report_folder,
        }
    }

    pub fn file_name(&self, recipient: &str) -> String {
        match self {
            Self::Chat => format!("copilot_{}.txt", recipient_slug(recipient)),
            Self::Report => format!("report_{}.docx", recipient_slug(recipient)),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Chat => "text/plain",
            Self::Report => WORD_CONTENT_TYPE,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Chat => "chat copy",
            Self::Report => "report",
        }
    }
}

/// Builds, sends and archives digests.
pub struct MailComposer<'a> {
    graph: &'a GraphClient,
    news: &'a NewsFeed,
    config: &'a MailConfig,
}

impl<'a> MailComposer<'a> {
    pub fn new(graph: &'a GraphClient, news: &'a NewsFeed, config: &'a MailConfig) -> Self {
        Self {
            graph,
            news,
            config,
        }
    }

    /// Compose a fresh digest body for today.
    ///
    /// An unreachable feed leaves the news section empty instead of failing.
    pub async fn compose<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let headlines = match self.news.headlines().await {
            Ok(headlines) => headlines,
            Err(e) => {
                warn!("Continuing without news: {}", e);
                Vec::new()
            }
        };

        compose_body(
            Utc::now().date_naive(),
            &headlines,
            pick_assistant_message(rng),
        )
    }

    /// Send the digest from `sender` to `recipient`.
    pub async fn send(&self, sender: &str, recipient: &str, body: &str) -> Result<(), ActivityError> {
        info!("Mail {} -> {}", sender, recipient);

        let request = SendMailRequest::text(&self.config.subject, body, recipient);
        self.graph.send_mail(sender, &request).await?;

        info!("Mail to {} accepted", recipient);
        Ok(())
    }

    /// Save a copy of the digest into `user_id`'s drive.
    pub async fn save_copy<S: DriveStorage>(
        &self,
        storage: &S,
        user_id: &str,
        kind: CopyKind,
        recipient: &str,
        body: &str,
    ) -> Result<(), ActivityError> {
        let folder = kind.folder(self.config);
        let file_name = kind.file_name(recipient);

        storage.ensure_folder(user_id, folder).await?;

        let content = stage_utf8(&file_name, body)?;
        storage
            .upload(user_id, folder, &file_name, kind.content_type(), content)
            .await?;

        info!("Uploaded {} {}/{}", kind.label(), folder, file_name);
        Ok(())
    }
}

/// Round-trip the body through a local temporary file.
///
/// The file is deleted when it goes out of scope, whether or not the
/// upload that follows succeeds.
fn stage_utf8(file_name: &str, body: &str) -> Result<Vec<u8>, ContentError> {
    let mut staged = tempfile::Builder::new()
        .prefix(file_name)
        .suffix(".tmp")
        .tempfile()?;

    staged.write_all(body.as_bytes())?;
    staged.flush()?;

    Ok(std::fs::read(staged.path())?)
}
