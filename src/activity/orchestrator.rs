//! Drives the keep-alive actions for every tenant user, in order.

use chrono::Utc;
use rand::Rng;
use tracing::{info, info_span, warn, Instrument};

use super::images::ImageUploader;
use super::mail::{CopyKind, MailComposer};
use super::selection::select_recipients;
use super::{RunSummary, StepOutcome};
use crate::config::Config;
use crate::content::{ImageRepository, NewsFeed};
use crate::error::ActivityError;
use crate::graph::{DriveStorage, GraphClient, NewEvent, NewTask, User};

/// Per-user activity orchestrator.
pub struct Orchestrator<'a> {
    graph: &'a GraphClient,
    news: &'a NewsFeed,
    images: &'a ImageRepository,
    config: &'a Config,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        graph: &'a GraphClient,
        news: &'a NewsFeed,
        images: &'a ImageRepository,
        config: &'a Config,
    ) -> Self {
        Self {
            graph,
            news,
            images,
            config,
        }
    }

    /// Process every user sequentially.
    ///
    /// Only a fatal error stops the loop early.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        users: &[User],
        rng: &mut R,
    ) -> Result<RunSummary, ActivityError> {
        let mut summary = RunSummary::default();

        for user in users {
            let span = info_span!("user", upn = %user.user_principal_name);
            self.process_user(user, users, &mut summary, rng)
                .instrument(span)
                .await?;
            summary.users += 1;
        }

        Ok(summary)
    }

    async fn process_user<R: Rng + ?Sized>(
        &self,
        user: &User,
        users: &[User],
        summary: &mut RunSummary,
        rng: &mut R,
    ) -> Result<(), ActivityError> {
        info!("Processing {}", user.user_principal_name);

        summary.record("calendar read", self.read_calendar(user).await)?;
        summary.record("calendar event", self.create_event(user).await)?;
        summary.record("todo task", self.create_task(user).await)?;

        self.dispatch_mail(user, users, summary, rng).await?;

        match self.graph.is_ready(&user.id).await {
            Ok(true) => {
                let uploader = ImageUploader::new(self.images, &self.config.images);
                let outcome = match uploader.upload_random(self.graph, &user.id, rng).await {
                    Ok(report) if report.attempted == 0 => Ok(StepOutcome::Skipped("no images found")),
                    Ok(report) => {
                        summary.failed += report.failed();
                        Ok(StepOutcome::Done)
                    }
                    Err(e) => Err(e),
                };
                summary.record("image upload", outcome)?;
            }
            Ok(false) => {
                warn!("OneDrive for {} is not ready", user.user_principal_name);
                summary.record("image upload", Ok(StepOutcome::Skipped("drive not ready")))?;
            }
            Err(e) => summary.record("drive readiness", Err(e.into()))?,
        }

        Ok(())
    }

    async fn read_calendar(&self, user: &User) -> Result<StepOutcome, ActivityError> {
        let events = self.graph.list_events(&user.id).await?;
        info!("Calendar of {} has {} events", user.user_principal_name, events.len());
        Ok(StepOutcome::Done)
    }

    async fn create_event(&self, user: &User) -> Result<StepOutcome, ActivityError> {
        let event = NewEvent::daily_keepalive(Utc::now());
        self.graph.create_event(&user.id, &event).await?;
        info!("Created event '{}' at {}", event.subject, event.start.date_time);
        Ok(StepOutcome::Done)
    }

    async fn create_task(&self, user: &User) -> Result<StepOutcome, ActivityError> {
        let lists = self.graph.list_todo_lists(&user.id).await?;

        // No selection policy: the first list Graph returns gets the task.
        let Some(list) = lists.first() else {
            warn!("{} has no To Do lists", user.user_principal_name);
            return Ok(StepOutcome::Skipped("no To Do lists"));
        };

        let task = NewTask::daily_reminder(Utc::now());
        self.graph.create_task(&user.id, &list.id, &task).await?;
        info!(
            "Created task '{}' in list {}",
            task.title,
            list.display_name.as_deref().unwrap_or(&list.id)
        );
        Ok(StepOutcome::Done)
    }

    async fn dispatch_mail<R: Rng + ?Sized>(
        &self,
        sender: &User,
        users: &[User],
        summary: &mut RunSummary,
        rng: &mut R,
    ) -> Result<(), ActivityError> {
        let recipients = select_recipients(
            users,
            sender,
            self.config.mail.min_recipients,
            self.config.mail.max_recipients,
            rng,
        );

        if recipients.is_empty() {
            return summary.record("mail", Ok(StepOutcome::Skipped("no other users in tenant")));
        }

        let composer = MailComposer::new(self.graph, self.news, &self.config.mail);

        for recipient in recipients {
            let body = composer.compose(rng).await;

            let sent = composer
                .send(&sender.user_principal_name, recipient, &body)
                .await
                .map(|()| StepOutcome::Done);
            summary.record("mail", sent)?;

            for (step, kind) in [("chat copy", CopyKind::Chat), ("report", CopyKind::Report)] {
                let saved = composer
                    .save_copy(self.graph, &sender.id, kind, recipient, &body)
                    .await
                    .map(|()| StepOutcome::Done);
                summary.record(step, saved)?;
            }
        }

        Ok(())
    }
}
