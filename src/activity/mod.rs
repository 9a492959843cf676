//! Per-user keep-alive activity.
//!
//! The [`Orchestrator`] walks the tenant's users one at a time and runs the
//! calendar, To Do, mail and storage actions for each. Every action reports a
//! typed result; recoverable failures are tallied in the [`RunSummary`] and
//! the run carries on.

pub mod images;
pub mod mail;
pub mod orchestrator;
pub mod selection;

use tracing::{error, info};

use crate::error::ActivityError;

pub use images::{ImageUploader, UploadReport};
pub use mail::{CopyKind, MailComposer};
pub use orchestrator::Orchestrator;
pub use selection::select_recipients;

/// What a single action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(&'static str),
}

/// Tally of a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub users: usize,
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Log and count an action's result.
    ///
    /// Fatal errors are handed back to the caller untouched; everything else
    /// is absorbed here.
    pub fn record(
        &mut self,
        step: &str,
        result: Result<StepOutcome, ActivityError>,
    ) -> Result<(), ActivityError> {
        match result {
            Ok(StepOutcome::Done) => self.completed += 1,
            Ok(StepOutcome::Skipped(reason)) => {
                self.skipped += 1;
                info!("{} skipped: {}", step, reason);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                self.failed += 1;
                error!("{} failed: {}", step, e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AuthError};

    #[test]
    fn test_record_tallies() {
        let mut summary = RunSummary::default();

        summary.record("a", Ok(StepOutcome::Done)).unwrap();
        summary.record("b", Ok(StepOutcome::Skipped("why"))).unwrap();
        let forbidden = ApiError::Forbidden {
            body: String::new(),
        };
        summary.record("c", Err(ActivityError::Api(forbidden))).unwrap();

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_record_passes_fatal_through() {
        let mut summary = RunSummary::default();
        let result = summary.record(
            "token",
            Err(ActivityError::Auth(AuthError::TokenRejected { status: 400 })),
        );

        assert!(matches!(result, Err(ActivityError::Auth(_))));
        assert_eq!(summary.failed, 0);
    }
}
