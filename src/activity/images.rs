//! Upload a few random sample images into a user's drive.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::config::ImagesConfig;
use crate::content::ImageRepository;
use crate::error::ActivityError;
use crate::graph::DriveStorage;

/// Counts from one user's image upload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    pub attempted: usize,
    pub uploaded: usize,
}

impl UploadReport {
    pub fn failed(&self) -> usize {
        self.attempted - self.uploaded
    }
}

/// Copies sampled repository images into the drive folder.
pub struct ImageUploader<'a> {
    repository: &'a ImageRepository,
    config: &'a ImagesConfig,
}

impl<'a> ImageUploader<'a> {
    pub fn new(repository: &'a ImageRepository, config: &'a ImagesConfig) -> Self {
        Self { repository, config }
    }

    /// Upload up to `max_per_user` distinct random images for `user_id`.
    ///
    /// Nothing touches the drive unless the listing yields at least one
    /// image. Each image is downloaded and uploaded on its own: a failure
    /// is logged and the remaining images are still attempted.
    pub async fn upload_random<S: DriveStorage, R: Rng + ?Sized>(
        &self,
        storage: &S,
        user_id: &str,
        rng: &mut R,
    ) -> Result<UploadReport, ActivityError> {
        let images = self.repository.list_images().await?;

        if images.is_empty() {
            info!(
                "No images found in repository folder '{}'",
                self.config.repo_folder
            );
            return Ok(UploadReport::default());
        }

        storage
            .ensure_folder(user_id, &self.config.drive_folder)
            .await?;

        let count = self.config.max_per_user.min(images.len());
        let mut report = UploadReport::default();

        for image in images.choose_multiple(rng, count) {
            report.attempted += 1;
            info!("Copying image {}", image.name);

            let content = match self.repository.download(image).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            match storage
                .upload(
                    user_id,
                    &self.config.drive_folder,
                    &image.name,
                    "application/octet-stream",
                    content,
                )
                .await
            {
                Ok(()) => {
                    report.uploaded += 1;
                    info!("Uploaded {}/{}", self.config.drive_folder, image.name);
                }
                Err(e) => warn!("Upload of {} failed: {}", image.name, e),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_failed() {
        let report = UploadReport {
            attempted: 3,
            uploaded: 1,
        };
        assert_eq!(report.failed(), 2);
        assert_eq!(UploadReport::default().failed(), 0);
    }
}
