use std::sync::Arc;

use anyhow::Result;

use crate::archive::Archiver;
use crate::core::{AppConfig, FixedDelay};

pub async fn run(config: &AppConfig, event_id: &str) -> Result<()> {
    let archiver = Archiver::new(config, Arc::new(FixedDelay::from_millis(config.sleep_millis)))?;
    let archived = archiver
        .archive_event(event_id, &config.downloads_path())
        .await?;

    if archived.photos_failed > 0 {
        tracing::warn!(
            "{} of {} photos could not be downloaded; rerun to retry them",
            archived.photos_failed,
            archived.record.photos.len()
        );
    }
    Ok(())
}
