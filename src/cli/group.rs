use std::sync::Arc;

use anyhow::{Result, bail};
use itertools::Itertools;

use crate::archive::Archiver;
use crate::core::{AppConfig, FixedDelay};

pub async fn run(config: &AppConfig, group_id: &str) -> Result<()> {
    let archiver = Archiver::new(config, Arc::new(FixedDelay::from_millis(config.sleep_millis)))?;
    let report = archiver
        .archive_group(group_id, &config.group_path(group_id))
        .await?;

    println!(
        "Group {}: {} past events, {} already archived, {} archived now",
        group_id,
        report.event_ids.len(),
        report.already_complete,
        report.archived.len()
    );

    if !report.failed.is_empty() {
        bail!(
            "Failed to archive {} event(s): {}",
            report.failed.len(),
            report.failed.iter().map(|(id, _)| id).join(", ")
        );
    }
    Ok(())
}
