use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use super::{Archiver, GROUP_EVENTS_FILE, MARKER_FILE};
use crate::meetup::{Endpoint, GraphQlResponse, GroupEventsData, queries};

#[derive(Debug, Default)]
pub struct GroupReport {
    /// Every past event id the API listed, in API order.
    pub event_ids: Vec<String>,
    pub already_complete: usize,
    pub archived: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl Archiver {
    /// Page through a group's past events, record the full id list in
    /// `<base_dir>/events`, then archive each event that has no
    /// completion marker yet. One event failing does not stop the
    /// rest; failures are collected in the report.
    pub async fn archive_group(&self, group_id: &str, base_dir: &Path) -> Result<GroupReport> {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("Failed to create {}", base_dir.display()))?;

        let event_ids = self.list_past_event_ids(group_id).await?;
        let listing: String = event_ids.iter().map(|id| format!("{}\n", id)).collect();
        let listing_path = base_dir.join(GROUP_EVENTS_FILE);
        fs::write(&listing_path, listing)
            .with_context(|| format!("Failed to write {}", listing_path.display()))?;

        let completed = completed_event_ids(base_dir)?;
        let mut report = GroupReport {
            event_ids: event_ids.clone(),
            ..Default::default()
        };

        for event_id in event_ids {
            if completed.contains(&event_id) {
                report.already_complete += 1;
                continue;
            }
            match self.archive_event(&event_id, base_dir).await {
                Ok(_) => report.archived.push(event_id),
                Err(err) => {
                    tracing::error!("Error downloading event {}: {:#}", event_id, err);
                    report.failed.push((event_id, format!("{:#}", err)));
                }
            }
        }

        Ok(report)
    }

    /// Follow `endCursor` until the API reports no further page.
    pub async fn list_past_event_ids(&self, group_id: &str) -> Result<Vec<String>> {
        let mut event_ids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            tracing::info!(
                "Fetching events for group {} (cursor: {})",
                group_id,
                cursor.as_deref().unwrap_or("start")
            );
            let raw = self
                .fetch(
                    queries::GROUP_EVENTS_QUERY,
                    json!({"groupId": group_id, "after": cursor}),
                    Endpoint::Current,
                )
                .await
                .with_context(|| format!("Failed to fetch events for group {}", group_id))?;

            let resp: GraphQlResponse<GroupEventsData> = serde_json::from_value(raw)
                .with_context(|| format!("Invalid events page for group {}", group_id))?;
            let group = resp
                .data
                .and_then(|d| d.group)
                .ok_or_else(|| anyhow!("Group not found: {}", group_id))?;

            event_ids.extend(group.events.edges.into_iter().map(|edge| edge.node.id));

            let Some(page_info) = group.events.page_info else {
                break;
            };
            if !page_info.has_next_page {
                break;
            }
            let next = page_info
                .end_cursor
                .ok_or_else(|| anyhow!("Page for group {} has a next page but no endCursor", group_id))?;
            if cursor.as_deref() == Some(next.as_str()) {
                anyhow::bail!("Pagination for group {} repeated cursor {}", group_id, next);
            }
            cursor = Some(next);
        }

        tracing::debug!("Found {} past events for group {}", event_ids.len(), group_id);
        Ok(event_ids)
    }
}

/// Ids from `<base_dir>/*/ID` markers. Unreadable entries are ignored.
pub fn completed_event_ids(base_dir: &Path) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();
    let entries = match fs::read_dir(base_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", base_dir.display()));
        }
    };

    for entry in entries.flatten() {
        let marker = entry.path().join(MARKER_FILE);
        if let Ok(contents) = fs::read_to_string(&marker) {
            let id = contents.trim();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
    }
    Ok(ids)
}
