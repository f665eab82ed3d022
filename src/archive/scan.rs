//! Offline pass over `downloads/` that rebuilds the archive index and
//! the per-attendee pages from the persisted `event-data.json`
//! records. Nothing here touches the network.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, FixedOffset};
use handlebars::Handlebars;
use itertools::Itertools;

use super::RECORD_FILE;
use super::naming::attendee_file_name;
use super::record::{EventRecord, RsvpStatus, Venue};
use crate::core::{ATTENDEES_DIR, INDEX_FILE};
use crate::format::parse_date_time;
use crate::render;

/// Listing-level view of one archived event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub date_time: String,
    pub date: DateTime<FixedOffset>,
    pub year: i32,
    pub rsvp_count: usize,
    pub photo_count: usize,
    /// Directory name under `downloads/`.
    pub directory: String,
    pub venue: Option<Venue>,
}

impl EventSummary {
    fn from_record(directory: &str, record: &EventRecord) -> Option<Self> {
        let date = parse_date_time(&record.date_time)?;
        Some(Self {
            id: record.id.clone(),
            title: record.title.clone(),
            date_time: record.date_time.clone(),
            date,
            year: date.year(),
            rsvp_count: record.rsvps.len(),
            photo_count: record.photos.len(),
            directory: directory.to_string(),
            venue: record.venue.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attendance {
    pub event: EventSummary,
    pub status: RsvpStatus,
    pub rsvp_date: Option<String>,
}

/// Derived per-member view joined from every event's RSVP list.
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub id: String,
    pub name: String,
    /// Newest event first.
    pub events: Vec<Attendance>,
}

#[derive(Debug, Default)]
pub struct ArchiveIndex {
    /// Newest event first.
    pub events: Vec<EventSummary>,
    /// Most events first; ties broken by name then id.
    pub attendees: Vec<Attendee>,
}

fn newest_first(a: &EventSummary, b: &EventSummary) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then_with(|| b.directory.cmp(&a.directory))
}

impl ArchiveIndex {
    /// Fold `(directory, record)` pairs into summaries and attendee
    /// aggregates. Records whose `dateTime` cannot be parsed are left
    /// out.
    pub fn build(records: &[(String, EventRecord)]) -> Self {
        let mut events = Vec::new();
        let mut by_member: BTreeMap<String, Attendee> = BTreeMap::new();

        for (directory, record) in records {
            let Some(summary) = EventSummary::from_record(directory, record) else {
                tracing::warn!("Skipping {}: unrecognized dateTime {:?}", directory, record.date_time);
                continue;
            };

            for rsvp in &record.rsvps {
                let Some(member) = &rsvp.member else {
                    continue;
                };
                if member.id.is_empty() {
                    continue;
                }
                let attendee = by_member.entry(member.id.clone()).or_insert_with(|| Attendee {
                    id: member.id.clone(),
                    name: member.display_name().to_string(),
                    events: Vec::new(),
                });
                attendee.events.push(Attendance {
                    event: summary.clone(),
                    status: rsvp.response.clone(),
                    rsvp_date: rsvp.created.clone(),
                });
            }

            events.push(summary);
        }

        events.sort_by(newest_first);
        let attendees = by_member
            .into_values()
            .map(|mut attendee| {
                attendee.events.sort_by(|a, b| newest_first(&a.event, &b.event));
                attendee
            })
            .sorted_by(|a, b| {
                b.events
                    .len()
                    .cmp(&a.events.len())
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .collect();

        Self { events, attendees }
    }

    /// Events grouped by year, newest year first; each group keeps the
    /// newest-first order.
    pub fn events_by_year(&self) -> Vec<(i32, Vec<&EventSummary>)> {
        self.events
            .iter()
            .into_group_map_by(|e| e.year)
            .into_iter()
            .sorted_by(|a, b| b.0.cmp(&a.0))
            .collect()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub events: usize,
    pub attendees: usize,
    pub skipped: usize,
}

/// Read every `<downloads_dir>/<dir>/event-data.json` in directory
/// name order. Directories without a record, or with one that fails
/// to parse, are logged and counted as skipped.
pub fn load_records(downloads_dir: &Path) -> Result<(Vec<(String, EventRecord)>, usize)> {
    let entries = fs::read_dir(downloads_dir)
        .with_context(|| format!("Downloads directory not found: {}", downloads_dir.display()))?;
    let dirs: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .sorted()
        .collect();

    let mut records = Vec::new();
    let mut skipped = 0;
    for dir in dirs {
        let path = downloads_dir.join(&dir).join(RECORD_FILE);
        if !path.is_file() {
            tracing::info!("Skipping {} - no {} found", dir, RECORD_FILE);
            skipped += 1;
            continue;
        }
        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|body| serde_json::from_str::<EventRecord>(&body).map_err(Into::into));
        match parsed {
            Ok(record) => {
                tracing::info!(
                    "Processed: {} ({}) - {} RSVPs",
                    record.title,
                    record.date_time,
                    record.rsvps.len()
                );
                records.push((dir, record));
            }
            Err(err) => {
                tracing::warn!("Error processing {}: {:#}", dir, err);
                skipped += 1;
            }
        }
    }
    Ok((records, skipped))
}

/// Regenerate `index.html` and `attendees/` under `output_dir` from
/// the records in `downloads_dir`. Every run rewrites all pages.
pub fn scan_archive(
    templates: &Handlebars,
    downloads_dir: &Path,
    output_dir: &Path,
    archive_title: &str,
) -> Result<ScanReport> {
    tracing::info!("Scanning events in {}", downloads_dir.display());
    let (records, skipped_dirs) = load_records(downloads_dir)?;
    let index = ArchiveIndex::build(&records);
    let skipped = skipped_dirs + (records.len() - index.events.len());

    tracing::info!(
        "Found {} events with {} unique attendees",
        index.events.len(),
        index.attendees.len()
    );

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let index_path = output_dir.join(INDEX_FILE);
    fs::write(&index_path, render::render_archive_index(templates, &index, archive_title)?)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    let attendees_dir = output_dir.join(ATTENDEES_DIR);
    fs::create_dir_all(&attendees_dir)
        .with_context(|| format!("Failed to create {}", attendees_dir.display()))?;
    fs::write(
        attendees_dir.join(INDEX_FILE),
        render::render_attendee_index(templates, &index.attendees, archive_title)?,
    )
    .context("Failed to write attendee index")?;
    for attendee in &index.attendees {
        let page_path = attendees_dir.join(attendee_file_name(&attendee.id));
        fs::write(&page_path, render::render_attendee(templates, attendee, archive_title)?)
            .with_context(|| format!("Failed to write {}", page_path.display()))?;
    }
    tracing::info!("Generated {} attendee pages", index.attendees.len());

    Ok(ScanReport {
        events: index.events.len(),
        attendees: index.attendees.len(),
        skipped,
    })
}
