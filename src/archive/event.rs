use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};

use super::naming::event_directory_name;
use super::record::{EventRecord, Photo};
use super::{
    Archiver, DownloadOutcome, MARKER_FILE, PAGE_FILE, PHOTOS_DIR, RAW_FILE, RECORD_FILE,
    write_json,
};
use crate::meetup::{
    ApiEvent, Endpoint, EventQueryData, GraphQlResponse, LegacyPhotosData, queries,
};
use crate::render;

#[derive(Debug)]
pub struct ArchivedEvent {
    pub directory: PathBuf,
    pub record: EventRecord,
    pub photos_fetched: usize,
    pub photos_skipped: usize,
    pub photos_failed: usize,
}

impl Archiver {
    /// Fetch one event and persist it under `base_dir`.
    ///
    /// Order on disk: `raw.json`, `event-data.json`, photos,
    /// `index.html`, then the `ID` completion marker. A failure
    /// fetching the event itself aborts; legacy photo lookups and
    /// individual photo downloads degrade to fewer photos.
    pub async fn archive_event(&self, event_id: &str, base_dir: &Path) -> Result<ArchivedEvent> {
        tracing::debug!("Fetching event data for event ID: {}", event_id);
        let raw_event = self
            .fetch(queries::EVENT_QUERY, json!({"eventId": event_id}), Endpoint::Current)
            .await
            .with_context(|| format!("Failed to fetch event {}", event_id))?;
        let event = parse_event(&raw_event)?;

        let (photos, raw_photos) = self.fetch_legacy_photos(event_id).await;

        let dir_name = event_directory_name(&event.date_time, event.title.as_deref().unwrap_or(""))?;
        let output_dir = base_dir.join(dir_name);
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let record = EventRecord::from_api(event, photos);

        write_json(
            &output_dir.join(RAW_FILE),
            &json!({"event": raw_event, "legacyPhotos": raw_photos}),
        )?;
        write_json(&output_dir.join(RECORD_FILE), &record)?;
        tracing::debug!("Event data saved to {}", output_dir.join(RECORD_FILE).display());

        let (photos_fetched, photos_skipped, photos_failed) =
            self.download_photos(&record, &output_dir).await?;

        let page = render::render_event(&self.templates, &record)?;
        let page_path = output_dir.join(PAGE_FILE);
        fs::write(&page_path, page)
            .with_context(|| format!("Failed to write {}", page_path.display()))?;

        let archived = ArchivedEvent {
            directory: output_dir,
            record,
            photos_fetched,
            photos_skipped,
            photos_failed,
        };
        self.log_summary(&archived);

        let marker_path = archived.directory.join(MARKER_FILE);
        fs::write(&marker_path, event_id)
            .with_context(|| format!("Failed to write {}", marker_path.display()))?;

        Ok(archived)
    }

    /// Photo sample from the legacy endpoint. Any failure is logged and
    /// yields no photos. Returns the photos and the raw response.
    async fn fetch_legacy_photos(&self, event_id: &str) -> (Vec<Photo>, Option<Value>) {
        tracing::debug!("Fetching photos from legacy API for event ID: {}", event_id);
        let raw = match self
            .fetch(&self.photos_query, json!({"eventId": event_id}), Endpoint::Legacy)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Error fetching photos from legacy API: {:#}", err);
                return (Vec::new(), None);
            }
        };

        let parsed: Result<GraphQlResponse<LegacyPhotosData>, _> =
            serde_json::from_value(raw.clone());
        let photos = match parsed {
            Ok(resp) => resp
                .data
                .and_then(|d| d.event)
                .and_then(|e| e.photo_album)
                .and_then(|album| album.photo_sample),
            Err(err) => {
                tracing::warn!("Unexpected legacy photo response shape: {}", err);
                None
            }
        };

        match photos {
            Some(photos) => (photos, Some(raw)),
            None => {
                tracing::warn!("No photos found in legacy API response for {}", event_id);
                (Vec::new(), Some(raw))
            }
        }
    }

    /// Download every photo in order. Per-photo failures are logged and
    /// counted; they never abort the loop.
    async fn download_photos(
        &self,
        record: &EventRecord,
        output_dir: &Path,
    ) -> Result<(usize, usize, usize)> {
        let photos_dir = output_dir.join(PHOTOS_DIR);
        fs::create_dir_all(&photos_dir)
            .with_context(|| format!("Failed to create {}", photos_dir.display()))?;

        let total = record.photos.len();
        tracing::info!("Downloading {} photos... [{}]", total, output_dir.display());

        let (mut fetched, mut skipped, mut failed) = (0, 0, 0);
        for (seq, photo) in record.photos.iter().enumerate() {
            if !self.verbose {
                print!("\rimage {} of {}", seq + 1, total);
                let _ = io::stdout().flush();
            }
            let (Some(url), Some(file_name)) = (photo.url(), photo.file_name()) else {
                tracing::warn!("Photo {} has no URL, skipping", photo.id);
                skipped += 1;
                continue;
            };
            match self.downloader.download(url, &photos_dir.join(&file_name)).await {
                Ok(DownloadOutcome::Fetched(bytes)) => {
                    tracing::debug!("Downloaded: {} ({} bytes)", file_name, bytes);
                    fetched += 1;
                }
                Ok(DownloadOutcome::Skipped) => skipped += 1,
                Err(err) => {
                    tracing::warn!("Failed to download photo {}: {:#}", photo.id, err);
                    failed += 1;
                }
            }
        }
        if !self.verbose {
            println!("\rfinished downloading {} photos!", total);
        }

        Ok((fetched, skipped, failed))
    }

    fn log_summary(&self, archived: &ArchivedEvent) {
        let record = &archived.record;
        if self.verbose {
            tracing::info!("Event: {}", record.title);
            tracing::info!(
                "Description length: {} characters",
                record.description.as_deref().map(|d| d.chars().count()).unwrap_or(0)
            );
            tracing::info!("Comments: {}", record.comments.len());
            tracing::info!("RSVPs: {}", record.rsvps.len());
            tracing::info!(
                "Photos: {} ({} fetched, {} already present, {} failed)",
                record.photos.len(),
                archived.photos_fetched,
                archived.photos_skipped,
                archived.photos_failed
            );
            tracing::info!("Output directory: {}", archived.directory.display());
        } else {
            println!(
                "{}: {} ({} images)",
                archived.directory.display(),
                record.title,
                record.photos.len()
            );
        }
    }
}

fn parse_event(raw: &Value) -> Result<ApiEvent> {
    let resp: GraphQlResponse<EventQueryData> = serde_json::from_value(raw.clone())
        .context("Event not found or invalid response")?;
    resp.data
        .and_then(|d| d.event)
        .ok_or_else(|| anyhow!("Event not found or invalid response"))
}
