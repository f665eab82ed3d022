//! Filesystem names derived from API data.

use std::path::Path;

use anyhow::{Result, anyhow};
use reqwest::Url;

use crate::format::parse_date_time;

const DEFAULT_PHOTO_EXTENSION: &str = ".jpg";

/// `YYYYMMDD-<slug>` where the date is the calendar day in the
/// timestamp's own offset and the slug keeps only `[a-z0-9]` runs of
/// the title joined by single hyphens. A title with nothing left
/// after cleaning yields the bare date.
pub fn event_directory_name(date_time: &str, title: &str) -> Result<String> {
    let dt = parse_date_time(date_time)
        .ok_or_else(|| anyhow!("Unrecognized event dateTime: {:?}", date_time))?;
    let date = dt.format("%Y%m%d").to_string();
    let slug = slugify(title);
    if slug.is_empty() {
        Ok(date)
    } else {
        Ok(format!("{}-{}", date, slug))
    }
}

pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_sep = false;
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = true;
        }
        // Punctuation and non-ASCII letters are dropped without
        // splitting the surrounding word.
    }
    slug
}

/// `photo-<id><ext>` with the extension taken from the URL path.
pub fn photo_file_name(photo_id: &str, url: &str) -> String {
    let ext = Url::parse(url)
        .ok()
        .and_then(|u| {
            let path = u.path().to_string();
            Path::new(&path)
                .extension()
                .and_then(|e| e.to_str())
                .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
                .map(|e| format!(".{}", e))
        })
        .unwrap_or_else(|| DEFAULT_PHOTO_EXTENSION.to_string());
    format!("photo-{}{}", sanitize_file_stem(photo_id), ext)
}

/// Page name for an attendee, safe to join onto the attendees directory.
pub fn attendee_file_name(member_id: &str) -> String {
    format!("{}.html", sanitize_file_stem(member_id))
}

/// Keeps `[A-Za-z0-9-]` and writes every other byte as `_XX` hex, `_`
/// included, so distinct ids never share a stem.
fn sanitize_file_stem(id: &str) -> String {
    if id.is_empty() {
        return String::from("_");
    }
    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{:02X}", byte));
        }
    }
    stem
}
