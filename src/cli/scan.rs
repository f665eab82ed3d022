use std::path::Path;

use anyhow::Result;

use crate::archive::scan_archive;
use crate::core::AppConfig;
use crate::render;

pub fn run(config: &AppConfig) -> Result<()> {
    let report = scan_archive(
        &render::templates(),
        &config.downloads_path(),
        Path::new(&config.storage_path),
        &config.archive_title,
    )?;

    println!("Generated {}", config.index_path().display());
    println!(
        "Generated {} with {} attendee pages",
        config.attendees_path().display(),
        report.attendees
    );
    println!(
        "{} events indexed, {} directories skipped",
        report.events, report.skipped
    );
    Ok(())
}
