//! Static HTML pages rendered with Handlebars. Every value that came
//! from the API goes through the registry's default HTML escaping on
//! the way out, and the templates only branch and loop over prepared
//! views.

use std::fmt;

use anyhow::Result;
use handlebars::{Handlebars, handlebars_helper, html_escape};

use crate::archive::record::EventRecord;
use crate::archive::scan::{ArchiveIndex, Attendee};
use crate::format::pluralize;

pub mod pages;
pub mod views;

use views::{ArchiveIndexView, AttendeeIndexView, AttendeeView, EventView};

// Escapes the text and turns newlines into line breaks. Use with a
// triple-stash so the inserted `<br>` tags survive.
handlebars_helper!(multiline: |text: str| html_escape(text).replace('\n', "<br>\n"));

handlebars_helper!(plural: |count: u64, word: str| pluralize(count, word));

#[derive(Debug)]
pub enum Page {
    EventDetail,
    ArchiveIndex,
    AttendeeIndex,
    AttendeeDetail,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_helper("multiline", Box::new(multiline));
    registry.register_helper("plural", Box::new(plural));
    registry
        .register_partial("styles", pages::STYLES)
        .expect("Failed to register partial");
    registry
        .register_template_string(&Page::EventDetail.to_string(), pages::EVENT_PAGE)
        .expect("Failed to register template");
    registry
        .register_template_string(&Page::ArchiveIndex.to_string(), pages::ARCHIVE_INDEX_PAGE)
        .expect("Failed to register template");
    registry
        .register_template_string(&Page::AttendeeIndex.to_string(), pages::ATTENDEE_INDEX_PAGE)
        .expect("Failed to register template");
    registry
        .register_template_string(&Page::AttendeeDetail.to_string(), pages::ATTENDEE_PAGE)
        .expect("Failed to register template");
    registry
}

pub fn render_event(templates: &Handlebars, record: &EventRecord) -> Result<String> {
    let view = EventView::from_record(record);
    Ok(templates.render(&Page::EventDetail.to_string(), &view)?)
}

pub fn render_archive_index(
    templates: &Handlebars,
    index: &ArchiveIndex,
    archive_title: &str,
) -> Result<String> {
    let view = ArchiveIndexView::new(index, archive_title);
    Ok(templates.render(&Page::ArchiveIndex.to_string(), &view)?)
}

pub fn render_attendee_index(
    templates: &Handlebars,
    attendees: &[Attendee],
    archive_title: &str,
) -> Result<String> {
    let view = AttendeeIndexView::new(attendees, archive_title);
    Ok(templates.render(&Page::AttendeeIndex.to_string(), &view)?)
}

pub fn render_attendee(
    templates: &Handlebars,
    attendee: &Attendee,
    archive_title: &str,
) -> Result<String> {
    let view = AttendeeView::new(attendee, archive_title);
    Ok(templates.render(&Page::AttendeeDetail.to_string(), &view)?)
}
