//! Serializable page contexts. All formatting decisions happen here so
//! the templates stay declarative; nothing in this module mutates the
//! records it reads.

use serde::Serialize;

use crate::archive::naming::attendee_file_name;
use crate::archive::record::{EventRecord, Rsvp};
use crate::archive::scan::{ArchiveIndex, Attendance, Attendee, EventSummary};
use crate::format::{format_date, format_date_time, format_duration, parse_date_time};

const UNTITLED_EVENT: &str = "Meetup Event";

#[derive(Debug, Serialize)]
pub struct EventView {
    pub title: String,
    pub date_time: String,
    pub duration: Option<String>,
    pub venue: Option<VenueView>,
    pub group_name: Option<String>,
    pub event_url: Option<String>,
    pub description: Option<String>,
    pub photo_total: u64,
    pub photos_len: usize,
    pub photos: Vec<PhotoView>,
    pub rsvps_len: usize,
    pub rsvps: Vec<RsvpView>,
    pub comments_len: usize,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Serialize)]
pub struct VenueView {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoView {
    pub id: String,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct RsvpView {
    pub member_name: String,
    pub status: String,
    pub status_class: String,
    pub date: String,
    pub guests: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub member_name: String,
    pub date: String,
    pub text: String,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn guests_label(guests: Option<u32>) -> Option<String> {
    match guests {
        Some(0) | None => None,
        Some(1) => Some(String::from("+1 guest")),
        Some(n) => Some(format!("+{} guests", n)),
    }
}

fn rsvp_view(rsvp: &Rsvp) -> RsvpView {
    RsvpView {
        member_name: rsvp
            .member
            .as_ref()
            .map(|m| m.display_name().to_string())
            .unwrap_or_else(|| String::from("Anonymous")),
        status: rsvp.response.to_string(),
        status_class: rsvp.response.css_class(),
        date: format_date_time(rsvp.created.as_deref()),
        guests: guests_label(rsvp.guests),
    }
}

impl EventView {
    pub fn from_record(record: &EventRecord) -> Self {
        // Newest RSVP first; undated ones sink to the bottom.
        let mut rsvps: Vec<&Rsvp> = record.rsvps.iter().collect();
        rsvps.sort_by_key(|r| {
            std::cmp::Reverse(r.created.as_deref().and_then(parse_date_time))
        });

        let photos = record
            .photos
            .iter()
            .filter_map(|p| {
                p.file_name().map(|file_name| PhotoView {
                    id: p.id.clone(),
                    file_name,
                })
            })
            .collect();

        let comments = record
            .comments
            .iter()
            .map(|c| CommentView {
                member_name: c
                    .member
                    .as_ref()
                    .map(|m| m.display_name().to_string())
                    .unwrap_or_else(|| String::from("Anonymous")),
                date: format_date_time(c.created.as_deref()),
                text: c.text.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            title: non_blank(Some(record.title.as_str())).unwrap_or_else(|| UNTITLED_EVENT.to_string()),
            date_time: format_date_time(Some(record.date_time.as_str())),
            duration: record.duration.as_ref().and_then(format_duration),
            venue: record.venue.as_ref().map(|v| VenueView {
                name: v.name.clone().unwrap_or_default(),
                address: v.address_line(),
            }),
            group_name: record.group.as_ref().and_then(|g| non_blank(g.name.as_deref())),
            event_url: non_blank(record.event_url.as_deref()),
            description: non_blank(record.description.as_deref()),
            photo_total: record.photo_count,
            photos_len: record.photos.len(),
            photos,
            rsvps_len: record.rsvps.len(),
            rsvps: rsvps.into_iter().map(rsvp_view).collect(),
            comments_len: record.comments.len(),
            comments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventRowView {
    pub date: String,
    pub directory: String,
    pub title: String,
    pub venue_name: Option<String>,
    pub rsvp_count: usize,
    pub photo_count: usize,
}

impl EventRowView {
    fn new(summary: &EventSummary) -> Self {
        Self {
            date: format_date(&summary.date_time),
            directory: summary.directory.clone(),
            title: non_blank(Some(summary.title.as_str())).unwrap_or_else(|| UNTITLED_EVENT.to_string()),
            venue_name: summary
                .venue
                .as_ref()
                .and_then(|v| non_blank(v.name.as_deref())),
            rsvp_count: summary.rsvp_count,
            photo_count: summary.photo_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct YearView {
    pub year: i32,
    pub count: usize,
    pub events: Vec<EventRowView>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveIndexView {
    pub archive_title: String,
    pub total_events: usize,
    pub total_rsvps: usize,
    pub total_photos: usize,
    pub years_active: usize,
    pub years: Vec<YearView>,
}

impl ArchiveIndexView {
    pub fn new(index: &ArchiveIndex, archive_title: &str) -> Self {
        let years: Vec<YearView> = index
            .events_by_year()
            .into_iter()
            .map(|(year, events)| YearView {
                year,
                count: events.len(),
                events: events.into_iter().map(EventRowView::new).collect(),
            })
            .collect();

        Self {
            archive_title: archive_title.to_string(),
            total_events: index.events.len(),
            total_rsvps: index.events.iter().map(|e| e.rsvp_count).sum(),
            total_photos: index.events.iter().map(|e| e.photo_count).sum(),
            years_active: years.len(),
            years,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendeeRowView {
    pub file_name: String,
    pub name: String,
    pub event_count: usize,
}

#[derive(Debug, Serialize)]
pub struct AttendeeIndexView {
    pub archive_title: String,
    pub count: usize,
    pub attendees: Vec<AttendeeRowView>,
}

impl AttendeeIndexView {
    pub fn new(attendees: &[Attendee], archive_title: &str) -> Self {
        Self {
            archive_title: archive_title.to_string(),
            count: attendees.len(),
            attendees: attendees
                .iter()
                .map(|a| AttendeeRowView {
                    file_name: attendee_file_name(&a.id),
                    name: a.name.clone(),
                    event_count: a.events.len(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceView {
    pub event: EventRowView,
    pub status: String,
    pub status_class: String,
    pub rsvp_date: String,
}

impl AttendanceView {
    fn new(attendance: &Attendance) -> Self {
        Self {
            event: EventRowView::new(&attendance.event),
            status: attendance.status.to_string(),
            status_class: attendance.status.css_class(),
            rsvp_date: format_date_time(attendance.rsvp_date.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendeeView {
    pub archive_title: String,
    pub name: String,
    pub event_count: usize,
    pub events: Vec<AttendanceView>,
}

impl AttendeeView {
    pub fn new(attendee: &Attendee, archive_title: &str) -> Self {
        Self {
            archive_title: archive_title.to_string(),
            name: attendee.name.clone(),
            event_count: attendee.events.len(),
            events: attendee.events.iter().map(AttendanceView::new).collect(),
        }
    }
}
