//! The normalized event record persisted as `event-data.json`. Field
//! names are camelCase so archives written by earlier tooling still
//! load.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::archive::naming::photo_file_name;
use crate::meetup::{ApiEvent, ApiRsvp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date_time: String,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub event_url: Option<String>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
    /// Album total reported by the API, which can exceed `photos.len()`.
    #[serde(default)]
    pub photo_count: u64,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl EventRecord {
    /// Merge the current-endpoint event with the legacy photo sample.
    pub fn from_api(event: ApiEvent, photos: Vec<Photo>) -> Self {
        let ApiEvent {
            id,
            title,
            description,
            date_time,
            duration,
            event_url,
            photo_album,
            venues,
            group,
            rsvps,
        } = event;

        let rsvps = rsvps
            .map(|conn| conn.edges.into_iter().map(|edge| Rsvp::from(edge.node)).collect())
            .unwrap_or_default();

        Self {
            id,
            title: title.unwrap_or_default(),
            description,
            date_time,
            duration,
            event_url,
            venue: venues.and_then(|v| v.into_iter().next()),
            group,
            comments: Vec::new(),
            rsvps,
            photo_count: photo_album.and_then(|album| album.photo_count).unwrap_or(0),
            photos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Member {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl Venue {
    /// Street, city, state and postal code joined with commas,
    /// skipping the parts that are missing or blank.
    pub fn address_line(&self) -> String {
        [&self.address, &self.city, &self.state, &self.postal_code]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub urlname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsvp {
    pub id: String,
    /// Taken from the API's `updated` timestamp.
    #[serde(default)]
    pub created: Option<String>,
    pub response: RsvpStatus,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub member: Option<Member>,
}

impl From<ApiRsvp> for Rsvp {
    fn from(node: ApiRsvp) -> Self {
        Self {
            id: node.id,
            created: node.updated,
            response: node.status.map(RsvpStatus::from).unwrap_or(RsvpStatus::Other(String::new())),
            guests: node.guests_count,
            member: node.member,
        }
    }
}

/// RSVP response kinds. Values the API adds later are kept verbatim
/// in `Other` so records round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RsvpStatus {
    Yes,
    No,
    Waitlist,
    Attended,
    NoShow,
    Other(String),
}

impl RsvpStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Waitlist => "WAITLIST",
            Self::Attended => "ATTENDED",
            Self::NoShow => "NO_SHOW",
            Self::Other(s) => s,
        }
    }

    /// Lowercase form used as a CSS class suffix.
    pub fn css_class(&self) -> String {
        self.as_str().to_lowercase().replace('_', "-")
    }
}

impl From<String> for RsvpStatus {
    fn from(value: String) -> Self {
        match value.to_uppercase().as_str() {
            "YES" => Self::Yes,
            "NO" => Self::No,
            "WAITLIST" => Self::Waitlist,
            "ATTENDED" => Self::Attended,
            "NO_SHOW" | "NOSHOW" => Self::NoShow,
            _ => Self::Other(value),
        }
    }
}

impl From<RsvpStatus> for String {
    fn from(status: RsvpStatus) -> String {
        status.as_str().to_string()
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub member: Option<Member>,
}

/// A photo from either endpoint. The image URL field name differs by
/// API version; unknown fields are kept so the record stays a
/// faithful copy of what was returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_res_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Photo {
    /// First non-empty of `source` (legacy), then `highResUrl`,
    /// `standardUrl` and `baseUrl` (current). This order is a
    /// compatibility shim for the two API versions, not a documented
    /// contract.
    pub fn url(&self) -> Option<&str> {
        [&self.source, &self.high_res_url, &self.standard_url, &self.base_url]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| !u.trim().is_empty())
    }

    /// `photo-<id><ext>`, or `None` when the photo has no URL.
    pub fn file_name(&self) -> Option<String> {
        self.url().map(|url| photo_file_name(&self.id, url))
    }
}
