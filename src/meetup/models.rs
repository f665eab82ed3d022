use serde::Deserialize;
use serde_json::Value;

use crate::archive::record::{Group, Member, Photo, Venue};

/// `{ "data": ... }` envelope returned by both endpoints.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage", default)]
    pub has_next_page: bool,
    #[serde(rename = "startCursor")]
    pub start_cursor: Option<String>,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

// Current endpoint: event metadata

#[derive(Debug, Deserialize)]
pub struct EventQueryData {
    pub event: Option<ApiEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvent {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "dateTime")]
    pub date_time: String,
    pub duration: Option<Value>,
    #[serde(rename = "eventUrl")]
    pub event_url: Option<String>,
    #[serde(rename = "photoAlbum")]
    pub photo_album: Option<ApiPhotoAlbum>,
    pub venues: Option<Vec<Venue>>,
    pub group: Option<Group>,
    pub rsvps: Option<Connection<ApiRsvp>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPhotoAlbum {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "photoCount")]
    pub photo_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRsvp {
    pub id: String,
    pub updated: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "guestsCount")]
    pub guests_count: Option<u32>,
    pub member: Option<Member>,
}

// Current endpoint: group pagination

#[derive(Debug, Deserialize)]
pub struct GroupEventsData {
    #[serde(rename = "groupByUrlname")]
    pub group: Option<ApiGroupEvents>,
}

#[derive(Debug, Deserialize)]
pub struct ApiGroupEvents {
    pub id: Option<String>,
    pub events: Connection<EventNode>,
}

#[derive(Debug, Deserialize)]
pub struct EventNode {
    pub id: String,
}

// Legacy endpoint: photo album sample

#[derive(Debug, Deserialize)]
pub struct LegacyPhotosData {
    pub event: Option<LegacyEvent>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyEvent {
    #[serde(rename = "photoAlbum")]
    pub photo_album: Option<LegacyPhotoAlbum>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyPhotoAlbum {
    #[serde(rename = "photoCount")]
    pub photo_count: Option<u64>,
    #[serde(rename = "photoSample")]
    pub photo_sample: Option<Vec<Photo>>,
}
