//! GraphQL documents sent to the current and legacy endpoints.

/// Event metadata from the current endpoint. Comments are not
/// requested; the field was removed from the current schema.
pub const EVENT_QUERY: &str = r"
query($eventId: ID!) {
    event(id: $eventId) {
        id
        title
        description
        dateTime
        duration
        eventUrl
        photoAlbum {
            id
            title
            photoCount
        }
        featuredEventPhoto {
            id
            baseUrl
            highResUrl
            standardUrl
            thumbUrl
        }
        venues {
            id
            name
            address
            city
            state
            postalCode
        }
        group {
            id
            name
            urlname
        }
        rsvps(first: 100) {
            edges {
                node {
                    id
                    updated
                    status
                    guestsCount
                    member {
                        id
                        name
                    }
                }
            }
        }
    }
}
";

/// One page of past event ids for a group. `$after` is null for the
/// first page.
pub const GROUP_EVENTS_QUERY: &str = r"
query($groupId: String!, $after: String) {
    groupByUrlname(urlname: $groupId) {
        id
        events(after: $after, status: PAST) {
            pageInfo {
                hasNextPage
                startCursor
                endCursor
            }
            edges {
                node {
                    id
                }
            }
        }
    }
}
";

/// Photo sample for an event's album on the legacy endpoint. A
/// `photos.graphql` file in the storage directory replaces this
/// document when present.
pub const LEGACY_PHOTOS_QUERY: &str = r"
query($eventId: ID) {
    event(id: $eventId) {
        photoAlbum {
            photoCount
            photoSample(amount: 1000) {
                id
                source
            }
        }
    }
}
";
