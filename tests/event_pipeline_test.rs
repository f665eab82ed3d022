//! Integration tests for the single-event archive pipeline

mod test_utils;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use mockito::{Matcher, Server};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use meetup_archive::archive::{Archiver, EventRecord, scan_archive};
    use meetup_archive::core::NoDelay;
    use meetup_archive::render;

    use crate::test_utils::{MarkerProbe, fixture, test_config};

    const EVENT_DIR: &str = "20230304-griffith-park-hike";

    fn event_body(event_id: &str) -> Matcher {
        Matcher::PartialJson(json!({"variables": {"eventId": event_id}}))
    }

    /// Archives an event end to end: JSON artifacts, photos, page and
    /// marker, with the marker absent at every throttle wait
    #[tokio::test]
    async fn it_archives_an_event_and_writes_marker_last() {
        let mut server = Server::new_async().await;
        let url = server.url();
        let event_mock = server
            .mock("POST", "/gql-ext")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fixture("event_e1.json", &url))
            .expect(1)
            .create_async()
            .await;
        let photos_mock = server
            .mock("POST", "/gql")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fixture("photos_e1.json", &url))
            .expect(1)
            .create_async()
            .await;
        let p1 = server
            .mock("GET", "/photos/p1.jpg")
            .with_status(200)
            .with_body("jpeg-bytes")
            .expect(1)
            .create_async()
            .await;
        let p2 = server
            .mock("GET", Matcher::Regex(r"^/photos/p2\.png".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("png-bytes")
            .expect(1)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&url, temp_dir.path());
        let base = config.downloads_path();
        let probe = Arc::new(MarkerProbe::new(base.join(EVENT_DIR).join("ID")));
        let archiver = Archiver::new(&config, probe.clone()).unwrap();

        let archived = archiver.archive_event("e1", &base).await.unwrap();

        event_mock.assert_async().await;
        photos_mock.assert_async().await;
        p1.assert_async().await;
        p2.assert_async().await;

        // Event query, legacy query, then one wait per photo
        assert_eq!(probe.waits(), vec![false; 4]);

        let dir = base.join(EVENT_DIR);
        assert_eq!(archived.directory, dir);
        assert_eq!(archived.photos_fetched, 2);
        assert_eq!(fs::read_to_string(dir.join("ID")).unwrap(), "e1");

        let raw: Value = serde_json::from_str(&fs::read_to_string(dir.join("raw.json")).unwrap()).unwrap();
        assert_eq!(raw["event"]["data"]["event"]["id"], "e1");
        assert_eq!(raw["legacyPhotos"]["data"]["event"]["photoAlbum"]["photoCount"], 12);

        let record: EventRecord =
            serde_json::from_str(&fs::read_to_string(dir.join("event-data.json")).unwrap()).unwrap();
        assert_eq!(record.title, "Griffith Park Hike");
        assert_eq!(
            record.venue.as_ref().and_then(|v| v.name.as_deref()),
            Some("Griffith Observatory")
        );
        assert_eq!(record.photo_count, 12);
        assert_eq!(record.photos.len(), 2);
        assert_eq!(record.rsvps.len(), 2);
        assert!(record.comments.is_empty());

        assert_eq!(fs::read(dir.join("photos").join("photo-p1.jpg")).unwrap(), b"jpeg-bytes");
        assert_eq!(fs::read(dir.join("photos").join("photo-p2.png")).unwrap(), b"png-bytes");

        let page = fs::read_to_string(dir.join("index.html")).unwrap();
        assert!(page.contains("<title>Griffith Park Hike</title>"));
        assert!(page.contains("Bring water &amp; snacks."));
        assert!(page.contains("photos/photo-p2.png"));
        assert!(page.contains("3 hours"));

        // The archived event feeds straight into the scanner
        let report = scan_archive(
            &render::templates(),
            &base,
            temp_dir.path(),
            &config.archive_title,
        )
        .unwrap();
        assert_eq!(report.events, 1);
        assert_eq!(report.attendees, 2);
        let index = fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
        assert!(index.contains("downloads/20230304-griffith-park-hike/"));
    }

    /// Re-running an event re-queries the API but skips photos that
    /// are already on disk
    #[tokio::test]
    async fn it_skips_existing_photos_on_rerun() {
        let mut server = Server::new_async().await;
        let url = server.url();
        let event_mock = server
            .mock("POST", "/gql-ext")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_body(fixture("event_e1.json", &url))
            .expect(2)
            .create_async()
            .await;
        server
            .mock("POST", "/gql")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_body(fixture("photos_e1.json", &url))
            .create_async()
            .await;
        let p1 = server
            .mock("GET", "/photos/p1.jpg")
            .with_status(200)
            .with_body("jpeg-bytes")
            .expect(1)
            .create_async()
            .await;
        let p2 = server
            .mock("GET", Matcher::Regex(r"^/photos/p2\.png".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("png-bytes")
            .expect(1)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&url, temp_dir.path());
        let archiver = Archiver::new(&config, Arc::new(NoDelay)).unwrap();
        let base = config.downloads_path();

        archiver.archive_event("e1", &base).await.unwrap();
        let second = archiver.archive_event("e1", &base).await.unwrap();

        event_mock.assert_async().await;
        p1.assert_async().await;
        p2.assert_async().await;
        assert_eq!(second.photos_fetched, 0);
        assert_eq!(second.photos_skipped, 2);
    }

    /// One photo failing to download is counted and the event still
    /// completes with the other photo and its marker
    #[tokio::test]
    async fn it_completes_when_one_photo_fails() {
        let mut server = Server::new_async().await;
        let url = server.url();
        server
            .mock("POST", "/gql-ext")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_body(fixture("event_e1.json", &url))
            .create_async()
            .await;
        server
            .mock("POST", "/gql")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_body(fixture("photos_e1.json", &url))
            .create_async()
            .await;
        server
            .mock("GET", "/photos/p1.jpg")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", Matcher::Regex(r"^/photos/p2\.png".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("png-bytes")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&url, temp_dir.path());
        let archiver = Archiver::new(&config, Arc::new(NoDelay)).unwrap();
        let base = config.downloads_path();

        let archived = archiver.archive_event("e1", &base).await.unwrap();

        assert_eq!(archived.photos_failed, 1);
        assert_eq!(archived.photos_fetched, 1);
        let photos = base.join(EVENT_DIR).join("photos");
        assert!(!photos.join("photo-p1.jpg").exists());
        assert_eq!(fs::read(photos.join("photo-p2.png")).unwrap(), b"png-bytes");
        assert_eq!(fs::read_to_string(base.join(EVENT_DIR).join("ID")).unwrap(), "e1");
    }

    /// A failing legacy photo query degrades to an event without photos
    #[tokio::test]
    async fn it_archives_without_photos_when_legacy_query_fails() {
        let mut server = Server::new_async().await;
        let url = server.url();
        server
            .mock("POST", "/gql-ext")
            .match_body(event_body("e1"))
            .with_status(200)
            .with_body(fixture("event_e1.json", &url))
            .create_async()
            .await;
        server
            .mock("POST", "/gql")
            .with_status(500)
            .with_body("legacy down")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&url, temp_dir.path());
        let archiver = Archiver::new(&config, Arc::new(NoDelay)).unwrap();
        let base = config.downloads_path();

        let archived = archiver.archive_event("e1", &base).await.unwrap();

        assert!(archived.record.photos.is_empty());
        assert_eq!(archived.record.photo_count, 12);
        let dir = base.join(EVENT_DIR);
        assert!(dir.join("ID").is_file());
        let raw: Value = serde_json::from_str(&fs::read_to_string(dir.join("raw.json")).unwrap()).unwrap();
        assert!(raw["legacyPhotos"].is_null());
    }

    /// A failing event query is fatal and leaves nothing on disk
    #[tokio::test]
    async fn it_fails_when_event_query_fails() {
        let mut server = Server::new_async().await;
        let url = server.url();
        server
            .mock("POST", "/gql-ext")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;
        let legacy = server
            .mock("POST", "/gql")
            .expect(0)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&url, temp_dir.path());
        let archiver = Archiver::new(&config, Arc::new(NoDelay)).unwrap();
        let base = config.downloads_path();

        let err = archiver.archive_event("e1", &base).await.unwrap_err();

        assert!(format!("{:#}", err).contains("GraphQL query failed"));
        legacy.assert_async().await;
        assert!(!base.join(EVENT_DIR).exists());
    }

    /// An event missing from the response is reported as not found
    #[tokio::test]
    async fn it_fails_when_event_is_missing() {
        let mut server = Server::new_async().await;
        let url = server.url();
        server
            .mock("POST", "/gql-ext")
            .with_status(200)
            .with_body(r#"{"data": {"event": null}}"#)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&url, temp_dir.path());
        let archiver = Archiver::new(&config, Arc::new(NoDelay)).unwrap();

        let err = archiver
            .archive_event("missing", &config.downloads_path())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Event not found"));
    }
}
