//! Tests for the remote lookup source.
//!
//! A wiremock server stands in for the lookup service, including the host
//! serving cover art.

use cantata_sources::{LoadError, LookupClient, LookupConfig, LookupSource, LookupStep, SongSource};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SONG_ID: u64 = 42;
const COVER_BYTES: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn create_temp_audio_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    file.write_all(b"fake audio content").unwrap();
    file
}

fn client_for(server: &MockServer) -> LookupClient {
    LookupClient::new(LookupConfig::new(server.uri())).unwrap()
}

async fn mount_detail(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/song/detail"))
        .and(query_param("c", "[{id: 42}]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn song_detail(server: &MockServer) -> serde_json::Value {
    serde_json::json!({
        "songs": [{
            "name": "Song",
            "ar": [{"name": "Artist"}, {"name": "Featured"}],
            "al": {"name": "Album", "picUrl": format!("{}/covers/42.jpg", server.uri())}
        }],
        "code": 200
    })
}

async fn mount_lyrics(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/song/media"))
        .and(query_param("id", "42"))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({"lyric": "la la"})),
        )
        .mount(server)
        .await;
}

async fn mount_cover(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/covers/42.jpg"))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(COVER_BYTES.to_vec()))
        .mount(server)
        .await;
}

mod success {
    use super::*;

    #[tokio::test]
    async fn test_bundle_matches_lookup_data() {
        let server = MockServer::start().await;
        mount_detail(&server, song_detail(&server)).await;
        mount_lyrics(&server, 200).await;
        mount_cover(&server, 200).await;
        let audio = create_temp_audio_file();

        let bundle = client_for(&server)
            .load_from_remote(SONG_ID, audio.path())
            .await
            .unwrap();

        assert_eq!(bundle.name, "Song");
        assert_eq!(bundle.singer, "Artist");
        assert_eq!(bundle.album, "Album");
        assert_eq!(bundle.lyrics_text, "la la");
        assert_eq!(bundle.cover_image_raw, COVER_BYTES);
        assert_eq!(bundle.audio_file_path, audio.path());
        assert!(!bundle.multiline);
    }

    #[tokio::test]
    async fn test_relative_pic_url() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            serde_json::json!({
                "songs": [{
                    "name": "Song",
                    "ar": [{"name": "Artist"}],
                    "al": {"name": "Album", "picUrl": "/covers/42.jpg"}
                }]
            }),
        )
        .await;
        mount_lyrics(&server, 200).await;
        mount_cover(&server, 200).await;
        let audio = create_temp_audio_file();

        let bundle = client_for(&server)
            .load_from_remote(SONG_ID, audio.path())
            .await
            .unwrap();
        assert_eq!(bundle.cover_image_raw, COVER_BYTES);
    }

    #[tokio::test]
    async fn test_missing_lyrics_are_empty() {
        let server = MockServer::start().await;
        mount_detail(&server, song_detail(&server)).await;
        Mock::given(method("GET"))
            .and(path("/api/song/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 200})))
            .mount(&server)
            .await;
        mount_cover(&server, 200).await;
        let audio = create_temp_audio_file();

        let bundle = client_for(&server)
            .load_from_remote(SONG_ID, audio.path())
            .await
            .unwrap();
        assert!(bundle.lyrics_text.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_source() {
        let server = MockServer::start().await;
        mount_detail(&server, song_detail(&server)).await;
        mount_lyrics(&server, 200).await;
        mount_cover(&server, 200).await;
        let audio = create_temp_audio_file();

        let source = LookupSource::new(client_for(&server), SONG_ID, audio.path());
        assert!(source.describe().contains("42"));

        let bundle = source.load().await.unwrap();
        assert_eq!(bundle.name, "Song");
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_missing_audio_file_checked_before_network() {
        let server = MockServer::start().await;
        mount_detail(&server, song_detail(&server)).await;

        let result = client_for(&server)
            .load_from_remote(SONG_ID, std::path::Path::new("/nonexistent/song.mp3"))
            .await;

        match result {
            Err(LoadError::FileNotFound { path, .. }) => {
                assert!(path.to_string_lossy().contains("nonexistent"))
            }
            other => panic!("Expected FileNotFound, got: {:?}", other),
        }
        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_metadata_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/song/detail"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let audio = create_temp_audio_file();

        let result = client_for(&server).load_from_remote(SONG_ID, audio.path()).await;
        match result {
            Err(LoadError::RemoteLookup { step, status }) => {
                assert_eq!(step, LookupStep::Metadata);
                assert_eq!(status, 404);
            }
            other => panic!("Expected RemoteLookup, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lyrics_status() {
        let server = MockServer::start().await;
        mount_detail(&server, song_detail(&server)).await;
        mount_lyrics(&server, 500).await;
        let audio = create_temp_audio_file();

        let result = client_for(&server).load_from_remote(SONG_ID, audio.path()).await;
        match result {
            Err(LoadError::RemoteLookup { step, status }) => {
                assert_eq!(step, LookupStep::Lyrics);
                assert_eq!(status, 500);
            }
            other => panic!("Expected RemoteLookup, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cover_status() {
        let server = MockServer::start().await;
        mount_detail(&server, song_detail(&server)).await;
        mount_lyrics(&server, 200).await;
        mount_cover(&server, 403).await;
        let audio = create_temp_audio_file();

        let result = client_for(&server).load_from_remote(SONG_ID, audio.path()).await;
        match result {
            Err(LoadError::RemoteLookup { step, status }) => {
                assert_eq!(step, LookupStep::Cover);
                assert_eq!(status, 403);
            }
            other => panic!("Expected RemoteLookup, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/song/detail"))
            .respond_with(ResponseTemplate::new(203).set_body_json(song_detail(&server)))
            .mount(&server)
            .await;
        let audio = create_temp_audio_file();

        let result = client_for(&server).load_from_remote(SONG_ID, audio.path()).await;
        assert!(matches!(
            result,
            Err(LoadError::RemoteLookup { status: 203, .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_song_list() {
        let server = MockServer::start().await;
        mount_detail(&server, serde_json::json!({"songs": []})).await;
        let audio = create_temp_audio_file();

        let result = client_for(&server).load_from_remote(SONG_ID, audio.path()).await;
        assert!(matches!(
            result,
            Err(LoadError::MalformedLookup {
                step: LookupStep::Metadata,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_song_without_artists() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            serde_json::json!({
                "songs": [{"name": "Song", "ar": [], "al": {"name": "Album", "picUrl": "/c.jpg"}}]
            }),
        )
        .await;
        let audio = create_temp_audio_file();

        let result = client_for(&server).load_from_remote(SONG_ID, audio.path()).await;
        assert!(matches!(result, Err(LoadError::MalformedLookup { .. })));
        // Metadata is rejected before lyrics or cover are requested
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = LookupClient::new(LookupConfig::new("http://127.0.0.1:1")).unwrap();
        let audio = create_temp_audio_file();

        let result = client.load_from_remote(SONG_ID, audio.path()).await;
        assert!(matches!(
            result,
            Err(LoadError::Request {
                step: LookupStep::Metadata,
                ..
            })
        ));
    }
}
