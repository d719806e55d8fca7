//! Integration tests using mock HTTP server
//!
//! Tests the full flow: paginator → HTTP page source → rendered pictures

use pepe_feed::cli::drain;
use pepe_feed::http::{HttpClient, HttpClientConfig};
use pepe_feed::pagination::{
    FeedPaginator, HttpPageSource, LoadOutcome, PageRequest, PageSource, PaginatorConfig,
    Renderer, SkipReason,
};
use pepe_feed::{Error, FeedConfig, FilterContext, Picture, Superposable};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn pid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn picture_json(n: u128) -> Value {
    json!({
        "picture_id": pid(n),
        "account_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "superposable": "honk",
        "creation_ts": 1_700_000_000,
        "author": "pepe",
        "like_count": 0,
        "dislike_count": 0,
        "comment_count": 0,
        "liked": null,
        "disliked": null
    })
}

fn page_json(ids: &[u128]) -> Value {
    Value::Array(ids.iter().copied().map(picture_json).collect())
}

async fn mount_page(server: &MockServer, index: u32, count: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/pictures"))
        .and(query_param("index", index.to_string()))
        .and(query_param("count", count.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn source_for(server: &MockServer) -> HttpPageSource<Picture> {
    let config = FeedConfig {
        base_url: server.uri(),
        ..FeedConfig::default()
    };
    HttpPageSource::from_feed(&config).unwrap()
}

#[derive(Default)]
struct Gallery {
    ids: Vec<Uuid>,
    empty: bool,
    errors: Vec<String>,
}

#[derive(Clone, Default)]
struct GalleryView(Arc<Mutex<Gallery>>);

impl Renderer<Picture> for GalleryView {
    type Handle = Uuid;

    fn render_item(&mut self, picture: Picture) -> Uuid {
        self.0.lock().unwrap().ids.push(picture.picture_id);
        picture.picture_id
    }

    fn clear_all(&mut self) {
        self.0.lock().unwrap().ids.clear();
    }

    fn set_empty_indicator(&mut self, empty: bool) {
        self.0.lock().unwrap().empty = empty;
    }

    fn show_error(&mut self, error: &Error) {
        self.0.lock().unwrap().errors.push(error.alert_text());
    }
}

// ============================================================================
// HTTP Page Source
// ============================================================================

#[tokio::test]
async fn test_source_sends_filter_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pictures"))
        .and(query_param("index", "0"))
        .and(query_param("count", "10"))
        .and(query_param("username", "kermit"))
        .and(query_param("superposable", "sweat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[1])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = source_for(&mock_server);
    let request = PageRequest {
        cursor: 0,
        page_size: 10,
        filter: FilterContext::new()
            .username("kermit")
            .superposable(Superposable::Sweat),
    };

    let pictures = source.fetch_page(&request).await.unwrap();
    assert_eq!(pictures.len(), 1);
    assert_eq!(pictures[0].picture_id, pid(1));
    assert_eq!(pictures[0].superposable, Superposable::Honk);
}

#[tokio::test]
async fn test_source_null_body_is_empty_page() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 10, Value::Null).await;

    let source = source_for(&mock_server);
    let request = PageRequest {
        cursor: 0,
        page_size: 10,
        filter: FilterContext::new(),
    };

    assert!(source.fetch_page(&request).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_source_rejects_non_array_body() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 10, json!({"pictures": []})).await;

    let source = source_for(&mock_server);
    let request = PageRequest {
        cursor: 0,
        page_size: 10,
        filter: FilterContext::new(),
    };

    let err = source.fetch_page(&request).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("an object"));
}

#[tokio::test]
async fn test_source_rejects_malformed_record() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 10, json!([{"picture_id": pid(1)}])).await;

    let source = source_for(&mock_server);
    let request = PageRequest {
        cursor: 0,
        page_size: 10,
        filter: FilterContext::new(),
    };

    let err = source.fetch_page(&request).await.unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_source_rejects_non_uuid_picture_id() {
    let mock_server = MockServer::start().await;
    let mut record = picture_json(1);
    record["picture_id"] = json!("p1");
    mount_page(&mock_server, 0, 10, json!([record])).await;

    let source = source_for(&mock_server);
    let request = PageRequest {
        cursor: 0,
        page_size: 10,
        filter: FilterContext::new(),
    };

    let err = source.fetch_page(&request).await.unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
    assert_eq!(err.name(), "DecodeError");
    assert!(err.alert_text().starts_with("DecodeError: "));
}

#[tokio::test]
async fn test_source_with_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .session_cookie("abc")
        .build();
    let source: HttpPageSource<Picture> =
        HttpPageSource::new(HttpClient::with_config(config).unwrap(), "/feed");
    assert_eq!(source.endpoint(), "/feed");

    let request = PageRequest {
        cursor: 0,
        page_size: 10,
        filter: FilterContext::new(),
    };
    assert!(source.fetch_page(&request).await.unwrap().is_empty());
}

// ============================================================================
// Paginator over HTTP
// ============================================================================

#[tokio::test]
async fn test_paginate_until_empty_page() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 2, page_json(&[1, 2])).await;
    mount_page(&mock_server, 1, 2, page_json(&[3, 4])).await;
    mount_page(&mock_server, 2, 2, json!([])).await;

    let view = GalleryView::default();
    let paginator = FeedPaginator::new(
        source_for(&mock_server),
        view.clone(),
        PaginatorConfig::new(2),
        FilterContext::new(),
    );

    let first = paginator.load_next().await;
    let summary = drain(&paginator, first, None).await;

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.pictures, 4);
    assert!(!summary.failed);
    assert!(paginator.is_exhausted().await);

    let gallery = view.0.lock().unwrap();
    assert_eq!(gallery.ids, vec![pid(1), pid(2), pid(3), pid(4)]);
    assert!(!gallery.empty);
}

#[tokio::test]
async fn test_empty_feed_shows_indicator() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 2, json!([])).await;

    let view = GalleryView::default();
    let paginator = FeedPaginator::new(
        source_for(&mock_server),
        view.clone(),
        PaginatorConfig::new(2),
        FilterContext::new(),
    );

    assert_eq!(paginator.load_next().await, LoadOutcome::Empty);
    assert_eq!(
        paginator.on_scroll_proximity(100.0, 100.0).await,
        LoadOutcome::Skipped(SkipReason::Exhausted)
    );
    assert!(view.0.lock().unwrap().empty);
}

#[tokio::test]
async fn test_api_error_stops_feed() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 2, page_json(&[1, 2])).await;

    Mock::given(method("GET"))
        .and(path("/pictures"))
        .and(query_param("index", "1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error": "Not Found",
            "message": "Requested resource does not exist",
            "method": "GET",
            "path": "/pictures"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let view = GalleryView::default();
    let paginator = FeedPaginator::new(
        source_for(&mock_server),
        view.clone(),
        PaginatorConfig::new(2),
        FilterContext::new(),
    );

    let first = paginator.load_next().await;
    let summary = drain(&paginator, first, None).await;
    assert!(summary.failed);
    assert_eq!(summary.pictures, 2);

    // Exhausted: scrolling does not hit the server again
    paginator.on_scroll_proximity(1_000.0, 1_000.0).await;

    let gallery = view.0.lock().unwrap();
    assert_eq!(
        gallery.errors,
        vec!["ApiError: 404 Not Found: Requested resource does not exist (GET /pictures)"]
    );
    assert_eq!(gallery.ids, vec![pid(1), pid(2)]);
}

#[tokio::test]
async fn test_max_pages_limits_drain() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 1, page_json(&[1])).await;
    mount_page(&mock_server, 1, 1, page_json(&[2])).await;

    let paginator = FeedPaginator::new(
        source_for(&mock_server),
        GalleryView::default(),
        PaginatorConfig::new(1),
        FilterContext::new(),
    );

    let first = paginator.load_next().await;
    let summary = drain(&paginator, first, Some(2)).await;

    assert_eq!(summary.pages, 2);
    assert!(!paginator.is_exhausted().await);
    assert_eq!(paginator.state().await.cursor, Some(1));
}

#[tokio::test]
async fn test_filter_change_resets_feed() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 0, 2, page_json(&[1])).await;

    Mock::given(method("GET"))
        .and(path("/pictures"))
        .and(query_param("index", "0"))
        .and(query_param("username", "kermit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[11, 12])))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    let view = GalleryView::default();
    let paginator = FeedPaginator::new(
        source_for(&mock_server),
        view.clone(),
        PaginatorConfig::new(2),
        FilterContext::new(),
    );

    paginator.load_next().await;
    assert!(paginator.is_exhausted().await);

    let outcome = paginator
        .reset(FilterContext::new().username("kermit"))
        .await;
    assert!(matches!(outcome, LoadOutcome::Page { cursor: 0, count: 2, .. }));
    assert_eq!(view.0.lock().unwrap().ids, vec![pid(11), pid(12)]);
}

#[tokio::test]
async fn test_malformed_id_fails_page_with_decode_alert() {
    let mock_server = MockServer::start().await;
    let mut bad = picture_json(2);
    bad["picture_id"] = json!("not-a-uuid");
    mount_page(&mock_server, 0, 2, json!([picture_json(1), bad])).await;

    let view = GalleryView::default();
    let paginator = FeedPaginator::new(
        source_for(&mock_server),
        view.clone(),
        PaginatorConfig::new(2),
        FilterContext::new(),
    );

    let outcome = paginator.load_next().await;
    match outcome {
        LoadOutcome::Failed { cursor, message } => {
            assert_eq!(cursor, 0);
            assert!(message.starts_with("DecodeError: "));
        }
        other => panic!("expected a failed page, got {other:?}"),
    }
    assert!(paginator.is_exhausted().await);

    let gallery = view.0.lock().unwrap();
    assert!(gallery.ids.is_empty());
    assert_eq!(gallery.errors.len(), 1);
    assert!(!gallery.empty);
}
