use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{extract::Query, extract::State, http::StatusCode, routing::get, Router};
use serde_json::{json, Value};
use shared::domain::ArtworkId;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct ListingState {
    status: StatusCode,
    body: Arc<String>,
    seen_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn handle_listing(
    State(state): State<ListingState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.seen_queries.lock().await.push(query);
    (state.status, state.body.as_ref().clone())
}

async fn spawn_listing_server(
    status: StatusCode,
    body: impl Into<String>,
) -> (HttpArtworkSource, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let seen_queries = Arc::new(Mutex::new(Vec::new()));
    let state = ListingState {
        status,
        body: Arc::new(body.into()),
        seen_queries: Arc::clone(&seen_queries),
    };
    let app = Router::new()
        .route("/api/v1/artworks", get(handle_listing))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base_url = Url::parse(&format!("http://{addr}/api/v1/artworks")).expect("url");
    (HttpArtworkSource::new(base_url), seen_queries)
}

fn listing_body(data: Value, pagination: Option<Value>) -> String {
    let mut body = json!({ "data": data });
    if let Some(pagination) = pagination {
        body["pagination"] = pagination;
    }
    body.to_string()
}

#[tokio::test]
async fn fetch_page_sends_page_and_limit_query() {
    let body = listing_body(
        json!([{ "id": 13, "title": "Water Lilies" }]),
        Some(json!({ "current_page": 2, "total_pages": 10, "total": 120 })),
    );
    let (source, seen) = spawn_listing_server(StatusCode::OK, body).await;

    let page = source.fetch_page(2, 12).await.expect("page");

    let queries = seen.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("page").map(String::as_str), Some("2"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("12"));
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 10);
    assert_eq!(page.total, 120);
    assert_eq!(page.ids(), vec![ArtworkId(13)]);
}

#[tokio::test]
async fn fetch_page_normalizes_nullish_fields() {
    let body = listing_body(
        json!([
            {
                "id": 1,
                "title": null,
                "place_of_origin": "France",
                "artist_display": null,
                "date_start": 1890,
                "date_end": null
            },
            { "id": 2 }
        ]),
        Some(json!({ "total": 2, "total_pages": 1 })),
    );
    let (source, _) = spawn_listing_server(StatusCode::OK, body).await;

    let page = source.fetch_page(1, 12).await.expect("page");

    let first = &page.records[0];
    assert_eq!(first.title, "");
    assert_eq!(first.place_of_origin, "France");
    assert_eq!(first.artist_display, "");
    assert_eq!(first.inscriptions, "");
    assert_eq!(first.date_start, Some(1890));
    assert_eq!(first.date_end, None);

    let second = &page.records[1];
    assert_eq!(second.title, "");
    assert_eq!(second.date_start, None);
}

#[tokio::test]
async fn fetch_page_applies_pagination_fallbacks() {
    let (source, _) =
        spawn_listing_server(StatusCode::OK, listing_body(json!([{ "id": 7 }]), None)).await;

    let page = source.fetch_page(3, 12).await.expect("page");

    assert_eq!(page.current_page, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total, 12);
}

#[tokio::test]
async fn fetch_page_derives_total_from_total_pages() {
    let body = listing_body(json!([]), Some(json!({ "total_pages": 5 })));
    let (source, _) = spawn_listing_server(StatusCode::OK, body).await;

    let page = source.fetch_page(1, 12).await.expect("page");

    assert!(page.records.is_empty());
    assert_eq!(page.total, 60);
}

#[tokio::test]
async fn fetch_page_reports_http_errors_as_transport() {
    let (source, _) = spawn_listing_server(StatusCode::SERVICE_UNAVAILABLE, "down").await;

    let err = source.fetch_page(1, 12).await.expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err}");
    assert!(matches!(err, ArtworkSourceError::HttpStatus { status: 503 }));
}

#[tokio::test]
async fn fetch_page_reports_unreachable_server_as_transport() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let source = HttpArtworkSource::new(Url::parse(&format!("http://{addr}/")).expect("url"));

    let err = source.fetch_page(1, 12).await.expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err}");
}

#[tokio::test]
async fn fetch_page_rejects_missing_data_as_malformed() {
    let body = json!({ "pagination": { "total": 3 } }).to_string();
    let (source, _) = spawn_listing_server(StatusCode::OK, body).await;

    let err = source.fetch_page(1, 12).await.expect_err("must fail");

    assert!(err.is_malformed(), "unexpected error: {err}");
}

#[tokio::test]
async fn fetch_page_rejects_non_json_body_as_malformed() {
    let (source, _) = spawn_listing_server(StatusCode::OK, "<html>maintenance</html>").await;

    let err = source.fetch_page(1, 12).await.expect_err("must fail");

    assert!(err.is_malformed(), "unexpected error: {err}");
}

#[tokio::test]
async fn fetch_page_rejects_non_positive_ids() {
    let body = listing_body(json!([{ "id": 0, "title": "ghost" }]), None);
    let (source, _) = spawn_listing_server(StatusCode::OK, body).await;

    let err = source.fetch_page(1, 12).await.expect_err("must fail");

    assert!(err.is_malformed(), "unexpected error: {err}");
}

#[tokio::test]
async fn fetch_page_rejects_entries_without_integer_id() {
    for data in [
        json!([{ "title": "x" }]),
        json!([{ "id": null }]),
        json!([{ "id": "7" }]),
    ] {
        let (source, _) = spawn_listing_server(StatusCode::OK, listing_body(data.clone(), None)).await;

        let err = source.fetch_page(1, 12).await.expect_err("must fail");

        assert!(err.is_malformed(), "{data}: unexpected error: {err}");
    }
}

#[tokio::test]
async fn fetch_page_validates_arguments_before_sending() {
    let (source, seen) = spawn_listing_server(StatusCode::OK, listing_body(json!([]), None)).await;

    let zero_page = source.fetch_page(0, 12).await.expect_err("page 0");
    let zero_size = source.fetch_page(1, 0).await.expect_err("size 0");

    assert!(matches!(zero_page, ArtworkSourceError::InvalidRequest(_)));
    assert!(matches!(zero_size, ArtworkSourceError::InvalidRequest(_)));
    assert!(seen.lock().await.is_empty());
}

#[test]
fn page_url_keeps_existing_query_pairs() {
    let source = HttpArtworkSource::new(
        Url::parse("https://api.example.org/artworks?fields=id,title").expect("url"),
    );

    let url = source.page_url(4, 25);

    assert_eq!(
        url.as_str(),
        "https://api.example.org/artworks?fields=id,title&page=4&limit=25"
    );
}

#[test]
fn from_settings_uses_configured_base_url() {
    let settings = ClientSettings {
        api_base_url: "https://collections.example.org/api/v1/artworks".to_string(),
        ..ClientSettings::default()
    };

    let source = HttpArtworkSource::from_settings(&settings).expect("source");

    assert_eq!(
        source.base_url().as_str(),
        "https://collections.example.org/api/v1/artworks"
    );
}

#[test]
fn from_settings_rejects_invalid_base_url() {
    let settings = ClientSettings {
        api_base_url: "not a url".to_string(),
        ..ClientSettings::default()
    };

    let err = HttpArtworkSource::from_settings(&settings)
        .err()
        .expect("must fail");
    assert!(err.to_string().contains("invalid api base url"));
}

#[test]
fn source_errors_map_to_failure_codes() {
    use shared::error::ErrorCode;

    let malformed = ArtworkSourceError::malformed("missing data");
    assert_eq!(malformed.code(), ErrorCode::MalformedResponse);
    let failure = ArtworkSourceError::HttpStatus { status: 502 }.to_failure(3);
    assert_eq!(failure.code, ErrorCode::Transport);
    assert_eq!(failure.page, 3);
    assert!(failure.message.contains("502"));
}
