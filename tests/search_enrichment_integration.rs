//! Integration tests for the Custom Search client and enrichment loop
//!
//! Exercises GoogleSearchClient against a wiremock server: request
//! shape, result parsing, error mapping, and the enrichment loop's
//! degrade-and-continue behavior over a real HTTP boundary.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toplist::config::SearchConfig;
use toplist::enrich::enrich_items;
use toplist::search::{GoogleSearchClient, SearchClient, SearchKind};

fn client_for(server: &MockServer) -> GoogleSearchClient {
    GoogleSearchClient::new(SearchConfig {
        api_key: Some("test-key".to_string()),
        cse_id: Some("test-cx".to_string()),
        api_base: Some(server.uri()),
        image_results: 10,
    })
    .unwrap()
}

#[tokio::test]
async fn test_image_search_sends_expected_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "cantora pink"))
        .and(query_param("num", "10"))
        .and(query_param("searchType", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"link": "https://good.com/pink.jpg", "title": "Pink"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client
        .search("cantora pink", SearchKind::Image, 10)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].link, "https://good.com/pink.jpg");
    assert_eq!(results[0].title, "Pink");
}

#[tokio::test]
async fn test_web_search_omits_search_type() {
    let server = MockServer::start().await;

    // Match any /customsearch/v1 request and inspect it afterwards;
    // wiremock has no negative query matcher.
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("num", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"link": "https://reference.com/page"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client.search("iphone 13", SearchKind::Web, 1).await.unwrap();
    assert_eq!(results[0].link, "https://reference.com/page");

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or("");
    assert!(!query.contains("searchType"));
}

#[tokio::test]
async fn test_search_empty_response_yields_no_results() {
    let server = MockServer::start().await;

    // The API omits "items" entirely when nothing matches.
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": {"totalResults": "0"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client.search("nothing", SearchKind::Web, 1).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_http_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .search("anything", SearchKind::Image, 10)
        .await
        .unwrap_err();

    let message = error.to_string();
    assert!(message.contains("403"));
    assert!(message.contains("quota exceeded"));
}

#[tokio::test]
async fn test_enrichment_over_http_selects_first_acceptable_image() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("searchType", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"link": "https://instagram.com/x"},
                {"link": "https://www.tiktok.com/@x"},
                {"link": "https://good.com/a.jpg"}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("num", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"link": "https://reference.com/x"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut items = vec![json!({"name": "X", "searchable_name": "X"})];

    enrich_items(&client, &mut items, 10).await;

    assert_eq!(items[0]["imageUrl"], json!("https://good.com/a.jpg"));
    assert_eq!(items[0]["mainUrl"], json!("https://reference.com/x"));
}

#[tokio::test]
async fn test_enrichment_over_http_survives_server_failures() {
    let server = MockServer::start().await;

    // Every search call fails; enrichment must still complete.
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let original = vec![
        json!({"name": "A", "searchable_name": "A"}),
        json!({"name": "B", "searchable_name": "B"}),
    ];
    let mut items = original.clone();

    enrich_items(&client, &mut items, 10).await;

    // Same items, untouched.
    assert_eq!(items, original);
}
