//! Best-effort enrichment of listing items with search links
//!
//! For every item the loop runs an image search and a general search on
//! the item's `searchable_name`, attaching `imageUrl` and `mainUrl`
//! directly on the item. Every failure mode degrades to a missing field:
//! a malformed item, an empty result set, or a search error is logged
//! and the loop moves on. Enrichment never fails a request.

use crate::search::{SearchClient, SearchKind, SearchResult};
use serde_json::Value;

/// Domain substrings rejected when picking an image link
///
/// These hosts serve login walls or expiring CDN links instead of a
/// usable image, so the first result from any of them is skipped in
/// favor of the next candidate.
pub const IMAGE_DENYLIST: [&str; 5] = [
    "instagram.com",
    "fbsbx.com",
    "lookaside.",
    "tiktok.com",
    "twitter.com",
];

/// Pick the first image link not matching the denylist
///
/// Results are scanned in API order; the first link containing none of
/// the [`IMAGE_DENYLIST`] substrings wins.
///
/// # Arguments
///
/// * `results` - Image search results in API order
///
/// # Examples
///
/// ```
/// use toplist::enrich::select_image_url;
/// use toplist::search::SearchResult;
///
/// let results = vec![
///     SearchResult::from_link("https://instagram.com/x"),
///     SearchResult::from_link("https://good.com/a.jpg"),
/// ];
/// assert_eq!(select_image_url(&results), Some("https://good.com/a.jpg"));
/// ```
pub fn select_image_url(results: &[SearchResult]) -> Option<&str> {
    results
        .iter()
        .map(|r| r.link.as_str())
        .find(|link| IMAGE_DENYLIST.iter().all(|domain| !link.contains(domain)))
}

/// Enrich listing items in place with image and reference links
///
/// Items are processed sequentially, each independently: one item's
/// failure never aborts the rest, and an image-search failure never
/// prevents the general search for the same item. Items without a
/// string `searchable_name` are skipped whole.
///
/// # Arguments
///
/// * `client` - Search backend
/// * `items` - Listing items, mutated in place
/// * `image_results` - Number of image candidates to request per item
pub async fn enrich_items(client: &dyn SearchClient, items: &mut [Value], image_results: u8) {
    for item in items.iter_mut() {
        let Some(query) = item
            .get("searchable_name")
            .and_then(Value::as_str)
            .map(str::to_owned)
        else {
            let name = item.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
            tracing::warn!("Item {} has no searchable_name, skipping enrichment", name);
            continue;
        };
        // searchable_name is a string, so the item is an object.
        let Some(fields) = item.as_object_mut() else {
            continue;
        };

        tracing::info!("Searching for: {}", query);

        match client.search(&query, SearchKind::Image, image_results).await {
            Ok(results) => match select_image_url(&results) {
                Some(link) => {
                    tracing::info!("Found image URL: {}", link);
                    fields.insert("imageUrl".to_string(), Value::String(link.to_string()));
                }
                None if results.is_empty() => {
                    tracing::info!("No image results found for: {}", query);
                }
                None => {
                    tracing::info!("No suitable image found for: {}", query);
                }
            },
            Err(e) => {
                tracing::warn!("Error in image search for {}: {}", query, e);
            }
        }

        match client.search(&query, SearchKind::Web, 1).await {
            Ok(results) => match results.first() {
                Some(result) => {
                    tracing::info!("Found main URL: {}", result.link);
                    fields.insert("mainUrl".to_string(), Value::String(result.link.clone()));
                }
                None => {
                    tracing::info!("No main URL results found for: {}", query);
                }
            },
            Err(e) => {
                tracing::warn!("Error in regular search for {}: {}", query, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ToplistError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// One canned response per expected search call, in call order.
    enum Canned {
        Results(Vec<SearchResult>),
        Failure,
    }

    struct StubSearch {
        responses: Mutex<Vec<Canned>>,
        calls: Mutex<Vec<(String, SearchKind, u8)>>,
    }

    impl StubSearch {
        fn new(responses: Vec<Canned>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn links(links: &[&str]) -> Canned {
            Canned::Results(links.iter().copied().map(SearchResult::from_link).collect())
        }
    }

    #[async_trait]
    impl SearchClient for StubSearch {
        async fn search(
            &self,
            query: &str,
            kind: SearchKind,
            num: u8,
        ) -> Result<Vec<SearchResult>> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), kind, num));
            match self.responses.lock().unwrap().pop() {
                Some(Canned::Results(results)) => Ok(results),
                Some(Canned::Failure) => {
                    Err(ToplistError::Search("stubbed failure".to_string()).into())
                }
                None => Ok(Vec::new()),
            }
        }
    }

    #[test]
    fn test_select_image_skips_denylisted() {
        let results = vec![
            SearchResult::from_link("https://instagram.com/x"),
            SearchResult::from_link("https://good.com/a.jpg"),
            SearchResult::from_link("https://good.com/b.jpg"),
        ];
        assert_eq!(select_image_url(&results), Some("https://good.com/a.jpg"));
    }

    #[test]
    fn test_select_image_all_denylisted() {
        let results = vec![
            SearchResult::from_link("https://instagram.com/x"),
            SearchResult::from_link("https://www.tiktok.com/@y"),
            SearchResult::from_link("https://lookaside.fbsbx.com/z"),
            SearchResult::from_link("https://twitter.com/w"),
        ];
        assert_eq!(select_image_url(&results), None);
    }

    #[test]
    fn test_select_image_empty_results() {
        assert_eq!(select_image_url(&[]), None);
    }

    #[test]
    fn test_select_image_denylist_matches_by_substring() {
        // Substring matching also rejects CDN hosts embedding a denylisted
        // domain, e.g. scontent.cdninstagram.com.
        let results = vec![
            SearchResult::from_link("https://scontent.cdninstagram.com/img.jpg"),
            SearchResult::from_link("https://lookaside.fbsbx.com/img.jpg"),
            SearchResult::from_link("https://images.example.com/img.jpg"),
        ];
        assert_eq!(
            select_image_url(&results),
            Some("https://images.example.com/img.jpg")
        );
    }

    #[tokio::test]
    async fn test_enrich_sets_both_urls() {
        let stub = StubSearch::new(vec![
            StubSearch::links(&["https://good.com/a.jpg"]),
            StubSearch::links(&["https://reference.com/page"]),
        ]);
        let mut items = vec![json!({"name": "X", "searchable_name": "X smartphone"})];

        enrich_items(&stub, &mut items, 10).await;

        assert_eq!(items[0]["imageUrl"], json!("https://good.com/a.jpg"));
        assert_eq!(items[0]["mainUrl"], json!("https://reference.com/page"));

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("X smartphone".to_string(), SearchKind::Image, 10));
        assert_eq!(calls[1], ("X smartphone".to_string(), SearchKind::Web, 1));
    }

    #[tokio::test]
    async fn test_enrich_all_denylisted_leaves_image_unset() {
        let stub = StubSearch::new(vec![
            StubSearch::links(&["https://instagram.com/x", "https://twitter.com/y"]),
            StubSearch::links(&["https://reference.com/page"]),
        ]);
        let mut items = vec![json!({"name": "X", "searchable_name": "X"})];

        enrich_items(&stub, &mut items, 10).await;

        assert!(items[0].get("imageUrl").is_none());
        assert_eq!(items[0]["mainUrl"], json!("https://reference.com/page"));
    }

    #[tokio::test]
    async fn test_enrich_image_failure_does_not_block_main_url() {
        let stub = StubSearch::new(vec![
            Canned::Failure,
            StubSearch::links(&["https://reference.com/page"]),
        ]);
        let mut items = vec![json!({"name": "X", "searchable_name": "X"})];

        enrich_items(&stub, &mut items, 10).await;

        assert!(items[0].get("imageUrl").is_none());
        assert_eq!(items[0]["mainUrl"], json!("https://reference.com/page"));
    }

    #[tokio::test]
    async fn test_enrich_empty_general_results_leaves_main_unset() {
        let stub = StubSearch::new(vec![
            StubSearch::links(&["https://good.com/a.jpg"]),
            StubSearch::links(&[]),
        ]);
        let mut items = vec![json!({"name": "X", "searchable_name": "X"})];

        enrich_items(&stub, &mut items, 10).await;

        assert_eq!(items[0]["imageUrl"], json!("https://good.com/a.jpg"));
        assert!(items[0].get("mainUrl").is_none());
    }

    #[tokio::test]
    async fn test_enrich_failure_does_not_abort_later_items() {
        let stub = StubSearch::new(vec![
            Canned::Failure,
            Canned::Failure,
            StubSearch::links(&["https://good.com/b.jpg"]),
            StubSearch::links(&["https://reference.com/b"]),
        ]);
        let mut items = vec![
            json!({"name": "A", "searchable_name": "A"}),
            json!({"name": "B", "searchable_name": "B"}),
        ];

        enrich_items(&stub, &mut items, 10).await;

        assert!(items[0].get("imageUrl").is_none());
        assert!(items[0].get("mainUrl").is_none());
        assert_eq!(items[1]["imageUrl"], json!("https://good.com/b.jpg"));
        assert_eq!(items[1]["mainUrl"], json!("https://reference.com/b"));
    }

    #[tokio::test]
    async fn test_enrich_skips_items_without_searchable_name() {
        let stub = StubSearch::new(vec![
            StubSearch::links(&["https://good.com/b.jpg"]),
            StubSearch::links(&["https://reference.com/b"]),
        ]);
        let mut items = vec![
            json!({"name": "no search handle"}),
            json!("not even an object"),
            json!({"searchable_name": 42}),
            json!({"name": "B", "searchable_name": "B"}),
        ];

        enrich_items(&stub, &mut items, 10).await;

        // Same length, malformed entries untouched, valid entry enriched.
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], json!({"name": "no search handle"}));
        assert_eq!(items[1], json!("not even an object"));
        assert_eq!(items[2], json!({"searchable_name": 42}));
        assert_eq!(items[3]["imageUrl"], json!("https://good.com/b.jpg"));

        // Only the valid item produced search calls.
        assert_eq!(stub.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_enrich_preserves_model_metadata() {
        let stub = StubSearch::new(vec![
            StubSearch::links(&["https://good.com/a.jpg"]),
            StubSearch::links(&["https://reference.com/a"]),
        ]);
        let mut items = vec![json!({
            "name": "X",
            "searchable_name": "X",
            "metadata": {"wikipedia_url": "https://pt.wikipedia.org/wiki/X"}
        })];

        enrich_items(&stub, &mut items, 10).await;

        // Links land on the item itself, not inside metadata.
        assert_eq!(
            items[0]["metadata"],
            json!({"wikipedia_url": "https://pt.wikipedia.org/wiki/X"})
        );
        assert_eq!(items[0]["imageUrl"], json!("https://good.com/a.jpg"));
    }
}
