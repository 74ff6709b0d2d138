//! The high-level client tying transport, cache, retry, and mirror together.

use std::sync::Arc;

use roomspec_core::types::DbId;
use roomspec_core::visibility::Visibility;

use crate::cache::{CacheKey, CachePolicy, ResourceKind, ResponseCache};
use crate::error::ClientError;
use crate::fetch::{Fetch, HttpFetcher, QueryClass, RetryPolicy};
use crate::mirror::PurchaseMirror;

/// Consumer-side marketplace client.
///
/// Catalog reads are cached for a minute and retried on transient
/// failures. Visibility and purchase reads use the longer purchase-status
/// windows but are never retried: if the gate cannot be asked, the client
/// fails closed rather than guessing.
pub struct MarketClient {
    fetch: Arc<dyn Fetch>,
    cache: ResponseCache,
    mirror: PurchaseMirror,
}

impl MarketClient {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self {
            fetch,
            cache: ResponseCache::new(),
            mirror: PurchaseMirror::new(),
        }
    }

    /// Connect to a server at `base_url` over HTTP.
    pub fn connect(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpFetcher::new(base_url)))
    }

    /// The advisory purchase mirror.
    pub fn mirror(&self) -> &PurchaseMirror {
        &self.mirror
    }

    // -- Catalog reads ------------------------------------------------------

    /// A listing by id.
    pub async fn listing(&self, id: DbId) -> Result<serde_json::Value, ClientError> {
        self.catalog_get(&format!("/api/v1/listings/{id}")).await
    }

    /// A property by id.
    pub async fn property(&self, id: DbId) -> Result<serde_json::Value, ClientError> {
        self.catalog_get(&format!("/api/v1/properties/{id}")).await
    }

    async fn catalog_get(&self, path: &str) -> Result<serde_json::Value, ClientError> {
        let key = CacheKey::new(ResourceKind::Catalog, path);
        let fetch = Arc::clone(&self.fetch);
        let path = path.to_string();
        self.cache
            .get_or_fetch(key, CachePolicy::catalog(), move || async move {
                RetryPolicy::for_class(QueryClass::Catalog)
                    .run(|| fetch.fetch_json(&path, None))
                    .await
            })
            .await
    }

    // -- Gated reads --------------------------------------------------------

    /// Ask the server how `target_kind`/`target_id` renders for `viewer`.
    pub async fn visibility(
        &self,
        viewer: Option<DbId>,
        target_kind: &str,
        target_id: DbId,
        field_class: &str,
    ) -> Result<Visibility, ClientError> {
        let path = format!(
            "/api/v1/visibility?target_kind={target_kind}&target_id={target_id}&field_class={field_class}"
        );
        let viewer_key = viewer.map_or_else(|| "anon".to_string(), |v| v.to_string());
        let key = CacheKey::new(ResourceKind::PurchaseStatus, format!("{path}#{viewer_key}"));

        let fetch = Arc::clone(&self.fetch);
        let body = self
            .cache
            .get_or_fetch(key, CachePolicy::purchase_status(), move || async move {
                fetch.fetch_json(&path, viewer).await
            })
            .await?;

        serde_json::from_value(body["visibility"].clone())
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// The viewer's purchase history, uncached (it feeds reconciliation).
    pub async fn purchase_history(
        &self,
        buyer: DbId,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let body = self
            .fetch
            .fetch_json("/api/v1/purchases/history", Some(buyer))
            .await?;
        body.as_array()
            .cloned()
            .ok_or_else(|| ClientError::Decode("expected a transaction array".to_string()))
    }

    // -- Purchase sync ------------------------------------------------------

    /// Note a locally completed checkout and drop cached gate decisions so
    /// the next render re-asks the server.
    pub async fn note_purchase_pending(&self, listing_id: DbId) {
        self.mirror.mark_pending(listing_id);
        self.cache
            .invalidate_kind(ResourceKind::PurchaseStatus)
            .await;
    }

    /// Reconcile the mirror against the server-side ledger.
    pub async fn reconcile_purchases(&self, buyer: DbId) -> Result<(), ClientError> {
        let history = self.purchase_history(buyer).await?;
        let listing_ids: Vec<DbId> = history
            .iter()
            .filter_map(|t| t["listing_id"].as_i64())
            .collect();
        self.mirror.reconcile(&listing_ids);
        self.cache
            .invalidate_kind(ResourceKind::PurchaseStatus)
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Scripted transport: a map of path -> response, counting calls.
    #[derive(Default)]
    struct FakeFetch {
        responses: Mutex<HashMap<String, Result<serde_json::Value, ClientError>>>,
        calls: AtomicU32,
    }

    impl FakeFetch {
        fn respond(&self, path: &str, response: Result<serde_json::Value, ClientError>) {
            self.responses
                .lock()
                .unwrap()
                .insert(path.to_string(), response);
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for FakeFetch {
        async fn fetch_json(
            &self,
            path: &str,
            _viewer: Option<DbId>,
        ) -> Result<serde_json::Value, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .unwrap_or_else(|| Err(ClientError::Rejected(format!("no script for {path}"))))
        }
    }

    fn scripted() -> (Arc<FakeFetch>, MarketClient) {
        let fetch = Arc::new(FakeFetch::default());
        let client = MarketClient::new(Arc::clone(&fetch) as Arc<dyn Fetch>);
        (fetch, client)
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_reads_are_cached() {
        let (fetch, client) = scripted();
        fetch.respond("/api/v1/listings/7", Ok(json!({"id": 7, "title": "Specs"})));

        for _ in 0..3 {
            let listing = client.listing(7).await.unwrap();
            assert_eq!(listing["id"], 7);
        }
        assert_eq!(fetch.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_decodes_and_caches() {
        let (fetch, client) = scripted();
        let path = "/api/v1/visibility?target_kind=specification&target_id=5&field_class=premium";
        fetch.respond(path, Ok(json!({"visibility": "blurred"})));

        let visibility = client
            .visibility(Some(2), "specification", 5, "premium")
            .await
            .unwrap();
        assert_eq!(visibility, Visibility::Blurred);

        client
            .visibility(Some(2), "specification", 5, "premium")
            .await
            .unwrap();
        assert_eq!(fetch.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_is_cached_per_viewer() {
        let (fetch, client) = scripted();
        let path = "/api/v1/visibility?target_kind=specification&target_id=5&field_class=premium";
        fetch.respond(path, Ok(json!({"visibility": "blurred"})));

        client
            .visibility(Some(2), "specification", 5, "premium")
            .await
            .unwrap();
        client
            .visibility(Some(3), "specification", 5, "premium")
            .await
            .unwrap();
        client.visibility(None, "specification", 5, "premium").await.unwrap();
        assert_eq!(fetch.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_visibility_fails_closed() {
        let (fetch, client) = scripted();
        let path = "/api/v1/visibility?target_kind=specification&target_id=5&field_class=premium";
        fetch.respond(path, Err(ClientError::Denied("no".into())));

        let result = client
            .visibility(Some(2), "specification", 5, "premium")
            .await;
        assert_matches!(result, Err(ClientError::Denied(_)));
        // Exactly one attempt: authorization reads are not retried.
        assert_eq!(fetch.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_purchase_invalidates_gate_cache() {
        let (fetch, client) = scripted();
        let path = "/api/v1/visibility?target_kind=specification&target_id=5&field_class=premium";
        fetch.respond(path, Ok(json!({"visibility": "blurred"})));

        let first = client
            .visibility(Some(2), "specification", 5, "premium")
            .await
            .unwrap();
        assert_eq!(first, Visibility::Blurred);

        // Checkout completes locally; the server now reports visible.
        fetch.respond(path, Ok(json!({"visibility": "visible"})));
        client.note_purchase_pending(7).await;
        assert!(client.mirror().is_unlocked(7));

        let second = client
            .visibility(Some(2), "specification", 5, "premium")
            .await
            .unwrap();
        assert_eq!(second, Visibility::Visible);
        assert_eq!(fetch.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconcile_trusts_only_the_ledger() {
        let (fetch, client) = scripted();
        client.mirror().mark_pending(7);
        client.mirror().mark_pending(8);

        // The ledger confirms 7 but never saw 8.
        fetch.respond(
            "/api/v1/purchases/history",
            Ok(json!([{"id": 1, "listing_id": 7, "amount": 5000}])),
        );
        client.reconcile_purchases(2).await.unwrap();

        assert!(client.mirror().is_confirmed(7));
        assert!(!client.mirror().is_unlocked(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_catalog_reads_retry_then_succeed() {
        let fetch = Arc::new(FlakyFetch::default());
        let client = MarketClient::new(Arc::clone(&fetch) as Arc<dyn Fetch>);

        let listing = client.listing(7).await.unwrap();
        assert_eq!(listing["id"], 7);
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 2);
    }

    /// Fails the first call with a transient error, then succeeds.
    #[derive(Default)]
    struct FlakyFetch {
        calls: AtomicU32,
    }

    #[async_trait]
    impl Fetch for FlakyFetch {
        async fn fetch_json(
            &self,
            _path: &str,
            _viewer: Option<DbId>,
        ) -> Result<serde_json::Value, ClientError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ClientError::Network("connection reset".into()))
            } else {
                Ok(json!({"id": 7}))
            }
        }
    }
}
