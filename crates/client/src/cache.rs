//! Staleness-windowed response cache with in-flight coalescing.
//!
//! Each cached resource lives in a slot guarded by its own async mutex;
//! concurrent requests for the same slot serialize on it, so only the
//! first actually hits the network and the rest observe its result.
//!
//! Entries move through three ages: fresh (served directly), stale
//! (refetched, with the stale value as a fallback when the refetch fails
//! transiently), and evicted (gone; failures propagate). Eviction counts
//! from the last use, and every `get_or_fetch` sweeps out slots whose
//! entry has sat unused past its eviction window, so untouched keys do
//! not accumulate. Authorization failures purge the slot so a revoked
//! viewer never sees a cached grant.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::ClientError;

/// Freshness and eviction windows for one resource kind.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Served from cache without revalidation below this age.
    pub fresh_for: Duration,
    /// Dropped entirely at this age; stale fallback no longer applies.
    pub evict_after: Duration,
}

impl CachePolicy {
    /// Catalog data (listings, entity metadata): fresh for a minute,
    /// usable as a fallback for ten.
    pub fn catalog() -> Self {
        Self {
            fresh_for: Duration::from_secs(60),
            evict_after: Duration::from_secs(600),
        }
    }

    /// Purchase status and visibility decisions: fresh for five minutes,
    /// evicted after thirty.
    pub fn purchase_status() -> Self {
        Self {
            fresh_for: Duration::from_secs(300),
            evict_after: Duration::from_secs(1800),
        }
    }
}

/// What a cached entry describes; eviction groups by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Catalog,
    PurchaseStatus,
}

/// Cache key: the resource kind plus a caller-chosen discriminator
/// (typically the request path and viewer).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: ResourceKind,
    pub key: String,
}

impl CacheKey {
    pub fn new(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

struct Entry {
    stored_at: Instant,
    /// Pushed forward on every use; the sweep drops the slot past this.
    expires_at: Instant,
    value: serde_json::Value,
}

#[derive(Default)]
struct Slot {
    value: Option<Entry>,
}

/// The shared response cache.
#[derive(Default)]
pub struct ResponseCache {
    slots: Mutex<HashMap<CacheKey, Arc<Mutex<Slot>>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `loader` to fill it.
    ///
    /// Concurrent callers for the same key coalesce on the slot lock. A
    /// transient loader failure falls back to a stale-but-unevicted value;
    /// any other failure purges the slot and propagates.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: CacheKey,
        policy: CachePolicy,
        loader: F,
    ) -> Result<serde_json::Value, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<serde_json::Value, ClientError>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            Self::sweep(&mut slots, Instant::now());
            Arc::clone(slots.entry(key).or_default())
        };

        // Coalescing point: one loader in flight per slot.
        let mut slot = slot.lock().await;

        let now = Instant::now();
        if let Some(entry) = &mut slot.value {
            if now.duration_since(entry.stored_at) < policy.fresh_for {
                entry.expires_at = now + policy.evict_after;
                return Ok(entry.value.clone());
            }
            if now >= entry.expires_at {
                slot.value = None;
            }
        }

        match loader().await {
            Ok(value) => {
                let now = Instant::now();
                slot.value = Some(Entry {
                    stored_at: now,
                    expires_at: now + policy.evict_after,
                    value: value.clone(),
                });
                Ok(value)
            }
            Err(err) if err.is_transient() => match &mut slot.value {
                Some(entry) => {
                    tracing::warn!(error = %err, "Refetch failed, serving stale entry");
                    entry.expires_at = Instant::now() + policy.evict_after;
                    Ok(entry.value.clone())
                }
                None => Err(err),
            },
            Err(err) => {
                slot.value = None;
                Err(err)
            }
        }
    }

    /// Drop slots whose entry has expired, or that hold no entry at all.
    /// Slots with a loader in flight hold their lock and are kept.
    fn sweep(slots: &mut HashMap<CacheKey, Arc<Mutex<Slot>>>, now: Instant) {
        slots.retain(|_, slot| match slot.try_lock() {
            Ok(guard) => guard.value.as_ref().is_some_and(|e| now < e.expires_at),
            Err(_) => true,
        });
    }

    /// Number of live cache slots.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }

    /// Drop every entry of one resource kind.
    pub async fn invalidate_kind(&self, kind: ResourceKind) {
        let mut slots = self.slots.lock().await;
        slots.retain(|key, _| key.kind != kind);
    }

    /// Drop one entry.
    pub async fn invalidate(&self, key: &CacheKey) {
        let mut slots = self.slots.lock().await;
        slots.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn key(s: &str) -> CacheKey {
        CacheKey::new(ResourceKind::Catalog, s)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entries_skip_the_loader() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_fetch(key("listing:1"), CachePolicy::catalog(), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(json!({"id": 1})) }
                })
                .await
                .unwrap();
            assert_eq!(value["id"], 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entries_are_refetched() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);

        async fn load(
            cache: &ResponseCache,
            calls: &AtomicU32,
        ) -> Result<serde_json::Value, ClientError> {
            cache
                .get_or_fetch(key("listing:1"), CachePolicy::catalog(), move || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { Ok(json!({"version": n})) }
                })
                .await
        }

        assert_eq!(load(&cache, &calls).await.unwrap()["version"], 0);
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(load(&cache, &calls).await.unwrap()["version"], 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_requests_coalesce() {
        let cache = Arc::new(ResponseCache::new());
        let calls = Arc::new(AtomicU32::new(0));

        let spawn_get = |cache: Arc<ResponseCache>, calls: Arc<AtomicU32>| {
            tokio::spawn(async move {
                cache
                    .get_or_fetch(key("listing:1"), CachePolicy::catalog(), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(json!({"id": 1}))
                    })
                    .await
            })
        };

        let a = spawn_get(Arc::clone(&cache), Arc::clone(&calls));
        let b = spawn_get(Arc::clone(&cache), Arc::clone(&calls));
        let (a, b) = tokio::join!(a, b);
        assert_eq!(a.unwrap().unwrap()["id"], 1);
        assert_eq!(b.unwrap().unwrap()["id"], 1);
        // The second request rode on the first fetch.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_falls_back_to_stale() {
        let cache = ResponseCache::new();

        cache
            .get_or_fetch(key("listing:1"), CachePolicy::catalog(), || async {
                Ok(json!({"id": 1}))
            })
            .await
            .unwrap();

        // Stale but not evicted: the cached value survives a network error.
        tokio::time::advance(Duration::from_secs(120)).await;
        let value = cache
            .get_or_fetch(key("listing:1"), CachePolicy::catalog(), || async {
                Err(ClientError::Network("down".into()))
            })
            .await
            .unwrap();
        assert_eq!(value["id"], 1);

        // Past eviction the failure propagates.
        tokio::time::advance(Duration::from_secs(600)).await;
        let result = cache
            .get_or_fetch(key("listing:1"), CachePolicy::catalog(), || async {
                Err(ClientError::Network("down".into()))
            })
            .await;
        assert_matches!(result, Err(ClientError::Network(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_purges_the_slot() {
        let cache = ResponseCache::new();
        let k = CacheKey::new(ResourceKind::PurchaseStatus, "visibility:spec:5:u2");

        cache
            .get_or_fetch(k.clone(), CachePolicy::purchase_status(), || async {
                Ok(json!({"visibility": "visible"}))
            })
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(301)).await;
        let result = cache
            .get_or_fetch(k.clone(), CachePolicy::purchase_status(), || async {
                Err(ClientError::Denied("revoked".into()))
            })
            .await;
        assert_matches!(result, Err(ClientError::Denied(_)));

        // No stale fallback after the denial, even on a network error.
        let result = cache
            .get_or_fetch(k, CachePolicy::purchase_status(), || async {
                Err(ClientError::Network("down".into()))
            })
            .await;
        assert_matches!(result, Err(ClientError::Network(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unused_entries_are_swept_out() {
        let cache = ResponseCache::new();
        for k in ["listing:1", "listing:2"] {
            cache
                .get_or_fetch(key(k), CachePolicy::catalog(), || async { Ok(json!({})) })
                .await
                .unwrap();
        }
        assert_eq!(cache.len().await, 2);

        // Untouched past the eviction window: any later access drops them,
        // map entries included.
        tokio::time::advance(Duration::from_secs(601)).await;
        cache
            .get_or_fetch(key("listing:3"), CachePolicy::catalog(), || async {
                Ok(json!({}))
            })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recent_use_defers_eviction() {
        let cache = ResponseCache::new();
        async fn load(cache: &ResponseCache, k: &str) -> Result<serde_json::Value, ClientError> {
            cache
                .get_or_fetch(key(k), CachePolicy::catalog(), || async { Ok(json!({})) })
                .await
        }

        load(&cache, "listing:1").await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        // Fresh hit at t=30 restarts the disuse clock.
        load(&cache, "listing:1").await.unwrap();

        tokio::time::advance(Duration::from_secs(575)).await;
        load(&cache, "listing:2").await.unwrap();
        assert_eq!(cache.len().await, 2);

        tokio::time::advance(Duration::from_secs(30)).await;
        load(&cache, "listing:3").await.unwrap();
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_kind_is_selective() {
        let cache = ResponseCache::new();
        let calls = AtomicU32::new(0);

        for k in [
            CacheKey::new(ResourceKind::Catalog, "listing:1"),
            CacheKey::new(ResourceKind::PurchaseStatus, "status:1"),
        ] {
            cache
                .get_or_fetch(k, CachePolicy::catalog(), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(json!({})) }
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.invalidate_kind(ResourceKind::PurchaseStatus).await;

        // Catalog entry still cached, purchase-status entry reloaded.
        for k in [
            CacheKey::new(ResourceKind::Catalog, "listing:1"),
            CacheKey::new(ResourceKind::PurchaseStatus, "status:1"),
        ] {
            cache
                .get_or_fetch(k, CachePolicy::catalog(), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(json!({})) }
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
