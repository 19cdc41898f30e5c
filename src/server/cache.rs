use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::error::{Error, Result};
use crate::render::CardKind;

/// Rendered cards kept for a fixed time.
///
/// Concurrent requests for a card that is not cached share one render.
#[derive(Clone)]
pub struct CardCache {
    cache: Cache<CardKind, Arc<String>>,
}

impl CardCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(ttl)
            .eviction_listener(|kind, _svg, cause| {
                tracing::debug!("Card cache evicted {} ({:?})", kind, cause);
            })
            .build();

        Self { cache }
    }

    /// Returns the cached card, rendering it with `render` on a miss. Failed
    /// renders are not cached.
    pub async fn get_or_render<F>(
        &self,
        kind: CardKind,
        render: F,
    ) -> std::result::Result<Arc<String>, Arc<Error>>
    where
        F: Future<Output = Result<String>>,
    {
        self.cache
            .try_get_with(kind, async move { render.await.map(Arc::new) })
            .await
    }

    pub async fn get(&self, kind: CardKind) -> Option<Arc<String>> {
        self.cache.get(&kind).await
    }
}
