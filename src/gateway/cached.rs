use async_trait::async_trait;
use std::sync::Arc;

use crate::cache::CacheManager;
use crate::gateway::{GatewayError, RetrievalGateway};
use crate::types::RawRecord;

const README_CATEGORY: &str = "readme";

/// 为README拉取加一层磁盘缓存的数据源，仓库列表不缓存
pub struct CachedGateway<G> {
    inner: G,
    cache: Arc<CacheManager>,
}

impl<G: RetrievalGateway> CachedGateway<G> {
    pub fn new(inner: G, cache: Arc<CacheManager>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<G: RetrievalGateway> RetrievalGateway for CachedGateway<G> {
    async fn list_records(&self) -> Result<Vec<RawRecord>, GatewayError> {
        self.inner.list_records().await
    }

    async fn fetch_readme(&self, record_id: &str) -> Result<String, GatewayError> {
        if let Some(cached) = self.cache.get::<String>(README_CATEGORY, record_id).await {
            tracing::debug!(repo = %record_id, "README缓存命中");
            return Ok(cached);
        }

        let readme = self.inner.fetch_readme(record_id).await?;
        if let Err(e) = self.cache.set(README_CATEGORY, record_id, readme.clone()).await {
            tracing::warn!(repo = %record_id, error = %e, "⚠️ README缓存写入失败");
        }
        Ok(readme)
    }
}
