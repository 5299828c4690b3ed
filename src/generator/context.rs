use std::sync::Arc;

use anyhow::Result;

use crate::cache::CacheManager;
use crate::config::Config;
use crate::gateway::{CachedGateway, GithubGateway, RetrievalGateway};
use crate::generator::catalog::ProjectCatalog;
use crate::generator::enrich::ProjectEnricher;

#[derive(Clone)]
pub struct GeneratorContext {
    /// 仓库数据源
    pub gateway: Arc<dyn RetrievalGateway>,
    /// 配置
    pub config: Config,
    /// 项目加工器
    pub enricher: ProjectEnricher,
    /// README缓存，未启用时为None
    pub cache: Option<Arc<CacheManager>>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文，使用GitHub数据源
    pub fn new(config: Config) -> Result<Self> {
        let github = GithubGateway::new(config.github.clone())?;
        if !config.cache.enabled {
            return Ok(Self::with_gateway(config, Arc::new(github)));
        }

        let cache = Arc::new(CacheManager::new(config.cache.clone()));
        let gateway = Arc::new(CachedGateway::new(github, cache.clone()));
        let mut context = Self::with_gateway(config, gateway);
        context.cache = Some(cache);
        Ok(context)
    }

    /// 使用指定数据源创建上下文
    pub fn with_gateway(config: Config, gateway: Arc<dyn RetrievalGateway>) -> Self {
        let enricher = ProjectEnricher::from_config(&config);
        Self {
            gateway,
            config,
            enricher,
            cache: None,
        }
    }

    /// 创建空目录
    pub fn new_catalog(&self) -> ProjectCatalog {
        ProjectCatalog::new(
            self.enricher.clone(),
            self.config.gallery.preferred_category_order.clone(),
        )
    }

    /// 兜底目录中使用的主页地址
    pub fn profile_url(&self) -> String {
        format!(
            "https://{}/{}",
            self.config.github.hosting_host, self.config.github.owner
        )
    }
}
