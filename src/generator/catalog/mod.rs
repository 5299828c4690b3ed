use std::sync::Arc;

use crate::generator::enrich::ProjectEnricher;
use crate::types::{EnrichedRecord, RawRecord};

pub mod fallback;

/// 表示"全部项目"的筛选键
pub const ALL_FILTER: &str = "all";

/// 目录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    Empty,
    Loaded,
}

/// 项目目录
///
/// 独占持有加工后的记录集合。每次加载整体替换集合：新集合完全构建好之后才替换旧集合，
/// 已经通过 `snapshot` 拿到旧集合的读者不受影响。
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    enricher: ProjectEnricher,
    preferred_order: Vec<String>,
    records: Arc<[EnrichedRecord]>,
    state: CatalogState,
}

impl ProjectCatalog {
    pub fn new(enricher: ProjectEnricher, preferred_order: Vec<String>) -> Self {
        Self {
            enricher,
            preferred_order,
            records: Arc::from(Vec::new()),
            state: CatalogState::Empty,
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    /// 加工并加载原始记录，保持原有顺序
    pub fn load(&mut self, raw_records: &[RawRecord]) {
        let enriched: Vec<EnrichedRecord> = raw_records
            .iter()
            .map(|raw| self.enricher.enrich(raw))
            .collect();
        self.replace(enriched);
    }

    /// 直接加载已加工的记录（兜底目录使用）
    pub fn load_enriched(&mut self, records: Vec<EnrichedRecord>) {
        self.replace(records);
    }

    fn replace(&mut self, records: Vec<EnrichedRecord>) {
        self.records = Arc::from(records);
        self.state = CatalogState::Loaded;
    }

    /// 当前集合的只读快照
    pub fn snapshot(&self) -> Arc<[EnrichedRecord]> {
        Arc::clone(&self.records)
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 所有记录中出现过的分类，去重
    ///
    /// 优先展示顺序中的分类排在前面，其余分类按首次出现顺序追加。
    pub fn list_filter_values(&self) -> Vec<String> {
        let mut discovered: Vec<&str> = Vec::new();
        for category in self.records.iter().flat_map(|r| r.categories.iter()) {
            if !discovered.contains(&category.as_str()) {
                discovered.push(category);
            }
        }

        let mut ordered: Vec<String> = self
            .preferred_order
            .iter()
            .filter(|p| discovered.contains(&p.as_str()))
            .cloned()
            .collect();

        for category in discovered {
            if !ordered.iter().any(|o| o == category) {
                ordered.push(category.to_string());
            }
        }

        ordered
    }

    /// 给定筛选键下可见的记录，保持加载顺序；无匹配时返回空集合
    pub fn visible_set(&self, filter_key: &str) -> Vec<&EnrichedRecord> {
        if filter_key == ALL_FILTER {
            return self.records.iter().collect();
        }

        self.records
            .iter()
            .filter(|r| r.in_category(filter_key))
            .collect()
    }
}
