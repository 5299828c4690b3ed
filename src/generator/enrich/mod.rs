use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::config::Config;
use crate::generator::extractors::{
    ImageReferenceResolver, ReadmeSummaryExtractor, find_first_image_reference,
    shorten_to_sentences,
};
use crate::types::{EnrichedRecord, RawRecord};

pub mod overrides;

pub use overrides::{FieldPatch, NameMatcher, OverridePatch, OverrideRule, OverrideTable};

/// 没有topics和语言时的标签
pub const SENTINEL_TAG: &str = "Project";

/// 兜底摘要保留的句子数
const FALLBACK_SUMMARY_SENTENCES: usize = 3;

static WORD_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w").unwrap());

/// 加工参数
#[derive(Debug, Clone)]
pub struct EnrichSettings {
    pub default_branch: String,
    pub default_category: String,
    pub placeholder_description: String,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        let gallery = crate::config::GalleryConfig::default();
        Self {
            default_branch: gallery.default_branch,
            default_category: gallery.default_category,
            placeholder_description: gallery.placeholder_description,
        }
    }
}

/// 加工中的记录，字段为None表示尚未赋值
#[derive(Debug, Clone, Default)]
struct DraftRecord {
    display_title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
    image_url: Option<String>,
    categories: Option<Vec<String>>,
}

impl DraftRecord {
    /// 合并一条覆盖规则的补丁
    fn merge(&mut self, patch: &OverridePatch) {
        if let Some(p) = &patch.display_title {
            p.merge_into(&mut self.display_title);
        }
        if let Some(p) = &patch.description {
            p.merge_into(&mut self.description);
        }
        if let Some(p) = &patch.tags {
            p.merge_into(&mut self.tags);
        }
        if let Some(p) = &patch.categories {
            p.merge_into(&mut self.categories);
        }
        if let Some(p) = &patch.image_url {
            p.merge_into(&mut self.image_url);
        }
    }
}

/// 项目加工器
///
/// 将原始仓库元数据加工为展示模型。加工是纯函数：同样的输入总是得到同样的输出。
#[derive(Debug, Clone)]
pub struct ProjectEnricher {
    resolver: ImageReferenceResolver,
    summarizer: ReadmeSummaryExtractor,
    overrides: OverrideTable,
    settings: EnrichSettings,
}

impl Default for ProjectEnricher {
    fn default() -> Self {
        Self::new(
            ImageReferenceResolver::default(),
            OverrideTable::builtin(),
            EnrichSettings::default(),
        )
    }
}

impl ProjectEnricher {
    pub fn new(
        resolver: ImageReferenceResolver,
        overrides: OverrideTable,
        settings: EnrichSettings,
    ) -> Self {
        Self {
            resolver,
            summarizer: ReadmeSummaryExtractor::new(),
            overrides,
            settings,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ImageReferenceResolver::from_config(&config.github),
            OverrideTable::builtin(),
            EnrichSettings {
                default_branch: config.gallery.default_branch.clone(),
                default_category: config.gallery.default_category.clone(),
                placeholder_description: config.gallery.placeholder_description.clone(),
            },
        )
    }

    /// 加工单条记录
    pub fn enrich(&self, raw: &RawRecord) -> EnrichedRecord {
        let mut draft = DraftRecord {
            tags: Some(seed_tags(raw)),
            description: non_blank(raw.description.as_deref()),
            ..Default::default()
        };

        // README：图片直接落入草稿，摘要暂存，等覆盖规则之后再决定
        let mut fallback_summary = None;
        if let Some(readme) = raw.readme_text.as_deref() {
            if let Some(image_path) = find_first_image_reference(readme) {
                let branch = raw.branch_or(&self.settings.default_branch);
                draft.image_url = Some(self.resolver.resolve(image_path, &raw.full_name, branch));
            }
            fallback_summary = self.summarizer.extract_summary(Some(readme));
        }

        for rule in self.overrides.matching(&raw.name) {
            tracing::debug!(repo = %raw.name, family = rule.family, "应用覆盖规则");
            draft.merge(&rule.patch);
        }

        if draft.description.is_none()
            && let Some(summary) = fallback_summary
        {
            draft.description = Some(shorten_to_sentences(
                &summary,
                FALLBACK_SUMMARY_SENTENCES,
            ));
        }

        let description = draft
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.settings.placeholder_description.clone());

        let display_title = draft
            .display_title
            .unwrap_or_else(|| prettify_name(&raw.name));

        let tags = draft
            .tags
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| vec![SENTINEL_TAG.to_string()]);

        let categories = draft
            .categories
            .map(dedup_preserving_order)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| vec![self.settings.default_category.clone()]);

        EnrichedRecord {
            name: raw.name.clone(),
            display_title,
            description,
            tags,
            image_url: draft.image_url,
            source_url: raw.html_url.clone(),
            categories,
        }
    }
}

/// topics > 主语言 > "Project"
fn seed_tags(raw: &RawRecord) -> Vec<String> {
    let topics: Vec<String> = raw
        .topics
        .iter()
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .collect();
    if !topics.is_empty() {
        return topics;
    }

    match non_blank(raw.primary_language.as_deref()) {
        Some(language) => vec![language],
        None => vec![SENTINEL_TAG.to_string()],
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// 由仓库名生成标题：连字符和下划线替换为空格，每个单词首字母大写
pub fn prettify_name(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    WORD_START
        .replace_all(&spaced, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}
