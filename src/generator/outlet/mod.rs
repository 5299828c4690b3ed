use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::generator::catalog::{ALL_FILTER, ProjectCatalog};
use crate::types::EnrichedRecord;

pub mod html;

pub use html::HtmlRenderer;

/// "全部项目"按钮的文案
pub const ALL_FILTER_LABEL: &str = "All Projects";

/// 筛选按钮
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterButton {
    pub key: String,
    pub label: String,
    pub active: bool,
    /// 对应页面的文件名（不含扩展名）
    pub page: String,
}

/// 项目卡片
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectCard {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub source_url: String,
}

impl From<&EnrichedRecord> for ProjectCard {
    fn from(record: &EnrichedRecord) -> Self {
        Self {
            name: record.name.clone(),
            title: record.display_title.clone(),
            description: record.description.clone(),
            tags: record.tags.clone(),
            image_url: record.image_url.clone(),
            source_url: record.source_url.clone(),
        }
    }
}

/// 展示描述：当前筛选下的卡片和筛选按钮
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryView {
    pub active_filter: String,
    pub filters: Vec<FilterButton>,
    pub cards: Vec<ProjectCard>,
    /// 没有可见项目时的提示
    pub empty_message: Option<String>,
}

impl GalleryView {
    pub fn build(visible: &[&EnrichedRecord], filters: &[String], active_filter: &str) -> Self {
        let buttons = page_stems(filters)
            .into_iter()
            .map(|(key, page)| FilterButton {
                label: if key == ALL_FILTER {
                    ALL_FILTER_LABEL.to_string()
                } else {
                    key.clone()
                },
                active: key == active_filter,
                key,
                page,
            })
            .collect();

        let empty_message = visible
            .is_empty()
            .then(|| format!("No projects found for \"{}\".", active_filter));

        Self {
            active_filter: active_filter.to_string(),
            filters: buttons,
            cards: visible.iter().map(|r| ProjectCard::from(*r)).collect(),
            empty_message,
        }
    }
}

/// 渲染器：把展示描述转换为具体的输出
pub trait Renderer {
    fn render(&self, view: &GalleryView) -> Result<String>;

    fn file_extension(&self) -> &'static str;
}

/// JSON渲染器
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: &GalleryView) -> Result<String> {
        serde_json::to_string_pretty(view).context("Failed to serialize gallery view")
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer + Send + Sync> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer::new()),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// 为"全部"和每个筛选键分配页面文件名（不含扩展名），顺序与输入一致
///
/// "全部"固定为 `index`，其余为 `filter-<slug>`。slug为空或与已分配的名字冲突时
/// 追加筛选键MD5的前8位，保证同一组筛选键得到互不相同的文件名。
pub fn page_stems(filters: &[String]) -> Vec<(String, String)> {
    let mut taken: Vec<String> = vec!["index".to_string()];
    let mut stems = vec![(ALL_FILTER.to_string(), "index".to_string())];

    for key in filters.iter().filter(|k| k.as_str() != ALL_FILTER) {
        let slug = slugify(key);
        let mut stem = if slug.is_empty() {
            format!("filter-{}", short_hash(key))
        } else {
            format!("filter-{}", slug)
        };
        if taken.contains(&stem) {
            stem = format!("{}-{}", stem, short_hash(key));
        }
        taken.push(stem.clone());
        stems.push((key.clone(), stem));
    }

    stems
}

fn slugify(key: &str) -> String {
    let mut slug = String::new();
    for c in key.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn short_hash(key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())[..8].to_string()
}

/// 画廊会话
///
/// 持有目录的只读引用，筛选选择事件通过 `select_filter` 回到目录，并重新渲染。
pub struct GallerySession<'a> {
    catalog: &'a ProjectCatalog,
    renderer: &'a dyn Renderer,
    filters: Vec<String>,
    active_filter: String,
}

impl<'a> GallerySession<'a> {
    pub fn new(catalog: &'a ProjectCatalog, renderer: &'a dyn Renderer) -> Self {
        Self {
            catalog,
            renderer,
            filters: catalog.list_filter_values(),
            active_filter: ALL_FILTER.to_string(),
        }
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn active_filter(&self) -> &str {
        &self.active_filter
    }

    pub fn current_view(&self) -> GalleryView {
        let visible = self.catalog.visible_set(&self.active_filter);
        GalleryView::build(&visible, &self.filters, &self.active_filter)
    }

    /// 选择筛选键并重新渲染
    pub fn select_filter(&mut self, filter_key: &str) -> Result<String> {
        self.active_filter = filter_key.to_string();
        self.renderer.render(&self.current_view())
    }
}

/// 目录来源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Live,
    Fallback,
}

/// 输出清单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryManifest {
    pub generated_at: DateTime<Utc>,
    pub source: CatalogSource,
    pub total_records: usize,
    pub filters: Vec<String>,
    pub pages: Vec<String>,
}

pub const MANIFEST_FILE: &str = "manifest.json";

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, catalog: &ProjectCatalog, source: CatalogSource) -> Result<Vec<PathBuf>>;
}

/// 写入磁盘：每个筛选键一个页面，外加一份清单
pub struct DiskOutlet {
    output_dir: PathBuf,
    renderer: Box<dyn Renderer + Send + Sync>,
}

impl DiskOutlet {
    pub fn new(output_dir: &Path, renderer: Box<dyn Renderer + Send + Sync>) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            renderer,
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, catalog: &ProjectCatalog, source: CatalogSource) -> Result<Vec<PathBuf>> {
        println!("\n🖊️ 画廊页面写入中...");
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .context(format!("Failed to create output dir: {:?}", self.output_dir))?;

        let mut session = GallerySession::new(catalog, self.renderer.as_ref());
        let stems = page_stems(session.filters());

        let mut written = Vec::with_capacity(stems.len() + 1);
        let mut pages = Vec::with_capacity(stems.len());
        for (key, stem) in &stems {
            let content = session.select_filter(key)?;
            let file_name = format!("{}.{}", stem, self.renderer.file_extension());
            let path = self.output_dir.join(&file_name);
            tokio::fs::write(&path, content)
                .await
                .context(format!("Failed to write page: {:?}", path))?;
            println!("💾 已保存页面: {}", path.display());
            pages.push(file_name);
            written.push(path);
        }

        let manifest = GalleryManifest {
            generated_at: Utc::now(),
            source,
            total_records: catalog.len(),
            filters: session.filters().to_vec(),
            pages,
        };
        let manifest_path = self.output_dir.join(MANIFEST_FILE);
        tokio::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
            .await
            .context("Failed to write manifest")?;
        written.push(manifest_path);

        println!("💾 画廊写入完成，输出目录: {}", self.output_dir.display());
        Ok(written)
    }
}
