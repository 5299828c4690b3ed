use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

/// 输出格式
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[serde(rename = "html")]
    #[default]
    Html,
    #[serde(rename = "json")]
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 输出路径
    pub output_path: PathBuf,

    /// 输出格式
    pub output_format: OutputFormat,

    /// 跳过远端拉取，直接使用内置的兜底项目
    pub offline: bool,

    /// 是否启用详细日志
    pub verbose: bool,

    /// 远端数据源配置
    pub github: GithubConfig,

    /// 画廊展示配置
    pub gallery: GalleryConfig,

    /// README缓存配置
    pub cache: CacheConfig,
}

/// GitHub数据源配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GithubConfig {
    /// REST API基地址
    pub api_base_url: String,

    /// 代码托管站点域名，用于识别blob链接
    pub hosting_host: String,

    /// 原始文件内容域名
    pub raw_content_host: String,

    /// 仓库所有者
    pub owner: String,

    /// 需要合并的组织
    pub organizations: Vec<String>,

    /// 需要排除的仓库名（不区分大小写）
    pub denylist: Vec<String>,

    /// 仓库列表拉取超时时间（秒）
    pub timeout_seconds: u64,

    /// 单次加载处理的最大仓库数
    pub max_records: usize,

    /// README并发拉取数
    pub max_parallels: usize,

    /// 访问令牌，未配置时读取 GITHUB_TOKEN
    pub token: Option<String>,
}

impl GithubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// 画廊展示配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GalleryConfig {
    /// 仓库未声明默认分支时使用的分支
    pub default_branch: String,

    /// 没有命中任何覆盖规则时的分类
    pub default_category: String,

    /// 筛选按钮的优先展示顺序
    pub preferred_category_order: Vec<String>,

    /// 所有来源都没有描述时的占位文案
    pub placeholder_description: String,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./gallery"),
            output_format: OutputFormat::default(),
            offline: false,
            verbose: false,
            github: GithubConfig::default(),
            gallery: GalleryConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from("https://api.github.com"),
            hosting_host: String::from("github.com"),
            raw_content_host: String::from("raw.githubusercontent.com"),
            owner: String::from("georgekalf"),
            organizations: vec!["imdb-helpful-reviews-detection-nlp".to_string()],
            denylist: vec![
                "georgekalf".to_string(),
                "georgekalf.github.io".to_string(),
                "portfolio".to_string(),
                "portfolio-website".to_string(),
            ],
            timeout_seconds: 10,
            max_records: 30,
            max_parallels: 8,
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_branch: String::from("main"),
            default_category: String::from("Data Analysis"),
            preferred_category_order: vec![
                "Machine Learning".to_string(),
                "Deep Learning".to_string(),
                "NLP".to_string(),
                "Data Analysis".to_string(),
                "Finance".to_string(),
                "Web Development".to_string(),
            ],
            placeholder_description: String::from(
                "Project details coming soon – see GitHub for more information.",
            ),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".gallery/cache"),
            expire_hours: 24,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
