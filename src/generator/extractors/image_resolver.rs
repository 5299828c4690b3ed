use regex::Regex;
use std::sync::LazyLock;

use crate::config::GithubConfig;

static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\((.*?)\)").unwrap());

/// 查找README中第一个markdown图片引用，返回括号内的原始路径
pub fn find_first_image_reference(markdown: &str) -> Option<&str> {
    MARKDOWN_IMAGE
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|path| !path.trim().is_empty())
}

/// 图片引用解析器
///
/// 将README中的图片路径（绝对地址、相对路径或托管站点的blob页面链接）
/// 统一转换为可以直接拉取的原始文件地址。解析对任意输入都成立，
/// 异常输入只会得到尽力而为的结果。
#[derive(Debug, Clone)]
pub struct ImageReferenceResolver {
    hosting_host: String,
    raw_content_host: String,
}

impl Default for ImageReferenceResolver {
    fn default() -> Self {
        Self::new("github.com", "raw.githubusercontent.com")
    }
}

impl ImageReferenceResolver {
    pub fn new(hosting_host: &str, raw_content_host: &str) -> Self {
        Self {
            hosting_host: hosting_host.trim_matches('/').to_string(),
            raw_content_host: raw_content_host.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &GithubConfig) -> Self {
        Self::new(&config.hosting_host, &config.raw_content_host)
    }

    /// 解析图片路径为绝对地址
    pub fn resolve(&self, raw_path: &str, owner_repo_id: &str, default_branch: &str) -> String {
        let clean = strip_angle_brackets(raw_path);

        if is_absolute(clean) {
            return self
                .rewrite_blob_url(clean)
                .unwrap_or_else(|| clean.to_string());
        }

        let relative = clean
            .strip_prefix("./")
            .or_else(|| clean.strip_prefix('/'))
            .unwrap_or(clean);

        format!(
            "https://{}/{}/{}/{}",
            self.raw_content_host,
            owner_repo_id.trim_matches('/'),
            default_branch,
            relative
        )
    }

    /// blob页面链接 -> 原始内容链接，非本站点或非blob链接返回None
    fn rewrite_blob_url(&self, url: &str) -> Option<String> {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))?;

        let path = [
            self.hosting_host.clone(),
            format!("www.{}", self.hosting_host),
        ]
        .iter()
        .find_map(|host| rest.strip_prefix(host.as_str())?.strip_prefix('/'))?;

        if !path.contains("/blob/") {
            return None;
        }

        Some(format!(
            "https://{}/{}",
            self.raw_content_host,
            path.replacen("/blob/", "/", 1)
        ))
    }
}

fn strip_angle_brackets(raw_path: &str) -> &str {
    let trimmed = raw_path.trim();
    match trimmed
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
    {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}
