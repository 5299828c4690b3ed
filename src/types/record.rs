use serde::{Deserialize, Serialize};

/// 从远端数据源获取的原始仓库元数据，尚未经过加工
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RawRecord {
    /// 仓库名称，非空
    pub name: String,

    /// 仓库全名（owner/repo），用于拉取README和拼接图片地址
    pub full_name: String,

    pub description: Option<String>,

    /// 仓库topics，保持源顺序
    #[serde(default)]
    pub topics: Vec<String>,

    /// 主要编程语言
    pub primary_language: Option<String>,

    #[serde(default)]
    pub is_fork: bool,

    /// 默认分支，缺省时按 "main" 处理
    pub default_branch: Option<String>,

    pub html_url: String,

    /// README正文，单独拉取，可能失败
    #[serde(default)]
    pub readme_text: Option<String>,
}

impl RawRecord {
    /// 获取默认分支，缺省时回退到给定值
    pub fn branch_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.default_branch.as_deref() {
            Some(branch) if !branch.trim().is_empty() => branch,
            _ => fallback,
        }
    }
}

/// 加工后的展示模型，构造后不可变
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub name: String,

    /// 展示标题，总是存在
    pub display_title: String,

    /// 展示描述，总是非空
    pub description: String,

    /// 展示标签，顺序即展示顺序，总是非空
    pub tags: Vec<String>,

    pub image_url: Option<String>,

    pub source_url: String,

    /// 用于筛选的分类，与展示标签相互独立
    pub categories: Vec<String>,
}

impl EnrichedRecord {
    /// 判断记录是否属于给定分类
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
