use crate::config::{Config, OutputFormat};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

/// repo-gallery - 将GitHub仓库整理为可筛选的项目画廊
#[derive(Parser, Debug)]
#[command(name = "repo-gallery")]
#[command(
    about = "Turns a GitHub owner's repositories into a curated, filterable project gallery."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 仓库所有者
    #[arg(long)]
    pub owner: Option<String>,

    /// 需要合并的组织，可重复指定
    #[arg(long = "org")]
    pub organizations: Vec<String>,

    /// 单次处理的最大仓库数
    #[arg(long)]
    pub max_records: Option<usize>,

    /// 仓库列表拉取超时时间（秒）
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// README并发拉取数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 输出格式 (html, json)
    #[arg(long)]
    pub format: Option<String>,

    /// 是否禁用README缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 不访问网络，直接使用内置项目
    #[arg(long)]
    pub offline: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            // 显式指定的配置文件必须可读
            Some(config_path) => Config::from_file(config_path)?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Config::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        self.apply_to(&mut config);
        Ok(config)
    }

    /// 用CLI参数覆盖配置中的设置
    pub fn apply_to(self, config: &mut Config) {
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(owner) = self.owner {
            config.github.owner = owner;
        }
        if !self.organizations.is_empty() {
            config.github.organizations = self.organizations;
        }
        if let Some(max_records) = self.max_records {
            config.github.max_records = max_records;
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            config.github.timeout_seconds = timeout_seconds;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.github.max_parallels = max_parallels;
        }

        if let Some(format_str) = self.format {
            if let Ok(format) = format_str.parse::<OutputFormat>() {
                config.output_format = format;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的输出格式: {}，使用默认格式 {}",
                    format_str, config.output_format
                );
            }
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        // 其他配置
        config.offline = config.offline || self.offline;
        config.verbose = config.verbose || self.verbose;
    }
}
