use async_trait::async_trait;
use std::collections::HashSet;

use crate::types::RawRecord;

pub mod cached;
pub mod github;

pub use cached::CachedGateway;
pub use github::GithubGateway;

/// 数据源错误
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("timed out after {0} seconds")]
    Timeout(u64),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 仓库数据源
#[async_trait]
pub trait RetrievalGateway: Send + Sync {
    /// 拉取仓库列表（不含README）
    async fn list_records(&self) -> Result<Vec<RawRecord>, GatewayError>;

    /// 拉取单个仓库的README原文
    async fn fetch_readme(&self, record_id: &str) -> Result<String, GatewayError>;
}

/// 整理仓库列表：按全名去重（保留首次出现），去掉fork和排除名单中的仓库，截断到上限
pub fn curate_listing(
    records: Vec<RawRecord>,
    denylist: &[String],
    max_records: usize,
) -> Vec<RawRecord> {
    let denied: HashSet<String> = denylist.iter().map(|n| n.to_lowercase()).collect();
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter(|r| seen.insert(r.full_name.clone()))
        .filter(|r| !r.is_fork && !denied.contains(&r.name.to_lowercase()))
        .take(max_records)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(full_name: &str, is_fork: bool) -> RawRecord {
        let name = full_name.rsplit('/').next().unwrap_or(full_name);
        RawRecord {
            name: name.to_string(),
            full_name: full_name.to_string(),
            is_fork,
            ..Default::default()
        }
    }

    #[test]
    fn test_curate_dedups_by_full_name() {
        let curated = curate_listing(
            vec![
                record("me/a", false),
                record("org/a", false),
                record("me/a", false),
            ],
            &[],
            30,
        );
        let names: Vec<&str> = curated.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["me/a", "org/a"]);
    }

    #[test]
    fn test_curate_drops_forks_and_denylist() {
        let curated = curate_listing(
            vec![
                record("me/Portfolio", false),
                record("me/forked", true),
                record("me/kept", false),
                record("me/me.github.io", false),
            ],
            &["portfolio".to_string(), "me.github.io".to_string()],
            30,
        );
        let names: Vec<&str> = curated.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["kept"]);
    }

    #[test]
    fn test_curate_truncates() {
        let records = (0..5).map(|i| record(&format!("me/r{}", i), false)).collect();
        let curated = curate_listing(records, &[], 3);
        assert_eq!(curated.len(), 3);
        assert_eq!(curated[2].name, "r2");
    }
}
