use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::GithubConfig;
use crate::gateway::{GatewayError, RetrievalGateway, curate_listing};
use crate::types::RawRecord;

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.v3.raw";

/// GitHub REST API返回的仓库字段（只取用到的部分）
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GithubRepo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub topics: Option<Vec<String>>,
    pub language: Option<String>,
    pub fork: bool,
    pub default_branch: Option<String>,
    pub html_url: String,
}

impl From<GithubRepo> for RawRecord {
    fn from(repo: GithubRepo) -> Self {
        RawRecord {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            topics: repo.topics.unwrap_or_default(),
            primary_language: repo.language,
            is_fork: repo.fork,
            default_branch: repo.default_branch,
            html_url: repo.html_url,
            readme_text: None,
        }
    }
}

/// 解析仓库列表JSON
pub fn parse_repo_listing(body: &str) -> Result<Vec<RawRecord>, GatewayError> {
    let repos: Vec<GithubRepo> = serde_json::from_str(body)?;
    Ok(repos.into_iter().map(RawRecord::from).collect())
}

/// 基于GitHub REST API的数据源
pub struct GithubGateway {
    client: Client,
    config: GithubConfig,
}

impl GithubGateway {
    pub fn new(config: GithubConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, config })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    async fn get_text(&self, url: &str, accept: &str) -> Result<String, GatewayError> {
        let mut request = self.client.get(url).header(ACCEPT, accept);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    async fn list_user_repos(&self) -> Result<Vec<RawRecord>, GatewayError> {
        let url = self.api_url(&format!("users/{}/repos?per_page=100", self.config.owner));
        let body = self.get_text(&url, ACCEPT_JSON).await?;
        parse_repo_listing(&body)
    }

    async fn list_org_repos(&self, org: &str) -> Result<Vec<RawRecord>, GatewayError> {
        let url = self.api_url(&format!("orgs/{}/repos?per_page=100", org));
        let body = self.get_text(&url, ACCEPT_JSON).await?;
        parse_repo_listing(&body)
    }
}

#[async_trait]
impl RetrievalGateway for GithubGateway {
    async fn list_records(&self) -> Result<Vec<RawRecord>, GatewayError> {
        let mut records = self.list_user_repos().await?;

        // 组织仓库是补充来源，失败时跳过
        for org in &self.config.organizations {
            match self.list_org_repos(org).await {
                Ok(org_records) => records.extend(org_records),
                Err(e) => {
                    tracing::warn!(org = %org, error = %e, "⚠️ 组织仓库拉取失败，已跳过");
                }
            }
        }

        Ok(curate_listing(
            records,
            &self.config.denylist,
            self.config.max_records,
        ))
    }

    async fn fetch_readme(&self, record_id: &str) -> Result<String, GatewayError> {
        let url = self.api_url(&format!("repos/{}/readme", record_id));
        self.get_text(&url, ACCEPT_RAW).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_listing() {
        let body = r#"[
            {
                "name": "hotel-reservations",
                "full_name": "acme/hotel-reservations",
                "description": null,
                "topics": ["ml", "clustering"],
                "language": "Jupyter Notebook",
                "fork": false,
                "default_branch": "master",
                "html_url": "https://github.com/acme/hotel-reservations",
                "stargazers_count": 3
            },
            {
                "name": "forked",
                "full_name": "acme/forked",
                "fork": true,
                "html_url": "https://github.com/acme/forked"
            }
        ]"#;

        let records = parse_repo_listing(body).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.name, "hotel-reservations");
        assert_eq!(first.full_name, "acme/hotel-reservations");
        assert_eq!(first.description, None);
        assert_eq!(first.topics, vec!["ml", "clustering"]);
        assert_eq!(first.primary_language.as_deref(), Some("Jupyter Notebook"));
        assert_eq!(first.branch_or("main"), "master");
        assert!(first.readme_text.is_none());

        let second = &records[1];
        assert!(second.is_fork);
        assert!(second.topics.is_empty());
        assert_eq!(second.branch_or("main"), "main");
    }

    #[test]
    fn test_parse_error_payload_is_decode_error() {
        let body = r#"{"message": "API rate limit exceeded"}"#;
        assert!(matches!(
            parse_repo_listing(body),
            Err(GatewayError::Decode(_))
        ));
    }

    #[test]
    fn test_api_url_joins_base() {
        let config = GithubConfig {
            api_base_url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        let gateway = GithubGateway::new(config).unwrap();
        assert_eq!(
            gateway.api_url("repos/a/b/readme"),
            "https://api.example.com/repos/a/b/readme"
        );
    }
}
