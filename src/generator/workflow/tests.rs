#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::gateway::{GatewayError, RetrievalGateway};
    use crate::generator::catalog::{ALL_FILTER, CatalogState};
    use crate::generator::context::GeneratorContext;
    use crate::generator::outlet::CatalogSource;
    use crate::generator::workflow::{attach_readmes, build_catalog, fetch_records};
    use crate::types::RawRecord;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    /// 内存数据源
    #[derive(Default)]
    struct FakeGateway {
        records: Vec<RawRecord>,
        readmes: HashMap<String, String>,
        list_delay: Option<Duration>,
        fail_listing: bool,
    }

    #[async_trait]
    impl RetrievalGateway for FakeGateway {
        async fn list_records(&self) -> Result<Vec<RawRecord>, GatewayError> {
            if let Some(delay) = self.list_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_listing {
                return Err(GatewayError::Status {
                    status: 500,
                    url: "fake://list".to_string(),
                });
            }
            Ok(self.records.clone())
        }

        async fn fetch_readme(&self, record_id: &str) -> Result<String, GatewayError> {
            self.readmes
                .get(record_id)
                .cloned()
                .ok_or_else(|| GatewayError::Status {
                    status: 404,
                    url: format!("fake://{}/readme", record_id),
                })
        }
    }

    fn raw(name: &str) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            full_name: format!("acme/{}", name),
            html_url: format!("https://github.com/acme/{}", name),
            ..Default::default()
        }
    }

    fn create_test_context(gateway: FakeGateway) -> GeneratorContext {
        let mut config = Config::default();
        config.github.owner = "acme".to_string();
        config.github.timeout_seconds = 1;
        config.cache.enabled = false;
        GeneratorContext::with_gateway(config, Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_build_catalog_live() {
        let gateway = FakeGateway {
            records: vec![raw("widget"), raw("gadget")],
            readmes: HashMap::from([(
                "acme/widget".to_string(),
                "# Widget\n\n![shot](docs/shot.png)\n\nWidget renders repository metadata into curated gallery cards."
                    .to_string(),
            )]),
            ..Default::default()
        };
        let context = create_test_context(gateway);

        let (catalog, source) = build_catalog(&context).await;

        assert_eq!(source, CatalogSource::Live);
        let records = catalog.visible_set(ALL_FILTER);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "widget");
        assert_eq!(
            records[0].description,
            "Widget renders repository metadata into curated gallery cards."
        );
        assert_eq!(
            records[0].image_url.as_deref(),
            Some("https://raw.githubusercontent.com/acme/widget/main/docs/shot.png")
        );

        // README拉取失败只影响该仓库
        assert_eq!(records[1].name, "gadget");
        assert_eq!(records[1].image_url, None);
        assert_eq!(
            records[1].description,
            context.config.gallery.placeholder_description
        );
    }

    #[tokio::test]
    async fn test_listing_failure_falls_back() {
        let context = create_test_context(FakeGateway {
            fail_listing: true,
            ..Default::default()
        });

        let (catalog, source) = build_catalog(&context).await;

        assert_eq!(source, CatalogSource::Fallback);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].source_url, "https://github.com/acme");
    }

    #[tokio::test]
    async fn test_empty_listing_loads_empty_catalog() {
        let mut context = create_test_context(FakeGateway::default());
        context.config.github.owner = "someone-else".to_string();

        let (catalog, source) = build_catalog(&context).await;

        assert_eq!(source, CatalogSource::Live);
        assert_eq!(catalog.state(), CatalogState::Loaded);
        assert!(catalog.is_empty());
        assert!(catalog.visible_set(ALL_FILTER).is_empty());
        assert!(catalog.list_filter_values().is_empty());
    }

    #[tokio::test]
    async fn test_listing_timeout() {
        let context = create_test_context(FakeGateway {
            records: vec![raw("widget")],
            list_delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });

        let result = fetch_records(&context).await;
        assert!(matches!(result, Err(GatewayError::Timeout(1))));
    }

    #[tokio::test]
    async fn test_offline_uses_fallback_without_gateway() {
        let mut context = create_test_context(FakeGateway {
            fail_listing: true,
            ..Default::default()
        });
        context.config.offline = true;

        let (catalog, source) = build_catalog(&context).await;
        assert_eq!(source, CatalogSource::Fallback);
        assert!(!catalog.is_empty());
    }

    #[tokio::test]
    async fn test_attach_readmes_keeps_order_and_isolates_failures() {
        let gateway = FakeGateway {
            readmes: HashMap::from([
                ("acme/a".to_string(), "A".to_string()),
                ("acme/c".to_string(), "C".to_string()),
            ]),
            ..Default::default()
        };

        let records = attach_readmes(&gateway, vec![raw("a"), raw("b"), raw("c")], 2).await;

        let readmes: Vec<Option<&str>> = records.iter().map(|r| r.readme_text.as_deref()).collect();
        assert_eq!(readmes, vec![Some("A"), None, Some("C")]);
    }

    #[test]
    fn test_context_shares_cache_for_stats() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.cache.cache_dir = temp_dir.path().to_path_buf();

        let cached = GeneratorContext::new(config.clone()).unwrap();
        let stats = cached.cache.as_ref().map(|c| c.stats());
        assert_eq!(stats.map(|s| s.hits + s.misses), Some(0));

        config.cache.enabled = false;
        let uncached = GeneratorContext::new(config).unwrap();
        assert!(uncached.cache.is_none());
    }
}
