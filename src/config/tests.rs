#[cfg(test)]
mod tests {
    use crate::config::{CacheConfig, Config, GalleryConfig, GithubConfig, OutputFormat};
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.output_path, PathBuf::from("./gallery"));
        assert_eq!(config.output_format, OutputFormat::Html);
        assert!(!config.offline);
        assert!(!config.verbose);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Html.to_string(), "html");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_github_config_default() {
        let config = GithubConfig::default();

        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.hosting_host, "github.com");
        assert_eq!(config.raw_content_host, "raw.githubusercontent.com");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_records, 30);
        assert!(config.max_parallels > 0);
        assert!(config.denylist.contains(&"portfolio".to_string()));
        assert!(config.denylist.contains(&"portfolio-website".to_string()));
    }

    #[test]
    fn test_gallery_config_default() {
        let config = GalleryConfig::default();

        assert_eq!(config.default_branch, "main");
        assert_eq!(config.default_category, "Data Analysis");
        assert_eq!(config.preferred_category_order.len(), 6);
        assert_eq!(config.preferred_category_order[0], "Machine Learning");
        assert_eq!(
            config.placeholder_description,
            "Project details coming soon – see GitHub for more information."
        );
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();

        assert!(config.enabled);
        assert_eq!(config.cache_dir, PathBuf::from(".gallery/cache"));
        assert_eq!(config.expire_hours, 24);
    }

    #[test]
    fn test_from_file_partial_overrides_keep_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("gallery.toml");

        let content = r#"output_format = "json"

[github]
owner = "acme"
organizations = []
max_records = 12

[gallery]
default_category = "Misc"
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.github.owner, "acme");
        assert!(config.github.organizations.is_empty());
        assert_eq!(config.github.max_records, 12);
        assert_eq!(config.github.timeout_seconds, 10);
        assert_eq!(config.gallery.default_category, "Misc");
        assert_eq!(config.gallery.default_branch, "main");
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/gallery.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("gallery.toml");
        std::fs::write(&config_path, "output_format = [").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }
}
