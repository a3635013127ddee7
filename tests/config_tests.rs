//! Configuration loading tests

use std::io::Write;

use tempfile::NamedTempFile;

use folio::config::{LogFormat, StaticConfig, validate_static_config};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_from_toml_file() {
    let file = write_config(
        r#"
[server]
host = "127.0.0.1"
api_prefix = "/v1"
trusted_proxies = ["10.0.0.0/8"]

[logging]
format = "json"

[blog]
cache_ttl_secs = 60
cache_file = ""

[rewrite]
model = "gemini-2.0-flash"
max_input_chars = 500
"#,
    );

    let config = StaticConfig::load(file.path().to_str());
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.api_prefix, "/v1");
    assert_eq!(config.server.health_prefix, "/health");
    assert_eq!(config.server.trusted_proxies, vec!["10.0.0.0/8".to_string()]);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.blog.cache_ttl_secs, 60);
    assert!(config.blog.cache_file.is_empty());
    assert_eq!(config.rewrite.model, "gemini-2.0-flash");
    assert_eq!(config.rewrite.max_input_chars, 500);
    // 未配置的段落使用默认值
    assert_eq!(config.background.default_width, 1920);
}

#[test]
fn test_missing_file_uses_defaults() {
    let config = StaticConfig::load(Some("/nonexistent/folio-test.toml"));
    assert_eq!(config.server.api_prefix, "/api");
    assert_eq!(config.blog.cache_file, "data/blog_cache.json");
}

#[test]
fn test_validation_collects_problems() {
    let mut config = StaticConfig::default();
    config.rewrite.api_key = None;
    config.server.api_prefix = "no-slash".to_string();
    config.rewrite.prompt_template = "no placeholder".to_string();

    let err = validate_static_config(&config).unwrap_err();
    let message = err.message().to_string();
    assert!(message.contains("GEMINI_API_KEY"));
    assert!(message.contains("server.api_prefix"));
    assert!(message.contains("{text}"));
}

#[test]
fn test_valid_config_passes() {
    let mut config = StaticConfig::default();
    config.rewrite.api_key = Some("key".to_string());
    assert!(validate_static_config(&config).is_ok());
}

#[test]
fn test_sample_config_is_loadable() {
    let file = write_config(&StaticConfig::generate_sample_config());
    let config = StaticConfig::load(file.path().to_str());
    assert_eq!(config.server.api_prefix, "/api");
    assert_eq!(config.rewrite.model, "gemini-1.5-flash-latest");
    assert!(validate_static_config(&config).is_ok());
}
