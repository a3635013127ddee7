//! 启动配置验证
//!
//! Checks the loaded `StaticConfig` once before the server starts so that
//! misconfiguration fails fast instead of surfacing on the first request.

use super::StaticConfig;
use crate::errors::{FolioError, Result};

/// Validate a loaded configuration
///
/// All problems are collected and reported together.
pub fn validate_static_config(config: &StaticConfig) -> Result<()> {
    let mut problems = Vec::new();

    for (name, prefix) in [
        ("server.api_prefix", &config.server.api_prefix),
        ("server.health_prefix", &config.server.health_prefix),
    ] {
        if let Err(e) = validate_route_prefix(prefix) {
            problems.push(format!("{}: {}", name, e));
        }
    }
    if config.server.api_prefix == config.server.health_prefix {
        problems.push("server.api_prefix and server.health_prefix must differ".to_string());
    }

    if config.rewrite.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
        problems.push(
            "GEMINI_API_KEY is not defined (set it in .env, the environment, or rewrite.api_key)"
                .to_string(),
        );
    }
    if !config.rewrite.prompt_template.contains("{text}") {
        problems.push("rewrite.prompt_template must contain a {text} placeholder".to_string());
    }
    if config.rewrite.max_input_chars == 0 {
        problems.push("rewrite.max_input_chars must be greater than 0".to_string());
    }
    if config.rewrite.rate_limit_per_second == 0 || config.rewrite.rate_limit_burst == 0 {
        problems.push("rewrite rate limit values must be greater than 0".to_string());
    }

    if config.blog.cache_ttl_secs == 0 {
        problems.push("blog.cache_ttl_secs must be greater than 0".to_string());
    }
    if !is_http_url(&config.blog.source_url) {
        problems.push(format!(
            "blog.source_url must be an http(s) URL, got '{}'",
            config.blog.source_url
        ));
    }

    let bg = &config.background;
    if bg.max_dimension == 0 {
        problems.push("background.max_dimension must be greater than 0".to_string());
    }
    if bg.default_width == 0
        || bg.default_height == 0
        || bg.default_width > bg.max_dimension
        || bg.default_height > bg.max_dimension
    {
        problems.push(format!(
            "background default size {}x{} must be within 1..={}",
            bg.default_width, bg.default_height, bg.max_dimension
        ));
    }

    if !config.security.ip_api_url.contains("{ip}") {
        problems.push("security.ip_api_url must contain an {ip} placeholder".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(FolioError::config(problems.join("; ")))
    }
}

/// 路由前缀必须以 `/` 开头，且不能是根路径
pub fn validate_route_prefix(prefix: &str) -> std::result::Result<(), String> {
    if !prefix.starts_with('/') {
        return Err(format!("'{}' must start with '/'", prefix));
    }
    if prefix == "/" {
        return Err("the root path is reserved for the frontend".to_string());
    }
    if prefix.ends_with('/') {
        return Err(format!("'{}' must not end with '/'", prefix));
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
