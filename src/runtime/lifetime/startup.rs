use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::services::{AppStartTime, AppState, rewrite_rate_limit_config};
use crate::config::{StaticConfig, get_config};
use crate::services::{
    BackgroundGenerator, BlogService, ClientInfoService, ExternalIpInfoProvider, GeminiProvider,
    RewriteService,
};

pub struct StartupContext {
    pub state: AppState,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub api_prefix: String,
    pub health_prefix: String,
}

/// 准备服务器启动的上下文
/// 包括博客缓存预热、改写 Provider、背景生成器和 IP 信息查询
pub async fn prepare_server_startup(app_start_time: AppStartTime) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    // 没有 API key 时无法提供改写服务，直接退出
    let provider = GeminiProvider::from_config(&config.rewrite)
        .context("Failed to initialize rewrite provider")?;
    info!(
        "Rewrite provider: gemini (model {})",
        config.rewrite.model
    );
    let rewrite = Arc::new(RewriteService::new(Arc::new(provider), &config.rewrite));

    // 从持久化缓存预热博客数据
    let blog = Arc::new(BlogService::from_config(&config.blog));
    blog.warm_from_store();
    info!(
        "Blog source: {} (store: {})",
        blog.source_description(),
        blog.store_name()
    );

    // 后台预取，避免第一个请求等待远端
    let blog_for_prefetch = blog.clone();
    tokio::spawn(async move {
        let snapshot = blog_for_prefetch.fetch_blog_data().await;
        debug!(
            "Blog prefetch finished: {} posts from {}",
            snapshot.data.posts.len(),
            snapshot.source
        );
    });

    let background = Arc::new(BackgroundGenerator::new(&config.background));

    let ip_lookup = Arc::new(ExternalIpInfoProvider::from_config(&config.security));
    let client_info = Arc::new(ClientInfoService::new(ip_lookup));

    let route_config = RouteConfig {
        api_prefix: config.server.api_prefix.clone(),
        health_prefix: config.server.health_prefix.clone(),
    };

    check_component_enabled(&config, &route_config);

    let state = AppState {
        blog,
        rewrite,
        background,
        client_info,
        start_time: app_start_time,
        rewrite_limiter: rewrite_rate_limit_config(&config.rewrite),
        api_prefix: route_config.api_prefix.clone(),
        health_prefix: route_config.health_prefix.clone(),
    };

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        state,
        route_config,
    })
}

fn check_component_enabled(config: &StaticConfig, route_config: &RouteConfig) {
    info!("API available at: {}", route_config.api_prefix);
    info!("Health API available at: {}", route_config.health_prefix);

    if config.rewrite.cache_ttl_secs == 0 {
        info!("Rewrite response cache is disabled");
    }

    if config.blog.cache_file.trim().is_empty() {
        warn!("blog.cache_file is empty, blog cache will not survive restarts");
    }

    if config.server.trusted_proxies.is_empty() {
        warn!(
            "Client IP: auto-detect mode enabled. \
             Connections from private IPs will use X-Forwarded-For. \
             To disable, configure server.trusted_proxies explicitly."
        );
    } else {
        info!(
            "Client IP: explicit trusted proxies configured: {:?}",
            config.server.trusted_proxies
        );
    }
}
