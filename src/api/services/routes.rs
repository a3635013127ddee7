//! 路由装配
//!
//! Server 模式与集成测试共用同一套路由表

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfig};
use actix_web::web;
use governor::middleware::NoOpMiddleware;

use crate::services::{BackgroundGenerator, BlogService, ClientInfoService, RewriteService};

use super::background::BackgroundApi;
use super::blog::BlogApi;
use super::frontend::{FrontendService, frontend_routes};
use super::health::{AppStartTime, health_routes};
use super::helpers::{json_config, query_config};
use super::rewrite::{ClientIpKeyExtractor, RewriteApi};
use super::security::SecurityApi;

pub type RewriteLimiterConfig = GovernorConfig<ClientIpKeyExtractor, NoOpMiddleware>;

/// 所有 handler 共享的状态
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub rewrite: Arc<RewriteService>,
    pub background: Arc<BackgroundGenerator>,
    pub client_info: Arc<ClientInfoService>,
    pub start_time: AppStartTime,
    pub rewrite_limiter: RewriteLimiterConfig,
    pub api_prefix: String,
    pub health_prefix: String,
}

/// JSON API 路由（挂载在 api_prefix 下）
pub fn api_routes(prefix: &str, rewrite_limiter: &RewriteLimiterConfig) -> actix_web::Scope {
    web::scope(prefix)
        .service(
            web::resource("/rewrite")
                .wrap(Governor::new(rewrite_limiter))
                .route(web::post().to(RewriteApi::rewrite)),
        )
        .route("/about", web::get().to(RewriteApi::about))
        .route("/blog", web::get().to(BlogApi::snapshot))
        .route("/blog/posts", web::get().to(BlogApi::posts))
        .route("/blog/posts/{slug}", web::get().to(BlogApi::post))
        .route("/blog/categories", web::get().to(BlogApi::categories))
        .route("/blog/cache", web::get().to(BlogApi::cache_info))
        .route("/background.svg", web::get().to(BackgroundApi::svg))
        .route("/background", web::get().to(BackgroundApi::info))
        .route("/security", web::get().to(SecurityApi::report))
}

/// 注册共享状态与全部路由
///
/// 顺序：health → API → 前端静态资源 → SPA fallback
pub fn configure_app(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.blog.clone()))
        .app_data(web::Data::new(state.rewrite.clone()))
        .app_data(web::Data::new(state.background.clone()))
        .app_data(web::Data::new(state.client_info.clone()))
        .app_data(web::Data::new(state.start_time.clone()))
        .app_data(json_config())
        .app_data(query_config())
        .service(web::scope(&state.health_prefix).service(health_routes()))
        .service(api_routes(&state.api_prefix, &state.rewrite_limiter))
        .configure(frontend_routes)
        .default_service(web::to(FrontendService::handle_spa_fallback));
}
