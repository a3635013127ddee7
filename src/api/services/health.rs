use std::sync::Arc;
use std::time::Instant;

use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, trace};

use crate::services::{BlogService, RewriteService};
use crate::utils::time::format_duration_human;

use super::helpers::success_response;
use super::types::{
    HealthBlogCheck, HealthChecks, HealthResponse, HealthRewriteCheck,
};

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Health Service
///
/// 只读取本地状态（缓存元数据、Provider 信息），不触发远端请求
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        blog: web::Data<Arc<BlogService>>,
        rewrite: web::Data<Arc<RewriteService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0);

        let health_data = HealthResponse {
            status: "healthy".to_string(),
            timestamp: now.to_rfc3339(),
            uptime: uptime_seconds as u64,
            uptime_human: format_duration_human(uptime_seconds),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: HealthChecks {
                blog: HealthBlogCheck {
                    source: blog.source_description(),
                    store: blog.store_name().to_string(),
                    cache: blog.cache_info(),
                },
                rewrite: HealthRewriteCheck {
                    provider: rewrite.provider_name().to_string(),
                    model: rewrite.model().to_string(),
                },
            },
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        debug!(
            "Health check completed in {:?}, uptime: {}",
            start_time.elapsed(),
            health_data.uptime_human
        );

        success_response(health_data)
    }

    // 简单的就绪检查，只返回 200 状态码
    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "text/plain"))
            .body("OK")
    }

    // 活跃性检查
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
