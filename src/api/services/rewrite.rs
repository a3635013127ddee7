//! 改写网关端点

use std::sync::Arc;

use actix_governor::{
    GovernorConfig, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError,
};
use actix_web::dev::ServiceRequest;
use actix_web::{HttpResponse, Responder, web};
use governor::middleware::NoOpMiddleware;
use tracing::{debug, trace};

use crate::config::{RewriteConfig, get_config};
use crate::services::RewriteService;
use crate::utils::ip::{extract_forwarded_ip_from_headers, resolve_client_ip};

use super::helpers::{api_result, success_response};
use super::types::RewriteRequest;

/// 基于客户端 IP 的限流 key
///
/// 与 `extract_client_ip` 规则一致：只有可信代理（或私有地址的反向代理）才信任转发头
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let config = get_config();
        let conn_info = req.connection_info();
        resolve_client_ip(conn_info.peer_addr(), &config.server.trusted_proxies, || {
            extract_forwarded_ip_from_headers(req.headers())
        })
        .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract client IP"))
    }
}

/// 改写端点限流配置，超限返回 429
///
/// 配置只构建一次，在各 worker 中通过 `Governor::new(&config)` 共享同一个限流状态
pub fn rewrite_rate_limit_config(
    config: &RewriteConfig,
) -> GovernorConfig<ClientIpKeyExtractor, NoOpMiddleware> {
    let interval_ms = (1000 / config.rate_limit_per_second.max(1)).max(1);
    let governor_config = GovernorConfigBuilder::default()
        .milliseconds_per_request(interval_ms)
        .burst_size(config.rate_limit_burst.max(1))
        .key_extractor(ClientIpKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!(
        "Rewrite rate limiter created: {} req/s, burst {}",
        config.rate_limit_per_second, config.rate_limit_burst
    );
    governor_config
}

pub struct RewriteApi;

impl RewriteApi {
    /// `POST /rewrite`
    pub async fn rewrite(
        service: web::Data<Arc<RewriteService>>,
        body: web::Json<RewriteRequest>,
    ) -> impl Responder {
        let text = body.into_inner().text.unwrap_or_default();
        trace!("Rewrite request with {} chars", text.chars().count());
        api_result(service.rewrite(&text).await)
    }

    /// `GET /about`
    pub async fn about(service: web::Data<Arc<RewriteService>>) -> HttpResponse {
        let config = get_config();
        success_response(service.about(&config.about.text).await)
    }
}
