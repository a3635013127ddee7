//! 客户端 IP 信息端点

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::trace;

use crate::config::get_config;
use crate::services::ClientInfoService;
use crate::services::client_info::is_secure_context;
use crate::utils::ip::{extract_client_ip, is_forwarding_peer};

use super::helpers::success_response;

pub struct SecurityApi;

impl SecurityApi {
    /// `GET /security`
    pub async fn report(
        req: HttpRequest,
        service: web::Data<Arc<ClientInfoService>>,
    ) -> HttpResponse {
        let ip = extract_client_ip(&req);
        let secure = request_is_secure(&req);
        trace!("Security report for {:?} (secure: {})", ip, secure);

        success_response(service.report(ip.as_deref(), secure).await)
    }
}

/// 是否为安全上下文（https 或 localhost）
///
/// 转发的 scheme/host 只在 peer 是可信代理时采用，否则使用连接本身的信息
fn request_is_secure(req: &HttpRequest) -> bool {
    let config = get_config();
    let conn = req.connection_info();

    let forwarded_trusted = conn
        .peer_addr()
        .is_some_and(|peer| is_forwarding_peer(peer, &config.server.trusted_proxies));
    if forwarded_trusted {
        return is_secure_context(conn.scheme(), conn.host());
    }

    let app_config = req.app_config();
    let scheme = if app_config.secure() { "https" } else { "http" };
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_else(|| app_config.host());
    is_secure_context(scheme, host)
}
