//! 客户端 IP 信息（Security 页面）

mod external;
mod provider;

use std::net::IpAddr;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::utils::ip::{is_private_or_local, parse_ip};

pub use external::{ExternalIpInfoProvider, parse_ip_info};
pub use provider::{IpInfo, IpInfoLookup};

/// `/api/security` 的返回内容
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub org: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// https 或 localhost
    pub secure_context: bool,
}

pub struct ClientInfoService {
    lookup: Arc<dyn IpInfoLookup>,
}

impl ClientInfoService {
    pub fn new(lookup: Arc<dyn IpInfoLookup>) -> Self {
        Self { lookup }
    }

    pub fn provider_name(&self) -> &'static str {
        self.lookup.name()
    }

    /// 私有地址不查询外部 API，查询失败时位置字段为 null
    pub async fn report(&self, ip: Option<&str>, secure_context: bool) -> SecurityReport {
        let info = match ip.and_then(parse_ip) {
            Some(addr) if should_lookup(&addr) => {
                self.lookup.lookup(&addr.to_string()).await.unwrap_or_default()
            }
            Some(addr) => {
                debug!("Skipping IP info lookup for private address {}", addr);
                IpInfo::default()
            }
            None => IpInfo::default(),
        };

        SecurityReport {
            ip: ip.map(String::from),
            city: info.city,
            region: info.region,
            country: info.country,
            org: info.org,
            latitude: info.latitude,
            longitude: info.longitude,
            secure_context,
        }
    }
}

fn should_lookup(addr: &IpAddr) -> bool {
    !is_private_or_local(addr) && !addr.is_unspecified()
}

/// 判断请求是否处于安全上下文（https 或本机）
pub fn is_secure_context(scheme: &str, host: &str) -> bool {
    if scheme.eq_ignore_ascii_case("https") {
        return true;
    }
    let hostname = host
        .strip_prefix('[')
        .and_then(|h| h.split_once(']').map(|(inner, _)| inner))
        .unwrap_or_else(|| host.rsplit_once(':').map_or(host, |(h, _)| h));
    matches!(hostname, "localhost" | "127.0.0.1" | "::1") || hostname.ends_with(".localhost")
}
