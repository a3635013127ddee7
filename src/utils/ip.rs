//! IP 地址处理工具
//!
//! 客户端 IP 提取：
//! - 可信代理配置（server.trusted_proxies，支持 CIDR）
//! - 未配置时对私有地址自动信任转发头

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::debug;

use crate::config::get_config;

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10
        }
    }
}

/// 解析 `ip` 或 `ip:port`
pub fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| value.parse::<IpAddr>())
        .ok()
}

/// 检查 IP 是否在可信代理列表中
pub fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    let Some(ip_addr) = parse_ip(ip) else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy.parse::<IpAddr>().is_ok_and(|p| p == ip_addr)
        }
    })
}

/// CIDR 检查
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };

    let Ok(prefix_len): Result<u8, _> = prefix_len.parse() else {
        return false;
    };

    let Ok(network_addr) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network_addr) {
        (IpAddr::V4(ip), IpAddr::V4(net)) => {
            if prefix_len > 32 {
                return false;
            }
            let mask = u32::MAX.checked_shl(32 - prefix_len as u32).unwrap_or(0);
            let ip_bits = u32::from_be_bytes(ip.octets());
            let net_bits = u32::from_be_bytes(net.octets());
            (ip_bits & mask) == (net_bits & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) => {
            if prefix_len > 128 {
                return false;
            }
            let mask = u128::MAX.checked_shl(128 - prefix_len as u32).unwrap_or(0);
            let ip_bits = u128::from_be_bytes(ip.octets());
            let net_bits = u128::from_be_bytes(net.octets());
            (ip_bits & mask) == (net_bits & mask)
        }
        _ => false, // IPv4 vs IPv6 不匹配
    }
}

/// peer 是否可以代表客户端设置转发头（X-Forwarded-*、Forwarded）
///
/// 配置了 trusted_proxies 时只信任列表内的地址，否则信任私有地址与 localhost
pub fn is_forwarding_peer(peer_ip: &str, trusted_proxies: &[String]) -> bool {
    if trusted_proxies.is_empty() {
        parse_ip(peer_ip).is_some_and(|ip| is_private_or_local(&ip))
    } else {
        is_trusted_proxy(peer_ip, trusted_proxies)
    }
}

/// 根据连接地址与转发头决定客户端 IP
///
/// 1. 配置了 trusted_proxies 且 peer 匹配 → 转发头
/// 2. 配置了但不匹配 → peer（防止伪造）
/// 3. 未配置且 peer 为私有地址 → 转发头（若存在）
/// 4. 其余 → peer
pub fn resolve_client_ip<F>(
    peer_ip: Option<&str>,
    trusted_proxies: &[String],
    get_forwarded_ip: F,
) -> Option<String>
where
    F: FnOnce() -> Option<String>,
{
    let Some(peer_ip) = peer_ip else {
        return get_forwarded_ip();
    };

    if !trusted_proxies.is_empty() {
        if is_forwarding_peer(peer_ip, trusted_proxies) {
            let real_ip = get_forwarded_ip().unwrap_or_else(|| peer_ip.to_string());
            debug!("Trusted proxy (explicit): {} -> {}", peer_ip, real_ip);
            return Some(real_ip);
        }
        debug!(
            "Connection from {}, not in trusted_proxies, using peer IP",
            peer_ip
        );
        return Some(peer_ip.to_string());
    }

    if is_forwarding_peer(peer_ip, trusted_proxies)
        && let Some(real_ip) = get_forwarded_ip()
    {
        debug!(
            "Auto-detect proxy (private IP {}): using forwarded IP {}",
            peer_ip, real_ip
        );
        return Some(real_ip);
    }

    Some(peer_ip.to_string())
}

/// 从 HttpRequest 提取真实客户端 IP
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    let config = get_config();
    let conn_info = req.connection_info();
    resolve_client_ip(conn_info.peer_addr(), &config.server.trusted_proxies, || {
        extract_forwarded_ip_from_headers(req.headers())
    })
}

/// 从请求头提取转发的 IP（X-Forwarded-For 优先，其次 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}
