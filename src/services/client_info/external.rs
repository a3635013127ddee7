//! 外部 HTTP API 实现（默认 ipapi.co）
//!
//! 内置 moka 缓存 + Singleflight，同一 IP 的并发请求只发一次

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde_json::Value;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{IpInfo, IpInfoLookup};
use crate::config::SecurityConfig;

const IP_INFO_CACHE_MAX_CAPACITY: u64 = 10_000;

pub struct ExternalIpInfoProvider {
    api_url_template: String,
    agent: Agent,
    /// IP → IpInfo（None 也缓存，避免反复请求失败的地址）
    cache: Cache<String, Option<IpInfo>>,
}

impl ExternalIpInfoProvider {
    /// `api_url_template` 使用 `{ip}` 作为占位符
    pub fn new(api_url_template: &str, timeout: Duration, cache_ttl: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        let cache = Cache::builder()
            .time_to_live(cache_ttl)
            .max_capacity(IP_INFO_CACHE_MAX_CAPACITY)
            .build();

        Self {
            api_url_template: api_url_template.to_string(),
            agent,
            cache,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            &config.ip_api_url,
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn fetch_sync(agent: &Agent, url: &str) -> Option<IpInfo> {
        let resp = match agent.get(url).header("Accept", "application/json").call() {
            Ok(r) => r,
            Err(e) => {
                warn!("IP info request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("IP info response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        parse_ip_info(&json)
    }

    async fn fetch(&self, ip: &str) -> Option<IpInfo> {
        let url = self.api_url_template.replace("{ip}", ip);
        let agent = self.agent.clone();

        tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url))
            .await
            .unwrap_or_else(|e| {
                warn!("IP info spawn_blocking failed: {}", e);
                None
            })
    }
}

/// 解析常见 IP API 的返回格式
///
/// ipapi.co: `{"city", "region", "country_name", "org", "latitude", "longitude"}`，
/// 失败时 `{"error": true, "reason": ...}`；也兼容 ip-api.com 的字段名
pub fn parse_ip_info(json: &Value) -> Option<IpInfo> {
    if json["error"].as_bool() == Some(true) || json["status"].as_str() == Some("fail") {
        trace!("IP info API returned an error: {}", json["reason"]);
        return None;
    }

    let text = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| json[*k].as_str())
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    let number = |keys: &[&str]| keys.iter().find_map(|k| json[*k].as_f64());

    Some(IpInfo {
        city: text(&["city"]),
        region: text(&["region", "regionName"]),
        country: text(&["country_name", "country"]),
        org: text(&["org", "isp"]),
        latitude: number(&["latitude", "lat"]),
        longitude: number(&["longitude", "lon"]),
    })
}

#[async_trait]
impl IpInfoLookup for ExternalIpInfoProvider {
    async fn lookup(&self, ip: &str) -> Option<IpInfo> {
        self.cache
            .get_with(ip.to_string(), async {
                trace!("IP info cache miss for {}, fetching from API", ip);
                self.fetch(ip).await
            })
            .await
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ipapi_co() {
        let info = parse_ip_info(&json!({
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "region": "California",
            "country": "US",
            "country_name": "United States",
            "org": "GOOGLE",
            "latitude": 37.42,
            "longitude": -122.08
        }))
        .unwrap();
        assert_eq!(info.city.as_deref(), Some("Mountain View"));
        assert_eq!(info.country.as_deref(), Some("United States"));
        assert_eq!(info.org.as_deref(), Some("GOOGLE"));
        assert_eq!(info.latitude, Some(37.42));
    }

    #[test]
    fn test_parse_ip_api_com() {
        let info = parse_ip_info(&json!({
            "status": "success",
            "country": "Germany",
            "regionName": "Berlin",
            "isp": "Example ISP",
            "lat": 52.5,
            "lon": 13.4
        }))
        .unwrap();
        assert_eq!(info.region.as_deref(), Some("Berlin"));
        assert_eq!(info.country.as_deref(), Some("Germany"));
        assert_eq!(info.org.as_deref(), Some("Example ISP"));
        assert_eq!(info.longitude, Some(13.4));
    }

    #[test]
    fn test_parse_error_payloads() {
        assert!(parse_ip_info(&json!({"error": true, "reason": "Reserved IP Address"})).is_none());
        assert!(parse_ip_info(&json!({"status": "fail"})).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_api_yields_none_and_is_cached() {
        let provider = ExternalIpInfoProvider::new(
            "http://127.0.0.1:9/{ip}/json/",
            Duration::from_secs(1),
            Duration::from_secs(60),
        );
        assert!(provider.lookup("203.0.113.1").await.is_none());
        assert!(provider.cache.contains_key("203.0.113.1"));
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[tokio::test]
    #[ignore]
    async fn test_real_lookup() {
        let provider = ExternalIpInfoProvider::from_config(&SecurityConfig::default());
        let info = provider.lookup("8.8.8.8").await;
        assert!(info.is_some());
    }
}
