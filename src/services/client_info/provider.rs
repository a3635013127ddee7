//! IP 信息查询 trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// IP 所在位置与运营商
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpInfo {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub org: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[async_trait]
pub trait IpInfoLookup: Send + Sync {
    /// 查询失败返回 None
    async fn lookup(&self, ip: &str) -> Option<IpInfo>;

    fn name(&self) -> &'static str;
}
