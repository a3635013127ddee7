//! 远端博客数据源

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};
use ureq::Agent;

use crate::errors::{FolioError, Result};

/// 原始博客 JSON 的来源
#[async_trait]
pub trait BlogSource: Send + Sync {
    async fn fetch(&self) -> Result<Value>;

    /// 用于日志的描述
    fn describe(&self) -> String;
}

/// 通过 HTTP GET 获取 raw JSON
pub struct HttpBlogSource {
    url: String,
    agent: Agent,
}

impl HttpBlogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            url: url.into(),
            agent,
        }
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn fetch_sync(agent: &Agent, url: &str) -> Result<Value> {
        let resp = agent
            .get(url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| FolioError::upstream(format!("GET {} failed: {}", url, e)))?;

        trace!("Blog source responded with status {}", resp.status());

        let text = resp
            .into_body()
            .read_to_string()
            .map_err(|e| FolioError::upstream(format!("Failed to read body: {}", e)))?;

        serde_json::from_str(&text)
            .map_err(|e| FolioError::upstream(format!("Invalid blog JSON: {}", e)))
    }
}

#[async_trait]
impl BlogSource for HttpBlogSource {
    async fn fetch(&self) -> Result<Value> {
        let agent = self.agent.clone();
        let url = self.url.clone();
        debug!("Fetching blog data from {}", url);

        tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url))
            .await
            .map_err(|e| FolioError::upstream(format!("Blog fetch task failed: {}", e)))?
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_source_is_upstream_error() {
        // 127.0.0.1:9 (discard) 通常没有监听
        let source = HttpBlogSource::new("http://127.0.0.1:9/blog.json", Duration::from_secs(1));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FolioError::Upstream(_)));
        assert_eq!(source.describe(), "http://127.0.0.1:9/blog.json");
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[tokio::test]
    #[ignore]
    async fn test_fetch_real_source() {
        let source = HttpBlogSource::new(
            crate::config::BlogConfig::default().source_url,
            Duration::from_secs(10),
        );
        let value = source.fetch().await.unwrap();
        assert!(value.get("blog").is_some());
    }
}
