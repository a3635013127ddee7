//! 文本生成 Provider trait

use async_trait::async_trait;

use crate::errors::Result;

/// 生成式文本服务
///
/// 实现负责一次完整的 prompt → 文本调用，不做缓存与回退
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider 名称（用于日志和健康检查）
    fn name(&self) -> &'static str;

    /// 使用的模型
    fn model(&self) -> &str;
}
