//! 文本改写服务：输入校验、prompt 构造、结果缓存与失败回退

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::provider::TextGenerator;
use crate::config::RewriteConfig;
use crate::errors::{FolioError, Result};

/// 改写结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutcome {
    pub rewritten_text: String,
    /// true 表示上游失败，返回的是原文
    pub fallback: bool,
}

/// About 页面文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutText {
    pub text: String,
    pub rewritten: bool,
}

pub struct RewriteService {
    generator: Arc<dyn TextGenerator>,
    prompt_template: String,
    max_input_chars: usize,
    fallback_to_original: bool,
    /// 原文 → 改写结果，TTL 为 0 时不缓存
    cache: Option<Cache<String, String>>,
}

impl RewriteService {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &RewriteConfig) -> Self {
        let cache = (config.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .max_capacity(config.cache_max_capacity)
                .build()
        });

        Self {
            generator,
            prompt_template: config.prompt_template.clone(),
            max_input_chars: config.max_input_chars,
            fallback_to_original: config.fallback_to_original,
            cache,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.generator.name()
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// 校验输入：不能为空白，长度不超过上限（按字符计）
    pub fn validate_input(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(FolioError::validation("No text provided"));
        }
        let len = text.chars().count();
        if len > self.max_input_chars {
            return Err(FolioError::validation(format!(
                "Text is too long ({} characters, maximum {})",
                len, self.max_input_chars
            )));
        }
        Ok(())
    }

    pub fn build_prompt(&self, text: &str) -> String {
        self.prompt_template.replace("{text}", text)
    }

    /// 改写文本
    ///
    /// 上游失败时：开启回退返回原文（`fallback: true`），否则返回 Upstream 错误
    pub async fn rewrite(&self, text: &str) -> Result<RewriteOutcome> {
        self.validate_input(text)?;

        match self.generate_cached(text).await {
            Ok(rewritten_text) => Ok(RewriteOutcome {
                rewritten_text,
                fallback: false,
            }),
            Err(e) if self.fallback_to_original => {
                warn!("Rewrite failed, returning original text: {}", e);
                Ok(RewriteOutcome {
                    rewritten_text: text.to_string(),
                    fallback: true,
                })
            }
            Err(e) => {
                warn!("Rewrite failed: {}", e);
                Err(FolioError::upstream("Failed to rewrite text"))
            }
        }
    }

    /// 改写 About 文本，任何失败都返回原文
    pub async fn about(&self, text: &str) -> AboutText {
        if self.validate_input(text).is_err() {
            return AboutText {
                text: text.to_string(),
                rewritten: false,
            };
        }

        match self.generate_cached(text).await {
            Ok(rewritten) => AboutText {
                text: rewritten,
                rewritten: true,
            },
            Err(e) => {
                info!("About text rewrite unavailable: {}", e);
                AboutText {
                    text: text.to_string(),
                    rewritten: false,
                }
            }
        }
    }

    async fn generate_cached(&self, text: &str) -> Result<String> {
        let prompt = self.build_prompt(text);

        let Some(cache) = &self.cache else {
            return self.generator.generate(&prompt).await;
        };

        // 同一原文的并发请求只调用一次上游，失败结果不缓存
        cache
            .try_get_with(text.to_string(), async {
                debug!("Rewrite cache miss, calling {}", self.generator.name());
                self.generator.generate(&prompt).await
            })
            .await
            .map_err(|e| (*e).clone())
    }
}
