//! API 请求/响应类型

use serde::{Deserialize, Serialize};

use crate::services::blog::{BlogPost, CacheInfo, Category, DataSource};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// `POST /api/rewrite` 请求体
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// `GET /api/blog/posts?category=` 查询参数
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PostsQuery {
    pub category: Option<String>,
}

/// 博客列表响应
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub posts: Vec<BlogPost>,
    pub category: String,
    pub source: DataSource,
}

/// 分类响应
#[derive(Serialize, Clone, Debug)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub source: DataSource,
}

/// 单篇文章响应
#[derive(Serialize, Clone, Debug)]
pub struct PostResponse {
    pub post: BlogPost,
    pub source: DataSource,
}

/// `GET /api/background[.svg]` 查询参数
#[derive(Deserialize, Clone, Debug, Default)]
pub struct BackgroundQuery {
    pub seed: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// 时区（客户端 `Intl` 解析结果）
    pub tz: Option<String>,
    /// 语言，缺省取 `Accept-Language`
    pub lang: Option<String>,
    /// 屏幕宽高
    pub sw: Option<u32>,
    pub sh: Option<u32>,
    #[serde(default)]
    pub random: bool,
}

/// 健康检查
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub uptime_human: String,
    pub version: String,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

#[derive(Serialize, Clone, Debug)]
pub struct HealthChecks {
    pub blog: HealthBlogCheck,
    pub rewrite: HealthRewriteCheck,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthBlogCheck {
    pub source: String,
    pub store: String,
    pub cache: CacheInfo,
}

#[derive(Serialize, Clone, Debug)]
pub struct HealthRewriteCheck {
    pub provider: String,
    pub model: String,
}
