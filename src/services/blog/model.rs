//! 博客数据模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 完整的博客数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogData {
    pub posts: Vec<BlogPost>,
    pub categories: Vec<Category>,
}

impl BlogData {
    /// 按分类 slug 过滤文章
    ///
    /// `all` 返回全部文章，未知分类返回空列表；
    /// 否则返回任一标签被分类名（不区分大小写）包含的文章
    pub fn filter_by_category(&self, slug: &str) -> Vec<&BlogPost> {
        if slug == "all" {
            return self.posts.iter().collect();
        }

        match self.categories.iter().find(|c| c.slug == slug) {
            None => Vec::new(),
            Some(category) => {
                let name = category.name.to_lowercase();
                self.posts
                    .iter()
                    .filter(|post| {
                        post.tags
                            .iter()
                            .any(|tag| name.contains(&tag.to_lowercase()))
                    })
                    .collect()
            }
        }
    }

    /// 按 slug 查找文章
    pub fn find_post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub content: Vec<ContentBlock>,
    pub media: Vec<Value>,
    pub extensible: bool,
    pub featured: bool,
    pub read_time: String,
    pub image_url: String,
    pub slug: String,
}

/// 文章内容块，未知字段原样保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default = "default_block_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_block_kind() -> String {
    "paragraph".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub count: u32,
}

/// 一次读取的数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Memory,
    Remote,
    StaleCache,
    Bundled,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Memory => "memory",
            DataSource::Remote => "remote",
            DataSource::StaleCache => "stale_cache",
            DataSource::Bundled => "bundled",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `fetch_blog_data` 的返回值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSnapshot {
    #[serde(flatten)]
    pub data: BlogData,
    pub source: DataSource,
    /// 数据抓取时间（毫秒时间戳），内置数据没有
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<i64>,
    /// 远端失败时的错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 持久化缓存状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub exists: bool,
    /// 毫秒
    pub age: i64,
    pub age_minutes: i64,
    pub is_expired: bool,
    /// 序列化后的字节数
    pub data_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl CacheInfo {
    pub fn missing() -> Self {
        Self {
            exists: false,
            age: 0,
            age_minutes: 0,
            is_expired: true,
            data_size: 0,
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            id: 1,
            title: slug.to_string(),
            author: "a".to_string(),
            date: "2024-01-01".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: String::new(),
            content: vec![],
            media: vec![],
            extensible: false,
            featured: false,
            read_time: "1 min read".to_string(),
            image_url: String::new(),
            slug: slug.to_string(),
        }
    }

    fn sample() -> BlogData {
        BlogData {
            posts: vec![post("one", &["Web3"]), post("two", &["Security", "DeFi"])],
            categories: vec![
                Category {
                    name: "All".to_string(),
                    slug: "all".to_string(),
                    count: 2,
                },
                Category {
                    name: "Security".to_string(),
                    slug: "security".to_string(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_filter_by_category() {
        let data = sample();
        assert_eq!(data.filter_by_category("all").len(), 2);
        assert!(data.filter_by_category("unknown").is_empty());
        assert!(data.filter_by_category("").is_empty());

        let security = data.filter_by_category("security");
        assert_eq!(security.len(), 1);
        assert_eq!(security[0].slug, "two");
    }

    #[test]
    fn test_find_post() {
        let data = sample();
        assert_eq!(data.find_post("two").map(|p| p.id), Some(1));
        assert!(data.find_post("missing").is_none());
    }

    #[test]
    fn test_content_block_keeps_extra_fields() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type":"image","src":"a.png","alt":"x"}"#).unwrap();
        assert_eq!(block.kind, "image");
        assert!(block.text.is_none());
        assert_eq!(block.extra["src"], "a.png");

        let back = serde_json::to_value(&block).unwrap();
        assert_eq!(back["alt"], "x");
        assert!(back.get("text").is_none());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = BlogSnapshot {
            data: sample(),
            source: DataSource::StaleCache,
            fetched_at: Some(42),
            error: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["source"], "stale_cache");
        assert_eq!(json["fetchedAt"], 42);
        assert!(json.get("error").is_none());
        assert_eq!(json["posts"].as_array().unwrap().len(), 2);
        assert_eq!(json["posts"][0]["readTime"], "1 min read");
    }
}
