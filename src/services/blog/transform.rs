//! 远端博客 JSON 到内部格式的转换
//!
//! 远端格式有两种：
//! - `{ "blog": { "posts": [...], "categories": [...] } }`
//! - 旧格式：`{ "blog": { "title": ..., "content": [...] } }`，整个对象就是一篇文章

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{BlogData, BlogPost, Category, ContentBlock};
use crate::config::BlogConfig;

/// 阅读速度（词/分钟）
const WORDS_PER_MINUTE: usize = 200;
const DEFAULT_READ_TIME: &str = "5 min read";
const DEFAULT_TITLE: &str = "Untitled Post";
const DEFAULT_SUMMARY: &str = "No summary available";

/// 已知标签的固定 slug
const KNOWN_TAG_SLUGS: &[(&str, &str)] = &[
    ("Web3", "web3"),
    ("Development", "development"),
    ("DeFi", "defi"),
    ("Smart Contracts", "smart-contracts"),
    ("NFTs", "nfts"),
    ("Security", "security"),
    ("Scaling", "scaling"),
];

/// 填充默认值所需的参数
#[derive(Debug, Clone)]
pub struct BlogTransformer {
    pub default_author: String,
    pub default_image_url: String,
}

impl BlogTransformer {
    pub fn new(default_author: impl Into<String>, default_image_url: impl Into<String>) -> Self {
        Self {
            default_author: default_author.into(),
            default_image_url: default_image_url.into(),
        }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(&config.default_author, &config.default_image_url)
    }

    /// 转换远端数据，`today` 用作缺省日期
    pub fn transform(&self, raw: &Value, today: NaiveDate) -> BlogData {
        let Some(blog) = raw.get("blog").filter(|b| !b.is_null()) else {
            warn!("No blog object found in remote data");
            return BlogData::default();
        };

        let today = today.format("%Y-%m-%d").to_string();

        if let Some(raw_posts) = blog.get("posts").and_then(Value::as_array) {
            let posts: Vec<BlogPost> = raw_posts
                .iter()
                .enumerate()
                .map(|(index, post)| self.transform_post(post, index as u32 + 1, &today))
                .collect();

            let categories = match blog.get("categories") {
                Some(Value::Array(items)) => parse_categories(items),
                _ => {
                    let tags: Vec<&str> = posts
                        .iter()
                        .flat_map(|p| p.tags.iter().map(String::as_str))
                        .collect();
                    generate_categories(&tags, posts.len())
                }
            };

            debug!(
                "Transformed {} posts, {} categories",
                posts.len(),
                categories.len()
            );
            return BlogData { posts, categories };
        }

        debug!("No posts array found, treating blog object as a single post");
        let post = self.transform_legacy_post(blog, &today);
        let tags: Vec<&str> = post.tags.iter().map(String::as_str).collect();
        let categories = generate_categories(&tags, 1);
        BlogData {
            posts: vec![post],
            categories,
        }
    }

    fn transform_post(&self, post: &Value, id: u32, today: &str) -> BlogPost {
        let title = non_empty_str(post, "title");

        BlogPost {
            id,
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            author: non_empty_str(post, "author")
                .unwrap_or(&self.default_author)
                .to_string(),
            date: non_empty_str(post, "date").unwrap_or(today).to_string(),
            tags: string_list(post.get("tags")),
            summary: non_empty_str(post, "summary")
                .unwrap_or(DEFAULT_SUMMARY)
                .to_string(),
            content: content_blocks(post.get("content")),
            media: value_list(post.get("media")),
            extensible: flag(post, "extensible"),
            featured: flag(post, "featured"),
            read_time: non_empty_str(post, "readTime")
                .map(String::from)
                .unwrap_or_else(|| calculate_read_time(post.get("content"))),
            image_url: non_empty_str(post, "imageUrl")
                .unwrap_or(&self.default_image_url)
                .to_string(),
            slug: non_empty_str(post, "slug")
                .map(String::from)
                .unwrap_or_else(|| slug_or_untitled(title)),
        }
    }

    fn transform_legacy_post(&self, blog: &Value, today: &str) -> BlogPost {
        let title = non_empty_str(blog, "title");

        BlogPost {
            id: 1,
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            author: non_empty_str(blog, "author")
                .unwrap_or(&self.default_author)
                .to_string(),
            date: non_empty_str(blog, "date").unwrap_or(today).to_string(),
            tags: string_list(blog.get("tags")),
            summary: non_empty_str(blog, "summary")
                .unwrap_or(DEFAULT_SUMMARY)
                .to_string(),
            content: content_blocks(blog.get("content")),
            media: value_list(blog.get("media")),
            extensible: flag(blog, "extensible"),
            featured: true,
            read_time: calculate_read_time(blog.get("content")),
            image_url: self.default_image_url.clone(),
            slug: slug_or_untitled(title),
        }
    }
}

/// 估算阅读时间，非数组内容返回 "5 min read"
pub fn calculate_read_time(content: Option<&Value>) -> String {
    let Some(blocks) = content.and_then(Value::as_array) else {
        return DEFAULT_READ_TIME.to_string();
    };

    let words: usize = blocks
        .iter()
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(|text| text.split(' ').count())
        .sum();

    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    format!("{} min read", minutes)
}

/// 生成 URL slug：小写，非 `[a-z0-9]` 的连续字符替换为 `-`，去掉首尾 `-`
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// 从标签生成分类列表，首项为 `All`
pub fn generate_categories(tags: &[&str], post_count: usize) -> Vec<Category> {
    let mut categories = vec![Category {
        name: "All".to_string(),
        slug: "all".to_string(),
        count: post_count as u32,
    }];

    for tag in tags {
        let slug = tag_slug(tag);
        match categories.iter_mut().find(|c| c.slug == slug) {
            Some(existing) => existing.count += 1,
            None => categories.push(Category {
                name: tag.to_string(),
                slug,
                count: 1,
            }),
        }
    }

    categories
}

fn tag_slug(tag: &str) -> String {
    if let Some((_, slug)) = KNOWN_TAG_SLUGS.iter().find(|(name, _)| *name == tag) {
        return slug.to_string();
    }

    // 每段连续空白替换为一个 `-`，首尾空白同样保留为 `-`
    let mut slug = String::with_capacity(tag.len());
    let mut in_whitespace = false;
    for c in tag.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    slug
}

fn slug_or_untitled(title: Option<&str>) -> String {
    generate_slug(title.unwrap_or("untitled"))
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn flag(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn value_list(value: Option<&Value>) -> Vec<Value> {
    value.and_then(Value::as_array).cloned().unwrap_or_default()
}

fn content_blocks(value: Option<&Value>) -> Vec<ContentBlock> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(block) => Some(block),
            Err(e) => {
                warn!("Skipping malformed content block: {}", e);
                None
            }
        })
        .collect()
}

fn parse_categories(items: &[Value]) -> Vec<Category> {
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}
