//! 编译进二进制的默认博客数据，远端与缓存都不可用时使用

use chrono::NaiveDate;
use tracing::error;

use super::model::BlogData;
use super::transform::BlogTransformer;

const BUNDLED_BLOG_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/content/blog.json"
));

/// 解析内置数据，格式与远端一致
pub fn bundled_blog_data(transformer: &BlogTransformer, today: NaiveDate) -> BlogData {
    match serde_json::from_str(BUNDLED_BLOG_JSON) {
        Ok(raw) => transformer.transform(&raw, today),
        Err(e) => {
            error!("Bundled blog data is not valid JSON: {}", e);
            BlogData::default()
        }
    }
}
