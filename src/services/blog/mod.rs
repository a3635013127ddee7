//! 博客内容加载
//!
//! - `source`: 远端 raw JSON
//! - `transform`: 转换为内部格式并补全默认值
//! - `store`: 持久化缓存（文件或内存）
//! - `loader`: TTL 缓存 + 回退链

mod bundled;
mod loader;
mod model;
mod source;
mod store;
mod transform;

pub use bundled::bundled_blog_data;
pub use loader::BlogService;
pub use model::{BlogData, BlogPost, BlogSnapshot, CacheInfo, Category, ContentBlock, DataSource};
pub use source::{BlogSource, HttpBlogSource};
pub use store::{CacheEntry, EntryStore, FileEntryStore, MemoryEntryStore};
pub use transform::{BlogTransformer, calculate_read_time, generate_categories, generate_slug};
