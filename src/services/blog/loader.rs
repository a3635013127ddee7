//! 博客数据加载服务
//!
//! 读取顺序：内存层（TTL）→ 远端 → 持久化缓存（任意年龄）→ 内置数据。
//! `fetch_blog_data` 从不失败。

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::bundled::bundled_blog_data;
use super::model::{BlogData, BlogSnapshot, CacheInfo, DataSource};
use super::source::{BlogSource, HttpBlogSource};
use super::store::{CacheEntry, EntryStore, FileEntryStore, MemoryEntryStore};
use super::transform::BlogTransformer;
use crate::config::BlogConfig;
use crate::errors::Result;
use crate::utils::time::{Clock, SystemClock};

pub struct BlogService {
    source: Arc<dyn BlogSource>,
    store: Arc<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    transformer: BlogTransformer,
    ttl_millis: i64,
    memory: RwLock<Option<CacheEntry>>,
    /// 同一时间只允许一个刷新
    refresh_lock: Mutex<()>,
}

impl BlogService {
    /// 按配置创建：HTTP 数据源 + 文件存储（路径为空时用内存存储）
    pub fn from_config(config: &BlogConfig) -> Self {
        let source = Arc::new(HttpBlogSource::new(
            &config.source_url,
            Duration::from_secs(config.fetch_timeout_secs),
        ));
        let store: Arc<dyn EntryStore> = if config.cache_file.trim().is_empty() {
            Arc::new(MemoryEntryStore::new())
        } else {
            Arc::new(FileEntryStore::new(&config.cache_file))
        };

        Self::new(
            source,
            store,
            Arc::new(SystemClock),
            BlogTransformer::from_config(config),
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    pub fn new(
        source: Arc<dyn BlogSource>,
        store: Arc<dyn EntryStore>,
        clock: Arc<dyn Clock>,
        transformer: BlogTransformer,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            store,
            clock,
            transformer,
            ttl_millis: ttl.as_millis() as i64,
            memory: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// 获取博客数据
    pub async fn fetch_blog_data(&self) -> BlogSnapshot {
        if let Some(snapshot) = self.fresh_from_memory() {
            return snapshot;
        }

        let _guard = self.refresh_lock.lock().await;

        // 等锁期间可能已经有人刷新过
        if let Some(snapshot) = self.fresh_from_memory() {
            return snapshot;
        }

        match self.refresh().await {
            Ok(entry) => BlogSnapshot {
                data: entry.payload,
                source: DataSource::Remote,
                fetched_at: Some(entry.fetched_at),
                error: None,
            },
            Err(e) => {
                warn!(
                    "Failed to fetch blog data from {}: {}",
                    self.source.describe(),
                    e
                );
                self.fallback(e.to_string())
            }
        }
    }

    /// 强制从远端刷新，失败时返回错误而不是回退
    pub async fn refresh(&self) -> Result<CacheEntry> {
        let raw = self.source.fetch().await?;
        let now = self.clock.now();
        let payload = self.transformer.transform(&raw, now.date_naive());
        let entry = CacheEntry::new(payload, now.timestamp_millis());

        *self.memory.write() = Some(entry.clone());
        if let Err(e) = self.store.save(&entry) {
            warn!("Failed to persist blog cache: {}", e);
        }

        info!(
            "Blog data refreshed: {} posts, {} categories",
            entry.payload.posts.len(),
            entry.payload.categories.len()
        );
        Ok(entry)
    }

    /// 启动时从持久化存储预热内存层，过期条目直接删除
    pub fn warm_from_store(&self) {
        let now = self.clock.now_millis();
        match self.store.load() {
            Ok(Some(entry)) if entry.is_fresh(now, self.ttl_millis) => {
                info!(
                    "Loaded blog cache from {} store ({} posts, age {}s)",
                    self.store.name(),
                    entry.payload.posts.len(),
                    entry.age_millis(now) / 1000
                );
                *self.memory.write() = Some(entry);
            }
            Ok(Some(_)) => {
                info!("Persisted blog cache expired, clearing");
                self.clear_cache();
            }
            Ok(None) => debug!("No persisted blog cache"),
            Err(e) => {
                warn!("Error loading blog cache: {}", e);
                self.clear_cache();
            }
        }
    }

    /// 清空内存层与持久化缓存
    pub fn clear_cache(&self) {
        *self.memory.write() = None;
        if let Err(e) = self.store.remove() {
            warn!("Failed to remove persisted blog cache: {}", e);
        }
        info!("Blog cache cleared");
    }

    /// 持久化缓存的状态
    pub fn cache_info(&self) -> CacheInfo {
        let entry = match self.store.load() {
            Ok(Some(entry)) => entry,
            Ok(None) => return CacheInfo::missing(),
            Err(e) => {
                warn!("Error reading blog cache: {}", e);
                return CacheInfo::missing();
            }
        };

        let age = entry.age_millis(self.clock.now_millis());
        CacheInfo {
            exists: true,
            age,
            age_minutes: age.div_euclid(60_000),
            is_expired: age >= self.ttl_millis,
            data_size: entry.data_size(),
            timestamp: Some(entry.fetched_at),
        }
    }

    fn fresh_from_memory(&self) -> Option<BlogSnapshot> {
        let now = self.clock.now_millis();
        {
            let guard = self.memory.read();
            match guard.as_ref() {
                Some(entry) if entry.is_fresh(now, self.ttl_millis) => {
                    return Some(BlogSnapshot {
                        data: entry.payload.clone(),
                        source: DataSource::Memory,
                        fetched_at: Some(entry.fetched_at),
                        error: None,
                    });
                }
                Some(_) => {}
                None => return None,
            }
        }

        let mut guard = self.memory.write();
        if guard
            .as_ref()
            .is_some_and(|e| !e.is_fresh(now, self.ttl_millis))
        {
            debug!("Memory blog cache expired, evicting");
            *guard = None;
        }
        None
    }

    fn fallback(&self, error: String) -> BlogSnapshot {
        match self.store.load() {
            Ok(Some(entry)) => {
                info!(
                    "Using stale blog cache from {} store (fetched at {})",
                    self.store.name(),
                    entry.fetched_at
                );
                return BlogSnapshot {
                    data: entry.payload,
                    source: DataSource::StaleCache,
                    fetched_at: Some(entry.fetched_at),
                    error: Some(error),
                };
            }
            Ok(None) => {}
            Err(e) => warn!("Error loading fallback blog cache: {}", e),
        }

        info!("Using bundled blog data");
        BlogSnapshot {
            data: self.bundled(),
            source: DataSource::Bundled,
            fetched_at: None,
            error: Some(error),
        }
    }

    fn bundled(&self) -> BlogData {
        bundled_blog_data(&self.transformer, self.clock.now().date_naive())
    }
}
