//! 博客缓存的持久化存储
//!
//! 文件存储写入时先写临时文件再 rename，进程崩溃不会留下半个 JSON。

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::BlogData;
use crate::errors::{FolioError, Result};

/// 带时间戳的缓存条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: BlogData,
    /// 毫秒时间戳
    pub fetched_at: i64,
}

impl CacheEntry {
    pub fn new(payload: BlogData, fetched_at: i64) -> Self {
        Self {
            payload,
            fetched_at,
        }
    }

    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis - self.fetched_at
    }

    /// `now - fetched_at < ttl`
    pub fn is_fresh(&self, now_millis: i64, ttl_millis: i64) -> bool {
        self.age_millis(now_millis) < ttl_millis
    }

    /// 序列化后的数据大小
    pub fn data_size(&self) -> usize {
        serde_json::to_vec(&self.payload)
            .map(|v| v.len())
            .unwrap_or(0)
    }
}

/// 缓存条目的持久化后端
pub trait EntryStore: Send + Sync {
    fn load(&self) -> Result<Option<CacheEntry>>;
    fn save(&self, entry: &CacheEntry) -> Result<()>;
    fn remove(&self) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// JSON 文件存储
#[derive(Debug, Clone)]
pub struct FileEntryStore {
    path: PathBuf,
}

impl FileEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl EntryStore for FileEntryStore {
    fn load(&self) -> Result<Option<CacheEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FolioError::cache_store(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let entry: CacheEntry = serde_json::from_str(&content).map_err(|e| {
            FolioError::cache_store(format!(
                "Corrupt cache file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(entry))
    }

    fn save(&self, entry: &CacheEntry) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(entry)?;
        let tmp = self.temp_path();
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            "Saved blog cache to {} ({} bytes)",
            self.path.display(),
            json.len()
        );
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// 进程内存储（`blog.cache_file` 为空时使用）
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entry: Mutex<Option<CacheEntry>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryEntryStore {
    fn load(&self) -> Result<Option<CacheEntry>> {
        Ok(self.entry.lock().clone())
    }

    fn save(&self, entry: &CacheEntry) -> Result<()> {
        *self.entry.lock() = Some(entry.clone());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.entry.lock() = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
