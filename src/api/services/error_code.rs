//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::FolioError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 改写网关错误
/// - 3000-3099: 博客错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,

    // 改写网关错误 2000-2099
    RewriteUpstreamFailed = 2000,

    // 博客错误 3000-3099
    BlogPostNotFound = 3000,
    BlogCacheError = 3001,
}

impl From<&FolioError> for ErrorCode {
    fn from(err: &FolioError) -> Self {
        match err {
            FolioError::Validation(_) => ErrorCode::BadRequest,
            FolioError::NotFound(_) => ErrorCode::NotFound,
            FolioError::Upstream(_) => ErrorCode::RewriteUpstreamFailed,
            FolioError::CacheStore(_) => ErrorCode::BlogCacheError,
            FolioError::Config(_) | FolioError::FileOperation(_) | FolioError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
