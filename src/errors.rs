use std::fmt;

#[derive(Debug, Clone)]
pub enum FolioError {
    Config(String),
    Validation(String),
    NotFound(String),
    FileOperation(String),
    Serialization(String),
    Upstream(String),
    CacheStore(String),
}

impl FolioError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            FolioError::Config(_) => "E001",
            FolioError::Validation(_) => "E002",
            FolioError::NotFound(_) => "E003",
            FolioError::FileOperation(_) => "E004",
            FolioError::Serialization(_) => "E005",
            FolioError::Upstream(_) => "E006",
            FolioError::CacheStore(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            FolioError::Config(_) => "Configuration Error",
            FolioError::Validation(_) => "Validation Error",
            FolioError::NotFound(_) => "Resource Not Found",
            FolioError::FileOperation(_) => "File Operation Error",
            FolioError::Serialization(_) => "Serialization Error",
            FolioError::Upstream(_) => "Upstream Service Error",
            FolioError::CacheStore(_) => "Cache Store Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            FolioError::Config(msg)
            | FolioError::Validation(msg)
            | FolioError::NotFound(msg)
            | FolioError::FileOperation(msg)
            | FolioError::Serialization(msg)
            | FolioError::Upstream(msg)
            | FolioError::CacheStore(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches an API handler
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            FolioError::Validation(_) => StatusCode::BAD_REQUEST,
            FolioError::NotFound(_) => StatusCode::NOT_FOUND,
            FolioError::Upstream(_) => StatusCode::BAD_GATEWAY,
            FolioError::Config(_)
            | FolioError::FileOperation(_)
            | FolioError::Serialization(_)
            | FolioError::CacheStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for FolioError {}

// 便捷的构造函数
impl FolioError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        FolioError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        FolioError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        FolioError::NotFound(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        FolioError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        FolioError::Serialization(msg.into())
    }

    pub fn upstream<T: Into<String>>(msg: T) -> Self {
        FolioError::Upstream(msg.into())
    }

    pub fn cache_store<T: Into<String>>(msg: T) -> Self {
        FolioError::CacheStore(msg.into())
    }
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for FolioError {
    fn from(err: toml::ser::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

impl From<ureq::Error> for FolioError {
    fn from(err: ureq::Error) -> Self {
        FolioError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
