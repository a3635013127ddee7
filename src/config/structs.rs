use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "folio.toml";

/// 日志输出格式
///
/// `Auto` switches to JSON when the process runs on Google Cloud
/// (Cloud Run / App Engine expose `K_SERVICE`, `K_REVISION` or
/// `GOOGLE_CLOUD_PROJECT`), plain text otherwise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Text,
    Json,
    #[default]
    Auto,
}

impl LogFormat {
    /// Resolve `Auto` against the current environment
    pub fn resolve(self) -> LogFormat {
        match self {
            LogFormat::Auto if is_google_cloud() => LogFormat::Json,
            LogFormat::Auto => LogFormat::Text,
            other => other,
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Whether the process runs on a Google Cloud serverless runtime
pub fn is_google_cloud() -> bool {
    ["GOOGLE_CLOUD_PROJECT", "K_SERVICE", "K_REVISION"]
        .iter()
        .any(|key| std::env::var(key).is_ok_and(|v| !v.is_empty()))
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、路由前缀、可信代理
/// - logging: 日志配置
/// - cors: 跨域配置
/// - blog: 博客数据源与缓存
/// - rewrite: 生成式文本网关
/// - about: About 页面原始文本
/// - background: 背景图生成参数
/// - security: 客户端 IP 信息查询
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
    #[serde(default)]
    pub about: AboutConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值
    /// ENV 前缀：FOLIO，分隔符：__
    /// 示例：FOLIO__SERVER__PORT=9999
    ///
    /// 最后应用裸 `PORT` / `GEMINI_API_KEY` 环境变量
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.trusted_proxies")
                    .with_list_parse_key("cors.allowed_origins"),
            );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        };

        config.apply_compat_env(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("GEMINI_API_KEY").ok().as_deref(),
        );
        config
    }

    /// Apply the bare `PORT` / `GEMINI_API_KEY` variables
    pub fn apply_compat_env(&mut self, port: Option<&str>, gemini_key: Option<&str>) {
        if let Some(port) = port {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => eprintln!("[WARN] Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(key) = gemini_key.map(str::trim).filter(|k| !k.is_empty()) {
            self.rewrite.api_key = Some(key.to_string());
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let mut sample_config = Self::default();
        sample_config.rewrite.api_key = Some("your-gemini-api-key".to_string());
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::errors::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// Proxies whose `X-Forwarded-For` is trusted (IPs or CIDRs)
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

/// 博客数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Raw JSON document holding `{ "blog": { "posts": [...] } }`
    #[serde(default = "default_blog_source_url")]
    pub source_url: String,
    #[serde(default = "default_blog_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Persistent cache file; empty keeps the cache in memory only
    #[serde(default = "default_blog_cache_file")]
    pub cache_file: String,
    #[serde(default = "default_blog_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_blog_author")]
    pub default_author: String,
    #[serde(default = "default_blog_image_url")]
    pub default_image_url: String,
}

/// 生成式文本网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_rewrite_api_base")]
    pub api_base: String,
    #[serde(default = "default_rewrite_model")]
    pub model: String,
    /// `{text}` is replaced with the submitted text
    #[serde(default = "default_rewrite_prompt")]
    pub prompt_template: String,
    #[serde(default = "default_rewrite_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_rewrite_max_input")]
    pub max_input_chars: usize,
    #[serde(default = "default_true")]
    pub fallback_to_original: bool,
    /// 0 disables the response cache
    #[serde(default = "default_rewrite_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_rewrite_cache_capacity")]
    pub cache_max_capacity: u64,
    #[serde(default = "default_rewrite_rate_per_second")]
    pub rate_limit_per_second: u64,
    #[serde(default = "default_rewrite_rate_burst")]
    pub rate_limit_burst: u32,
}

/// About 页面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutConfig {
    #[serde(default = "default_about_text")]
    pub text: String,
}

/// 背景图生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(default = "default_background_width")]
    pub default_width: u32,
    #[serde(default = "default_background_height")]
    pub default_height: u32,
    #[serde(default = "default_background_max_dimension")]
    pub max_dimension: u32,
    /// Adds the grain overlay every pattern finishes with
    #[serde(default = "default_true")]
    pub noise: bool,
}

/// 客户端 IP 信息查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// `{ip}` is replaced with the client address
    #[serde(default = "default_ip_api_url")]
    pub ip_api_url: String,
    #[serde(default = "default_ip_api_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_ip_cache_ttl")]
    pub cache_ttl_secs: u64,
}

// ============================================================
// Default value functions
// ============================================================

fn default_true() -> bool {
    true
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3001
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

fn default_cors_headers() -> Vec<String> {
    vec!["Content-Type".to_string(), "Accept".to_string()]
}

fn default_cors_max_age() -> u64 {
    3600
}

fn default_blog_source_url() -> String {
    "https://raw.githubusercontent.com/skryshtafovych/web3/main/blog.json".to_string()
}

fn default_blog_cache_ttl() -> u64 {
    5 * 60
}

fn default_blog_cache_file() -> String {
    "data/blog_cache.json".to_string()
}

fn default_blog_fetch_timeout() -> u64 {
    10
}

fn default_blog_author() -> String {
    "Stepank".to_string()
}

fn default_blog_image_url() -> String {
    "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=400&h=250&fit=crop".to_string()
}

fn default_rewrite_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_rewrite_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_rewrite_prompt() -> String {
    "Rewrite the following text in a more creative and engaging way: \"{text}\"".to_string()
}

fn default_rewrite_timeout() -> u64 {
    15
}

fn default_rewrite_max_input() -> usize {
    4000
}

fn default_rewrite_cache_ttl() -> u64 {
    5 * 60
}

fn default_rewrite_cache_capacity() -> u64 {
    256
}

fn default_rewrite_rate_per_second() -> u64 {
    2
}

fn default_rewrite_rate_burst() -> u32 {
    10
}

fn default_about_text() -> String {
    "A software developer with many years of experience in native mobile applications \
     and database administration, who has spent the last decade building and running \
     production systems for a public-sector organisation after an earlier stint in \
     technical management. Fluent in several languages, with a long-standing interest \
     in cybersecurity, project management and decentralised web technology."
        .to_string()
}

fn default_background_width() -> u32 {
    1920
}

fn default_background_height() -> u32 {
    1080
}

fn default_background_max_dimension() -> u32 {
    3840
}

fn default_ip_api_url() -> String {
    "https://ipapi.co/{ip}/json/".to_string()
}

fn default_ip_api_timeout() -> u64 {
    3
}

fn default_ip_cache_ttl() -> u64 {
    15 * 60
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            trusted_proxies: Vec::new(),
            api_prefix: default_api_prefix(),
            health_prefix: default_health_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: default_cors_origins(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            source_url: default_blog_source_url(),
            cache_ttl_secs: default_blog_cache_ttl(),
            cache_file: default_blog_cache_file(),
            fetch_timeout_secs: default_blog_fetch_timeout(),
            default_author: default_blog_author(),
            default_image_url: default_blog_image_url(),
        }
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_rewrite_api_base(),
            model: default_rewrite_model(),
            prompt_template: default_rewrite_prompt(),
            timeout_secs: default_rewrite_timeout(),
            max_input_chars: default_rewrite_max_input(),
            fallback_to_original: true,
            cache_ttl_secs: default_rewrite_cache_ttl(),
            cache_max_capacity: default_rewrite_cache_capacity(),
            rate_limit_per_second: default_rewrite_rate_per_second(),
            rate_limit_burst: default_rewrite_rate_burst(),
        }
    }
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            text: default_about_text(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            default_width: default_background_width(),
            default_height: default_background_height(),
            max_dimension: default_background_max_dimension(),
            noise: true,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            ip_api_url: default_ip_api_url(),
            timeout_secs: default_ip_api_timeout(),
            cache_ttl_secs: default_ip_cache_ttl(),
        }
    }
}
