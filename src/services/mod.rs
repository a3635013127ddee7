//! Service layer
//!
//! Business logic shared by the HTTP API and the CLI.

pub mod background;
pub mod blog;
pub mod client_info;
pub mod rewrite;

pub use background::{BackgroundGenerator, BackgroundInfo, ClientFingerprint, Pattern};
pub use blog::{BlogService, BlogSnapshot, CacheInfo, DataSource};
pub use client_info::{ClientInfoService, ExternalIpInfoProvider, IpInfoLookup, SecurityReport};
pub use rewrite::{GeminiProvider, RewriteService, TextGenerator};
