pub mod background;
pub mod blog;
pub mod error_code;
pub mod frontend;
pub mod health;
pub mod helpers;
pub mod rewrite;
pub mod routes;
pub mod security;
pub mod types;

pub use background::BackgroundApi;
pub use blog::BlogApi;
pub use error_code::ErrorCode;
pub use frontend::{FrontendService, frontend_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use rewrite::{ClientIpKeyExtractor, RewriteApi, rewrite_rate_limit_config};
pub use routes::{AppState, RewriteLimiterConfig, api_routes, configure_app};
pub use security::SecurityApi;
pub use types::ApiResponse;
