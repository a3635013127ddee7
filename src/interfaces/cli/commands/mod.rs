pub mod background;
pub mod blog;
pub mod config_gen;

pub use background::render_background;
pub use blog::{blog_cache_info, blog_clear_cache, blog_fetch};
pub use config_gen::config_generate;
