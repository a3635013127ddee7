//! 生成式文本改写网关

mod gemini;
mod provider;
mod service;

pub use gemini::{GeminiProvider, extract_candidate_text};
pub use provider::TextGenerator;
pub use service::{AboutText, RewriteOutcome, RewriteService};
