//! 种子驱动的背景图案生成
//!
//! 无状态：同一 (seed, width, height) 总是生成同一份 SVG。

mod generator;
mod palette;
mod patterns;
mod seed;
mod surface;

pub use generator::{BackgroundGenerator, BackgroundInfo};
pub use palette::{Color, sophisticated_color};
pub use patterns::{Pattern, draw, hexagon_points};
pub use seed::{ClientFingerprint, Lcg, seed_from_str};
pub use surface::{Paint, Point, Surface, SvgSurface};
