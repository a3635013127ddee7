//! 背景生成入口：种子 → 图案 → SVG

use serde::Serialize;
use tracing::trace;
use xxhash_rust::xxh64::xxh64;

use super::patterns::{Pattern, draw};
use super::seed::Lcg;
use super::surface::SvgSurface;
use crate::config::BackgroundConfig;

/// 一次生成的描述信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundInfo {
    pub seed: u32,
    pub pattern: Pattern,
    pub pattern_index: usize,
    pub width: u32,
    pub height: u32,
}

impl BackgroundInfo {
    /// 由 (seed, width, height) 决定的 ETag
    pub fn etag(&self) -> String {
        let mut key = [0u8; 12];
        key[..4].copy_from_slice(&self.seed.to_le_bytes());
        key[4..8].copy_from_slice(&self.width.to_le_bytes());
        key[8..].copy_from_slice(&self.height.to_le_bytes());
        format!("\"bg-{:016x}\"", xxh64(&key, 0))
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundGenerator {
    default_width: u32,
    default_height: u32,
    max_dimension: u32,
    noise: bool,
}

impl BackgroundGenerator {
    pub fn new(config: &BackgroundConfig) -> Self {
        Self {
            default_width: config.default_width,
            default_height: config.default_height,
            max_dimension: config.max_dimension.max(1),
            noise: config.noise,
        }
    }

    /// 缺省时使用默认尺寸，并限制在 `[1, max_dimension]`
    pub fn resolve_size(&self, width: Option<u32>, height: Option<u32>) -> (u32, u32) {
        let w = width.unwrap_or(self.default_width);
        let h = height.unwrap_or(self.default_height);
        (
            w.clamp(1, self.max_dimension),
            h.clamp(1, self.max_dimension),
        )
    }

    pub fn describe(&self, seed: u32, width: u32, height: u32) -> BackgroundInfo {
        let (pattern_index, pattern) = Pattern::for_seed(seed);
        BackgroundInfo {
            seed,
            pattern,
            pattern_index,
            width,
            height,
        }
    }

    /// 渲染 SVG 文档
    pub fn render_svg(&self, seed: u32, width: u32, height: u32) -> (BackgroundInfo, String) {
        let info = self.describe(seed, width, height);
        let mut rng = Lcg::new(seed);
        let mut surface = SvgSurface::new(width, height);
        draw(info.pattern, &mut rng, &mut surface, self.noise);
        let svg = surface.finish();

        trace!(
            "Rendered background seed={} pattern={} {}x{} ({} bytes)",
            seed,
            info.pattern.name(),
            width,
            height,
            svg.len()
        );
        (info, svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> BackgroundGenerator {
        BackgroundGenerator::new(&BackgroundConfig::default())
    }

    #[test]
    fn test_resolve_size() {
        let g = generator();
        assert_eq!(g.resolve_size(None, None), (1920, 1080));
        assert_eq!(g.resolve_size(Some(0), Some(99_999)), (1, 3840));
        assert_eq!(g.resolve_size(Some(640), Some(480)), (640, 480));
    }

    #[test]
    fn test_render_is_deterministic() {
        let g = generator();
        let (info_a, svg_a) = g.render_svg(424242, 320, 200);
        let (info_b, svg_b) = g.render_svg(424242, 320, 200);
        assert_eq!(info_a, info_b);
        assert_eq!(svg_a, svg_b);
        assert!(svg_a.starts_with("<svg"));

        let (_, other) = g.render_svg(424243, 320, 200);
        assert_ne!(svg_a, other);
    }

    #[test]
    fn test_describe_selects_by_seed() {
        let info = generator().describe(19, 10, 10);
        assert_eq!(info.pattern_index, 8);
        assert_eq!(info.pattern, Pattern::DotMatrix);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["pattern"], "dotMatrix");
        assert_eq!(json["patternIndex"], 8);
    }

    #[test]
    fn test_etag() {
        let g = generator();
        let a = g.describe(1, 100, 100).etag();
        assert_eq!(a, g.describe(1, 100, 100).etag());
        assert_ne!(a, g.describe(1, 100, 101).etag());
        assert_ne!(a, g.describe(2, 100, 100).etag());
        assert!(a.starts_with("\"bg-") && a.ends_with('"'));
    }
}
