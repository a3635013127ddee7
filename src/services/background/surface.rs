//! 绘图表面抽象与 SVG 实现

use super::palette::{Color, fmt_num};

pub type Point = (f64, f64);

/// 填充方式
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        from: Point,
        to: Point,
        stops: Vec<(f64, Color)>,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<(f64, Color)>,
    },
}

/// 图案例程只通过这个 trait 绘制
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// 之后绘制的元素的整体不透明度
    fn set_alpha(&mut self, alpha: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint);
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint);
    fn fill_polygon(&mut self, points: &[Point], paint: &Paint);
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64);
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64);

    /// 颗粒噪点覆盖层
    fn grain(&mut self, seed: u32, opacity: f64);
}

/// 生成 SVG 文档的表面
#[derive(Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    alpha: f64,
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            defs: String::new(),
            body: String::with_capacity(16 * 1024),
            next_id: 0,
        }
    }

    /// 输出完整的 SVG 文档
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid slice">"#,
            w = self.width,
            h = self.height
        ));
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    fn alloc_id(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    fn stops(stops: &[(f64, Color)]) -> String {
        stops
            .iter()
            .map(|(offset, color)| {
                let opacity = color.alpha();
                if opacity < 1.0 {
                    format!(
                        r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                        fmt_num(*offset),
                        color.css_rgb(),
                        fmt_num(opacity)
                    )
                } else {
                    format!(
                        r#"<stop offset="{}" stop-color="{}"/>"#,
                        fmt_num(*offset),
                        color.css_rgb()
                    )
                }
            })
            .collect()
    }

    /// 返回 fill 属性（渐变会写入 defs）
    fn fill_attrs(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => {
                let opacity = color.alpha();
                if opacity < 1.0 {
                    format!(
                        r#"fill="{}" fill-opacity="{}""#,
                        color.css_rgb(),
                        fmt_num(opacity)
                    )
                } else {
                    format!(r#"fill="{}""#, color.css_rgb())
                }
            }
            Paint::Linear { from, to, stops } => {
                let id = self.alloc_id("lg");
                self.defs.push_str(&format!(
                    r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">{}</linearGradient>"#,
                    id,
                    fmt_num(from.0),
                    fmt_num(from.1),
                    fmt_num(to.0),
                    fmt_num(to.1),
                    Self::stops(stops)
                ));
                format!(r#"fill="url(#{})""#, id)
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let id = self.alloc_id("rg");
                self.defs.push_str(&format!(
                    r#"<radialGradient id="{}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}">{}</radialGradient>"#,
                    id,
                    fmt_num(center.0),
                    fmt_num(center.1),
                    fmt_num(*radius),
                    Self::stops(stops)
                ));
                format!(r#"fill="url(#{})""#, id)
            }
        }
    }

    fn opacity_attr(&self) -> String {
        if self.alpha < 1.0 {
            format!(r#" opacity="{}""#, fmt_num(self.alpha))
        } else {
            String::new()
        }
    }

    fn points_attr(points: &[Point]) -> String {
        points
            .iter()
            .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        let fill = self.fill_attrs(paint);
        let opacity = self.opacity_attr();
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}{}/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h),
            fill,
            opacity
        ));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, paint: &Paint) {
        let fill = self.fill_attrs(paint);
        let opacity = self.opacity_attr();
        self.body.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" {}{}/>"#,
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r),
            fill,
            opacity
        ));
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        let fill = self.fill_attrs(paint);
        let opacity = self.opacity_attr();
        self.body.push_str(&format!(
            r#"<polygon points="{}" {}{}/>"#,
            Self::points_attr(points),
            fill,
            opacity
        ));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        let opacity = self.opacity_attr();
        self.body.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
            fmt_num(from.0),
            fmt_num(from.1),
            fmt_num(to.0),
            fmt_num(to.1),
            color.css_rgb(),
            fmt_num(width),
            opacity
        ));
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64) {
        if points.len() < 2 {
            return;
        }
        let opacity = self.opacity_attr();
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            Self::points_attr(points),
            color.css_rgb(),
            fmt_num(width),
            opacity
        ));
    }

    fn grain(&mut self, seed: u32, opacity: f64) {
        let id = self.alloc_id("grain");
        self.defs.push_str(&format!(
            r#"<filter id="{}" x="0" y="0" width="100%" height="100%"><feTurbulence type="fractalNoise" baseFrequency="0.8" numOctaves="2" seed="{}" stitchTiles="stitch"/><feColorMatrix type="saturate" values="0"/></filter>"#,
            id, seed
        ));
        self.body.push_str(&format!(
            r#"<rect width="100%" height="100%" filter="url(#{})" opacity="{}"/>"#,
            id,
            fmt_num(opacity)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let svg = SvgSurface::new(10, 20).finish();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 10 20""#));
        assert!(!svg.contains("<defs>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_gradients_go_to_defs() {
        let mut s = SvgSurface::new(100, 100);
        s.fill_rect(
            0.0,
            0.0,
            100.0,
            100.0,
            &Paint::Linear {
                from: (0.0, 0.0),
                to: (100.0, 100.0),
                stops: vec![(0.0, Color::Hsl(10.0, 15.0, 8.0)), (1.0, Color::Rgba(0, 0, 0, 0.4))],
            },
        );
        let svg = s.finish();
        assert!(svg.contains(r#"<linearGradient id="lg0""#));
        assert!(svg.contains(r#"stop-opacity="0.4""#));
        assert!(svg.contains(r#"fill="url(#lg0)""#));
    }

    #[test]
    fn test_alpha_and_shapes() {
        let mut s = SvgSurface::new(50, 50);
        s.set_alpha(0.15);
        s.fill_circle(1.0, 2.0, 3.0, &Paint::Solid(Color::Hsl(0.0, 0.0, 0.0)));
        s.set_alpha(2.0);
        s.stroke_line((0.0, 0.0), (1.0, 1.0), Color::Hsl(0.0, 0.0, 0.0), 0.5);
        // 少于 3 个点的多边形被忽略
        s.fill_polygon(&[(0.0, 0.0), (1.0, 1.0)], &Paint::Solid(Color::TRANSPARENT));
        let svg = s.finish();
        assert!(svg.contains(r#"<circle cx="1" cy="2" r="3" fill="hsl(0, 0%, 0%)" opacity="0.15"/>"#));
        assert!(svg.contains(r#"stroke-width="0.5"/>"#));
        assert!(!svg.contains("<polygon"));
    }

    #[test]
    fn test_grain_filter() {
        let mut s = SvgSurface::new(10, 10);
        s.grain(42, 0.06);
        let svg = s.finish();
        assert!(svg.contains(r#"seed="42""#));
        assert!(svg.contains(r#"filter="url(#grain0)""#));
    }
}
