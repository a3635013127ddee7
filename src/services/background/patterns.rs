//! 图案例程
//!
//! 每个例程只依赖传入的 `Lcg` 与 `Surface`，同一种子总是得到同一幅图。

use std::f64::consts::PI;

use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

use super::palette::{Color, sophisticated_color};
use super::seed::Lcg;
use super::surface::{Paint, Point, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, EnumIter, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Pattern {
    Geometric,
    Organic,
    Particles,
    Waves,
    Grid,
    Circles,
    Hexagons,
    Abstract,
    DotMatrix,
    GradientMesh,
    LinePattern,
}

impl Pattern {
    /// 固定顺序，按 `seed % len` 选择
    pub const ALL: [Pattern; 11] = [
        Pattern::Geometric,
        Pattern::Organic,
        Pattern::Particles,
        Pattern::Waves,
        Pattern::Grid,
        Pattern::Circles,
        Pattern::Hexagons,
        Pattern::Abstract,
        Pattern::DotMatrix,
        Pattern::GradientMesh,
        Pattern::LinePattern,
    ];

    pub fn for_seed(seed: u32) -> (usize, Pattern) {
        let index = seed as usize % Self::ALL.len();
        (index, Self::ALL[index])
    }

    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

/// 绘制指定图案
pub fn draw<S: Surface + ?Sized>(pattern: Pattern, rng: &mut Lcg, surface: &mut S, noise: bool) {
    match pattern {
        Pattern::Geometric => geometric(rng, surface),
        Pattern::Organic => organic(rng, surface),
        Pattern::Particles => particles(rng, surface),
        Pattern::Waves => waves(rng, surface),
        Pattern::Grid => grid(rng, surface),
        Pattern::Circles => circles(rng, surface),
        Pattern::Hexagons => hexagons(rng, surface),
        Pattern::Abstract => abstract_shapes(rng, surface),
        Pattern::DotMatrix => dot_matrix(rng, surface),
        Pattern::GradientMesh => gradient_mesh(rng, surface),
        Pattern::LinePattern => line_pattern(rng, surface),
    }

    let grainy = matches!(
        pattern,
        Pattern::Geometric
            | Pattern::Organic
            | Pattern::DotMatrix
            | Pattern::GradientMesh
            | Pattern::LinePattern
    );
    if noise && grainy {
        let grain_seed = (rng.next_f64() * 1_000_000.0) as u32;
        surface.set_alpha(1.0);
        surface.grain(grain_seed, 0.06);
    }
    surface.set_alpha(1.0);
}

fn diagonal_background<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let paint = Paint::Linear {
        from: (0.0, 0.0),
        to: (w, h),
        stops: vec![(0.0, sophisticated_color(rng)), (1.0, sophisticated_color(rng))],
    };
    s.set_alpha(1.0);
    s.fill_rect(0.0, 0.0, w, h, &paint);
}

fn radial_background<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let paint = Paint::Radial {
        center: (w / 2.0, h / 2.0),
        radius: w.max(h) / 2.0,
        stops: vec![(0.0, sophisticated_color(rng)), (1.0, sophisticated_color(rng))],
    };
    s.set_alpha(1.0);
    s.fill_rect(0.0, 0.0, w, h, &paint);
}

/// 压暗边角的渐变覆盖层
fn subtle_overlay<S: Surface + ?Sized>(s: &mut S, alpha: f64) {
    let (w, h) = (s.width(), s.height());
    let paint = Paint::Linear {
        from: (0.0, 0.0),
        to: (w, h),
        stops: vec![
            (0.0, Color::Rgba(0, 0, 0, 0.3)),
            (0.5, Color::Rgba(0, 0, 0, 0.1)),
            (1.0, Color::Rgba(0, 0, 0, 0.4)),
        ],
    };
    s.set_alpha(alpha);
    s.fill_rect(0.0, 0.0, w, h, &paint);
}

fn geometric<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let size = w.min(h) / 12.0;
    diagonal_background(rng, s);

    s.set_alpha(0.15);
    let step = size * 2.5;
    let mut x = 0.0;
    while x < w + size {
        let mut y = 0.0;
        while y < h + size {
            let square = rng.index(2) == 1;
            let paint = Paint::Solid(sophisticated_color(rng));
            if square {
                s.fill_rect(x, y, size, size, &paint);
            } else {
                s.fill_circle(x + size / 2.0, y + size / 2.0, size / 2.0, &paint);
            }
            y += step;
        }
        x += step;
    }

    subtle_overlay(s, 0.3);
}

fn organic<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    radial_background(rng, s);

    s.set_alpha(0.08);
    for _ in 0..8 {
        let x = rng.next_f64() * w;
        let y = rng.next_f64() * h;
        let r = rng.range(80.0, 280.0);
        s.fill_circle(x, y, r, &Paint::Solid(sophisticated_color(rng)));
    }

    subtle_overlay(s, 0.3);
}

/// 粒子图案的静态帧
fn particles<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    diagonal_background(rng, s);

    s.set_alpha(0.3);
    for _ in 0..25 {
        let x = rng.next_f64() * w;
        let y = rng.next_f64() * h;
        // 速度分量保留在序列中，保证后续取值与动画版本一致
        let _vx = (rng.next_f64() - 0.5) * 0.5;
        let _vy = (rng.next_f64() - 0.5) * 0.5;
        let size = rng.range(1.0, 3.0);
        s.fill_circle(x, y, size, &Paint::Solid(sophisticated_color(rng)));
    }
}

fn waves<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let paint = Paint::Linear {
        from: (0.0, 0.0),
        to: (0.0, h),
        stops: vec![(0.0, sophisticated_color(rng)), (1.0, sophisticated_color(rng))],
    };
    s.set_alpha(1.0);
    s.fill_rect(0.0, 0.0, w, h, &paint);

    let step = (w / 480.0).ceil().max(1.0);
    for _ in 0..2 {
        let amplitude = rng.range(30.0, 90.0);
        let frequency = rng.range(0.005, 0.015);
        let color = sophisticated_color(rng);

        let mut points: Vec<Point> = Vec::with_capacity((w / step) as usize + 1);
        let mut x = 0.0;
        while x < w {
            let phase = rng.next_f64() * PI;
            points.push((x, h / 2.0 + (x * frequency + phase).sin() * amplitude));
            x += step;
        }

        s.set_alpha(0.12);
        s.stroke_polyline(&points, color, 1.0);
    }
}

fn grid<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let cell = rng.range(80.0, 200.0);
    radial_background(rng, s);

    let color = sophisticated_color(rng);
    s.set_alpha(0.08);

    let mut x = 0.0;
    while x < w {
        s.stroke_line((x, 0.0), (x, h), color, 0.5);
        x += cell;
    }
    let mut y = 0.0;
    while y < h {
        s.stroke_line((0.0, y), (w, y), color, 0.5);
        y += cell;
    }
}

fn circles<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    diagonal_background(rng, s);

    s.set_alpha(0.1);
    for _ in 0..12 {
        let x = rng.next_f64() * w;
        let y = rng.next_f64() * h;
        let r = rng.range(40.0, 160.0);
        s.fill_circle(x, y, r, &Paint::Solid(sophisticated_color(rng)));
    }
}

/// 以 (x, y) 为中心的正六边形顶点
pub fn hexagon_points(x: f64, y: f64, size: f64) -> [Point; 6] {
    std::array::from_fn(|i| {
        let angle = i as f64 * PI / 3.0;
        (x + size * angle.cos(), y + size * angle.sin())
    })
}

fn hexagons<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let size = 60.0;
    radial_background(rng, s);

    s.set_alpha(0.08);
    let mut x = 0.0;
    while x < w + size {
        let mut y = 0.0;
        while y < h + size {
            let paint = Paint::Solid(sophisticated_color(rng));
            s.fill_polygon(&hexagon_points(x, y, size), &paint);
            y += size * 1.8;
        }
        x += size * 2.0;
    }
}

fn abstract_shapes<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let paint = Paint::Linear {
        from: (0.0, 0.0),
        to: (w, h),
        stops: vec![
            (0.0, sophisticated_color(rng)),
            (0.5, sophisticated_color(rng)),
            (1.0, sophisticated_color(rng)),
        ],
    };
    s.set_alpha(1.0);
    s.fill_rect(0.0, 0.0, w, h, &paint);

    s.set_alpha(0.12);
    for _ in 0..5 {
        let color = sophisticated_color(rng);
        let points: Vec<Point> = (0..4)
            .map(|_| (rng.next_f64() * w, rng.next_f64() * h))
            .collect();
        s.fill_polygon(&points, &Paint::Solid(color));
    }
}

fn dot_matrix<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let spacing = 40.0;
    radial_background(rng, s);

    let paint = Paint::Solid(sophisticated_color(rng));
    s.set_alpha(0.06);
    let mut x = spacing;
    while x < w {
        let mut y = spacing;
        while y < h {
            s.fill_circle(x, y, 1.0, &paint);
            y += spacing;
        }
        x += spacing;
    }

    subtle_overlay(s, 0.06);
}

fn gradient_mesh<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let mesh = 200.0;
    s.set_alpha(1.0);
    s.fill_rect(0.0, 0.0, w, h, &Paint::Solid(sophisticated_color(rng)));

    s.set_alpha(0.08);
    let mut x = 0.0;
    while x < w + mesh {
        let mut y = 0.0;
        while y < h + mesh {
            let paint = Paint::Radial {
                center: (x, y),
                radius: mesh / 2.0,
                stops: vec![
                    (0.0, Color::Rgba(255, 255, 255, 0.1)),
                    (1.0, Color::TRANSPARENT),
                ],
            };
            s.fill_rect(x - mesh / 2.0, y - mesh / 2.0, mesh, mesh, &paint);
            y += mesh;
        }
        x += mesh;
    }

    subtle_overlay(s, 0.3);
}

fn line_pattern<S: Surface + ?Sized>(rng: &mut Lcg, s: &mut S) {
    let (w, h) = (s.width(), s.height());
    let spacing = 60.0;
    diagonal_background(rng, s);

    let color = sophisticated_color(rng);
    s.set_alpha(0.05);
    let mut i = -h;
    while i < w + h {
        s.stroke_line((i, 0.0), (i + h, h), color, 0.5);
        i += spacing;
    }

    subtle_overlay(s, 0.4);
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    /// 只记录调用次数的表面
    #[derive(Default)]
    struct CountingSurface {
        shapes: usize,
        grains: usize,
    }

    impl Surface for CountingSurface {
        fn width(&self) -> f64 {
            800.0
        }
        fn height(&self) -> f64 {
            600.0
        }
        fn set_alpha(&mut self, _alpha: f64) {}
        fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: &Paint) {
            self.shapes += 1;
        }
        fn fill_circle(&mut self, _: f64, _: f64, _: f64, _: &Paint) {
            self.shapes += 1;
        }
        fn fill_polygon(&mut self, _: &[Point], _: &Paint) {
            self.shapes += 1;
        }
        fn stroke_line(&mut self, _: Point, _: Point, _: Color, _: f64) {
            self.shapes += 1;
        }
        fn stroke_polyline(&mut self, _: &[Point], _: Color, _: f64) {
            self.shapes += 1;
        }
        fn grain(&mut self, _: u32, _: f64) {
            self.grains += 1;
        }
    }

    #[test]
    fn test_pattern_order_and_names() {
        let names: Vec<_> = Pattern::iter().map(|p| p.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "geometric",
                "organic",
                "particles",
                "waves",
                "grid",
                "circles",
                "hexagons",
                "abstract",
                "dotMatrix",
                "gradientMesh",
                "linePattern"
            ]
        );
        assert_eq!(Pattern::iter().collect::<Vec<_>>(), Pattern::ALL.to_vec());
        assert_eq!("dotMatrix".parse::<Pattern>().unwrap(), Pattern::DotMatrix);
    }

    #[test]
    fn test_for_seed() {
        assert_eq!(Pattern::for_seed(0), (0, Pattern::Geometric));
        assert_eq!(Pattern::for_seed(10), (10, Pattern::LinePattern));
        assert_eq!(Pattern::for_seed(11), (0, Pattern::Geometric));
        assert_eq!(Pattern::for_seed(25), (3, Pattern::Waves));
    }

    #[test]
    fn test_every_pattern_draws() {
        for pattern in Pattern::ALL {
            let mut surface = CountingSurface::default();
            let mut rng = Lcg::new(1234);
            draw(pattern, &mut rng, &mut surface, true);
            assert!(surface.shapes > 1, "{:?} drew nothing", pattern);
        }
    }

    #[test]
    fn test_noise_only_on_grainy_patterns() {
        let mut surface = CountingSurface::default();
        draw(Pattern::Circles, &mut Lcg::new(1), &mut surface, true);
        assert_eq!(surface.grains, 0);

        let mut surface = CountingSurface::default();
        draw(Pattern::Geometric, &mut Lcg::new(1), &mut surface, true);
        assert_eq!(surface.grains, 1);

        let mut surface = CountingSurface::default();
        draw(Pattern::Geometric, &mut Lcg::new(1), &mut surface, false);
        assert_eq!(surface.grains, 0);
    }

    #[test]
    fn test_hexagon_points() {
        let pts = hexagon_points(0.0, 0.0, 10.0);
        assert!((pts[0].0 - 10.0).abs() < 1e-9);
        assert!(pts[0].1.abs() < 1e-9);
        assert!((pts[3].0 + 10.0).abs() < 1e-9);
    }
}
