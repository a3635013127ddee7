//! 颜色与调色板

use std::fmt;

use super::seed::Lcg;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// 色相（度）、饱和度与亮度（百分比）
    Hsl(f64, f64, f64),
    /// RGB + alpha (0..=1)
    Rgba(u8, u8, u8, f64),
}

impl Color {
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);

    /// 颜色部分（不含 alpha）
    pub fn css_rgb(&self) -> String {
        match self {
            Color::Hsl(h, s, l) => format!("hsl({}, {}%, {}%)", fmt_num(*h), fmt_num(*s), fmt_num(*l)),
            Color::Rgba(r, g, b, _) => format!("rgb({}, {}, {})", r, g, b),
        }
    }

    pub fn alpha(&self) -> f64 {
        match self {
            Color::Hsl(..) => 1.0,
            Color::Rgba(_, _, _, a) => *a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hsl(..) => f.write_str(&self.css_rgb()),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({}, {}, {}, {})", r, g, b, fmt_num(*a)),
        }
    }
}

/// 深色低饱和的配色：基础色相随机，从五种变体中选一种
pub fn sophisticated_color(rng: &mut Lcg) -> Color {
    let base_hue = rng.next_f64() * 360.0;
    let variants = [
        Color::Hsl(base_hue, 15.0, 8.0),
        Color::Hsl(base_hue, 20.0, 12.0),
        Color::Hsl(base_hue, 25.0, 16.0),
        Color::Hsl(base_hue + 30.0, 18.0, 10.0),
        Color::Hsl(base_hue + 180.0, 12.0, 6.0),
    ];
    variants[rng.index(variants.len())]
}

/// 最多保留两位小数，去掉多余的 0
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(1.256), "1.26");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(f64::NAN), "0");
        assert_eq!(fmt_num(120.0), "120");
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::Hsl(200.0, 15.0, 8.0).to_string(), "hsl(200, 15%, 8%)");
        assert_eq!(Color::Rgba(0, 0, 0, 0.3).to_string(), "rgba(0, 0, 0, 0.3)");
        assert_eq!(Color::Rgba(1, 2, 3, 0.5).css_rgb(), "rgb(1, 2, 3)");
        assert_eq!(Color::Hsl(1.0, 1.0, 1.0).alpha(), 1.0);
    }

    #[test]
    fn test_sophisticated_color_is_dark() {
        let mut rng = Lcg::new(99);
        for _ in 0..100 {
            match sophisticated_color(&mut rng) {
                Color::Hsl(_, s, l) => {
                    assert!(s <= 25.0);
                    assert!(l <= 16.0);
                }
                other => panic!("unexpected color {:?}", other),
            }
        }
    }

    #[test]
    fn test_sophisticated_color_consumes_two_values() {
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7);
        sophisticated_color(&mut a);
        b.next_f64();
        b.next_f64();
        assert_eq!(a.next_f64(), b.next_f64());
    }
}
