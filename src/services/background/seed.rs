//! 客户端特征 → 种子，以及线性同余随机数

use serde::{Deserialize, Serialize};

/// 用于派生种子的客户端特征
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFingerprint {
    pub user_agent: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub time_zone: String,
    pub language: String,
}

impl ClientFingerprint {
    /// 拼接后的特征串：`ua + "{w}x{h}" + tz + lang`
    pub fn canonical(&self) -> String {
        format!(
            "{}{}x{}{}{}",
            self.user_agent, self.screen_width, self.screen_height, self.time_zone, self.language
        )
    }

    pub fn seed(&self) -> u32 {
        seed_from_str(&self.canonical())
    }
}

/// 32 位回绕哈希 `h = (h << 5) - h + c`（按 UTF-16 码元），取绝对值
pub fn seed_from_str(input: &str) -> u32 {
    let hash = input.encode_utf16().fold(0i32, |h, c| {
        (h << 5).wrapping_sub(h).wrapping_add(c as i32)
    });
    hash.unsigned_abs()
}

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

/// `state = (state * 9301 + 49297) mod 233280`
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed as u64,
        }
    }

    /// [0, 1) 区间的下一个值
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// [lo, hi) 区间
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// [0, n) 区间的整数
    pub fn index(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }
}
