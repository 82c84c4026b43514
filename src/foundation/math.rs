pub(crate) fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// X of a point on an axis-aligned ellipse of half-width `half_w` at `deg` degrees.
///
/// Angles are unbounded; traces past 360 wrap naturally, which the scene uses
/// to close spiral seams on candle tops.
pub(crate) fn ellipse_x(half_w: f64, deg: f64) -> f64 {
    half_w * deg_to_rad(deg).cos()
}

/// Y of a point on an axis-aligned ellipse of half-height `half_h` at `deg` degrees.
pub(crate) fn ellipse_y(half_h: f64, deg: f64) -> f64 {
    half_h * deg_to_rad(deg).sin()
}

/// Small seeded xorshift32 generator for confetti jitter.
///
/// Visual randomness only; not uniform enough for anything statistical, but
/// deterministic per seed so runs can be reproduced in tests and the CLI.
#[derive(Clone, Copy, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Seed from wall-clock entropy, for hosts that do not care about replay.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0x9e37);
        Self::new(nanos ^ 0x5f3759df)
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let t = f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0);
        lo + t * (hi - lo)
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        debug_assert!(!items.is_empty());
        let i = (self.next_u32() as usize) % items.len();
        &items[i]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
