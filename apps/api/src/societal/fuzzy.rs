//! Membership functions over the 1–5 influence scale.
//!
//! Inputs are bias-corrected floats, so values between integers produce
//! intermediate degrees.

/// Membership degrees of one value in the Low / Medium / High sets, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Membership {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Ramp down from 1.0 at x = 1 to 0.0 at x = 3.
pub fn low(x: f64) -> f64 {
    ((3.0 - x) / 2.0).clamp(0.0, 1.0)
}

/// Triangle peaking at x = 3, zero at x ≤ 2 and x ≥ 4.
pub fn medium(x: f64) -> f64 {
    (1.0 - (x - 3.0).abs()).clamp(0.0, 1.0)
}

/// Ramp up from 0.0 at x = 3 to 1.0 at x = 5.
pub fn high(x: f64) -> f64 {
    ((x - 3.0) / 2.0).clamp(0.0, 1.0)
}

pub fn fuzzify(x: f64) -> Membership {
    Membership {
        low: low(x),
        medium: medium(x),
        high: high(x),
    }
}
