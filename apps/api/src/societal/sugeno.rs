//! Zero-order Sugeno inference over peer, family and role-model influence.
//!
//! The rule base is fixed:
//!
//! | rule | antecedent                                    | output |
//! |------|-----------------------------------------------|--------|
//! | R1   | peer High AND family High                     | 8.0    |
//! | R2   | role High                                     | 9.0    |
//! | R3   | peer Medium OR family Medium OR role Medium   | 5.0    |
//! | R4   | peer Low AND family Low AND role Low          | 2.0    |
//!
//! AND is `min`, OR is `max`, and the crisp result is the firing-strength
//! weighted average of the rule outputs.

use crate::societal::fuzzy::fuzzify;
use crate::societal::round2;

/// Strong joint peer + family influence.
pub const Z_PEER_FAMILY_HIGH: f64 = 8.0;
/// Role-model influence alone, the strongest single predictor.
pub const Z_ROLE_HIGH: f64 = 9.0;
/// Moderate influence from any source.
pub const Z_ANY_MEDIUM: f64 = 5.0;
/// Weak influence from every source.
pub const Z_ALL_LOW: f64 = 2.0;

/// Firing strengths of the four rules for one domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleStrengths {
    pub peer_family_high: f64,
    pub role_high: f64,
    pub any_medium: f64,
    pub all_low: f64,
}

impl RuleStrengths {
    pub fn evaluate(peer: f64, family: f64, role: f64) -> Self {
        let (pf, ff, rf) = (fuzzify(peer), fuzzify(family), fuzzify(role));

        Self {
            peer_family_high: pf.high.min(ff.high),
            role_high: rf.high,
            any_medium: pf.medium.max(ff.medium).max(rf.medium),
            all_low: pf.low.min(ff.low).min(rf.low),
        }
    }

    pub fn total(&self) -> f64 {
        self.peer_family_high + self.role_high + self.any_medium + self.all_low
    }

    /// Weighted-average defuzzification. `None` when no rule fires.
    pub fn defuzzify(&self) -> Option<f64> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }
        let weighted = self.peer_family_high * Z_PEER_FAMILY_HIGH
            + self.role_high * Z_ROLE_HIGH
            + self.any_medium * Z_ANY_MEDIUM
            + self.all_low * Z_ALL_LOW;
        Some(weighted / total)
    }
}

/// Crisp influence score for one domain from its three bias-corrected source scores.
///
/// Returns `0.0` when no rule fires, e.g. peer 4, family 2, role 2.
pub fn sugeno_domain_influence(peer: f64, family: f64, role: f64) -> f64 {
    RuleStrengths::evaluate(peer, family, role)
        .defuzzify()
        .map(round2)
        .unwrap_or(0.0)
}
