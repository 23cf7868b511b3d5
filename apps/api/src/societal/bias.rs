//! Bias correction for pos/neg statement pairs.

use crate::societal::round2;

/// Neutral midpoint of the 1–5 Likert scale.
pub const LIKERT_MIDPOINT: f64 = 3.0;

/// Reconciles a positive and a negatively-phrased answer on the same trait.
///
/// The negative answer is reverse-coded (`6 - neg`) and averaged with the positive.
/// When the two disagree by more than one point the average is pulled halfway
/// toward the neutral midpoint.
pub fn bias_adjusted_pair(pos: u8, neg: u8) -> f64 {
    let pos = f64::from(pos);
    let neg_reversed = 6.0 - f64::from(neg);
    let mut score = (pos + neg_reversed) / 2.0;

    if (pos - neg_reversed).abs() > 1.0 {
        score = (score + LIKERT_MIDPOINT) / 2.0;
    }

    round2(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contradictory_extremes_shrink_to_neutral() {
        // neg 5 reverses to 1; |5 - 1| = 4 > 1 so (3.0 + 3) / 2
        assert_eq!(bias_adjusted_pair(5, 5), 3.0);
    }

    #[test]
    fn test_neutral_pair_is_neutral() {
        assert_eq!(bias_adjusted_pair(3, 3), 3.0);
    }

    #[test]
    fn test_consistent_pair_is_plain_average() {
        // neg 1 reverses to 5
        assert_eq!(bias_adjusted_pair(5, 1), 5.0);
        assert_eq!(bias_adjusted_pair(4, 1), 4.5);
        assert_eq!(bias_adjusted_pair(1, 5), 1.0);
    }

    #[test]
    fn test_disagreement_of_two_is_shrunk() {
        // neg 3 reverses to 3; |5 - 3| = 2 > 1: base 4.0 → 3.5
        assert_eq!(bias_adjusted_pair(5, 3), 3.5);
        // neg 4 reverses to 2; |5 - 2| = 3: base 3.5 → 3.25
        assert_eq!(bias_adjusted_pair(5, 4), 3.25);
    }

    proptest! {
        #[test]
        fn prop_symmetric_under_reverse_coded_swap(pos in 1u8..=5, neg in 1u8..=5) {
            let swapped = bias_adjusted_pair(6 - neg, 6 - pos);
            prop_assert_eq!(bias_adjusted_pair(pos, neg), swapped);
        }

        #[test]
        fn prop_stays_on_likert_scale(pos in 1u8..=5, neg in 1u8..=5) {
            let score = bias_adjusted_pair(pos, neg);
            prop_assert!((1.0..=5.0).contains(&score));
        }
    }
}
