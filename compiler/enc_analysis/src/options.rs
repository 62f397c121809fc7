//! Matcher configuration.

use smallvec::SmallVec;

/// Tuning knobs for [`StatementComparer`](crate::StatementComparer).
///
/// Distances are in `[0, 1]`; `0` means structurally equivalent.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOptions {
    /// Distance thresholds tried in ascending order. A pair is accepted in the
    /// first round whose threshold it does not exceed.
    pub thresholds: SmallVec<[f64; 4]>,
    /// Weight of the "labeled parents are matched to each other" factor.
    pub ancestor_weight: f64,
    /// Weight of the header tokens of compound statements (`if (c)`,
    /// `while (c)`, lambda parameters); the body gets the remainder.
    pub header_weight: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            thresholds: SmallVec::from_slice(&[0.0, 0.5, 0.75]),
            ancestor_weight: 0.2,
            header_weight: 0.6,
        }
    }
}

impl MatchOptions {
    /// Replace the thresholds. They are sorted ascending; NaNs are dropped.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: &[f64]) -> Self {
        let mut sorted: SmallVec<[f64; 4]> =
            thresholds.iter().copied().filter(|t| !t.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);
        self.thresholds = sorted;
        self
    }

    #[must_use]
    pub fn with_ancestor_weight(mut self, weight: f64) -> Self {
        self.ancestor_weight = weight.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_header_weight(mut self, weight: f64) -> Self {
        self.header_weight = weight.clamp(0.0, 1.0);
        self
    }
}
