//! Decision policy for classified photos.
//!
//! [`VerificationScorer`] takes the classifier's per-label scores, attributes them to the
//! [`LabelSet`](crate::labels::LabelSet) groups by label value, weights the positive groups,
//! and accepts only when the best positive match beats the best negative match by the
//! configured margin and clears the category's threshold.

pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use scorer::{ScoringPolicy, VerificationScorer, score};
pub use types::{GroupMatch, LabelScore, ScoreBreakdown, VerificationResult};
