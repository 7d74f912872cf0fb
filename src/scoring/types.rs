use serde::{Deserialize, Serialize};

use crate::constants::{REASON_FAILED, REASON_TIMED_OUT, REASON_UNAVAILABLE};
use crate::labels::LabelGroup;

/// Accept/reject decision for one photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Whether the photo may be attached to the report.
    pub is_valid: bool,
    /// Best weighted positive score as a percentage.
    pub confidence: u8,
    /// Explanation suitable for showing to the reporter.
    pub reason: String,
}

impl VerificationResult {
    /// Fail-closed rejection with zero confidence.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            confidence: 0,
            reason: reason.into(),
        }
    }

    /// The classifier could not be acquired.
    pub fn unavailable() -> Self {
        Self::rejected(REASON_UNAVAILABLE)
    }

    /// Classification failed for this request.
    pub fn failed() -> Self {
        Self::rejected(REASON_FAILED)
    }

    /// The caller's deadline elapsed before a decision.
    pub fn timed_out() -> Self {
        Self::rejected(REASON_TIMED_OUT)
    }
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.is_valid { "ACCEPTED" } else { "REJECTED" };
        write!(f, "{} ({}%): {}", status, self.confidence, self.reason)
    }
}

/// One classifier score for a submitted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Best-scoring label within a group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMatch {
    pub group: LabelGroup,
    pub label: String,
    /// Raw classifier score.
    pub score: f32,
    /// Score after the group weight.
    pub weighted: f32,
}

/// Intermediate numbers behind a [`VerificationResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Winning positive group match, if any positive label was scored.
    pub positive: Option<GroupMatch>,
    /// Best negative match, if any negative label was scored.
    pub negative: Option<GroupMatch>,
    pub threshold: f32,
}

impl ScoreBreakdown {
    pub fn positive_score(&self) -> f32 {
        self.positive.as_ref().map_or(0.0, |m| m.weighted)
    }

    pub fn negative_score(&self) -> f32 {
        self.negative.as_ref().map_or(0.0, |m| m.score)
    }

    pub fn margin(&self) -> f32 {
        self.positive_score() - self.negative_score()
    }
}
