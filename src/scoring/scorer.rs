use std::collections::HashMap;

use tracing::debug;

use crate::constants::{
    COMPLEX_ACCEPT_THRESHOLD, DEFAULT_ACCEPT_THRESHOLD, MIN_CONFIDENCE_MARGIN, SCORE_EPSILON,
};
use crate::labels::{IssueCategory, LabelGroup, LabelSet};

use super::types::{GroupMatch, LabelScore, ScoreBreakdown, VerificationResult};

/// Weights and thresholds that turn classifier scores into a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub category_weight: f32,
    pub keyword_weight: f32,
    pub compound_weight: f32,
    /// Threshold for categories that are not [`IssueCategory::is_complex`].
    pub default_threshold: f32,
    /// Threshold for complex categories; must stay below `default_threshold`.
    pub complex_threshold: f32,
    /// Required gap between the best positive and the best negative score.
    pub min_margin: f32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            category_weight: LabelGroup::Category.default_weight(),
            keyword_weight: LabelGroup::Keyword.default_weight(),
            compound_weight: LabelGroup::Compound.default_weight(),
            default_threshold: DEFAULT_ACCEPT_THRESHOLD,
            complex_threshold: COMPLEX_ACCEPT_THRESHOLD,
            min_margin: MIN_CONFIDENCE_MARGIN,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("category_weight", self.category_weight),
            ("keyword_weight", self.keyword_weight),
            ("compound_weight", self.compound_weight),
            ("default_threshold", self.default_threshold),
            ("complex_threshold", self.complex_threshold),
            ("min_margin", self.min_margin),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0.0 and 1.0, got {value}"));
            }
        }

        if self.complex_threshold >= self.default_threshold {
            return Err(format!(
                "complex_threshold ({}) must be lower than default_threshold ({})",
                self.complex_threshold, self.default_threshold
            ));
        }

        Ok(())
    }

    /// Acceptance threshold for `category`.
    pub fn threshold_for(&self, category: IssueCategory) -> f32 {
        if category.is_complex() {
            self.complex_threshold
        } else {
            self.default_threshold
        }
    }

    pub fn weight(&self, group: LabelGroup) -> f32 {
        match group {
            LabelGroup::Category => self.category_weight,
            LabelGroup::Keyword => self.keyword_weight,
            LabelGroup::Compound => self.compound_weight,
            LabelGroup::Negative => LabelGroup::Negative.default_weight(),
        }
    }
}

/// Applies a [`ScoringPolicy`] to a classification outcome.
#[derive(Debug, Clone, Default)]
pub struct VerificationScorer {
    policy: ScoringPolicy,
}

impl VerificationScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Decides whether the classified photo supports the report.
    pub fn score(
        &self,
        outcome: &[LabelScore],
        labels: &LabelSet,
        category: IssueCategory,
    ) -> VerificationResult {
        let breakdown = self.breakdown(outcome, labels, category);
        let positive_score = breakdown.positive_score();
        let negative_score = breakdown.negative_score();
        let threshold = breakdown.threshold;

        let clears_threshold = exceeds(positive_score, threshold);
        let clears_margin = exceeds(breakdown.margin(), self.policy.min_margin);
        let is_valid = exceeds(positive_score, negative_score) && clears_threshold && clears_margin;
        let confidence = to_percent(positive_score);

        debug!(
            category = %category,
            positive_score,
            negative_score,
            threshold,
            is_valid,
            "Scored classification outcome"
        );

        let negative_dominates = negative_score > 0.0 && !exceeds(positive_score, negative_score);
        let reason = match (&breakdown.positive, &breakdown.negative) {
            (Some(positive), _) if is_valid => format!(
                "Image matches \"{}\" with {}% confidence",
                positive.label, confidence
            ),
            (_, Some(negative)) if negative_dominates => format!(
                "Image appears to be \"{}\" which is not relevant to the reported issue",
                negative.label
            ),
            (Some(positive), Some(negative)) if clears_threshold && !clears_margin => format!(
                "Image does not clearly match the description or category \
                 (\"{}\" at {}% is too close to \"{}\" at {}%)",
                positive.label,
                confidence,
                negative.label,
                to_percent(negative_score)
            ),
            _ => format!(
                "Image does not clearly match the description or category \
                 ({}% confidence is too low for {})",
                confidence,
                category.display_name()
            ),
        };

        VerificationResult {
            is_valid,
            confidence,
            reason,
        }
    }

    /// Computes per-group best matches without deciding.
    ///
    /// Scores are re-associated with groups by label value; labels the set does not contain
    /// are ignored. A label present in several groups counts for each of them.
    pub fn breakdown(
        &self,
        outcome: &[LabelScore],
        labels: &LabelSet,
        category: IssueCategory,
    ) -> ScoreBreakdown {
        let mut scores: HashMap<&str, f32> = HashMap::with_capacity(outcome.len());
        for item in outcome {
            let score = sanitize(item.score);
            scores
                .entry(item.label.as_str())
                .and_modify(|s| *s = s.max(score))
                .or_insert(score);
        }

        let mut positive: Option<GroupMatch> = None;
        for group in LabelGroup::POSITIVE {
            if let Some(candidate) = self.best_in_group(&scores, labels, group)
                && positive
                    .as_ref()
                    .is_none_or(|best| candidate.weighted > best.weighted)
            {
                positive = Some(candidate);
            }
        }

        ScoreBreakdown {
            positive,
            negative: self.best_in_group(&scores, labels, LabelGroup::Negative),
            threshold: self.policy.threshold_for(category),
        }
    }

    fn best_in_group(
        &self,
        scores: &HashMap<&str, f32>,
        labels: &LabelSet,
        group: LabelGroup,
    ) -> Option<GroupMatch> {
        let weight = self.policy.weight(group);
        let mut best: Option<GroupMatch> = None;

        for label in labels.group(group) {
            let Some(&score) = scores.get(label.as_str()) else {
                continue;
            };
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(GroupMatch {
                    group,
                    label: label.clone(),
                    score,
                    weighted: score * weight,
                });
            }
        }

        best
    }
}

/// Scores with the default policy.
pub fn score(
    outcome: &[LabelScore],
    labels: &LabelSet,
    category: IssueCategory,
) -> VerificationResult {
    VerificationScorer::default().score(outcome, labels, category)
}

#[inline]
fn sanitize(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// `a > b` with [`SCORE_EPSILON`] of slack, so ties produced by rounding do not count.
#[inline]
fn exceeds(a: f32, b: f32) -> bool {
    a - b > SCORE_EPSILON
}

#[inline]
fn to_percent(score: f32) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
