use super::scorer::{ScoringPolicy, VerificationScorer, score};
use super::types::{LabelScore, VerificationResult};
use crate::labels::{IssueCategory, LabelGroup, LabelSet};

fn outcome(pairs: &[(&str, f32)]) -> Vec<LabelScore> {
    pairs
        .iter()
        .map(|(label, score)| LabelScore::new(*label, *score))
        .collect()
}

#[test]
fn test_scenario_road_damage_pothole_accepted() {
    let labels = LabelSet::synthesize("large pothole on Main Street", IssueCategory::RoadDamage);
    let result = score(
        &outcome(&[("pothole", 0.62), ("person face", 0.05)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    assert!(result.is_valid);
    assert_eq!(result.confidence, 62);
    assert!(result.reason.contains("\"pothole\""));
    assert!(result.reason.contains("62%"));
}

#[test]
fn test_scenario_sanitation_selfie_rejected() {
    let labels = LabelSet::synthesize("overflowing bin", IssueCategory::Sanitation);
    let result = score(
        &outcome(&[("garbage", 0.10), ("selfie photo", 0.30)]),
        &labels,
        IssueCategory::Sanitation,
    );

    assert!(!result.is_valid);
    assert_eq!(result.confidence, 10);
    assert!(result.reason.contains("\"selfie photo\""));
    assert!(result.reason.contains("not relevant"));
}

#[test]
fn test_scenario_graffiti_low_threshold_accepted() {
    let labels = LabelSet::synthesize("tags sprayed on the underpass", IssueCategory::Graffiti);
    let result = score(
        &outcome(&[("graffiti", 0.14), ("person face", 0.02)]),
        &labels,
        IssueCategory::Graffiti,
    );

    assert!(result.is_valid);
    assert_eq!(result.confidence, 14);
}

#[test]
fn test_same_score_rejected_for_non_complex_category() {
    // 0.14 clears the complex threshold but not the default one.
    let labels = LabelSet::synthesize("", IssueCategory::Sidewalk);
    let result = score(
        &outcome(&[("damaged sidewalk", 0.14), ("person face", 0.02)]),
        &labels,
        IssueCategory::Sidewalk,
    );

    assert!(!result.is_valid);
    assert!(result.reason.contains("too low for sidewalk"));
}

#[test]
fn test_complex_threshold_strictly_lower() {
    let policy = ScoringPolicy::default();
    for complex in IssueCategory::ALL.into_iter().filter(|c| c.is_complex()) {
        for simple in IssueCategory::ALL.into_iter().filter(|c| !c.is_complex()) {
            assert!(policy.threshold_for(complex) < policy.threshold_for(simple));
        }
    }
}

#[test]
fn test_negative_dominance_rejects_regardless_of_magnitude() {
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    let result = score(
        &outcome(&[("pothole", 0.95), ("indoor scene", 0.95)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    assert!(!result.is_valid);
    assert_eq!(result.confidence, 95);
    assert!(result.reason.contains("\"indoor scene\""));
}

#[test]
fn test_margin_requirement() {
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    let result = score(
        &outcome(&[("pothole", 0.50), ("meme", 0.46)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    assert!(!result.is_valid);
    assert_eq!(
        result.reason,
        "Image does not clearly match the description or category \
         (\"pothole\" at 50% is too close to \"meme\" at 46%)"
    );
}

#[test]
fn test_margin_of_exactly_five_points_is_rejected() {
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    for (positive, negative) in [(0.30, 0.25), (0.55, 0.50), (0.35, 0.30), (0.85, 0.80)] {
        let result = score(
            &outcome(&[("pothole", positive), ("meme", negative)]),
            &labels,
            IssueCategory::RoadDamage,
        );
        assert!(
            !result.is_valid,
            "{positive} vs {negative} must not clear the margin"
        );
        assert!(result.reason.contains("too close"));
    }
}

#[test]
fn test_margin_just_above_five_points_is_accepted() {
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    let result = score(
        &outcome(&[("pothole", 0.30), ("meme", 0.24)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    assert!(result.is_valid);
    assert_eq!(result.confidence, 30);
}

#[test]
fn test_weighted_keyword_at_margin_boundary_is_rejected() {
    // 0.8 * 0.50 = 0.40, exactly 0.05 above the negative.
    let labels = LabelSet::synthesize("crumbling bridge", IssueCategory::Other);
    let result = score(
        &outcome(&[("crumbling", 0.50), ("meme", 0.35)]),
        &labels,
        IssueCategory::Other,
    );

    assert!(!result.is_valid);
    assert_eq!(result.confidence, 40);
}

#[test]
fn test_weighted_keyword_at_threshold_is_rejected() {
    // 0.8 * 0.15 = 0.12, the complex threshold itself.
    let labels = LabelSet::synthesize("crumbling bridge", IssueCategory::Other);
    let result = score(&outcome(&[("crumbling", 0.15)]), &labels, IssueCategory::Other);

    assert!(!result.is_valid);
    assert!(result.reason.contains("too low for public infrastructure"));
}

#[test]
fn test_narrow_win_above_threshold_names_both_labels() {
    // 20% clears the 18% threshold; only the margin fails.
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    let result = score(
        &outcome(&[("pothole", 0.20), ("indoor scene", 0.17)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    assert!(!result.is_valid);
    assert_eq!(result.confidence, 20);
    assert!(!result.reason.contains("too low"));
    assert!(result.reason.contains("\"pothole\" at 20%"));
    assert!(result.reason.contains("\"indoor scene\" at 17%"));
}

#[test]
fn test_default_policy_weights_follow_label_groups() {
    let policy = ScoringPolicy::default();
    for group in LabelGroup::POSITIVE {
        assert_eq!(policy.weight(group), group.default_weight());
    }
    assert_eq!(policy.weight(LabelGroup::Negative), 1.0);
}

#[test]
fn test_margin_cleared_is_accepted() {
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    let result = score(
        &outcome(&[("pothole", 0.50), ("meme", 0.40)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    assert!(result.is_valid);
}

#[test]
fn test_keyword_group_weight_applied() {
    let labels = LabelSet::synthesize("crumbling bridge", IssueCategory::Other);
    let scorer = VerificationScorer::default();
    let breakdown = scorer.breakdown(
        &outcome(&[("crumbling", 0.50), ("infrastructure issue", 0.30)]),
        &labels,
        IssueCategory::Other,
    );

    let positive = breakdown.positive.expect("positive match");
    assert_eq!(positive.group, LabelGroup::Keyword);
    assert_eq!(positive.label, "crumbling");
    assert!((positive.weighted - 0.40).abs() < 1e-6);
}

#[test]
fn test_compound_group_weight_applied() {
    let labels = LabelSet::synthesize("crumbling bridge", IssueCategory::Other);
    let result = score(
        &outcome(&[("public infrastructure bridge", 0.50)]),
        &labels,
        IssueCategory::Other,
    );

    assert!(result.is_valid);
    assert_eq!(result.confidence, 45);
    assert!(result.reason.contains("public infrastructure bridge"));
}

#[test]
fn test_category_label_wins_over_weighted_keyword() {
    // "pothole" is a category label and a keyword; the unweighted group wins.
    let labels = LabelSet::synthesize("pothole", IssueCategory::RoadDamage);
    let breakdown = VerificationScorer::default().breakdown(
        &outcome(&[("pothole", 0.40)]),
        &labels,
        IssueCategory::RoadDamage,
    );

    let positive = breakdown.positive.expect("positive match");
    assert_eq!(positive.group, LabelGroup::Category);
    assert_eq!(positive.weighted, 0.40);
}

#[test]
fn test_group_membership_not_position() {
    // Outcome order is unrelated to label set order.
    let labels = LabelSet::synthesize("deep pothole", IssueCategory::RoadDamage);
    let mut items = outcome(&[
        ("blank image", 0.01),
        ("road damage deep", 0.20),
        ("damaged road", 0.30),
        ("selfie photo", 0.02),
    ]);
    items.reverse();

    let breakdown =
        VerificationScorer::default().breakdown(&items, &labels, IssueCategory::RoadDamage);
    assert_eq!(
        breakdown.positive.as_ref().map(|m| m.label.as_str()),
        Some("damaged road")
    );
    assert_eq!(
        breakdown.negative.as_ref().map(|m| m.label.as_str()),
        Some("selfie photo")
    );
}

#[test]
fn test_unknown_labels_ignored() {
    let labels = LabelSet::synthesize("", IssueCategory::Lighting);
    let result = score(
        &outcome(&[("a cat on a sofa", 0.99), ("broken light", 0.40)]),
        &labels,
        IssueCategory::Lighting,
    );

    assert!(result.is_valid);
    assert_eq!(result.confidence, 40);
}

#[test]
fn test_empty_outcome_rejected_with_zero_confidence() {
    let labels = LabelSet::synthesize("", IssueCategory::Lighting);
    let result = score(&[], &labels, IssueCategory::Lighting);

    assert!(!result.is_valid);
    assert_eq!(result.confidence, 0);
    assert!(result.reason.contains("too low"));
}

#[test]
fn test_out_of_range_scores_are_clamped() {
    let labels = LabelSet::synthesize("", IssueCategory::Lighting);
    let result = score(
        &outcome(&[("broken light", 1.7), ("meme", f32::NAN)]),
        &labels,
        IssueCategory::Lighting,
    );

    assert!(result.is_valid);
    assert_eq!(result.confidence, 100);
}

#[test]
fn test_duplicate_outcome_labels_keep_max() {
    let labels = LabelSet::synthesize("", IssueCategory::Lighting);
    let result = score(
        &outcome(&[("broken light", 0.10), ("broken light", 0.60)]),
        &labels,
        IssueCategory::Lighting,
    );

    assert_eq!(result.confidence, 60);
}

#[test]
fn test_policy_validate() {
    assert!(ScoringPolicy::default().validate().is_ok());

    let inverted = ScoringPolicy {
        complex_threshold: 0.30,
        ..Default::default()
    };
    assert!(inverted.validate().is_err());

    let out_of_range = ScoringPolicy {
        keyword_weight: 1.5,
        ..Default::default()
    };
    assert!(out_of_range.validate().unwrap_err().contains("keyword_weight"));
}

#[test]
fn test_custom_policy_margin() {
    let labels = LabelSet::synthesize("", IssueCategory::RoadDamage);
    let strict = VerificationScorer::new(ScoringPolicy {
        min_margin: 0.30,
        ..Default::default()
    });

    let result = strict.score(
        &outcome(&[("pothole", 0.50), ("meme", 0.40)]),
        &labels,
        IssueCategory::RoadDamage,
    );
    assert!(!result.is_valid);
}

#[test]
fn test_fail_closed_constructors() {
    for result in [
        VerificationResult::unavailable(),
        VerificationResult::failed(),
        VerificationResult::timed_out(),
    ] {
        assert!(!result.is_valid);
        assert_eq!(result.confidence, 0);
        assert!(!result.reason.is_empty());
    }
}

#[test]
fn test_verification_result_serializes_camel_case() {
    let result = VerificationResult {
        is_valid: true,
        confidence: 62,
        reason: "ok".to_string(),
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["isValid"], true);
    assert_eq!(json["confidence"], 62);
    assert_eq!(json["reason"], "ok");
}

#[test]
fn test_verification_result_display() {
    let result = VerificationResult::failed();
    let shown = result.to_string();
    assert!(shown.starts_with("REJECTED (0%)"));
}
