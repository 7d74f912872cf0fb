//! Candidate label synthesis.
//!
//! A report's category and description become four named label groups. Each group is its
//! own vector, so the scorer attributes scores by group membership rather than by position
//! in the submitted label list.

pub mod category;
pub mod keywords;


pub use category::{IssueCategory, NEGATIVE_LABELS};
pub use keywords::extract_keywords;

use crate::constants::{
    CATEGORY_GROUP_WEIGHT, COMPOUND_GROUP_WEIGHT, KEYWORD_GROUP_WEIGHT, MAX_COMPOUND_LABELS,
};

/// Which group a candidate label was synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelGroup {
    Category,
    Keyword,
    Compound,
    Negative,
}

impl LabelGroup {
    /// Groups that count as evidence for the reported issue.
    pub const POSITIVE: [LabelGroup; 3] =
        [LabelGroup::Category, LabelGroup::Keyword, LabelGroup::Compound];

    /// Default weight applied to a positive group's best score. Negative labels are unweighted.
    pub fn default_weight(&self) -> f32 {
        match self {
            LabelGroup::Category => CATEGORY_GROUP_WEIGHT,
            LabelGroup::Keyword => KEYWORD_GROUP_WEIGHT,
            LabelGroup::Compound => COMPOUND_GROUP_WEIGHT,
            LabelGroup::Negative => 1.0,
        }
    }
}

/// Candidate labels for one verification, split into named groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    pub category: Vec<String>,
    pub keyword: Vec<String>,
    pub compound: Vec<String>,
    pub negative: Vec<String>,
}

impl LabelSet {
    /// Builds the label set for a report.
    pub fn synthesize(description: &str, category: IssueCategory) -> Self {
        let keyword = extract_keywords(description);
        let compound = keyword
            .iter()
            .take(MAX_COMPOUND_LABELS)
            .map(|k| format!("{} {}", category.display_name(), k))
            .collect();

        Self {
            category: category.labels().iter().map(|l| l.to_string()).collect(),
            keyword,
            compound,
            negative: NEGATIVE_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Labels belonging to `group`.
    pub fn group(&self, group: LabelGroup) -> &[String] {
        match group {
            LabelGroup::Category => &self.category,
            LabelGroup::Keyword => &self.keyword,
            LabelGroup::Compound => &self.compound,
            LabelGroup::Negative => &self.negative,
        }
    }

    /// Labels to submit to the classifier: every group in order, each label once.
    pub fn candidate_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::with_capacity(self.len());
        for group in [
            LabelGroup::Category,
            LabelGroup::Keyword,
            LabelGroup::Compound,
            LabelGroup::Negative,
        ] {
            for label in self.group(group) {
                if !labels.contains(label) {
                    labels.push(label.clone());
                }
            }
        }
        labels
    }

    /// Total labels across groups, counting overlaps once per group.
    pub fn len(&self) -> usize {
        self.category.len() + self.keyword.len() + self.compound.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
