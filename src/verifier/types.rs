use serde::{Deserialize, Serialize};

use crate::labels::IssueCategory;

/// One photo to verify against its report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Data URL or bare base64 payload.
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: IssueCategory,
}

impl VerificationRequest {
    pub fn new(
        image: impl Into<String>,
        description: impl Into<String>,
        category: IssueCategory,
    ) -> Self {
        Self {
            image: image.into(),
            description: description.into(),
            category,
        }
    }
}
