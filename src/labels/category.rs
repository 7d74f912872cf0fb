use serde::{Deserialize, Serialize};

use crate::constants::{CATEGORY_LABEL_COUNT, NEGATIVE_LABEL_COUNT};

/// Issue category chosen by the reporter.
///
/// Unknown values deserialize (and convert via [`From<&str>`]) to [`IssueCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    RoadDamage,
    Sanitation,
    Lighting,
    Graffiti,
    Sidewalk,
    Vegetation,
    #[default]
    #[serde(other)]
    Other,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::RoadDamage,
        IssueCategory::Sanitation,
        IssueCategory::Lighting,
        IssueCategory::Graffiti,
        IssueCategory::Sidewalk,
        IssueCategory::Vegetation,
        IssueCategory::Other,
    ];

    /// Wire identifier (`road_damage`, `sanitation`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::RoadDamage => "road_damage",
            IssueCategory::Sanitation => "sanitation",
            IssueCategory::Lighting => "lighting",
            IssueCategory::Graffiti => "graffiti",
            IssueCategory::Sidewalk => "sidewalk",
            IssueCategory::Vegetation => "vegetation",
            IssueCategory::Other => "other",
        }
    }

    /// Human-readable name, also the prefix of compound labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            IssueCategory::RoadDamage => "road damage",
            IssueCategory::Sanitation => "sanitation",
            IssueCategory::Lighting => "street lighting",
            IssueCategory::Graffiti => "graffiti",
            IssueCategory::Sidewalk => "sidewalk",
            IssueCategory::Vegetation => "vegetation",
            IssueCategory::Other => "public infrastructure",
        }
    }

    /// Categories whose photos are intrinsically ambiguous and get the lower threshold.
    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            IssueCategory::Graffiti | IssueCategory::Vegetation | IssueCategory::Other
        )
    }

    /// Category-specific candidate labels.
    pub fn labels(&self) -> &'static [&'static str; CATEGORY_LABEL_COUNT] {
        match self {
            IssueCategory::RoadDamage => &ROAD_DAMAGE_LABELS,
            IssueCategory::Sanitation => &SANITATION_LABELS,
            IssueCategory::Lighting => &LIGHTING_LABELS,
            IssueCategory::Graffiti => &GRAFFITI_LABELS,
            IssueCategory::Sidewalk => &SIDEWALK_LABELS,
            IssueCategory::Vegetation => &VEGETATION_LABELS,
            IssueCategory::Other => &OTHER_LABELS,
        }
    }
}

impl std::str::FromStr for IssueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        IssueCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown issue category: {}", s))
    }
}

impl From<&str> for IssueCategory {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or(IssueCategory::Other)
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distractor concepts used to catch off-topic photos.
pub const NEGATIVE_LABELS: [&str; NEGATIVE_LABEL_COUNT] = [
    "person face",
    "selfie photo",
    "indoor scene",
    "food",
    "animal",
    "unrelated screenshot",
    "text document",
    "meme",
    "random photo",
    "blank image",
];

const ROAD_DAMAGE_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "damaged road",
    "pothole",
    "cracked pavement",
    "broken asphalt",
    "road repair needed",
    "uneven road surface",
    "sunken manhole cover",
    "road crack",
    "eroded road edge",
    "damaged street",
];

const SANITATION_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "garbage",
    "trash",
    "dirty area",
    "waste",
    "litter",
    "unsanitary conditions",
    "overflowing trash bin",
    "illegal dumping",
    "garbage bags on street",
    "dirty street",
];

const LIGHTING_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "broken light",
    "dark street",
    "faulty streetlight",
    "lighting issue",
    "lamp not working",
    "damaged lamp post",
    "broken street lamp",
    "flickering light",
    "exposed wiring on light pole",
    "unlit road at night",
];

const GRAFFITI_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "graffiti",
    "vandalism",
    "painted wall",
    "spray paint",
    "defaced property",
    "tagged wall",
    "graffiti on building",
    "vandalized sign",
    "scribbled wall",
    "painted graffiti mural",
];

const SIDEWALK_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "damaged sidewalk",
    "broken walkway",
    "cracked pavement",
    "pedestrian path issue",
    "uneven sidewalk",
    "broken curb",
    "tripping hazard on sidewalk",
    "blocked footpath",
    "missing paving stones",
    "sidewalk crack",
];

const VEGETATION_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "overgrown plants",
    "tree issue",
    "landscaping problem",
    "vegetation maintenance",
    "fallen tree",
    "overgrown grass",
    "broken tree branch",
    "weeds on sidewalk",
    "tree blocking road",
    "overgrown bushes",
];

const OTHER_LABELS: [&str; CATEGORY_LABEL_COUNT] = [
    "infrastructure issue",
    "municipal problem",
    "public facility issue",
    "damaged public property",
    "broken bench",
    "damaged sign",
    "public area maintenance",
    "broken fence",
    "damaged infrastructure",
    "street problem",
];
