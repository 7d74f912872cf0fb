//! Cross-cutting, shared constants.
//!
//! Label group sizes are mirrored by the synthesizer tables and tested there; the scorer
//! never relies on them because groups are carried by [`crate::labels::LabelSet`].

/// Number of category-specific labels per category table.
pub const CATEGORY_LABEL_COUNT: usize = 10;
/// Maximum number of description keywords used as labels.
pub const MAX_KEYWORD_LABELS: usize = 5;
/// Maximum number of `"<category> <keyword>"` labels.
pub const MAX_COMPOUND_LABELS: usize = 5;
/// Number of negative (distractor) labels.
pub const NEGATIVE_LABEL_COUNT: usize = 10;

/// Keywords must be longer than this many characters.
pub const MIN_KEYWORD_LEN: usize = 3;

pub const CATEGORY_GROUP_WEIGHT: f32 = 1.0;
pub const KEYWORD_GROUP_WEIGHT: f32 = 0.8;
pub const COMPOUND_GROUP_WEIGHT: f32 = 0.9;

/// Acceptance threshold for most categories.
pub const DEFAULT_ACCEPT_THRESHOLD: f32 = 0.18;
/// Acceptance threshold for visually ambiguous categories.
pub const COMPLEX_ACCEPT_THRESHOLD: f32 = 0.12;
/// Minimum gap between best positive and best negative score.
pub const MIN_CONFIDENCE_MARGIN: f32 = 0.05;
/// Slack below which two scores count as equal. Absorbs `f32` rounding in differences and
/// group weighting so boundary values are never accepted.
pub const SCORE_EPSILON: f32 = 1e-6;

/// Result cache time-to-live.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;
/// Result cache entry bound.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;
/// Bytes of the encoded image that feed the cache fingerprint.
pub const DEFAULT_IMAGE_PREFIX_LEN: usize = 4096;

/// Default model identifier reported in logs and acquisition requests.
pub const DEFAULT_MODEL_ID: &str = "openai/clip-vit-base-patch32";
/// Prompt template applied to every candidate label; `{}` is replaced by the label.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "a photo of {}";

pub const REASON_UNAVAILABLE: &str = "Image verification unavailable";
pub const REASON_FAILED: &str = "Verification failed - please try again";
pub const REASON_TIMED_OUT: &str = "Verification timed out - please try again";
