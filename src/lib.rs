//! Snapcheck library crate (used by the CLI and integration tests).
//!
//! Decides whether a citizen-submitted photo plausibly depicts the municipal issue it was
//! reported with. A zero-shot CLIP classifier scores the photo against candidate labels
//! derived from the report's category and description; a weighted, threshold-and-margin
//! policy turns those scores into an accept/reject decision.
//!
//! # Public API Surface
//!
//! ## Entry point
//! - [`ImageVerifier`] - `preload`, `is_ready`, `verify_image` and helpers
//! - [`VerificationResult`] - decision returned for every call (never an error)
//!
//! ## Building blocks
//! - [`LabelSet`], [`IssueCategory`] - candidate label synthesis
//! - [`VerificationScorer`], [`ScoringPolicy`] - decision policy
//! - [`ResultCache`], [`ResultCacheHandle`] - TTL cache of results
//! - [`ClassifierLifecycle`] - one-time classifier acquisition with CPU fallback
//! - [`ClassifierLoader`], [`ZeroShotClassifier`] - backend seam ([`CandleClipLoader`])
//!
//! ## Configuration
//! - [`VerifierConfig`], [`ConfigError`] - `SNAPCHECK_*` environment settings
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod hashing;
pub mod labels;
pub mod lifecycle;
pub mod scoring;
pub mod verifier;

pub use cache::{CacheEntry, CacheStats, ResultCache, ResultCacheHandle};
pub use classifier::{
    CandleClipLoader, ClassifierError, ClassifierLoader, ClipClassifier, ExecutionConfig,
    ExecutionTarget, ModelSpec, TaskKind, ZeroShotClassifier,
};
#[cfg(any(test, feature = "mock"))]
pub use classifier::{MockClassifier, MockClassifierLoader};
pub use config::{ConfigError, VerifierConfig};
pub use hashing::fingerprint_request;
pub use labels::{IssueCategory, LabelGroup, LabelSet};
pub use lifecycle::{ClassifierLifecycle, LifecycleState};
pub use scoring::{LabelScore, ScoringPolicy, VerificationResult, VerificationScorer};
pub use verifier::{ImageVerifier, VerificationRequest};
