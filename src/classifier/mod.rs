//! Zero-shot image classification backends.
//!
//! The engine only talks to [`ClassifierLoader`] and [`ZeroShotClassifier`]:
//! - [`clip`] provides the candle CLIP ViT-B/32 implementation.
//! - [`device`] maps an [`ExecutionTarget`] to a candle device.
//! - `mock` provides scripted implementations for tests (feature `mock`).

pub mod clip;
pub mod device;
mod error;
pub mod preprocess;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::VerifierConfig;
use crate::scoring::LabelScore;

pub use clip::{CandleClipLoader, ClipClassifier};
pub use error::ClassifierError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockClassifier, MockClassifierLoader};

/// Kind of pipeline requested from a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    ZeroShotImageClassification,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::ZeroShotImageClassification => "zero-shot-image-classification",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where inference runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionTarget {
    /// GPU (Metal or CUDA, whichever is compiled in).
    Accelerated,
    Cpu,
}

impl std::fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionTarget::Accelerated => f.write_str("accelerated"),
            ExecutionTarget::Cpu => f.write_str("cpu"),
        }
    }
}

/// Execution settings for one acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionConfig {
    pub target: ExecutionTarget,
    /// GPU ordinal; ignored on CPU.
    pub device_ordinal: usize,
}

impl ExecutionConfig {
    pub fn accelerated() -> Self {
        Self {
            target: ExecutionTarget::Accelerated,
            device_ordinal: 0,
        }
    }

    pub fn cpu() -> Self {
        Self {
            target: ExecutionTarget::Cpu,
            device_ordinal: 0,
        }
    }

    /// Configurations tried in order until one acquires a classifier.
    pub fn fallback_chain() -> [ExecutionConfig; 2] {
        [Self::accelerated(), Self::cpu()]
    }
}

/// Which model to load and how to phrase its text prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub id: String,
    /// Directory holding `model.safetensors` and `tokenizer.json`.
    pub path: Option<PathBuf>,
    /// Template wrapped around each label before text encoding.
    pub prompt_template: String,
}

impl ModelSpec {
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self {
            id: config.model_id.clone(),
            path: config.model_path.clone(),
            prompt_template: config.prompt_template.clone(),
        }
    }
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::from_config(&VerifierConfig::default())
    }
}

/// A loaded classifier that scores one image against arbitrary labels.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync + std::fmt::Debug {
    /// Returns one score per label.
    async fn classify(
        &self,
        image: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifierError>;

    /// Target the classifier was loaded on.
    fn execution_target(&self) -> ExecutionTarget;
}

/// Acquires classifiers for a task/model/execution combination.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn acquire(
        &self,
        task: TaskKind,
        model: &ModelSpec,
        execution: &ExecutionConfig,
    ) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError>;
}
