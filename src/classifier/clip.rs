use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{D, DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::clip::{ClipConfig, ClipModel};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::device::select_device;
use super::error::ClassifierError;
use super::preprocess::{decode_image_payload, load_image_tensor};
use super::utils::{load_prompt_tokenizer, prompt_token_ids};
use super::{
    ClassifierLoader, ExecutionConfig, ExecutionTarget, ModelSpec, TaskKind, ZeroShotClassifier,
};
use crate::scoring::LabelScore;

/// CLIP text encoder context length.
pub const CLIP_MAX_SEQ_LEN: usize = 77;

const PAD_TOKEN: &str = "<|endoftext|>";
const WEIGHTS_FILE: &str = "model.safetensors";

/// Zero-shot classifier backed by a candle CLIP ViT-B/32 model.
#[derive(Clone)]
pub struct ClipClassifier {
    model: Arc<ClipModel>,
    tokenizer: Arc<Tokenizer>,
    device: Device,
    target: ExecutionTarget,
    image_size: usize,
    prompt_template: String,
}

impl std::fmt::Debug for ClipClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("target", &self.target)
            .field("image_size", &self.image_size)
            .field("prompt_template", &self.prompt_template)
            .finish()
    }
}

impl ClipClassifier {
    /// Loads weights and tokenizer from `model_dir` onto the device for `execution`.
    pub fn load(
        model_dir: &Path,
        prompt_template: &str,
        execution: &ExecutionConfig,
    ) -> Result<Self, ClassifierError> {
        let device = select_device(execution.target, execution.device_ordinal)?;

        let weights_path = model_dir.join(WEIGHTS_FILE);
        if !weights_path.exists() {
            return Err(ClassifierError::ModelLoadFailed {
                reason: format!("Missing {} in {}", WEIGHTS_FILE, model_dir.display()),
            });
        }

        let tokenizer = load_prompt_tokenizer(model_dir, CLIP_MAX_SEQ_LEN, PAD_TOKEN).map_err(|e| {
            ClassifierError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let config = ClipConfig::vit_base_patch32();
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device).map_err(
                |e| ClassifierError::ModelLoadFailed {
                    reason: format!("Failed to map weights: {}", e),
                },
            )?
        };
        let model = ClipModel::new(vb, &config).map_err(|e| ClassifierError::ModelLoadFailed {
            reason: format!("Failed to build CLIP model: {}", e),
        })?;

        Ok(Self {
            model: Arc::new(model),
            tokenizer: Arc::new(tokenizer),
            device,
            target: execution.target,
            image_size: config.image_size,
            prompt_template: prompt_template.to_string(),
        })
    }

    /// Tokenizes one prompt per label, right-padded to a common length.
    fn encode_prompts(&self, labels: &[String]) -> Result<Tensor, ClassifierError> {
        let rows = prompt_token_ids(&self.tokenizer, &self.prompt_template, labels).map_err(|e| {
            ClassifierError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;
        Ok(Tensor::new(rows, &self.device)?)
    }

    /// Runs the forward pass synchronously.
    fn classify_blocking(
        &self,
        image: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        let bytes = decode_image_payload(image)?;
        let pixels = load_image_tensor(&bytes, self.image_size, &self.device)?;
        let input_ids = self.encode_prompts(labels)?;

        let (_logits_per_text, logits_per_image) = self.model.forward(&pixels, &input_ids)?;
        let probs = candle_nn::ops::softmax(&logits_per_image, D::Minus1)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        if probs.len() != labels.len() {
            return Err(ClassifierError::ScoreCountMismatch {
                expected: labels.len(),
                got: probs.len(),
            });
        }

        Ok(labels
            .iter()
            .zip(probs)
            .map(|(label, score)| LabelScore::new(label.clone(), score))
            .collect())
    }
}

#[async_trait]
impl ZeroShotClassifier for ClipClassifier {
    async fn classify(
        &self,
        image: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            image_len = image.len(),
            num_labels = labels.len(),
            target = %self.target,
            "Running CLIP zero-shot classification"
        );

        let this = self.clone();
        let image = image.to_string();
        let labels = labels.to_vec();
        tokio::task::spawn_blocking(move || this.classify_blocking(&image, &labels)).await?
    }

    fn execution_target(&self) -> ExecutionTarget {
        self.target
    }
}

/// Loads [`ClipClassifier`]s from a local model directory.
#[derive(Debug, Clone, Default)]
pub struct CandleClipLoader;

impl CandleClipLoader {
    pub fn new() -> Self {
        Self
    }

    fn model_dir(model: &ModelSpec) -> Result<PathBuf, ClassifierError> {
        let dir = model.path.clone().ok_or(ClassifierError::ModelNotConfigured)?;
        if !dir.is_dir() {
            return Err(ClassifierError::ModelLoadFailed {
                reason: format!("Model directory not found: {}", dir.display()),
            });
        }
        Ok(dir)
    }
}

#[async_trait]
impl ClassifierLoader for CandleClipLoader {
    async fn acquire(
        &self,
        task: TaskKind,
        model: &ModelSpec,
        execution: &ExecutionConfig,
    ) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> {
        let dir = Self::model_dir(model)?;
        info!(
            task = %task,
            model_id = %model.id,
            model_path = %dir.display(),
            target = %execution.target,
            "Loading CLIP classifier"
        );

        let template = model.prompt_template.clone();
        let execution = *execution;
        let classifier = tokio::task::spawn_blocking(move || {
            ClipClassifier::load(&dir, &template, &execution)
        })
        .await??;

        info!(target = %execution.target, "CLIP classifier loaded");
        Ok(Arc::new(classifier))
    }
}
