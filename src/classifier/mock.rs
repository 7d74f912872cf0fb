use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::error::ClassifierError;
use super::{
    ClassifierLoader, ExecutionConfig, ExecutionTarget, ModelSpec, TaskKind, ZeroShotClassifier,
};
use crate::scoring::LabelScore;

/// Classifier returning scripted scores. Labels without a script score `0.0`.
///
/// Clones share scripts and counters.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    scores: Arc<RwLock<HashMap<String, f32>>>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    last_labels: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
    target: ExecutionTarget,
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            scores: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
            last_labels: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            target: ExecutionTarget::Cpu,
        }
    }

    pub fn with_scores(scores: &[(&str, f32)]) -> Self {
        let mock = Self::new();
        for (label, score) in scores {
            mock.set_score(label, *score);
        }
        mock
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_target(mut self, target: ExecutionTarget) -> Self {
        self.target = target;
        self
    }

    pub fn set_score(&self, label: &str, score: f32) {
        self.scores.write().insert(label.to_string(), score);
    }

    /// Makes every subsequent `classify` call fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Labels passed to the most recent `classify` call.
    pub fn last_labels(&self) -> Vec<String> {
        self.last_labels.lock().clone()
    }
}

#[async_trait]
impl ZeroShotClassifier for MockClassifier {
    async fn classify(
        &self,
        _image: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_labels.lock() = labels.to_vec();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(ClassifierError::InferenceFailed {
                reason: "mock inference failure".to_string(),
            });
        }

        let scores = self.scores.read();
        Ok(labels
            .iter()
            .map(|label| {
                let score = scores.get(label).copied().unwrap_or(0.0);
                LabelScore::new(label.clone(), score)
            })
            .collect())
    }

    fn execution_target(&self) -> ExecutionTarget {
        self.target
    }
}

/// Loader handing out a shared [`MockClassifier`], with per-target failure switches.
#[derive(Debug, Clone, Default)]
pub struct MockClassifierLoader {
    classifier: MockClassifier,
    fail_accelerated: bool,
    fail_cpu: bool,
    delay: Option<Duration>,
    attempts: Arc<Mutex<Vec<ExecutionTarget>>>,
}

impl MockClassifierLoader {
    pub fn new(classifier: MockClassifier) -> Self {
        Self {
            classifier,
            ..Default::default()
        }
    }

    pub fn fail_accelerated(mut self) -> Self {
        self.fail_accelerated = true;
        self
    }

    pub fn fail_cpu(mut self) -> Self {
        self.fail_cpu = true;
        self
    }

    /// Delays every acquisition attempt.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn classifier(&self) -> &MockClassifier {
        &self.classifier
    }

    /// Targets attempted so far, in order.
    pub fn attempts(&self) -> Vec<ExecutionTarget> {
        self.attempts.lock().clone()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().len()
    }
}

#[async_trait]
impl ClassifierLoader for MockClassifierLoader {
    async fn acquire(
        &self,
        _task: TaskKind,
        _model: &ModelSpec,
        execution: &ExecutionConfig,
    ) -> Result<Arc<dyn ZeroShotClassifier>, ClassifierError> {
        self.attempts.lock().push(execution.target);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let fails = match execution.target {
            ExecutionTarget::Accelerated => self.fail_accelerated,
            ExecutionTarget::Cpu => self.fail_cpu,
        };
        if fails {
            return Err(ClassifierError::DeviceUnavailable {
                device: execution.target.to_string(),
                reason: "mock device disabled".to_string(),
            });
        }

        Ok(Arc::new(self.classifier.clone().with_target(execution.target)))
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    #[tokio::test]
    async fn test_scripted_scores() {
        let mock = MockClassifier::with_scores(&[("pothole", 0.6)]);
        let labels = vec!["pothole".to_string(), "meme".to_string()];

        let scores = mock.classify("img", &labels).await.unwrap();

        assert_eq!(scores[0], LabelScore::new("pothole", 0.6));
        assert_eq!(scores[1], LabelScore::new("meme", 0.0));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.last_labels(), labels);
    }

    #[tokio::test]
    async fn test_failing_toggle() {
        let mock = MockClassifier::new();
        mock.set_failing(true);
        assert_err!(mock.classify("img", &["x".to_string()]).await);

        mock.set_failing(false);
        assert_ok!(mock.classify("img", &["x".to_string()]).await);
    }

    #[tokio::test]
    async fn test_loader_records_attempts_and_target() {
        let loader = MockClassifierLoader::new(MockClassifier::new()).fail_accelerated();
        let spec = ModelSpec::default();
        let task = TaskKind::ZeroShotImageClassification;

        let accelerated = loader
            .acquire(task, &spec, &ExecutionConfig::accelerated())
            .await;
        assert!(accelerated.is_err());
        let classifier = loader
            .acquire(task, &spec, &ExecutionConfig::cpu())
            .await
            .unwrap();

        assert_eq!(classifier.execution_target(), ExecutionTarget::Cpu);
        assert_eq!(
            loader.attempts(),
            vec![ExecutionTarget::Accelerated, ExecutionTarget::Cpu]
        );
    }
}
