use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::types::VerificationRequest;
use crate::cache::{CacheStats, ResultCache, ResultCacheHandle};
use crate::classifier::{CandleClipLoader, ClassifierLoader, ExecutionTarget, ModelSpec};
use crate::config::VerifierConfig;
use crate::constants::DEFAULT_IMAGE_PREFIX_LEN;
use crate::labels::{IssueCategory, LabelSet};
use crate::lifecycle::{ClassifierLifecycle, LifecycleState};
use crate::scoring::{VerificationResult, VerificationScorer};

/// Decides whether a photo plausibly depicts the reported issue.
///
/// Cheap to share: wrap in an `Arc` and call from any number of tasks.
pub struct ImageVerifier {
    lifecycle: Arc<ClassifierLifecycle>,
    cache: ResultCacheHandle,
    scorer: VerificationScorer,
    prefix_len: usize,
}

impl std::fmt::Debug for ImageVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageVerifier")
            .field("lifecycle", &self.lifecycle)
            .field("cache", &self.cache)
            .field("prefix_len", &self.prefix_len)
            .finish()
    }
}

impl ImageVerifier {
    pub fn new(
        lifecycle: Arc<ClassifierLifecycle>,
        cache: ResultCacheHandle,
        scorer: VerificationScorer,
    ) -> Self {
        Self {
            lifecycle,
            cache,
            scorer,
            prefix_len: DEFAULT_IMAGE_PREFIX_LEN,
        }
    }

    /// Sets how many bytes of the encoded image feed the cache fingerprint.
    pub fn with_prefix_len(mut self, prefix_len: usize) -> Self {
        self.prefix_len = prefix_len;
        self
    }

    /// Builds a verifier around an arbitrary loader, with cache settings from `config`.
    pub fn with_loader(loader: Arc<dyn ClassifierLoader>, config: &VerifierConfig) -> Self {
        let lifecycle = ClassifierLifecycle::new(loader, ModelSpec::from_config(config));
        let cache = ResultCacheHandle::with_settings(config.cache_ttl, config.cache_capacity);
        Self::new(Arc::new(lifecycle), cache, VerificationScorer::default())
            .with_prefix_len(config.image_prefix_len)
    }

    /// Builds a verifier backed by the candle CLIP loader.
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::with_loader(Arc::new(CandleClipLoader::new()), config)
    }

    pub fn lifecycle(&self) -> &Arc<ClassifierLifecycle> {
        &self.lifecycle
    }

    pub fn cache(&self) -> &ResultCacheHandle {
        &self.cache
    }

    pub fn scorer(&self) -> &VerificationScorer {
        &self.scorer
    }

    /// Loads the classifier ahead of the first request. Returns readiness.
    pub async fn preload(&self) -> bool {
        let ready = self.lifecycle.ensure_ready().await;
        info!(
            ready,
            target = ?self.lifecycle.execution_target(),
            "Preload finished"
        );
        ready
    }

    /// Non-suspending readiness check.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn execution_target(&self) -> Option<ExecutionTarget> {
        self.lifecycle.execution_target()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Verifies one photo against its description and category.
    ///
    /// Results are cached for the configured TTL. Fail-closed results (classifier
    /// unavailable, inference error) are not cached.
    #[instrument(
        skip_all,
        fields(image_len = image.len(), description_len = description.len(), category = %category)
    )]
    pub async fn verify_image(
        &self,
        image: &str,
        description: &str,
        category: IssueCategory,
    ) -> VerificationResult {
        self.cache.sweep();

        let key = ResultCache::key_for(category, description, image, self.prefix_len);
        if let Some(cached) = self.cache.lookup(&key) {
            info!(is_valid = cached.is_valid, "Verification cache hit");
            return cached;
        }
        debug!("Verification cache miss");

        if !self.lifecycle.ensure_ready().await {
            warn!("Classifier unavailable, rejecting photo");
            return VerificationResult::unavailable();
        }
        let Some(classifier) = self.lifecycle.classifier() else {
            return VerificationResult::unavailable();
        };

        let labels = LabelSet::synthesize(description, category);
        let candidates = labels.candidate_labels();
        debug!(
            num_labels = candidates.len(),
            keywords = labels.keyword.len(),
            "Classifying photo"
        );

        let outcome = match classifier.classify(image, &candidates).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Classification failed");
                return VerificationResult::failed();
            }
        };

        let result = self.scorer.score(&outcome, &labels, category);
        info!(
            is_valid = result.is_valid,
            confidence = result.confidence,
            "Photo verified"
        );

        self.cache.store(key, result.clone());
        result
    }

    /// [`verify_image`](Self::verify_image) bounded by `timeout`. A timeout yields a
    /// fail-closed result and nothing is cached.
    pub async fn verify_image_with_timeout(
        &self,
        image: &str,
        description: &str,
        category: IssueCategory,
        timeout: Duration,
    ) -> VerificationResult {
        let verification = self.verify_image(image, description, category);
        match tokio::time::timeout(timeout, verification).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "Verification timed out");
                VerificationResult::timed_out()
            }
        }
    }

    /// Verifies several photos concurrently. Results follow input order.
    pub async fn verify_images(&self, requests: &[VerificationRequest]) -> Vec<VerificationResult> {
        join_all(
            requests
                .iter()
                .map(|r| self.verify_image(&r.image, &r.description, r.category)),
        )
        .await
    }
}

#[cfg(any(test, feature = "mock"))]
impl ImageVerifier {
    /// Verifier over a [`MockClassifierLoader`](crate::classifier::MockClassifierLoader)
    /// with default cache settings.
    pub fn new_mock(loader: crate::classifier::MockClassifierLoader) -> Self {
        Self::with_loader(Arc::new(loader), &VerifierConfig::default())
    }
}
