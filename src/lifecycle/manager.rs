use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{info, warn};

use super::types::LifecycleState;
use crate::classifier::{
    ClassifierLoader, ExecutionConfig, ExecutionTarget, ModelSpec, TaskKind, ZeroShotClassifier,
};

type Slot = Option<Arc<dyn ZeroShotClassifier>>;

/// Owns the process-wide classifier and the one-time attempt to acquire it.
///
/// The first call to [`ensure_ready`](Self::ensure_ready) spawns acquisition through
/// [`ExecutionConfig::fallback_chain`] as a background task; every caller, including later
/// ones, awaits that same task. Dropping a caller (for example on a timeout) does not cancel
/// it. The outcome (a classifier or `Failed`) is never revisited.
pub struct ClassifierLifecycle {
    loader: Arc<dyn ClassifierLoader>,
    model: ModelSpec,
    slot: Arc<OnceLock<Slot>>,
    /// Set when the acquisition task is spawned, cleared after `slot` is written.
    initializing: Arc<AtomicBool>,
    acquisition: OnceLock<Shared<BoxFuture<'static, bool>>>,
}

impl ClassifierLifecycle {
    pub fn new(loader: Arc<dyn ClassifierLoader>, model: ModelSpec) -> Self {
        Self {
            loader,
            model,
            slot: Arc::new(OnceLock::new()),
            initializing: Arc::new(AtomicBool::new(false)),
            acquisition: OnceLock::new(),
        }
    }

    pub fn model(&self) -> &ModelSpec {
        &self.model
    }

    /// Returns `true` once a classifier is loaded. Never returns an error; a failed
    /// acquisition is logged and recorded as [`LifecycleState::Failed`].
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn ensure_ready(&self) -> bool {
        if let Some(slot) = self.slot.get() {
            return slot.is_some();
        }
        self.acquisition
            .get_or_init(|| self.spawn_acquisition())
            .clone()
            .await
    }

    /// Non-suspending readiness check.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.slot.get(), Some(Some(_)))
    }

    pub fn state(&self) -> LifecycleState {
        match self.slot.get() {
            Some(Some(_)) => LifecycleState::Ready,
            Some(None) => LifecycleState::Failed,
            None if self.initializing.load(Ordering::Acquire) => LifecycleState::Initializing,
            None => LifecycleState::Uninitialized,
        }
    }

    /// The loaded classifier, if any.
    pub fn classifier(&self) -> Option<Arc<dyn ZeroShotClassifier>> {
        self.slot.get().and_then(|slot| slot.as_ref().map(Arc::clone))
    }

    /// Target the loaded classifier runs on.
    pub fn execution_target(&self) -> Option<ExecutionTarget> {
        self.slot
            .get()
            .and_then(|slot| slot.as_ref())
            .map(|classifier| classifier.execution_target())
    }

    fn spawn_acquisition(&self) -> Shared<BoxFuture<'static, bool>> {
        self.initializing.store(true, Ordering::Release);

        let slot = Arc::clone(&self.slot);
        let initializing = Arc::clone(&self.initializing);
        let model_id = self.model.id.clone();
        let task = tokio::spawn(acquire_with_fallback(
            Arc::clone(&self.loader),
            self.model.clone(),
            Arc::clone(&self.slot),
            Arc::clone(&self.initializing),
        ));

        async move {
            match task.await {
                Ok(ready) => ready,
                Err(e) => {
                    warn!(
                        model_id = %model_id,
                        error = %e,
                        "Classifier initialization task aborted"
                    );
                    let _ = slot.set(None);
                    initializing.store(false, Ordering::Release);
                    false
                }
            }
        }
        .boxed()
        .shared()
    }
}

async fn acquire_with_fallback(
    loader: Arc<dyn ClassifierLoader>,
    model: ModelSpec,
    slot: Arc<OnceLock<Slot>>,
    initializing: Arc<AtomicBool>,
) -> bool {
    let acquired = acquire(loader.as_ref(), &model).await;
    let ready = acquired.is_some();
    let _ = slot.set(acquired);
    initializing.store(false, Ordering::Release);
    ready
}

async fn acquire(loader: &dyn ClassifierLoader, model: &ModelSpec) -> Slot {
    let task = TaskKind::ZeroShotImageClassification;

    for execution in ExecutionConfig::fallback_chain() {
        match loader.acquire(task, model, &execution).await {
            Ok(classifier) => {
                info!(
                    model_id = %model.id,
                    target = %execution.target,
                    "Classifier ready"
                );
                return Some(classifier);
            }
            Err(e) if execution.target == ExecutionTarget::Accelerated => {
                warn!(
                    model_id = %model.id,
                    error = %e,
                    "Accelerated classifier unavailable, falling back to CPU"
                );
            }
            Err(e) => {
                warn!(
                    model_id = %model.id,
                    target = %execution.target,
                    error = %e,
                    "Classifier initialization failed"
                );
            }
        }
    }

    warn!(
        model_id = %model.id,
        "Image verification disabled: no classifier available"
    );
    None
}

impl std::fmt::Debug for ClassifierLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierLifecycle")
            .field("model", &self.model)
            .field("state", &self.state())
            .finish()
    }
}
