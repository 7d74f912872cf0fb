use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("no classifier model configured (set SNAPCHECK_MODEL_PATH)")]
    ModelNotConfigured,

    #[error("failed to load classifier model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("classification inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("classifier returned {got} scores for {expected} labels")]
    ScoreCountMismatch { expected: usize, got: usize },
}

impl From<candle_core::Error> for ClassifierError {
    fn from(err: candle_core::Error) -> Self {
        ClassifierError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        ClassifierError::InvalidImage {
            reason: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for ClassifierError {
    fn from(err: base64::DecodeError) -> Self {
        ClassifierError::InvalidImage {
            reason: format!("base64 decode failed: {err}"),
        }
    }
}

impl From<tokio::task::JoinError> for ClassifierError {
    fn from(err: tokio::task::JoinError) -> Self {
        ClassifierError::InferenceFailed {
            reason: format!("classifier task aborted: {err}"),
        }
    }
}
