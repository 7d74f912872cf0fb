use candle_core::Device;
use tracing::{debug, warn};

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

use super::ExecutionTarget;
use super::error::ClassifierError;

/// Resolves an execution target to a compute device.
///
/// `Cpu` always succeeds. `Accelerated` tries the GPU backends compiled in (Metal, then CUDA)
/// and fails when none is usable; falling back to the CPU is the caller's decision.
pub fn select_device(target: ExecutionTarget, ordinal: usize) -> Result<Device, ClassifierError> {
    match target {
        ExecutionTarget::Cpu => {
            debug!("Using CPU device");
            Ok(Device::Cpu)
        }
        ExecutionTarget::Accelerated => accelerated_device(ordinal),
    }
}

fn accelerated_device(ordinal: usize) -> Result<Device, ClassifierError> {
    #[cfg(any(feature = "metal", feature = "cuda"))]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    let failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(ordinal) {
            Ok(device) => {
                info!(ordinal, "Using Metal GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(error = %msg, "Metal device unavailable");
                failures.push(format!("metal failed: {msg}"));
            }
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(ordinal) {
            Ok(device) => {
                info!(ordinal, "Using CUDA GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(error = %msg, "CUDA device unavailable");
                failures.push(format!("cuda failed: {msg}"));
            }
        }
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    let _ = ordinal;

    let reason = if !cfg!(any(feature = "metal", feature = "cuda")) {
        "no GPU backend compiled".to_string()
    } else if failures.is_empty() {
        "no GPU device available".to_string()
    } else {
        failures.join("; ")
    };

    warn!(reason = %reason, "Accelerated device unavailable");
    Err(ClassifierError::DeviceUnavailable {
        device: "accelerated".to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_target_always_available() {
        let device = select_device(ExecutionTarget::Cpu, 0).expect("cpu device");
        assert!(matches!(device, Device::Cpu));
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    #[test]
    fn test_accelerated_without_gpu_backend_fails() {
        let err = select_device(ExecutionTarget::Accelerated, 0).unwrap_err();
        assert!(matches!(err, ClassifierError::DeviceUnavailable { .. }));
        assert!(err.to_string().contains("no GPU backend compiled"));
    }
}
