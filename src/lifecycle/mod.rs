//! Classifier lifecycle: load once, prefer the accelerated target, fall back to CPU.

pub mod manager;
pub mod types;


pub use manager::ClassifierLifecycle;
pub use types::LifecycleState;
