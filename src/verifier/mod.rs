//! Verification facade: cache, lifecycle, label synthesis and scoring behind one call.
//!
//! [`ImageVerifier::verify_image`] never fails. Every internal error becomes a rejected
//! [`VerificationResult`](crate::scoring::VerificationResult) with zero confidence.

pub mod engine;
pub mod types;


pub use engine::ImageVerifier;
pub use types::VerificationRequest;
