//! Time-bounded exact-match cache of verification results.

pub mod result;
pub mod types;


pub use result::{ResultCache, ResultCacheHandle};
pub use types::{CacheEntry, CacheStats};
