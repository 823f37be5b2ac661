//! Cache domain - keying and the result cache contract

mod key;
mod repository;

pub use key::CacheKey;
pub use repository::{CacheStats, ResultCache};
