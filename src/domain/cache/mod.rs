//! Cache domain - memoization of outbound producer calls

mod key;
mod repository;

pub use key::{Fingerprint, FingerprintBuilder, Fingerprinted};
pub use repository::Cache;

#[cfg(test)]
pub use repository::mock::MockCache;
