//! Content fingerprints and probabilistic duplicate suppression.
//!
//! Two independent suppression namespaces exist because raw capture and
//! scored output are deduplicated separately: a fingerprint admitted at
//! capture time says nothing about whether its analysis has been persisted.
//! The store is probabilistic — it never misses a duplicate, but a small
//! configured fraction of fresh items may be wrongly suppressed.

mod bloom;
mod fingerprint;
mod store;

pub use fingerprint::Fingerprint;
pub use store::{Admission, BloomSuppressionStore, DedupError, Namespace, SuppressionStore};
