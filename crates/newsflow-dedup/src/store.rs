use std::sync::Mutex;

use thiserror::Error;

use crate::bloom::BloomFilter;
use crate::fingerprint::Fingerprint;

/// Which dedup population a fingerprint is tested against.
///
/// Capture and analysis are separate namespaces: membership in one says
/// nothing about the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Capture,
    Analysis,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::Capture => write!(f, "capture"),
            Namespace::Analysis => write!(f, "analysis"),
        }
    }
}

/// Outcome of an atomic test-and-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting — the fingerprint is now recorded.
    Admitted,
    /// Already present (or a rare false positive); the unit must be dropped.
    Duplicate,
}

#[derive(Debug, Error)]
pub enum DedupError {
    /// The store cannot be reached or its state is unusable. The pipeline's
    /// contract is to skip the unit and report, never to process anyway.
    #[error("suppression store unavailable: {0}")]
    Unavailable(String),
}

/// Duplicate suppression over two independent namespaces.
///
/// `admit` is the only operation the pipeline uses on the hot path: it must
/// behave as one atomic check-then-insert so two units with the same
/// fingerprint can never both be admitted in a race.
pub trait SuppressionStore {
    /// # Errors
    ///
    /// Returns [`DedupError::Unavailable`] if the store cannot answer.
    fn contains(&self, namespace: Namespace, fingerprint: &Fingerprint)
        -> Result<bool, DedupError>;

    /// # Errors
    ///
    /// Returns [`DedupError::Unavailable`] if the store cannot record.
    fn insert(&self, namespace: Namespace, fingerprint: &Fingerprint) -> Result<(), DedupError>;

    /// Atomic test-and-insert.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::Unavailable`] if the store cannot answer.
    fn admit(
        &self,
        namespace: Namespace,
        fingerprint: &Fingerprint,
    ) -> Result<Admission, DedupError>;
}

/// In-process Bloom-filter implementation, one filter per namespace.
///
/// A `Mutex` around each filter serializes admissions, which is what makes
/// `admit` atomic per fingerprint.
pub struct BloomSuppressionStore {
    capture: Mutex<BloomFilter>,
    analysis: Mutex<BloomFilter>,
}

impl BloomSuppressionStore {
    /// Build both namespace filters for `capacity` expected fingerprints at
    /// the given target false-positive rate.
    #[must_use]
    pub fn new(capacity: usize, error_rate: f64) -> Self {
        Self {
            capture: Mutex::new(BloomFilter::with_rate(capacity, error_rate)),
            analysis: Mutex::new(BloomFilter::with_rate(capacity, error_rate)),
        }
    }

    fn filter(&self, namespace: Namespace) -> &Mutex<BloomFilter> {
        match namespace {
            Namespace::Capture => &self.capture,
            Namespace::Analysis => &self.analysis,
        }
    }

    fn lock(
        &self,
        namespace: Namespace,
    ) -> Result<std::sync::MutexGuard<'_, BloomFilter>, DedupError> {
        self.filter(namespace)
            .lock()
            .map_err(|_| DedupError::Unavailable(format!("{namespace} filter lock poisoned")))
    }
}

impl SuppressionStore for BloomSuppressionStore {
    fn contains(
        &self,
        namespace: Namespace,
        fingerprint: &Fingerprint,
    ) -> Result<bool, DedupError> {
        Ok(self.lock(namespace)?.contains(fingerprint))
    }

    fn insert(&self, namespace: Namespace, fingerprint: &Fingerprint) -> Result<(), DedupError> {
        self.lock(namespace)?.check_and_set(fingerprint);
        Ok(())
    }

    fn admit(
        &self,
        namespace: Namespace,
        fingerprint: &Fingerprint,
    ) -> Result<Admission, DedupError> {
        let was_present = self.lock(namespace)?.check_and_set(fingerprint);
        Ok(if was_present {
            Admission::Duplicate
        } else {
            Admission::Admitted
        })
    }
}
