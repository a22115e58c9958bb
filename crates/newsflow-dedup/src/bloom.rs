//! Standard Bloom filter sized from a target false-positive rate.
//!
//! Keys are [`Fingerprint`]s, which are already uniformly distributed
//! SHA-256 digests, so the k probe indices are derived by double hashing
//! from the digest's own bytes rather than re-hashing.

use crate::fingerprint::Fingerprint;

pub(crate) struct BloomFilter {
    bits: Vec<u64>,
    m_bits: u64,
    k: u32,
}

impl BloomFilter {
    /// Size the filter for `capacity` expected items at `error_rate`.
    ///
    /// m = -(n · ln ε) / (ln 2)², k = (m / n) · ln 2, both rounded up and
    /// floored at 1. With ε = 0.001 this is ~14.4 bits and 10 probes per item.
    pub(crate) fn with_rate(capacity: usize, error_rate: f64) -> Self {
        debug_assert!(capacity > 0);
        debug_assert!(error_rate > 0.0 && error_rate < 1.0);

        let ln2 = std::f64::consts::LN_2;
        #[allow(clippy::cast_precision_loss)]
        let n = capacity as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let m_bits = ((-n * error_rate.ln()) / (ln2 * ln2)).ceil().max(64.0) as u64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k = ((m_bits as f64 / n) * ln2).ceil().max(1.0) as u32;

        let words = usize::try_from(m_bits.div_ceil(64)).unwrap_or(usize::MAX);
        Self {
            bits: vec![0u64; words],
            m_bits,
            k,
        }
    }

    fn probes(&self, fp: &Fingerprint) -> impl Iterator<Item = u64> + '_ {
        let bytes = fp.as_bytes();
        let h1 = u64::from_le_bytes(bytes[0..8].try_into().unwrap_or_default());
        // Odd stride so every probe sequence walks the whole bit array.
        let h2 = u64::from_le_bytes(bytes[8..16].try_into().unwrap_or_default()) | 1;
        let m = self.m_bits;
        (0..u64::from(self.k)).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % m)
    }

    pub(crate) fn contains(&self, fp: &Fingerprint) -> bool {
        self.probes(fp).all(|bit| {
            let word = usize::try_from(bit / 64).unwrap_or(0);
            self.bits[word] & (1u64 << (bit % 64)) != 0
        })
    }

    /// Set all probe bits, returning whether every bit was already set
    /// (i.e. the key tested as present before this insert).
    pub(crate) fn check_and_set(&mut self, fp: &Fingerprint) -> bool {
        let positions: Vec<u64> = self.probes(fp).collect();
        let mut was_present = true;
        for bit in positions {
            let word = usize::try_from(bit / 64).unwrap_or(0);
            let mask = 1u64 << (bit % 64);
            if self.bits[word] & mask == 0 {
                was_present = false;
                self.bits[word] |= mask;
            }
        }
        was_present
    }
}
