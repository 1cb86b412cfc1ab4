//! BLAKE3 helpers.
//!
//! - [`hash_to_u64`] seeds the stub embedder.
//! - [`fingerprint_facts`] binds the two persisted index artifacts to one fact sequence.

/// Length of a fact-sequence fingerprint in bytes.
pub const FINGERPRINT_LEN: usize = 32;

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Only used where a collision is harmless (deterministic seeding). Anything that must
/// detect tampering or mismatch uses the full 256-bit [`fingerprint_facts`].
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Fingerprints an ordered fact sequence.
///
/// Each fact is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` hash differently,
/// and the count is mixed in first. Reordering the sequence changes the fingerprint.
pub fn fingerprint_facts<S: AsRef<str>>(facts: &[S]) -> [u8; FINGERPRINT_LEN] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(facts.len() as u64).to_le_bytes());
    for fact in facts {
        let bytes = fact.as_ref().as_bytes();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    *hasher.finalize().as_bytes()
}

/// Hex-encodes a fingerprint prefix for log fields.
pub fn short_fingerprint(fingerprint: &[u8; FINGERPRINT_LEN]) -> String {
    fingerprint[..6].iter().map(|b| format!("{:02x}", b)).collect()
}
