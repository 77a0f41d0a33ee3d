// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! Bloom filters keyed by operation identity.
//!
//! Each page carries a filter summarizing the identities stored in it, so
//! reference lookups can skip pages that definitely do not contain the
//! referenced operation. False positives cost a wasted page scan; false
//! negatives would lose data and must never happen.
//!
//! Bit positions come from double hashing: one blake3 digest of the key
//! yields two 64-bit seeds `h1` and `h2`, and the i-th probe is
//! `h1 + i * h2 (mod m)`. Classic construction, k probes per key, no
//! removal.

/// The fixed capacity of a [`bloom_key`]. A varint counter needs at most
/// ten bytes, which leaves at least thirty for the actor.
pub const KEY_LEN: usize = 40;

/// A classic Bloom filter over `m` bits with `k` hash probes.
#[derive(Clone, Debug)]
pub struct BloomFilter {
    /// The bit array, packed into 64-bit words.
    bits: Vec<u64>,
    /// Total number of bits.
    m: u64,
    /// Number of hash probes per key.
    k: u32,
}

impl BloomFilter {
    /// A filter over `m` bits using `k` probes. Both must be positive.
    pub fn new(m: usize, k: u32) -> BloomFilter {
        assert!(m > 0, "bloom filter needs at least one bit");
        assert!(k > 0, "bloom filter needs at least one probe");
        let words = (m + 63) / 64;
        return BloomFilter {
            bits: vec![0u64; words],
            m: m as u64,
            k,
        };
    }

    /// Derive the two double-hashing seeds for `key`.
    fn seeds(key: &[u8]) -> (u64, u64) {
        let digest = blake3::hash(key);
        let bytes = digest.as_bytes();
        let mut h1 = [0u8; 8];
        let mut h2 = [0u8; 8];
        h1.copy_from_slice(&bytes[0..8]);
        h2.copy_from_slice(&bytes[8..16]);
        return (u64::from_le_bytes(h1), u64::from_le_bytes(h2));
    }

    /// Record `key` in the filter.
    pub fn add(&mut self, key: &[u8]) {
        let (h1, h2) = Self::seeds(key);
        for i in 0..self.k {
            let bit = h1.wrapping_add((i as u64).wrapping_mul(h2)) % self.m;
            self.bits[(bit / 64) as usize] |= 1 << (bit % 64);
        }
    }

    /// Test whether `key` may have been recorded. `false` is definitive;
    /// `true` may be a false positive.
    pub fn test(&self, key: &[u8]) -> bool {
        let (h1, h2) = Self::seeds(key);
        for i in 0..self.k {
            let bit = h1.wrapping_add((i as u64).wrapping_mul(h2)) % self.m;
            if self.bits[(bit / 64) as usize] & (1 << (bit % 64)) == 0 {
                return false;
            }
        }
        return true;
    }
}

/// Fingerprint an operation identity into a fixed-capacity key: the
/// counter as a varint in the low bytes, then as much of the actor as
/// fits. Long actors truncate; the filter tolerates the extra collisions.
pub fn bloom_key(counter: i64, actor: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    let offset = crate::encoding::varint::encode(counter, &mut key);
    let take = actor.len().min(KEY_LEN - offset);
    key[offset..offset + take].copy_from_slice(&actor[..take]);
    return key;
}
