//! Best-effort deduplication of short text values.
//!
//! A direct-mapped table: each short string hashes to exactly one slot and
//! a colliding string simply evicts the previous occupant. A miss always
//! produces a correct, freshly allocated [`Text`], so the cache only ever
//! affects memory use, never results.

use crate::value::Text;

/// Default number of slots.
pub const DEFAULT_SLOTS: usize = 1 << 15;

/// Default length threshold; longer strings bypass the cache.
pub const DEFAULT_MAX_LEN: usize = 32;

/// Hit/miss counters, reported by `--stats`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Returned an existing allocation.
    pub hits: u64,
    /// Allocated and stored (including evictions).
    pub misses: u64,
    /// Too long to cache; allocated directly.
    pub bypassed: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses + self.bypassed
    }
}

/// Fixed-size, hash-indexed text cache.
pub struct StringCache {
    slots: Box<[Option<Text>]>,
    max_len: usize,
    stats: CacheStats,
}

impl StringCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SLOTS, DEFAULT_MAX_LEN)
    }

    /// A cache with `slots` entries caching strings of at most `max_len`
    /// bytes. Zero slots disables caching entirely.
    pub fn with_capacity(slots: usize, max_len: usize) -> Self {
        StringCache {
            slots: vec![None; slots].into_boxed_slice(),
            max_len,
            stats: CacheStats::default(),
        }
    }

    /// Shared text equal to `s`.
    pub fn fetch(&mut self, s: &str) -> Text {
        match self.slot_for(s) {
            Some(index) => self.fetch_at(index, s),
            None => {
                self.stats.bypassed += 1;
                Text::from(s)
            }
        }
    }

    /// Like [`fetch`](Self::fetch), but a string too long to cache is
    /// moved into the new text instead of copied.
    pub fn fetch_owned(&mut self, s: String) -> Text {
        match self.slot_for(&s) {
            Some(index) => self.fetch_at(index, &s),
            None => {
                self.stats.bypassed += 1;
                Text::from(s)
            }
        }
    }

    fn fetch_at(&mut self, index: usize, s: &str) -> Text {
        let slot = &mut self.slots[index];
        if let Some(cached) = slot.as_ref() {
            if **cached == *s {
                self.stats.hits += 1;
                return cached.clone();
            }
        }
        self.stats.misses += 1;
        let text = Text::from(s);
        *slot = Some(text.clone());
        text
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn slot_for(&self, s: &str) -> Option<usize> {
        if s.len() > self.max_len || self.slots.is_empty() {
            return None;
        }
        // Slot count fits in usize, so the remainder does too.
        let len = self.slots.len() as u64;
        Some((hash_bytes(s.as_bytes()) % len) as usize)
    }
}

impl Default for StringCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringCache")
            .field("slots", &self.slots.len())
            .field("max_len", &self.max_len)
            .field("stats", &self.stats)
            .finish()
    }
}

const SEED: u64 = 0xc70f_6907;
const MUL: u64 = 0xc6a4_a793_5bd1_e995;

#[inline]
fn shift_mix(v: u64) -> u64 {
    v ^ (v >> 47)
}

/// MurmurHash2-family 64-bit hash: 8-byte little-endian words, then the
/// tail bytes, each folded in with multiply-xor-shift.
fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hash = SEED ^ (bytes.len() as u64).wrapping_mul(MUL);

    let mut chunks = bytes.chunks_exact(8);
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        let data = shift_mix(u64::from_le_bytes(word).wrapping_mul(MUL)).wrapping_mul(MUL);
        hash ^= data;
        hash = hash.wrapping_mul(MUL);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let data = tail
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        hash ^= data;
        hash = hash.wrapping_mul(MUL);
    }

    shift_mix(shift_mix(hash).wrapping_mul(MUL))
}
