// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Hash functions that can be chained into a [`BloomFilter`](crate::BloomFilter).
//!
//! Anything implementing [`Digest`] can be registered: the stock functions in
//! this module, or any closure `Fn(&[u8]) -> u64`. Functions producing 32-bit
//! digests are wrapped with [`Narrow`].
use std::fmt;
use std::hash::Hasher;

use siphasher::sip::SipHasher13;

/// Mixes a seed into the second SipHash key.
const SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// A deterministic mapping from the bytes of an item to an unsigned integer.
///
/// The output may have any magnitude; the filter reduces it modulo its bit
/// count. Implementations must be total and must return the same digest for
/// the same bytes every time.
pub trait Digest: Send + Sync {
    /// Compute the digest of `bytes`.
    fn digest(&self, bytes: &[u8]) -> u64;
}

impl<F> Digest for F
where
    F: Fn(&[u8]) -> u64 + Send + Sync,
{
    fn digest(&self, bytes: &[u8]) -> u64 {
        self(bytes)
    }
}

/// Adapts a 32-bit hash function into a [`Digest`].
#[derive(Clone, Copy)]
pub struct Narrow<F>(pub F);

impl<F> Digest for Narrow<F>
where
    F: Fn(&[u8]) -> u32 + Send + Sync,
{
    fn digest(&self, bytes: &[u8]) -> u64 {
        u64::from((self.0)(bytes))
    }
}

impl<F> fmt::Debug for Narrow<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Narrow(..)")
    }
}

/// Bernstein's multiplicative string hash: `h = h * 33 + byte`, from 5381.
///
/// Bytes are added as unsigned values, so for bytes `>= 0x80` the result
/// differs from C versions that add a signed `char`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Djb2;

impl Djb2 {
    /// Hash `bytes` to a 32-bit value.
    pub fn hash32(bytes: &[u8]) -> u32 {
        bytes.iter().fold(5381u32, |hash, &b| {
            (hash << 5).wrapping_add(hash).wrapping_add(u32::from(b))
        })
    }
}

impl Digest for Djb2 {
    fn digest(&self, bytes: &[u8]) -> u64 {
        u64::from(Self::hash32(bytes))
    }
}

/// Jenkins' one-at-a-time mixing hash.
///
/// Bytes are added as unsigned values, so for bytes `>= 0x80` the result
/// differs from C versions that add a signed `char`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneAtATime;

impl OneAtATime {
    /// Hash `bytes` to a 32-bit value.
    pub fn hash32(bytes: &[u8]) -> u32 {
        let mut hash = bytes.iter().fold(0u32, |mut hash, &b| {
            hash = hash.wrapping_add(u32::from(b));
            hash = hash.wrapping_add(hash << 10);
            hash ^ (hash >> 6)
        });
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 11;
        hash.wrapping_add(hash << 15)
    }
}

impl Digest for OneAtATime {
    fn digest(&self, bytes: &[u8]) -> u64 {
        u64::from(Self::hash32(bytes))
    }
}

/// Keyed SipHash-1-3.
///
/// Digests built from different seeds behave as independent functions, which
/// makes a set of them a reasonable default chain:
///
/// ```
/// use hashchain_bloom::{hash::SipDigest, BloomFilter};
///
/// let mut filter = BloomFilter::<str>::with_size(128).unwrap();
/// for digest in SipDigest::chain(4) {
///     filter.add_hash(digest).unwrap();
/// }
/// filter.insert("foo");
///
/// assert!(filter.contains("foo"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SipDigest {
    hasher: SipHasher13,
}

impl SipDigest {
    /// Create a digest keyed from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            hasher: SipHasher13::new_with_keys(seed, seed.rotate_left(32) ^ SEED_MIX),
        }
    }

    /// Return `k` digests with distinct seeds `0..k`.
    pub fn chain(k: usize) -> impl Iterator<Item = SipDigest> {
        (0..k as u64).map(SipDigest::new)
    }
}

impl Digest for SipDigest {
    fn digest(&self, bytes: &[u8]) -> u64 {
        let mut sip = self.hasher;
        sip.write(bytes);
        sip.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_known_values() {
        assert_eq!(Djb2::hash32(b""), 5381);
        assert_eq!(Djb2::hash32(b"hello world"), 894_552_257);
        assert_eq!(Djb2::hash32(b"world hello"), 2_571_048_897);
    }

    #[test]
    fn one_at_a_time_known_values() {
        assert_eq!(OneAtATime::hash32(b""), 0);
        assert_eq!(OneAtATime::hash32(b"hello world"), 1_045_060_183);
        assert_eq!(OneAtATime::hash32(b"world hello"), 2_711_855_740);
    }

    #[test]
    fn high_bytes_are_unsigned() {
        assert_eq!(Djb2::hash32(&[0xff]), 5381 * 33 + 0xff);
        assert_ne!(Djb2::hash32(&[0xff]), (5381u32 * 33).wrapping_sub(1));

        let mut expected = 0xffu32;
        expected = expected.wrapping_add(expected << 10);
        expected ^= expected >> 6;
        expected = expected.wrapping_add(expected << 3);
        expected ^= expected >> 11;
        expected = expected.wrapping_add(expected << 15);
        assert_eq!(OneAtATime::hash32(&[0xff]), expected);
    }

    #[test]
    fn narrow_widens_without_changing_value() {
        let narrow = Narrow(|bytes: &[u8]| Djb2::hash32(bytes));
        assert_eq!(narrow.digest(b"foo"), Djb2.digest(b"foo"));
    }

    #[test]
    fn closures_are_digests() {
        let len = |bytes: &[u8]| bytes.len() as u64;
        assert_eq!(len.digest(b"four"), 4);
    }

    #[test]
    fn sip_digest_is_deterministic_per_seed() {
        let a = SipDigest::new(7);
        let b = SipDigest::new(7);
        let c = SipDigest::new(8);

        assert_eq!(a.digest(b"item"), b.digest(b"item"));
        assert_ne!(a.digest(b"item"), c.digest(b"item"));
    }

    #[test]
    fn sip_chain_yields_distinct_functions() {
        let digests: Vec<u64> = SipDigest::chain(4).map(|d| d.digest(b"item")).collect();

        assert_eq!(digests.len(), 4);
        for (i, a) in digests.iter().enumerate() {
            for b in &digests[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
