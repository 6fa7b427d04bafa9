// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! A Bloom filter driven by a caller-supplied chain of hash functions.

use std::f64;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::bitvec::BitVec;
use crate::error::{AllocationError, ConstructionError};
use crate::hash::Digest;

/// The default false positive probability value, 1%.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// `ln` squared.
const LN_SQR: f64 = f64::consts::LN_2 * f64::consts::LN_2;

/// A Bloom filter that keeps track of items of type `K`.
///
/// Items are hashed through their byte view (`K: AsRef<[u8]>`), once per
/// registered [`Digest`]. Register every hash function before inserting
/// items: an item inserted earlier is not represented under a function added
/// later, and may then test negative.
///
/// The filter does no internal locking. `insert` needs `&mut self`; callers
/// sharing a filter across threads must guard it themselves, eg. with a
/// `Mutex`.
pub struct BloomFilter<K: ?Sized> {
    bits: BitVec,
    hashers: Vec<Box<dyn Digest>>,
    populated: bool,
    key: PhantomData<fn(&K)>,
}

impl<K: AsRef<[u8]> + ?Sized> BloomFilter<K> {
    /// Return a new, empty Bloom filter backed by `nbytes` bytes, ie.
    /// `nbytes * 8` bits. The hash chain starts out empty.
    pub fn with_size(nbytes: usize) -> Result<BloomFilter<K>, ConstructionError> {
        if nbytes == 0 {
            return Err(ConstructionError::ZeroSize);
        }
        let nbits = nbytes
            .checked_mul(8)
            .ok_or(ConstructionError::TooLarge { nbytes })?;
        let bits = BitVec::try_with_bytes(nbytes)
            .map_err(|source| ConstructionError::OutOfMemory { nbytes, source })?;

        debug!(nbytes, nbits, "bloom filter created");

        Ok(BloomFilter {
            bits,
            hashers: Vec::new(),
            populated: false,
            key: PhantomData,
        })
    }

    /// Return a new Bloom filter sized for `capacity` items at the given
    /// false positive rate. No hash functions are registered; see
    /// [`optimal_hashes`] for how many to add.
    pub fn with_rate(
        capacity: usize,
        fp_rate: f64,
    ) -> Result<BloomFilter<K>, ConstructionError> {
        BloomFilter::with_size(optimal_bytes(capacity, fp_rate))
    }

    /// Append a hash function to the end of the chain.
    ///
    /// On failure the chain is left untouched.
    pub fn add_hash<D: Digest + 'static>(&mut self, digest: D) -> Result<(), AllocationError> {
        let len = self.hashers.len();

        self.hashers
            .try_reserve(1)
            .map_err(|source| AllocationError { len, source })?;
        self.hashers.push(Box::new(digest));

        if self.populated {
            warn!(
                hashes = self.hashers.len(),
                "hash function registered after insertion; earlier items may test negative"
            );
        } else {
            debug!(hashes = self.hashers.len(), "hash function registered");
        }
        Ok(())
    }

    /// Set an item in the Bloom filter. This operation is idempotent with
    /// regards to each unique item. With no hash functions registered, this
    /// sets nothing.
    pub fn insert(&mut self, item: &K) {
        let bytes = item.as_ref();

        for hasher in &self.hashers {
            let index = self.index(hasher.digest(bytes));
            self.bits.set(index);
        }
        self.populated = true;
    }

    /// Return whether or not a given item is likely in the Bloom filter or not.
    /// There is a possibility for a false positive, but a false negative will
    /// never occur.
    ///
    /// A filter with no hash functions contains every item.
    pub fn contains(&self, item: &K) -> bool {
        let bytes = item.as_ref();

        self.hashers
            .iter()
            .all(|hasher| self.bits.is_set(self.index(hasher.digest(bytes))))
    }

    /// Return the number of bits in this filter.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    /// Return the size of the bit array, in bytes.
    pub fn bytes(&self) -> usize {
        self.bits.as_bytes().len()
    }

    /// Number of hash functions in the chain (`k` parameter).
    pub fn hashes(&self) -> usize {
        self.hashers.len()
    }

    /// Number of bits currently set.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits currently set.
    pub fn load_factor(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Count the approximate number of items in the filter.
    pub fn count(&self) -> usize {
        if self.hashers.is_empty() {
            return 0;
        }
        let nbits = self.bits.len() as f64;
        let nbits_set = self.bits.count_ones() as f64;
        let nhashes = self.hashers.len() as f64;
        let count = -(nbits / nhashes) * (1. - (nbits_set / nbits)).ln();

        count.round() as usize
    }

    /// Estimate the current false positive probability as `load_factor ^ k`.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(self.hashers.len() as i32)
    }

    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    fn index(&self, digest: u64) -> usize {
        (digest % self.bits.len() as u64) as usize
    }
}

/// Return the optimal bit vector size for a Bloom filter given an approximate
/// size and a desired false positive rate.
pub fn optimal_bits(capacity: usize, fp_rate: f64) -> usize {
    (-((fp_rate.ln() * (capacity as f64)) / LN_SQR)).ceil() as usize
}

/// Return [`optimal_bits`] rounded up to whole bytes, never less than one.
pub fn optimal_bytes(capacity: usize, fp_rate: f64) -> usize {
    optimal_bits(capacity, fp_rate).div_ceil(8).max(1)
}

/// Return the optimal item capacity of a filter given a bit vector size and false positive rate.
pub fn optimal_capacity(nbits: usize, fp_rate: f64) -> usize {
    ((-(nbits as f64) * LN_SQR) / fp_rate.ln()).round() as usize
}

/// Return the optimal number of hash functions for a Bloom filter given a
/// bit vector size and an approximate set size.
///
/// Also called `k`. Never less than one, so a filter built from it always
/// has a hash to test against. A capacity of zero is treated as one.
pub fn optimal_hashes(nbits: usize, capacity: usize) -> usize {
    let ratio = nbits as f64 / capacity.max(1) as f64;

    (ratio * f64::consts::LN_2).ceil().max(1.) as usize
}

impl<K: ?Sized> AsRef<[u8]> for BloomFilter<K> {
    fn as_ref(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

/// Filters are equal when their bits and chain lengths match. Digests are
/// opaque and not compared: two equal filters with different hash functions
/// can still disagree on `contains`.
impl<K: ?Sized> PartialEq for BloomFilter<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits && self.hashers.len() == other.hashers.len()
    }
}

impl<K: ?Sized> Eq for BloomFilter<K> {}

impl<K: ?Sized> fmt::Debug for BloomFilter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bytes", &self.bits.as_bytes().len())
            .field("hashes", &self.hashers.len())
            .field("ones", &self.bits.count_ones())
            .finish()
    }
}
