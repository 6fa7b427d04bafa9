//! A Bloom filter whose bit positions come from a caller-supplied chain of
//! hash functions.
//!
//! # Bloom Filters
//!
//! A Bloom filter is a space-efficient probabilistic data structure that is
//! used to test whether an element is a member of a set. It allows for queries
//! to return: "possibly in set" or "definitely not in set". Elements can be
//! added to the set, but not removed; the more elements that are added to the
//! set, the larger the probability of false positives.
//!
//! # Hash Chains
//!
//! The filter is a fixed array of `nbytes * 8` bits plus an ordered chain of
//! [`Digest`]s. Inserting an item sets, for every digest `h` in the chain, the
//! bit at `h(item) mod nbits`; an item is reported present when all of those
//! bits are set. The filter never picks hash functions for you: the size of
//! the bit array and the chain together decide the false positive rate. See
//! [`optimal_bytes`] and [`optimal_hashes`] for tuning, and
//! [`hash::SipDigest::chain`] for a ready-made chain.
//!
//! A filter with an empty chain reports every item as present.
//!
//! # Example
//!
//! ```
//! use hashchain_bloom::hash::{Djb2, OneAtATime};
//! use hashchain_bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::<str>::with_size(8).unwrap();
//! filter.add_hash(Djb2).unwrap();
//! filter.add_hash(OneAtATime).unwrap();
//!
//! assert!(!filter.contains("hello world"));
//! filter.insert("hello world");
//!
//! assert!(filter.contains("hello world"));
//! assert!(!filter.contains("world hello"));
//! ```
#![warn(missing_docs)]
#![allow(clippy::bool_assert_comparison)]

pub mod bitvec;
pub mod bloom;
pub mod error;
pub mod hash;

pub use bloom::{
    optimal_bits, optimal_bytes, optimal_capacity, optimal_hashes, BloomFilter,
    DEFAULT_FALSE_POSITIVE_RATE,
};
pub use error::{AllocationError, ConstructionError};
pub use hash::Digest;
