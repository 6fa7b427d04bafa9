// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Errors returned when building a filter or growing its hash chain.
use std::collections::TryReserveError;

use thiserror::Error;

/// A filter could not be constructed.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// The requested bit array has no bytes.
    #[error("filter size must be greater than zero bytes")]
    ZeroSize,
    /// The number of bits does not fit in a `usize`.
    #[error("filter of {nbytes} bytes has more bits than can be addressed")]
    TooLarge {
        /// Requested size in bytes.
        nbytes: usize,
    },
    /// The bit array could not be allocated.
    #[error("unable to allocate {nbytes} bytes for the bit array: {source}")]
    OutOfMemory {
        /// Requested size in bytes.
        nbytes: usize,
        /// Underlying allocation failure.
        #[source]
        source: TryReserveError,
    },
}

/// A hash function could not be added to the chain.
///
/// The chain is left exactly as it was before the failed call.
#[derive(Debug, Error)]
#[error("unable to grow the hash chain past {len} functions: {source}")]
pub struct AllocationError {
    /// Chain length at the time of the failure.
    pub len: usize,
    /// Underlying allocation failure.
    #[source]
    pub source: TryReserveError,
}
