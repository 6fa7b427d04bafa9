// Copyright (c) 2020 Helge Wrede, Alexander Schultheiß, Lukas Simon
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Bit vector functionality.
use std::collections::TryReserveError;
use std::fmt::Debug;

/// A packed, fixed-length bit vector whose bits can be set but never cleared.
#[derive(PartialEq, Eq)]
pub struct BitVec {
    bytes: Vec<u8>,
}

impl BitVec {
    /// Allocate a zeroed bit vector of `nbytes` bytes, ie. `nbytes * 8` bits.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub fn try_with_bytes(nbytes: usize) -> Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(nbytes)?;
        bytes.resize(nbytes, 0);

        Ok(Self { bytes })
    }

    /// Get the length in bits of the vector.
    pub fn len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Check whether this vector is empty, ie. has a length of zero.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Set a single bit to `1`.
    pub fn set(&mut self, index: usize) {
        let (byte, mask) = self.locate(index);

        self.bytes[byte] |= mask;
    }

    /// Check whether a bit is set.
    pub fn is_set(&self, index: usize) -> bool {
        let (byte, mask) = self.locate(index);

        self.bytes[byte] & mask == mask
    }

    /// Count the number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Count the number of `0` bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn locate(&self, index: usize) -> (usize, u8) {
        if index >= self.len() {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index,
            )
        }
        (index / 8, 0x01 << (index % 8))
    }
}

impl Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = (0..self.len())
            .map(|i| if self.is_set(i) { '1' } else { '0' })
            .collect();
        write!(f, "BitVec({})", bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitvec_with_bytes() {
        let bitvec = BitVec::try_with_bytes(1).unwrap();
        assert_eq!(8, bitvec.len());
        assert_eq!(1, bitvec.as_bytes().len());
        assert!(!bitvec.is_empty());

        let bitvec = BitVec::try_with_bytes(3).unwrap();
        assert_eq!(24, bitvec.len());
        assert_eq!(&[0, 0, 0], bitvec.as_bytes());

        let bitvec = BitVec::try_with_bytes(0).unwrap();
        assert!(bitvec.is_empty());
    }

    #[test]
    fn allocation_failure_is_reported() {
        assert!(BitVec::try_with_bytes(usize::MAX).is_err());
    }

    #[test]
    fn set_first_bit_only() {
        let mut bitvec = BitVec::try_with_bytes(1).unwrap();
        bitvec.set(0);
        assert_eq!(true, bitvec.is_set(0));
        for i in 1..8 {
            assert_eq!(false, bitvec.is_set(i));
        }
        assert_eq!(&[0b0000_0001], bitvec.as_bytes());
    }

    #[test]
    fn set_last_bit_only() {
        let mut bitvec = BitVec::try_with_bytes(2).unwrap();
        bitvec.set(15);
        for i in 0..15 {
            assert_eq!(false, bitvec.is_set(i));
        }
        assert_eq!(true, bitvec.is_set(15));
        assert_eq!(&[0, 0b1000_0000], bitvec.as_bytes());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn must_set_with_correct_index() {
        BitVec::try_with_bytes(1).unwrap().set(8);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn must_get_with_correct_index() {
        BitVec::try_with_bytes(2).unwrap().is_set(16);
    }

    #[test]
    fn set_is_idempotent() {
        let mut bitvec = BitVec::try_with_bytes(1).unwrap();
        bitvec.set(3);
        bitvec.set(3);

        assert_eq!(1, bitvec.count_ones());
        assert_eq!(&[0b0000_1000], bitvec.as_bytes());
    }

    #[test]
    fn set_each_bit_one_by_one() {
        let mut bitvec = BitVec::try_with_bytes(2).unwrap();
        assert_eq!(0, bitvec.count_ones());
        assert_eq!(16, bitvec.count_zeros());

        for i in 0..16 {
            bitvec.set(i);
            assert_eq!(true, bitvec.is_set(i));
            assert_eq!(i + 1, bitvec.count_ones());
            assert_eq!(15 - i, bitvec.count_zeros());
        }
        assert_eq!(&[0xff, 0xff], bitvec.as_bytes());
    }

    #[test]
    fn debug_lists_bits_in_index_order() {
        let mut bitvec = BitVec::try_with_bytes(1).unwrap();
        bitvec.set(1);
        bitvec.set(6);

        assert_eq!("BitVec(01000010)", format!("{:?}", bitvec));
    }
}
