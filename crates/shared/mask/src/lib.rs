//! # Masks
//!
//! Arbitrary-width bit vectors backing every feature value, plus [`MaskSet`], the
//! value-comparing set used to deduplicate masks.
//!
//! Bits are stored in 64-bit words, least significant word first. A [`Mask`] never keeps
//! trailing zero words, so derived equality and hashing compare the set bits only.
//!
//! ## Example
//!
//! ```rust
//! use fhub_mask::Mask;
//!
//! let mut allocated = Mask::new();
//! let a = Mask::next(&allocated);
//! allocated |= &a;
//! let b = Mask::next(&allocated);
//!
//! let both = a.union(&b);
//! assert!(both.includes(&a));
//! assert!(!a.includes(&both));
//! assert_eq!(both.intersection(&a), a);
//! ```

mod set;

pub use set::MaskSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

const WORD_BITS: usize = u64::BITS as usize;

/// An immutable, arbitrary-width bit vector.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Mask {
    words: Vec<u64>,
}

impl Mask {
    /// Returns the empty mask.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Builds a mask from raw words, least significant word first.
    #[must_use]
    pub fn from_words(words: impl Into<Vec<u64>>) -> Self {
        let mut mask = Self { words: words.into() };
        mask.trim();
        mask
    }

    /// Returns a mask with only bit `index` set.
    #[must_use]
    pub fn bit(index: usize) -> Self {
        let mut words = vec![0; index / WORD_BITS + 1];
        words[index / WORD_BITS] = 1u64 << (index % WORD_BITS);
        Self { words }
    }

    /// Returns a mask with exactly one bit set: the lowest bit not set in `allocated`.
    ///
    /// The caller unions the result into its running allocation before asking again.
    #[must_use]
    pub fn next(allocated: &Self) -> Self {
        let index = allocated
            .words
            .iter()
            .position(|word| *word != u64::MAX)
            .map_or(allocated.words.len() * WORD_BITS, |i| {
                i * WORD_BITS + (!allocated.words[i]).trailing_zeros() as usize
            });
        Self::bit(index)
    }

    /// Bitwise OR.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (long, short) =
            if self.words.len() >= other.words.len() { (self, other) } else { (other, self) };
        let mut words = long.words.clone();
        for (word, extra) in words.iter_mut().zip(&short.words) {
            *word |= extra;
        }
        Self { words }
    }

    /// Bitwise AND.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_words(self.words.iter().zip(&other.words).map(|(a, b)| a & b).collect::<Vec<_>>())
    }

    /// Returns `true` if every bit of `subset` is also set in `self`.
    #[must_use]
    pub fn includes(&self, subset: &Self) -> bool {
        subset.words.len() <= self.words.len()
            && subset.words.iter().zip(&self.words).all(|(sub, sup)| sub & sup == *sub)
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if bit `index` is set.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.words.get(index / WORD_BITS).is_some_and(|word| word & (1u64 << (index % WORD_BITS)) != 0)
    }

    /// Number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Iterates over the indices of the set bits in ascending order.
    pub fn bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..WORD_BITS).filter(move |bit| word & (1u64 << bit) != 0).map(move |bit| i * WORD_BITS + bit)
        })
    }

    /// The raw words, least significant first, without trailing zero words.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl BitOr for &Mask {
    type Output = Mask;

    fn bitor(self, rhs: Self) -> Mask {
        self.union(rhs)
    }
}

impl BitAnd for &Mask {
    type Output = Mask;

    fn bitand(self, rhs: Self) -> Mask {
        self.intersection(rhs)
    }
}

impl BitOrAssign<&Self> for Mask {
    fn bitor_assign(&mut self, rhs: &Self) {
        if self.words.len() < rhs.words.len() {
            self.words.resize(rhs.words.len(), 0);
        }
        for (word, extra) in self.words.iter_mut().zip(&rhs.words) {
            *word |= extra;
        }
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mask")?;
        f.debug_set().entries(self.bits()).finish()
    }
}

impl fmt::Display for Mask {
    /// Hexadecimal, most significant word first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = self.words.iter().rev();
        match words.next() {
            Some(top) => write!(f, "0x{top:x}")?,
            None => return f.write_str("0x0"),
        }
        words.try_for_each(|word| write!(f, "{word:016x}"))
    }
}

impl Serialize for Mask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.words.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<u64>::deserialize(deserializer).map(Self::from_words)
    }
}
