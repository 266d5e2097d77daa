use std::fmt;

use crate::error::{invalid_width, AluError};

/// Bit size of every element packed into a lane.
///
/// The set is closed: a lane holds 8, 4, 2 or 1 elements. Raw widths coming
/// from a decoder go through [`TryFrom<u32>`], which is the only place an
/// out-of-range width can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementWidth {
    E8,
    E16,
    E32,
    E64,
}

impl ElementWidth {
    pub const ALL: [ElementWidth; 4] = [
        ElementWidth::E8,
        ElementWidth::E16,
        ElementWidth::E32,
        ElementWidth::E64,
    ];

    /// Element size in bits.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        match self {
            ElementWidth::E8 => 8,
            ElementWidth::E16 => 16,
            ElementWidth::E32 => 32,
            ElementWidth::E64 => 64,
        }
    }

    /// Number of elements in a 64-bit lane.
    #[inline(always)]
    pub const fn count(self) -> usize {
        (64 / self.bits()) as usize
    }

    /// All-ones value of one element.
    #[inline(always)]
    pub const fn mask(self) -> u64 {
        match self {
            ElementWidth::E64 => u64::MAX,
            w => (1u64 << w.bits()) - 1,
        }
    }

    /// Mask applied to shift amounts, so shifts wrap modulo the width.
    #[inline(always)]
    pub const fn shift_mask(self) -> u64 {
        (self.bits() - 1) as u64
    }

    /// The next wider width, read by narrowing operations.
    pub const fn widened(self) -> Option<ElementWidth> {
        match self {
            ElementWidth::E8 => Some(ElementWidth::E16),
            ElementWidth::E16 => Some(ElementWidth::E32),
            ElementWidth::E32 => Some(ElementWidth::E64),
            ElementWidth::E64 => None,
        }
    }

    /// Interprets the low `bits()` of `value` as two's complement.
    #[inline(always)]
    pub const fn sign_extend(self, value: u64) -> i64 {
        let unused = 64 - self.bits();
        ((value << unused) as i64) >> unused
    }

    /// Width matching the size of a primitive element type, if any.
    pub fn of<T>() -> Option<ElementWidth> {
        match std::mem::size_of::<T>() {
            1 => Some(ElementWidth::E8),
            2 => Some(ElementWidth::E16),
            4 => Some(ElementWidth::E32),
            8 => Some(ElementWidth::E64),
            _ => None,
        }
    }
}

impl TryFrom<u32> for ElementWidth {
    type Error = AluError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(ElementWidth::E8),
            16 => Ok(ElementWidth::E16),
            32 => Ok(ElementWidth::E32),
            64 => Ok(ElementWidth::E64),
            other => Err(invalid_width(other)),
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.bits())
    }
}
