//! Lane storage and its per-width element view.
//!
//! A [`Lane`] is 64 raw bits. An [`ElementView`] pairs those bits with an
//! [`ElementWidth`] and computes bit offsets on every indexed access, so one
//! lane can be read as `8 x u8`, `4 x u16`, `2 x u32` or `1 x u64` without
//! aliasing. Element 0 always sits in the lowest bits.
//!
//! Views double as the result packer: [`ElementView::zeroed`] starts from an
//! all-zero lane and [`ElementView::set`] writes one element at a time, so any
//! slot that is never written reads back as zero.

use std::fmt;

use num::traits::{NumCast, PrimInt, Unsigned};

use crate::alu::ElementWidth;
use crate::error::{validation_error, Result};

/// A 64-bit operand or result value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Lane(pub u64);

impl Lane {
    pub const ZERO: Lane = Lane(0);
    pub const ONES: Lane = Lane(u64::MAX);

    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Lane(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Single bit at absolute position `pos` (0..64).
    #[inline(always)]
    pub const fn bit(self, pos: u32) -> bool {
        (self.0 >> pos) & 1 != 0
    }

    /// Reads the lane as elements of `width`.
    #[inline(always)]
    pub const fn view(self, width: ElementWidth) -> ElementView {
        ElementView { raw: self.0, width }
    }

    /// Mask bit governing element `index` at `width`: the bit at the
    /// element's lowest position.
    #[inline(always)]
    pub const fn element_mask_bit(self, index: usize, width: ElementWidth) -> bool {
        self.bit(index as u32 * width.bits())
    }

    /// Packs a full lane worth of unsigned elements.
    ///
    /// The element width follows `T`; the slice must hold exactly
    /// `64 / bits(T)` elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lanealu::Lane;
    ///
    /// let lane = Lane::pack(&[0x0001u16, 0x0002, 0x0003, 0x0004]).unwrap();
    /// assert_eq!(lane.bits(), 0x0004_0003_0002_0001);
    /// ```
    pub fn pack<T>(elements: &[T]) -> Result<Lane>
    where
        T: PrimInt + Unsigned,
    {
        let width = ElementWidth::of::<T>()
            .ok_or_else(|| validation_error("element type must be 8, 16, 32 or 64 bits wide"))?;

        if elements.len() != width.count() {
            return Err(validation_error(format!(
                "a {width} lane holds {} elements, got {}",
                width.count(),
                elements.len()
            )));
        }

        let mut view = ElementView::zeroed(width);
        for (i, element) in elements.iter().enumerate() {
            let value = element
                .to_u64()
                .ok_or_else(|| validation_error("element does not fit in 64 bits"))?;
            view.set(i, value);
        }

        Ok(view.lane())
    }

    /// Unpacks the lane into unsigned elements whose width follows `T`.
    pub fn unpack<T>(self) -> Result<Vec<T>>
    where
        T: PrimInt + Unsigned,
    {
        let width = ElementWidth::of::<T>()
            .ok_or_else(|| validation_error("element type must be 8, 16, 32 or 64 bits wide"))?;

        self.view(width)
            .iter()
            .map(|value| {
                <T as NumCast>::from(value)
                    .ok_or_else(|| validation_error("element does not fit the target type"))
            })
            .collect()
    }
}

impl From<u64> for Lane {
    fn from(bits: u64) -> Self {
        Lane(bits)
    }
}

impl From<Lane> for u64 {
    fn from(lane: Lane) -> Self {
        lane.0
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl fmt::LowerHex for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// A lane tagged with the width its elements are read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementView {
    raw: u64,
    width: ElementWidth,
}

impl ElementView {
    /// An all-zero lane at `width`, ready to be filled element by element.
    #[inline(always)]
    pub const fn zeroed(width: ElementWidth) -> Self {
        ElementView { raw: 0, width }
    }

    #[inline(always)]
    pub const fn width(&self) -> ElementWidth {
        self.width
    }

    /// Reads element `index`, zero-extended to 64 bits.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width().count()`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u64 {
        assert!(
            index < self.width.count(),
            "element index {index} out of range for {}",
            self.width
        );
        let shift = index as u32 * self.width.bits();
        (self.raw >> shift) & self.width.mask()
    }

    /// Reads element `index` as a two's complement value.
    #[inline(always)]
    pub fn get_signed(&self, index: usize) -> i64 {
        self.width.sign_extend(self.get(index))
    }

    /// Overwrites element `index` with the low `width` bits of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width().count()`.
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: u64) {
        assert!(
            index < self.width.count(),
            "element index {index} out of range for {}",
            self.width
        );
        let shift = index as u32 * self.width.bits();
        let mask = self.width.mask() << shift;
        self.raw = (self.raw & !mask) | ((value & self.width.mask()) << shift);
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.width.count()).map(move |i| self.get(i))
    }

    #[inline(always)]
    pub const fn lane(&self) -> Lane {
        Lane(self.raw)
    }
}

impl From<ElementView> for Lane {
    fn from(view: ElementView) -> Self {
        view.lane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_zero_is_lowest() {
        let view = Lane(0x0807_0605_0403_0201).view(ElementWidth::E8);
        let elements: Vec<u64> = view.iter().collect();
        assert_eq!(elements, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_same_bits_many_widths() {
        let lane = Lane(0xdead_beef_0123_4567);
        assert_eq!(lane.view(ElementWidth::E16).get(0), 0x4567);
        assert_eq!(lane.view(ElementWidth::E16).get(3), 0xdead);
        assert_eq!(lane.view(ElementWidth::E32).get(1), 0xdead_beef);
        assert_eq!(lane.view(ElementWidth::E64).get(0), 0xdead_beef_0123_4567);
    }

    #[test]
    fn test_set_truncates_and_preserves_neighbours() {
        let mut view = Lane(u64::MAX).view(ElementWidth::E16);
        view.set(1, 0x1_2345);
        assert_eq!(view.lane(), Lane(0xffff_ffff_2345_ffff));
    }

    #[test]
    fn test_zeroed_packer_leaves_unwritten_slots_zero() {
        let mut view = ElementView::zeroed(ElementWidth::E8);
        view.set(3, 0xab);
        assert_eq!(view.lane(), Lane(0x0000_0000_ab00_0000));
    }

    #[test]
    fn test_signed_read() {
        let view = Lane(0x0000_0000_8000_7fff).view(ElementWidth::E16);
        assert_eq!(view.get_signed(0), 0x7fff);
        assert_eq!(view.get_signed(1), -0x8000);
    }

    #[test]
    fn test_element_mask_bit_uses_low_position() {
        let mask = Lane(1 << 16);
        assert!(mask.element_mask_bit(2, ElementWidth::E8));
        assert!(mask.element_mask_bit(1, ElementWidth::E16));
        assert!(!mask.element_mask_bit(0, ElementWidth::E32));
        assert!(!mask.element_mask_bit(1, ElementWidth::E8));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        Lane::ZERO.view(ElementWidth::E32).get(2);
    }

    #[test]
    fn test_pack_unpack() {
        let lane = Lane::pack(&[1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(lane, Lane(0x0807_0605_0403_0201));
        assert_eq!(lane.unpack::<u32>().unwrap(), vec![0x0403_0201, 0x0807_0605]);
    }

    #[test]
    fn test_pack_rejects_wrong_count() {
        let err = Lane::pack(&[1u32, 2, 3]).unwrap_err();
        assert!(format!("{err}").contains("holds 2 elements, got 3"));
    }
}
