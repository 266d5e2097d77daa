use crate::alu::ElementView;

/// Per-element `less` and `equal` flags for one pair of views.
///
/// Bit `i` of each byte belongs to element `i`; bits at or above the element
/// count are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Comparison {
    pub less: u8,
    pub equal: u8,
}

impl Comparison {
    /// Compares `lhs[i]` against `rhs[i]` for every element.
    ///
    /// `less` reads "lhs is less than rhs". With `signed` set, each element is
    /// sign-extended from its top bit before the comparison. Equality does not
    /// depend on signedness.
    ///
    /// # Panics
    ///
    /// Panics if the two views use different widths.
    pub fn of(lhs: &ElementView, rhs: &ElementView, signed: bool) -> Self {
        assert_eq!(lhs.width(), rhs.width(), "compared views must share a width");

        let mut less = 0u8;
        let mut equal = 0u8;

        for i in 0..lhs.width().count() {
            let lt = if signed {
                lhs.get_signed(i) < rhs.get_signed(i)
            } else {
                lhs.get(i) < rhs.get(i)
            };
            less |= (lt as u8) << i;
            equal |= ((lhs.get(i) == rhs.get(i)) as u8) << i;
        }

        Comparison { less, equal }
    }

    #[inline(always)]
    pub fn is_less(&self, index: usize) -> bool {
        (self.less >> index) & 1 != 0
    }

    #[inline(always)]
    pub fn is_equal(&self, index: usize) -> bool {
        (self.equal >> index) & 1 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alu::{ElementWidth, Lane};

    #[test]
    fn test_unsigned_flags() {
        let a = Lane(0x0004_0003_0002_0001).view(ElementWidth::E16);
        let b = Lane(0x0001_0005_0002_0000).view(ElementWidth::E16);
        let cmp = Comparison::of(&a, &b, false);
        assert_eq!(cmp.less, 0b0100);
        assert_eq!(cmp.equal, 0b0010);
    }

    #[test]
    fn test_signed_flips_negative_elements() {
        // 0xff is -1 signed, 255 unsigned
        let a = Lane(0xff).view(ElementWidth::E8);
        let b = Lane(0x01).view(ElementWidth::E8);
        assert!(Comparison::of(&a, &b, true).is_less(0));
        assert!(!Comparison::of(&a, &b, false).is_less(0));
    }

    #[test]
    fn test_unused_bits_stay_zero() {
        let a = Lane(0).view(ElementWidth::E64);
        let b = Lane(0).view(ElementWidth::E64);
        let cmp = Comparison::of(&a, &b, false);
        assert_eq!(cmp.equal, 0b1);
        assert_eq!(cmp.less, 0);
    }

    #[test]
    fn test_all_eight_elements() {
        let a = Lane(0).view(ElementWidth::E8);
        let b = Lane(0x0101_0101_0101_0101).view(ElementWidth::E8);
        let cmp = Comparison::of(&a, &b, false);
        assert_eq!(cmp.less, 0xff);
        assert_eq!(cmp.equal, 0);
    }
}
