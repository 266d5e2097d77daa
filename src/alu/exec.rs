//! Operation executor: one pure function from operands and controls to a
//! result lane.
//!
//! Dispatch happens once per call on [`AluOp::kind`]; every element-wise
//! family then loops over `width.count()` elements of an [`ElementView`], so
//! no case is written out per width.

use crate::alu::op::{OpKind, ShiftKind};
use crate::alu::{AluOp, Comparison, ElementView, ElementWidth, Lane};

/// Control inputs of one ALU invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AluControl {
    pub op: AluOp,
    pub width: ElementWidth,
    /// When unset the result is the zero lane.
    pub valid: bool,
    /// Gates the mask lane into the carry/borrow-in of `vadc`, `vmadc`,
    /// `vsbc` and `vmsbc`.
    pub mask_enable: bool,
    /// Narrowing results land in odd output slots when set, even otherwise.
    pub narrow_select: bool,
}

impl AluControl {
    /// A valid invocation of `op` at `width` with every flag cleared.
    pub const fn new(op: AluOp, width: ElementWidth) -> Self {
        AluControl {
            op,
            width,
            valid: true,
            mask_enable: false,
            narrow_select: false,
        }
    }

    pub const fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub const fn with_mask_enable(mut self, mask_enable: bool) -> Self {
        self.mask_enable = mask_enable;
        self
    }

    pub const fn with_narrow_select(mut self, narrow_select: bool) -> Self {
        self.narrow_select = narrow_select;
        self
    }
}

/// Executes one lane operation.
///
/// # Examples
///
/// ```rust
/// use lanealu::{execute, AluOp, ElementWidth, Lane};
///
/// let a = Lane::pack(&[1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let b = Lane::pack(&[8u8, 7, 6, 5, 4, 3, 2, 1]).unwrap();
/// let sum = execute(a, b, true, Lane::ZERO, false, false, AluOp::Vadd, ElementWidth::E8);
/// assert_eq!(sum.unpack::<u8>().unwrap(), vec![9; 8]);
/// ```
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn execute(
    a: Lane,
    b: Lane,
    valid: bool,
    mask: Lane,
    mask_enable: bool,
    narrow_select: bool,
    op: AluOp,
    width: ElementWidth,
) -> Lane {
    let control = AluControl {
        op,
        width,
        valid,
        mask_enable,
        narrow_select,
    };
    execute_with(a, b, mask, &control)
}

/// Executes with a numeric operation code, as a decoder would supply it.
///
/// Codes outside [`AluOp::ALL`] produce the zero lane.
#[allow(clippy::too_many_arguments)]
pub fn execute_encoded(
    a: Lane,
    b: Lane,
    valid: bool,
    mask: Lane,
    mask_enable: bool,
    narrow_select: bool,
    code: u8,
    width: ElementWidth,
) -> Lane {
    match AluOp::try_from(code) {
        Ok(op) => execute(a, b, valid, mask, mask_enable, narrow_select, op, width),
        Err(err) => {
            log::debug!("{err}; producing zero lane");
            Lane::ZERO
        }
    }
}

/// Executes one lane operation described by `control`.
pub fn execute_with(a: Lane, b: Lane, mask: Lane, control: &AluControl) -> Lane {
    if !control.valid {
        return Lane::ZERO;
    }

    let width = control.width;

    match control.op.kind() {
        OpKind::Bitwise(f) => Lane(f(a.bits(), b.bits())),

        OpKind::Add {
            carry_in,
            carry_out,
        } => map_elements(a, b, width, |i, x, y| {
            let cin = carry_in && carry_bit(mask, i, width, control.mask_enable);
            let (sum, carry) = add_with_carry(x, y, cin, width);
            if carry_out {
                carry as u64
            } else {
                sum
            }
        }),

        OpKind::Sub {
            borrow_in,
            borrow_out,
        } => map_elements(a, b, width, |i, x, y| {
            let bin = borrow_in && carry_bit(mask, i, width, control.mask_enable);
            let (diff, borrow) = sub_with_borrow(y, x, bin, width);
            if borrow_out {
                borrow as u64
            } else {
                diff
            }
        }),

        OpKind::Shift(kind) => map_elements(a, b, width, |_, x, y| {
            shift(kind, y, x & width.shift_mask(), width)
        }),

        OpKind::Narrow(kind) => narrow(kind, a, b, width, control.narrow_select),

        OpKind::Merge => map_elements(a, b, width, |i, x, y| {
            if mask.element_mask_bit(i, width) {
                x
            } else {
                y
            }
        }),

        OpKind::MinMax { signed, max } => {
            let va = a.view(width);
            let vb = b.view(width);
            // less[i] reads "B[i] < A[i]"
            let cmp = Comparison::of(&vb, &va, signed);
            map_elements(a, b, width, |i, x, y| {
                if cmp.is_less(i) ^ max {
                    y
                } else {
                    x
                }
            })
        }

        OpKind::Compare { predicate, signed } => {
            let cmp = Comparison::of(&a.view(width), &b.view(width), signed);
            map_elements(a, b, width, |i, _, _| {
                predicate.holds(cmp.is_less(i), cmp.is_equal(i)) as u64
            })
        }
    }
}

/// Applies `f(index, a[i], b[i])` to every element and packs the results.
#[inline(always)]
fn map_elements<F>(a: Lane, b: Lane, width: ElementWidth, f: F) -> Lane
where
    F: Fn(usize, u64, u64) -> u64,
{
    let va = a.view(width);
    let vb = b.view(width);
    let mut out = ElementView::zeroed(width);

    for i in 0..width.count() {
        out.set(i, f(i, va.get(i), vb.get(i)));
    }

    out.lane()
}

#[inline(always)]
fn carry_bit(mask: Lane, index: usize, width: ElementWidth, mask_enable: bool) -> bool {
    mask.element_mask_bit(index, width) && mask_enable
}

/// `x + y + cin` truncated to `width`, plus the carry out of the top bit.
#[inline(always)]
pub fn add_with_carry(x: u64, y: u64, cin: bool, width: ElementWidth) -> (u64, bool) {
    let sum = x as u128 + y as u128 + cin as u128;
    ((sum as u64) & width.mask(), (sum >> width.bits()) & 1 != 0)
}

/// `minuend - subtrahend - bin` truncated to `width`, plus the borrow, which
/// is set when the exact difference is negative.
#[inline(always)]
pub fn sub_with_borrow(
    minuend: u64,
    subtrahend: u64,
    bin: bool,
    width: ElementWidth,
) -> (u64, bool) {
    let diff = minuend as i128 - subtrahend as i128 - bin as i128;
    ((diff as u64) & width.mask(), diff < 0)
}

#[inline(always)]
fn shift(kind: ShiftKind, value: u64, amount: u64, width: ElementWidth) -> u64 {
    let shifted = match kind {
        ShiftKind::Left => value << amount,
        ShiftKind::RightLogical => value >> amount,
        ShiftKind::RightArithmetic => (width.sign_extend(value) >> amount) as u64,
    };
    shifted & width.mask()
}

/// Narrowing shift producing `width` outputs from `2 * width` sources.
///
/// Source element `i` lands in output slot `2 * i + select`; the other slot
/// of each pair is left zero for a second call with the opposite selector.
fn narrow(kind: ShiftKind, a: Lane, b: Lane, width: ElementWidth, select: bool) -> Lane {
    let Some(wide) = width.widened() else {
        return Lane::ZERO;
    };

    let amounts = a.view(wide);
    let sources = b.view(wide);
    let mut out = ElementView::zeroed(width);

    for i in 0..wide.count() {
        let shifted = shift(kind, sources.get(i), amounts.get(i) & wide.shift_mask(), wide);
        out.set(2 * i + select as usize, shifted);
    }

    out.lane()
}
