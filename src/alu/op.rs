//! The closed set of lane operations and their encodings.
//!
//! Every operation carries a stable numeric code (its position in
//! [`AluOp::ALL`]) and a lower-case mnemonic. Both encodings decode through
//! fallible conversions; the executor itself only ever sees a valid [`AluOp`].

use std::fmt;
use std::str::FromStr;

use crate::error::{unknown_mnemonic, unknown_opcode, AluError};

/// Operation selected for one ALU invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    // Bitwise
    Vand,
    Vor,
    Vxor,
    // Mask logical
    Vmand,
    Vmor,
    Vmxor,
    Vmandnot,
    Vmnand,
    Vmnor,
    Vmornot,
    Vmxnor,
    // Add family
    Vadd,
    Vadc,
    Vmadc,
    // Subtract family
    Vrsub,
    Vsbc,
    Vmsbc,
    // Shifts
    Vsll,
    Vsrl,
    Vsra,
    Vnsrl,
    Vnsra,
    // Selection
    Vmerge,
    Vmin,
    Vminu,
    Vmax,
    Vmaxu,
    // Compare
    Vmseq,
    Vmsne,
    Vmslt,
    Vmsltu,
    Vmsle,
    Vmsleu,
    Vmsgt,
    Vmsgtu,
}

/// Predicate evaluated by the compare family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
}

impl Predicate {
    #[inline(always)]
    pub fn holds(self, less: bool, equal: bool) -> bool {
        match self {
            Predicate::Eq => equal,
            Predicate::Ne => !equal,
            Predicate::Lt => less,
            Predicate::Le => less | equal,
            Predicate::Gt => !(less | equal),
        }
    }
}

/// Shape of the datapath an operation drives.
#[derive(Debug, Clone, Copy)]
pub enum OpKind {
    /// Whole-lane function of the raw bits; element boundaries ignored.
    Bitwise(fn(u64, u64) -> u64),
    /// `A + B + cin`; `carry_in` enables the masked carry, `carry_out`
    /// stores the carry bit instead of the sum.
    Add { carry_in: bool, carry_out: bool },
    /// `B - A - bin`, mirroring [`OpKind::Add`].
    Sub { borrow_in: bool, borrow_out: bool },
    /// Element shift of `B` by `A` modulo the width.
    Shift(ShiftKind),
    /// Shift of a double-width `B` element, written to one half of the output.
    Narrow(ShiftKind),
    Merge,
    MinMax { signed: bool, max: bool },
    Compare { predicate: Predicate, signed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftKind {
    Left,
    RightLogical,
    RightArithmetic,
}

impl AluOp {
    pub const ALL: [AluOp; 35] = [
        AluOp::Vand,
        AluOp::Vor,
        AluOp::Vxor,
        AluOp::Vmand,
        AluOp::Vmor,
        AluOp::Vmxor,
        AluOp::Vmandnot,
        AluOp::Vmnand,
        AluOp::Vmnor,
        AluOp::Vmornot,
        AluOp::Vmxnor,
        AluOp::Vadd,
        AluOp::Vadc,
        AluOp::Vmadc,
        AluOp::Vrsub,
        AluOp::Vsbc,
        AluOp::Vmsbc,
        AluOp::Vsll,
        AluOp::Vsrl,
        AluOp::Vsra,
        AluOp::Vnsrl,
        AluOp::Vnsra,
        AluOp::Vmerge,
        AluOp::Vmin,
        AluOp::Vminu,
        AluOp::Vmax,
        AluOp::Vmaxu,
        AluOp::Vmseq,
        AluOp::Vmsne,
        AluOp::Vmslt,
        AluOp::Vmsltu,
        AluOp::Vmsle,
        AluOp::Vmsleu,
        AluOp::Vmsgt,
        AluOp::Vmsgtu,
    ];

    /// Numeric encoding, equal to the position in [`AluOp::ALL`].
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Vand => "vand",
            AluOp::Vor => "vor",
            AluOp::Vxor => "vxor",
            AluOp::Vmand => "vmand",
            AluOp::Vmor => "vmor",
            AluOp::Vmxor => "vmxor",
            AluOp::Vmandnot => "vmandnot",
            AluOp::Vmnand => "vmnand",
            AluOp::Vmnor => "vmnor",
            AluOp::Vmornot => "vmornot",
            AluOp::Vmxnor => "vmxnor",
            AluOp::Vadd => "vadd",
            AluOp::Vadc => "vadc",
            AluOp::Vmadc => "vmadc",
            AluOp::Vrsub => "vrsub",
            AluOp::Vsbc => "vsbc",
            AluOp::Vmsbc => "vmsbc",
            AluOp::Vsll => "vsll",
            AluOp::Vsrl => "vsrl",
            AluOp::Vsra => "vsra",
            AluOp::Vnsrl => "vnsrl",
            AluOp::Vnsra => "vnsra",
            AluOp::Vmerge => "vmerge",
            AluOp::Vmin => "vmin",
            AluOp::Vminu => "vminu",
            AluOp::Vmax => "vmax",
            AluOp::Vmaxu => "vmaxu",
            AluOp::Vmseq => "vmseq",
            AluOp::Vmsne => "vmsne",
            AluOp::Vmslt => "vmslt",
            AluOp::Vmsltu => "vmsltu",
            AluOp::Vmsle => "vmsle",
            AluOp::Vmsleu => "vmsleu",
            AluOp::Vmsgt => "vmsgt",
            AluOp::Vmsgtu => "vmsgtu",
        }
    }

    /// Datapath shape used by the executor.
    pub fn kind(self) -> OpKind {
        use OpKind::*;

        match self {
            AluOp::Vand | AluOp::Vmand => Bitwise(|a, b| a & b),
            AluOp::Vor | AluOp::Vmor => Bitwise(|a, b| a | b),
            AluOp::Vxor | AluOp::Vmxor => Bitwise(|a, b| a ^ b),
            AluOp::Vmandnot => Bitwise(|a, b| !a & b),
            AluOp::Vmnand => Bitwise(|a, b| !(a & b)),
            AluOp::Vmnor => Bitwise(|a, b| !(a | b)),
            AluOp::Vmornot => Bitwise(|a, b| !a | b),
            AluOp::Vmxnor => Bitwise(|a, b| !(a ^ b)),

            AluOp::Vadd => Add { carry_in: false, carry_out: false },
            AluOp::Vadc => Add { carry_in: true, carry_out: false },
            AluOp::Vmadc => Add { carry_in: true, carry_out: true },

            AluOp::Vrsub => Sub { borrow_in: false, borrow_out: false },
            AluOp::Vsbc => Sub { borrow_in: true, borrow_out: false },
            AluOp::Vmsbc => Sub { borrow_in: true, borrow_out: true },

            AluOp::Vsll => Shift(ShiftKind::Left),
            AluOp::Vsrl => Shift(ShiftKind::RightLogical),
            AluOp::Vsra => Shift(ShiftKind::RightArithmetic),
            AluOp::Vnsrl => Narrow(ShiftKind::RightLogical),
            AluOp::Vnsra => Narrow(ShiftKind::RightArithmetic),

            AluOp::Vmerge => Merge,
            AluOp::Vmin => MinMax { signed: true, max: false },
            AluOp::Vminu => MinMax { signed: false, max: false },
            AluOp::Vmax => MinMax { signed: true, max: true },
            AluOp::Vmaxu => MinMax { signed: false, max: true },

            AluOp::Vmseq => Compare { predicate: Predicate::Eq, signed: false },
            AluOp::Vmsne => Compare { predicate: Predicate::Ne, signed: false },
            AluOp::Vmslt => Compare { predicate: Predicate::Lt, signed: true },
            AluOp::Vmsltu => Compare { predicate: Predicate::Lt, signed: false },
            AluOp::Vmsle => Compare { predicate: Predicate::Le, signed: true },
            AluOp::Vmsleu => Compare { predicate: Predicate::Le, signed: false },
            AluOp::Vmsgt => Compare { predicate: Predicate::Gt, signed: true },
            AluOp::Vmsgtu => Compare { predicate: Predicate::Gt, signed: false },
        }
    }

    /// True for operations that read the mask lane.
    pub fn uses_mask(self) -> bool {
        matches!(
            self.kind(),
            OpKind::Merge
                | OpKind::Add { carry_in: true, .. }
                | OpKind::Sub { borrow_in: true, .. }
        )
    }
}

impl TryFrom<u8> for AluOp {
    type Error = AluError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        AluOp::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| unknown_opcode(code))
    }
}

impl From<AluOp> for u8 {
    fn from(op: AluOp) -> Self {
        op.code()
    }
}

impl FromStr for AluOp {
    type Err = AluError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AluOp::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == wanted)
            .ok_or_else(|| unknown_mnemonic(s))
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
