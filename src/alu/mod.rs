//! Width-polymorphic 64-bit lane ALU.
//!
//! One call takes two operand lanes, a mask lane and an [`AluControl`], and
//! returns one result lane. The unit keeps no state between calls.
//!
//! # Stages
//!
//! - [`ElementView`]: reads a [`Lane`] as 8, 4, 2 or 1 elements of an
//!   [`ElementWidth`], and packs results back with zero fill.
//! - [`Comparison`]: per-element `less` / `equal` flags, signed or unsigned.
//! - [`execute`] / [`execute_with`]: dispatch on [`AluOp`], including the
//!   masked carry/borrow chain and narrowing placement.
//!
//! # Operand roles
//!
//! | Family | Result element |
//! |--------|----------------|
//! | add | `A + B (+ cin)` |
//! | subtract | `B - A (- bin)` |
//! | shift | `B` shifted by `A mod width` |
//! | merge | `mask ? A : B` |
//! | min/max | `B` when `(B < A) ^ max`, else `A` |
//! | compare | `A <pred> B` in bit 0 |

mod compare;
mod exec;
pub mod op;
mod view;
mod width;

pub use compare::Comparison;
pub use exec::{
    add_with_carry, execute, execute_encoded, execute_with, sub_with_borrow, AluControl,
};
pub use op::AluOp;
pub use view::{ElementView, Lane};
pub use width::ElementWidth;
