//! Bit-exact golden model of a width-polymorphic 64-bit SIMD lane ALU.
//!
//! A single call computes logical, add/subtract (with masked carry/borrow
//! chaining), shift, narrowing-shift, merge, min/max or compare operations over
//! the 8, 4, 2 or 1 elements packed in a 64-bit lane. The function is pure, so
//! it can back an instruction-level simulator, serve as the reference in a
//! hardware differential test, or run as a software fallback unit.
//!
//! ```rust
//! use lanealu::{execute, AluOp, ElementWidth, Lane};
//!
//! let a = Lane::pack(&[0x0001u16, 0x0002, 0x0003, 0x0004]).unwrap();
//! let b = Lane::pack(&[0x0000u16, 0x0002, 0x0005, 0x0001]).unwrap();
//!
//! let lt = execute(a, b, true, Lane::ZERO, false, false, AluOp::Vmsltu, ElementWidth::E16);
//! assert_eq!(lt.unpack::<u16>().unwrap(), vec![0, 0, 1, 0]);
//! ```

pub mod alu;
pub mod batch;
pub mod error;
pub mod stimulus;
pub mod verify;

pub use alu::{
    execute, execute_encoded, execute_with, AluControl, AluOp, Comparison, ElementView,
    ElementWidth, Lane,
};
pub use batch::{BatchExecute, LaneRequest};
pub use error::{AluError, Result};

// ================================================================================================
// PERFORMANCE TUNING CONSTANTS
// ================================================================================================

/// Batches at least this long are executed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 16_384;

/// Minimum number of requests handed to one rayon task.
pub const PARALLEL_CHUNK_SIZE: usize = 1_024;
