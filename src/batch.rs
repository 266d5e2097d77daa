//! Executing many independent lane invocations.
//!
//! The ALU has no state, so requests can be evaluated in any order and on any
//! thread. This module offers the same work through three entry points,
//! following the scalar / parallel split used across the crate:
//!
//! - [`BatchExecute::execute_all`]: sequential, lowest overhead.
//! - [`BatchExecute::par_execute_all`]: rayon work-stealing, splitting no
//!   finer than [`PARALLEL_CHUNK_SIZE`] requests per task.
//! - [`BatchExecute::execute_auto`]: picks one of the two from
//!   [`PARALLEL_THRESHOLD`].
//!
//! [`execute_register`] applies one control word to every lane of a vector
//! register held as an `ndarray` array.
//!
//! Results are always returned in request order and are bit-identical across
//! the three paths.

use ndarray::{Array1, ArrayView1, Zip};
use rayon::prelude::*;

use crate::alu::{execute_with, AluControl, Lane};
use crate::error::{validation_error, Result};
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_THRESHOLD};

/// One complete set of ALU inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneRequest {
    pub a: Lane,
    pub b: Lane,
    pub mask: Lane,
    pub control: AluControl,
}

impl LaneRequest {
    pub const fn new(a: Lane, b: Lane, mask: Lane, control: AluControl) -> Self {
        LaneRequest {
            a,
            b,
            mask,
            control,
        }
    }

    #[inline(always)]
    pub fn execute(&self) -> Lane {
        execute_with(self.a, self.b, self.mask, &self.control)
    }
}

pub trait BatchExecute {
    type Output;

    fn execute_all(self) -> Self::Output;
    fn par_execute_all(self) -> Self::Output;
    fn execute_auto(self) -> Self::Output;
}

impl BatchExecute for &[LaneRequest] {
    type Output = Vec<Lane>;

    #[inline(always)]
    fn execute_all(self) -> Self::Output {
        self.iter().map(LaneRequest::execute).collect()
    }

    #[inline(always)]
    fn par_execute_all(self) -> Self::Output {
        self.par_iter()
            .with_min_len(PARALLEL_CHUNK_SIZE)
            .map(LaneRequest::execute)
            .collect()
    }

    #[inline(always)]
    fn execute_auto(self) -> Self::Output {
        if self.len() >= PARALLEL_THRESHOLD {
            log::trace!("executing {} requests in parallel", self.len());
            self.par_execute_all()
        } else {
            log::trace!("executing {} requests sequentially", self.len());
            self.execute_all()
        }
    }
}

impl BatchExecute for &Vec<LaneRequest> {
    type Output = Vec<Lane>;

    #[inline(always)]
    fn execute_all(self) -> Self::Output {
        self.as_slice().execute_all()
    }

    #[inline(always)]
    fn par_execute_all(self) -> Self::Output {
        self.as_slice().par_execute_all()
    }

    #[inline(always)]
    fn execute_auto(self) -> Self::Output {
        self.as_slice().execute_auto()
    }
}

/// Applies `control` to every lane of a register.
///
/// `a`, `b` and `mask` hold one 64-bit lane per entry and must have equal
/// lengths. Lane `i` of the result depends only on lane `i` of the inputs.
///
/// # Examples
///
/// ```rust
/// use lanealu::{batch::execute_register, AluControl, AluOp, ElementWidth};
/// use ndarray::array;
///
/// let a = array![1u64, 2, 3];
/// let b = array![10u64, 20, 30];
/// let mask = array![0u64, 0, 0];
/// let control = AluControl::new(AluOp::Vadd, ElementWidth::E64);
///
/// let sum = execute_register(&control, a.view(), b.view(), mask.view()).unwrap();
/// assert_eq!(sum, array![11u64, 22, 33]);
/// ```
pub fn execute_register(
    control: &AluControl,
    a: ArrayView1<u64>,
    b: ArrayView1<u64>,
    mask: ArrayView1<u64>,
) -> Result<Array1<u64>> {
    if a.len() != b.len() || a.len() != mask.len() {
        return Err(validation_error(format!(
            "register operands must have the same number of lanes (a: {}, b: {}, mask: {})",
            a.len(),
            b.len(),
            mask.len()
        )));
    }

    let lane = |&a: &u64, &b: &u64, &mask: &u64| {
        execute_with(Lane(a), Lane(b), Lane(mask), control).bits()
    };

    let zip = Zip::from(&a).and(&b).and(&mask);
    let result = if a.len() >= PARALLEL_THRESHOLD {
        zip.par_map_collect(lane)
    } else {
        zip.map_collect(lane)
    };

    Ok(result)
}
