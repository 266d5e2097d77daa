//! Checking an observed result trace against the golden model.
//!
//! A hardware simulation or an alternative implementation records one output
//! lane per request; [`check_trace`] re-executes every request and reports
//! each lane that differs.

use std::fmt;

use crate::alu::Lane;
use crate::batch::{BatchExecute, LaneRequest};
use crate::error::{validation_error, Result};

/// One request whose observed lane differs from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub request: LaneRequest,
    pub expected: Lane,
    pub observed: Lane,
}

impl Mismatch {
    /// Bits that differ between model and observation.
    pub fn diff(&self) -> u64 {
        self.expected.bits() ^ self.observed.bits()
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let control = &self.request.control;
        write!(
            f,
            "#{} {}.{} a={} b={} mask={}: expected {}, observed {} (diff {:#018x})",
            self.index,
            control.op,
            control.width,
            self.request.a,
            self.request.b,
            self.request.mask,
            self.expected,
            self.observed,
            self.diff()
        )
    }
}

/// Compares `observed[i]` with the model output for `requests[i]`.
///
/// Returns every mismatch in request order; an empty vector means the trace
/// agrees with the model.
pub fn check_trace(requests: &[LaneRequest], observed: &[Lane]) -> Result<Vec<Mismatch>> {
    if requests.len() != observed.len() {
        return Err(validation_error(format!(
            "trace has {} observed lanes for {} requests",
            observed.len(),
            requests.len()
        )));
    }

    let expected = requests.execute_auto();

    let mismatches: Vec<Mismatch> = requests
        .iter()
        .zip(expected)
        .zip(observed)
        .enumerate()
        .filter(|(_, ((_, expected), observed))| expected != *observed)
        .map(|(index, ((request, expected), observed))| Mismatch {
            index,
            request: *request,
            expected,
            observed: *observed,
        })
        .collect();

    for mismatch in &mismatches {
        log::warn!("{mismatch}");
    }

    Ok(mismatches)
}
