//! Random request generation for differential verification.
//!
//! Uniformly random 64-bit operands almost never exercise the interesting
//! corners of a lane ALU (carry out of the top element bit, signed overflow,
//! equal operands), so [`random_lane`] builds lanes element by element and
//! draws a fraction of them from an edge-value set instead.
//!
//! Every generator takes the RNG by `&mut`, so a seeded `StdRng` gives a
//! reproducible stream:
//!
//! ```rust
//! use lanealu::stimulus::random_batch;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let first = random_batch(&mut StdRng::seed_from_u64(7), 64);
//! let second = random_batch(&mut StdRng::seed_from_u64(7), 64);
//! assert_eq!(first, second);
//! ```

use rand::Rng;

use crate::alu::{AluControl, AluOp, ElementView, ElementWidth, Lane};
use crate::batch::LaneRequest;

/// Probability that an element is drawn from the edge-value set.
pub const EDGE_PROBABILITY: f64 = 0.25;

/// Values that sit on carry, borrow and sign boundaries for `width`.
pub fn edge_values(width: ElementWidth) -> [u64; 6] {
    let max = width.mask();
    let sign = 1u64 << (width.bits() - 1);
    [0, 1, max, max - 1, sign, sign - 1]
}

/// A lane whose `width` elements are uniform or, with
/// [`EDGE_PROBABILITY`], taken from [`edge_values`].
pub fn random_lane<R: Rng + ?Sized>(rng: &mut R, width: ElementWidth) -> Lane {
    let edges = edge_values(width);
    let mut view = ElementView::zeroed(width);

    for i in 0..width.count() {
        let value = if rng.random_bool(EDGE_PROBABILITY) {
            edges[rng.random_range(0..edges.len())]
        } else {
            rng.random::<u64>()
        };
        view.set(i, value);
    }

    view.lane()
}

/// A control word with every field drawn uniformly. `valid` is set nine
/// times out of ten so most requests produce a non-trivial result.
pub fn random_control<R: Rng + ?Sized>(rng: &mut R) -> AluControl {
    let op = AluOp::ALL[rng.random_range(0..AluOp::ALL.len())];
    let width = ElementWidth::ALL[rng.random_range(0..ElementWidth::ALL.len())];

    AluControl::new(op, width)
        .with_valid(rng.random_bool(0.9))
        .with_mask_enable(rng.random_bool(0.5))
        .with_narrow_select(rng.random_bool(0.5))
}

/// A random request. The mask lane is left zero for operations that never
/// read it, so mismatch reports only show inputs that matter.
pub fn random_request<R: Rng + ?Sized>(rng: &mut R) -> LaneRequest {
    let control = random_control(rng);
    // narrowing ops read their operands at twice the nominal width
    let operand_width = match control.op {
        AluOp::Vnsrl | AluOp::Vnsra => control.width.widened().unwrap_or(control.width),
        _ => control.width,
    };
    let a = random_lane(rng, operand_width);
    let b = random_lane(rng, operand_width);
    let mask = if control.op.uses_mask() {
        Lane(rng.random::<u64>())
    } else {
        Lane::ZERO
    };

    LaneRequest::new(a, b, mask, control)
}

pub fn random_batch<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<LaneRequest> {
    (0..len).map(|_| random_request(rng)).collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_edge_values() {
        assert_eq!(edge_values(ElementWidth::E8), [0, 1, 0xff, 0xfe, 0x80, 0x7f]);
        assert_eq!(
            edge_values(ElementWidth::E64),
            [0, 1, u64::MAX, u64::MAX - 1, 1 << 63, (1 << 63) - 1]
        );
    }

    #[test]
    fn test_edges_show_up() {
        let mut rng = StdRng::seed_from_u64(12345);
        let hits = (0..1000)
            .map(|_| random_lane(&mut rng, ElementWidth::E8))
            .flat_map(|lane| lane.view(ElementWidth::E8).iter().collect::<Vec<_>>())
            .filter(|v| edge_values(ElementWidth::E8).contains(v))
            .count();
        // 8000 elements, ~25% forced edges plus uniform hits on 6/256 values
        assert!(hits > 1500, "only {hits} edge elements");
    }

    #[test]
    fn test_mask_only_drawn_for_mask_readers() {
        let mut rng = StdRng::seed_from_u64(99);
        let batch = random_batch(&mut rng, 5000);

        for request in batch.iter().filter(|r| !r.control.op.uses_mask()) {
            assert_eq!(request.mask, Lane::ZERO, "{} got a mask", request.control.op);
        }
        assert!(batch
            .iter()
            .any(|r| r.control.op.uses_mask() && r.mask != Lane::ZERO));
    }

    #[test]
    fn test_every_op_is_generated() {
        let mut rng = StdRng::seed_from_u64(42);
        let batch = random_batch(&mut rng, 5000);
        for op in AluOp::ALL {
            assert!(batch.iter().any(|r| r.control.op == op), "{op} never generated");
        }
    }
}
