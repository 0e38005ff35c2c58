//! Line tracing between hex centers.
//!
//! A straight line between two hex centers usually crosses one hex per step.
//! When it runs exactly along the seam between two hexes (every 30° off a
//! hex axis) it touches both; such steps are reported as [`LineStep::Split`]
//! and callers decide how to treat the pair.

use arrayvec::ArrayVec;

use super::Hex;

const NUDGE: (f64, f64, f64) = (1e-6, 2e-6, -3e-6);

/// One step along a traced line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineStep {
    Single(Hex),
    /// The line runs along the seam between two hexes.
    Split(Hex, Hex),
}

impl LineStep {
    /// Hexes touched by this step (one or two).
    pub fn hexes(self) -> ArrayVec<Hex, 2> {
        let mut hexes = ArrayVec::new();
        match self {
            LineStep::Single(hex) => hexes.push(hex),
            LineStep::Split(a, b) => {
                hexes.push(a);
                hexes.push(b);
            }
        }
        hexes
    }

    pub fn contains(self, hex: Hex) -> bool {
        match self {
            LineStep::Single(h) => h == hex,
            LineStep::Split(a, b) => a == hex || b == hex,
        }
    }

    pub fn is_split(self) -> bool {
        matches!(self, LineStep::Split(..))
    }

    /// Smallest distance from `hex` to any hex of this step.
    pub fn distance_from(self, hex: Hex) -> u32 {
        self.hexes()
            .iter()
            .map(|h| h.distance(hex))
            .min()
            .unwrap_or(u32::MAX)
    }
}

/// Every step from `from` to `to`, both endpoints included.
pub fn trace_line(from: Hex, to: Hex) -> Vec<LineStep> {
    let steps = from.distance(to);
    if steps == 0 {
        return vec![LineStep::Single(from)];
    }

    (0..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            let plus = cube_round(lerp(from, to, t, 1.0));
            let minus = cube_round(lerp(from, to, t, -1.0));
            if plus == minus {
                LineStep::Single(plus)
            } else {
                LineStep::Split(plus, minus)
            }
        })
        .collect()
}

/// Steps strictly between `from` and `to`.
pub fn intervening(from: Hex, to: Hex) -> Vec<LineStep> {
    let mut steps = trace_line(from, to);
    if steps.len() < 2 {
        return Vec::new();
    }
    steps.pop();
    steps.remove(0);
    steps
}

fn lerp(from: Hex, to: Hex, t: f64, sign: f64) -> (f64, f64, f64) {
    let (nq, nr, ns) = NUDGE;
    let q = f64::from(from.q) + f64::from(to.q - from.q) * t + nq * sign;
    let r = f64::from(from.r) + f64::from(to.r - from.r) * t + nr * sign;
    let s = f64::from(from.s()) + f64::from(to.s() - from.s()) * t + ns * sign;
    (q, r, s)
}

fn cube_round((q, r, s): (f64, f64, f64)) -> Hex {
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    Hex::new(rq as i32, rr as i32)
}
