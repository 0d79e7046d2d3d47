//! Root finding for the compressibility cubic `Z³ + c2·Z² + c1·Z + c0 = 0`.

use tracing::{trace, warn};

/// Outcome of a cubic root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicRoot {
    /// Root estimate
    pub z: f64,
    /// Newton steps actually taken
    pub iterations: usize,
}

/// Strategy for extracting a compressibility factor from the cubic.
///
/// Callers only see one `Z`; which root a solver lands on is up to the solver.
pub trait CubicRootSolver {
    fn solve(&self, c2: f64, c1: f64, c0: f64) -> CubicRoot;
}

/// Newton-Raphson with a fixed step budget and no convergence test.
///
/// Always returns the last iterate. Physically meaningless for some inputs,
/// never fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNewton {
    pub iterations: usize,
    pub initial: f64,
}

impl Default for FixedNewton {
    fn default() -> Self {
        Self {
            iterations: 10,
            initial: 1.0,
        }
    }
}

impl CubicRootSolver for FixedNewton {
    fn solve(&self, c2: f64, c1: f64, c0: f64) -> CubicRoot {
        let mut z = self.initial;
        let mut taken = 0;
        for _ in 0..self.iterations {
            let f = ((z + c2) * z + c1) * z + c0;
            let df = (3.0 * z + 2.0 * c2) * z + c1;
            if !df.is_finite() || df.abs() < 1e-12 {
                warn!(z, df, "cubic derivative collapsed, keeping current iterate");
                break;
            }
            let next = z - f / df;
            if !next.is_finite() {
                warn!(z, "non-finite Newton step, keeping current iterate");
                break;
            }
            z = next;
            taken += 1;
        }
        trace!(z, iterations = taken, "cubic root");
        CubicRoot {
            z,
            iterations: taken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_root_of_simple_cubic() {
        // (Z - 1.2)(Z² + 1) = Z³ - 1.2Z² + Z - 1.2
        let root = FixedNewton::default().solve(-1.2, 1.0, -1.2);
        assert!((root.z - 1.2).abs() < 1e-9);
        assert_eq!(root.iterations, 10);
    }

    #[test]
    fn stops_on_flat_derivative() {
        // f'(1) = 3 + 2·(-1.5) + 0 = 0
        let root = FixedNewton::default().solve(-1.5, 0.0, 0.3);
        assert_eq!(root.iterations, 0);
        assert_eq!(root.z, 1.0);
    }

    #[test]
    fn respects_step_budget() {
        let solver = FixedNewton {
            iterations: 3,
            initial: 1.0,
        };
        let root = solver.solve(-1.2, 1.0, -1.2);
        assert!(root.iterations <= 3);
    }
}
