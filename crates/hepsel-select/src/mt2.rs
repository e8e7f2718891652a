//! Stransverse mass solver.
//!
//! MT2 is the minimum, over every split of the missing transverse momentum
//! into two invisible momenta `q1 + q2 = p_miss`, of the larger of the two
//! transverse masses `mT(a, q1)` and `mT(b, q2)`. With massless visible
//! legs the objective `max(mT²(a, q1), mT²(b, p_miss - q1))` is convex in
//! `q1`, so it is minimised directly by nested golden-section search.
//!
//! Inputs are normalised by the largest momentum scale before the search
//! and the result is scaled back, so the tolerances are relative.

use hepsel_core::TransverseVector;

const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Minimises the MT2 objective for massless visible legs.
#[derive(Clone, Debug, PartialEq)]
pub struct Mt2Solver {
    invisible_mass: f64,
    iterations: usize,
}

impl Mt2Solver {
    /// Golden-section steps per search dimension.
    pub const DEFAULT_ITERATIONS: usize = 64;

    /// Half-width of the first search box, in normalised units.
    const INITIAL_RADIUS: f64 = 4.0;

    /// How many times the box may grow when the optimum sits on its edge.
    const MAX_EXPANSIONS: usize = 8;

    /// Solver for invisible particles of mass `invisible_mass`.
    pub fn new(invisible_mass: f64) -> Self {
        Self {
            invisible_mass: invisible_mass.max(0.0),
            iterations: Self::DEFAULT_ITERATIONS,
        }
    }

    /// Builder-style iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// The invisible mass hypothesis.
    pub fn invisible_mass(&self) -> f64 {
        self.invisible_mass
    }

    /// MT2 of visible legs `a`, `b` and missing momentum `miss`.
    pub fn solve(&self, a: TransverseVector, b: TransverseVector, miss: TransverseVector) -> f64 {
        let scale = a
            .mag()
            .max(b.mag())
            .max(miss.mag())
            .max(self.invisible_mass);
        if scale <= 0.0 || !scale.is_finite() {
            return self.invisible_mass;
        }
        let inv = 1.0 / scale;
        let (a, b, miss) = (a.scaled(inv), b.scaled(inv), miss.scaled(inv));
        let mn = self.invisible_mass * inv;

        // Massless invisible legs and missing momentum inside the cone of the
        // visible legs: each invisible leg can run parallel to its partner,
        // and the infimum is zero. A massive leg always adds energy, so that
        // case goes through the search.
        if mn == 0.0 && in_cone(&a, &b, &miss) {
            return 0.0;
        }

        let objective = |q: TransverseVector| {
            let q2 = miss - q;
            transverse_mass_sq(&a, &q, mn).max(transverse_mass_sq(&b, &q2, mn))
        };

        let center = miss.scaled(0.5);
        let mut radius = Self::INITIAL_RADIUS;
        let mut best = objective(center);
        for _ in 0..Self::MAX_EXPANSIONS {
            let (q, value) = self.minimise_box(&center, radius, &objective);
            best = best.min(value);
            let edge = 0.98 * radius;
            if (q.x() - center.x()).abs() < edge && (q.y() - center.y()).abs() < edge {
                break;
            }
            radius *= 4.0;
        }
        scale * best.max(0.0).sqrt()
    }

    fn minimise_box<F>(
        &self,
        center: &TransverseVector,
        radius: f64,
        objective: &F,
    ) -> (TransverseVector, f64)
    where
        F: Fn(TransverseVector) -> f64,
    {
        let (cx, cy) = (center.x(), center.y());
        let inner = |x: f64| {
            golden_section(cy - radius, cy + radius, self.iterations, |y| {
                objective(TransverseVector::new(x, y))
            })
        };
        let (x, _) = golden_section(cx - radius, cx + radius, self.iterations, |x| inner(x).1);
        let (y, value) = inner(x);
        (TransverseVector::new(x, y), value)
    }
}

impl Default for Mt2Solver {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// `mT²` of a massless visible leg `v` and an invisible leg `q` of mass `mn`.
fn transverse_mass_sq(v: &TransverseVector, q: &TransverseVector, mn: f64) -> f64 {
    let eq = (mn * mn + q.mag2()).sqrt();
    mn * mn + 2.0 * (v.mag() * eq - v.dot(q))
}

/// Whether `p = α·a + β·b` with α, β ≥ 0.
fn in_cone(a: &TransverseVector, b: &TransverseVector, p: &TransverseVector) -> bool {
    let det = a.x() * b.y() - a.y() * b.x();
    if det.abs() < 1e-12 {
        return p.mag2() == 0.0;
    }
    let alpha = (p.x() * b.y() - p.y() * b.x()) / det;
    let beta = (a.x() * p.y() - a.y() * p.x()) / det;
    alpha >= 0.0 && beta >= 0.0
}

/// Minimum of a unimodal function on `[lo, hi]`.
fn golden_section<F: FnMut(f64) -> f64>(
    mut lo: f64,
    mut hi: f64,
    iterations: usize,
    mut f: F,
) -> (f64, f64) {
    let mut x1 = hi - INV_PHI * (hi - lo);
    let mut x2 = lo + INV_PHI * (hi - lo);
    let mut f1 = f(x1);
    let mut f2 = f(x2);
    for _ in 0..iterations {
        if f1 <= f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - INV_PHI * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + INV_PHI * (hi - lo);
            f2 = f(x2);
        }
    }
    if f1 <= f2 {
        (x1, f1)
    } else {
        (x2, f2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> TransverseVector {
        TransverseVector::new(x, y)
    }

    #[test]
    fn symmetric_configuration() {
        let mt2 = Mt2Solver::default().solve(v(50.0, 0.0), v(50.0, 0.0), v(0.0, 50.0));
        assert!((mt2 - 50.0).abs() < 1e-3, "mt2 = {mt2}");
    }

    #[test]
    fn no_missing_momentum_is_zero() {
        let mt2 = Mt2Solver::default().solve(v(50.0, 0.0), v(-30.0, 10.0), v(0.0, 0.0));
        assert_eq!(mt2, 0.0);
        let mt2 = Mt2Solver::default().solve(v(50.0, 0.0), v(50.0, 0.0), v(0.0, 0.0));
        assert!(mt2.abs() < 1e-3, "mt2 = {mt2}");
    }

    #[test]
    fn missing_momentum_between_legs_is_zero() {
        let mt2 = Mt2Solver::default().solve(v(50.0, 0.0), v(0.0, 50.0), v(30.0, 30.0));
        assert_eq!(mt2, 0.0);
    }

    // Exhaustive scan of `q1` on a grid centred on the even split.
    fn grid_minimum(a: TransverseVector, b: TransverseVector, miss: TransverseVector, mn: f64) -> f64 {
        const STEPS: usize = 201;
        const HALF_WIDTH: f64 = 100.0;
        let center = miss.scaled(0.5);
        let mut best = f64::INFINITY;
        for i in 0..STEPS {
            let x = center.x() - HALF_WIDTH + 2.0 * HALF_WIDTH * i as f64 / (STEPS - 1) as f64;
            for k in 0..STEPS {
                let y = center.y() - HALF_WIDTH + 2.0 * HALF_WIDTH * k as f64 / (STEPS - 1) as f64;
                let q = v(x, y);
                let value = transverse_mass_sq(&a, &q, mn).max(transverse_mass_sq(&b, &(miss - q), mn));
                best = best.min(value);
            }
        }
        best.sqrt()
    }

    #[test]
    fn massive_invisible_legs_inside_the_cone() {
        let (a, b, miss) = (v(50.0, 0.0), v(0.0, 50.0), v(30.0, 30.0));
        let mt2 = Mt2Solver::new(100.0).solve(a, b, miss);
        let scan = grid_minimum(a, b, miss, 100.0);
        assert!(mt2 > 120.0, "mt2 = {mt2}");
        assert!(mt2 <= scan + 1e-6, "mt2 = {mt2}, scan = {scan}");
        assert!(scan - mt2 < 0.05, "mt2 = {mt2}, scan = {scan}");
    }

    #[test]
    fn invisible_mass_is_a_lower_bound() {
        let solver = Mt2Solver::new(100.0);
        let (a, b, miss) = (v(50.0, 0.0), v(50.0, 0.0), v(0.0, 50.0));
        let mt2 = solver.solve(a, b, miss);
        assert!(mt2 > 100.0);
        assert!((mt2 - grid_minimum(a, b, miss, 100.0)).abs() < 0.05, "mt2 = {mt2}");
    }

    #[test]
    fn all_zero_inputs() {
        assert_eq!(Mt2Solver::default().solve(v(0.0, 0.0), v(0.0, 0.0), v(0.0, 0.0)), 0.0);
    }

    #[test]
    fn bounded_by_even_split() {
        let (a, b, miss) = (v(40.0, 10.0), v(-20.0, 35.0), v(-5.0, -60.0));
        let mt2 = Mt2Solver::default().solve(a, b, miss);
        let half = miss.scaled(0.5);
        let even = transverse_mass_sq(&a, &half, 0.0)
            .max(transverse_mass_sq(&b, &half, 0.0))
            .sqrt();
        assert!(mt2 >= 0.0);
        assert!(mt2 <= even + 1e-6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn symmetric_in_visible_legs(
                ax in -200.0f64..200.0, ay in -200.0f64..200.0,
                bx in -200.0f64..200.0, by in -200.0f64..200.0,
                mx in -200.0f64..200.0, my in -200.0f64..200.0,
            ) {
                let solver = Mt2Solver::default();
                let ab = solver.solve(v(ax, ay), v(bx, by), v(mx, my));
                let ba = solver.solve(v(bx, by), v(ax, ay), v(mx, my));
                prop_assert!(ab.is_finite() && ab >= 0.0);
                prop_assert!((ab - ba).abs() <= 1e-3 * (1.0 + ab));
            }
        }
    }
}
