// fuzzy/membership.rs

use serde::{Deserialize, Serialize};

/// Shape of a linguistic term over its variable's universe.
///
/// Control points must be finite and non-decreasing; see [`MembershipFunction::is_well_formed`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// `[a, b, c, d]`: 0 below `a`, ramp up to `b`, 1 until `c`, ramp down to `d`, 0 above.
    Trapezoid([f64; 4]),
    /// `[a, b, c]`: ramp up from `a` to the apex `b`, ramp down to `c`.
    Triangle([f64; 3]),
}

impl MembershipFunction {
    pub fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> Self {
        MembershipFunction::Trapezoid([a, b, c, d])
    }

    pub fn triangle(a: f64, b: f64, c: f64) -> Self {
        MembershipFunction::Triangle([a, b, c])
    }

    /// The control points in order.
    pub fn points(&self) -> &[f64] {
        match self {
            MembershipFunction::Trapezoid(p) => p,
            MembershipFunction::Triangle(p) => p,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        let points = self.points();
        points.iter().all(|p| p.is_finite()) && points.windows(2).all(|w| w[0] <= w[1])
    }

    /// Degree of membership of `x`, always within [0, 1] for well-formed shapes.
    pub fn degree(&self, x: f64) -> f64 {
        let [a, b, c, d] = match *self {
            MembershipFunction::Trapezoid(p) => p,
            // A triangle is a trapezoid whose plateau collapses onto the apex.
            MembershipFunction::Triangle([a, b, c]) => [a, b, b, c],
        };

        if x < a || x > d {
            0.0
        } else if x < b {
            (x - a) / (b - a)
        } else if x <= c {
            1.0
        } else {
            (d - x) / (d - c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_ramps_and_plateau() {
        let mf = MembershipFunction::trapezoid(55.0, 75.0, 100.0, 100.0);
        assert_eq!(mf.degree(50.0), 0.0);
        assert_eq!(mf.degree(55.0), 0.0);
        assert!((mf.degree(65.0) - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(75.0), 1.0);
        assert_eq!(mf.degree(100.0), 1.0);
        assert_eq!(mf.degree(100.5), 0.0);
    }

    #[test]
    fn degenerate_left_edge_is_a_step() {
        let mf = MembershipFunction::trapezoid(0.0, 0.0, 25.0, 45.0);
        assert_eq!(mf.degree(0.0), 1.0);
        assert_eq!(mf.degree(-0.1), 0.0);
        assert!((mf.degree(35.0) - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(45.0), 0.0);
    }

    #[test]
    fn triangle_peaks_at_apex() {
        let mf = MembershipFunction::triangle(30.0, 60.0, 90.0);
        assert_eq!(mf.degree(60.0), 1.0);
        assert!((mf.degree(45.0) - 0.5).abs() < 1e-12);
        assert!((mf.degree(75.0) - 0.5).abs() < 1e-12);
        assert_eq!(mf.degree(30.0), 0.0);
        assert_eq!(mf.degree(90.0), 0.0);
    }

    #[test]
    fn degrees_stay_in_unit_interval() {
        let shapes = [
            MembershipFunction::trapezoid(5.0, 5.0, 20.0, 35.0),
            MembershipFunction::triangle(20.0, 40.0, 60.0),
            MembershipFunction::trapezoid(45.0, 60.0, 90.0, 90.0),
        ];
        for shape in shapes {
            for step in 0..=1000 {
                let x = step as f64 * 0.1 - 5.0;
                let mu = shape.degree(x);
                assert!((0.0..=1.0).contains(&mu), "{shape:?} at {x} gave {mu}");
            }
        }
    }

    #[test]
    fn rejects_decreasing_points() {
        assert!(!MembershipFunction::triangle(10.0, 5.0, 20.0).is_well_formed());
        assert!(!MembershipFunction::trapezoid(0.0, f64::NAN, 1.0, 2.0).is_well_formed());
        assert!(MembershipFunction::trapezoid(0.0, 0.0, 1.0, 1.0).is_well_formed());
    }
}
