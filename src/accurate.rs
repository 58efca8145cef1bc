//! Accurate-but-slow reference computations using arbitrary-precision
//! arithmetic.

use dashu_float::{FBig, ops::SquareRoot, round::Rounded};

use crate::Poly;

// Enough bits that rounding the final answer to an `f64` is the only
// rounding that matters.
const PRECISION: usize = 256;

/// Converts a finite float to an arbitrary-precision float, exactly.
///
/// # Panics
///
/// Panics if `x` is infinite or NaN.
fn exact(x: f64) -> FBig {
    let Rounded::Exact(x) = FBig::try_from(x).unwrap().with_precision(0) else {
        unreachable!()
    };
    x
}

/// The length of the hypotenuse of a right triangle, to within one ulp.
///
/// # Panics
///
/// Panics if `x` or `y` is infinite or NaN.
pub fn hypot(x: f64, y: f64) -> f64 {
    let sum = exact(x).sqr() + exact(y).sqr();
    sum.with_precision(PRECISION).value().sqrt().to_f64().value()
}

/// A polynomial with arbitrary-precision coefficients.
#[derive(Clone, Debug)]
pub struct AccuPoly {
    coeffs: Vec<FBig>,
}

impl AccuPoly {
    /// Creates a polynomial from `f64` coefficients, constant term first.
    pub fn new(coeffs: impl IntoIterator<Item = f64>) -> Self {
        Self {
            coeffs: coeffs.into_iter().map(exact).collect(),
        }
    }

    /// Evaluate this polynomial at the given point, rounded to an `f64`.
    pub fn eval(&self, x: f64) -> f64 {
        self.eval_exact(x).to_f64().value()
    }

    /// Evaluate this polynomial at the given point, exactly and very slowly.
    pub fn eval_exact(&self, x: f64) -> FBig {
        // The precision grows with every multiplication, but we only ever
        // evaluate polynomials of degree at most four.
        let x = exact(x);
        let mut ret = exact(0.0);
        for c in self.coeffs.iter().rev() {
            ret *= &x;
            ret += c;
        }
        ret
    }
}

impl<const N: usize> From<Poly<N>> for AccuPoly {
    fn from(p: Poly<N>) -> AccuPoly {
        AccuPoly::new(*p.coeffs())
    }
}
