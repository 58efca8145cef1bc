use crate::Complex;

/// A polynomial with `N` real coefficients (so degree at most `N - 1`).
///
/// The root solvers work on bare coefficients; this type is for evaluating
/// and manipulating the polynomials around them, and for the
/// `complex_roots` convenience methods.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Poly<const N: usize> {
    pub(crate) coeffs: [f64; N],
}

pub type Linear = Poly<2>;
pub type Quadratic = Poly<3>;
pub type Cubic = Poly<4>;
pub type Quartic = Poly<5>;

impl<const N: usize> Poly<N> {
    /// Creates a new polynomial with the provided coefficients.
    ///
    /// The constant coefficient comes first, then the linear coefficient, and
    /// so on. So if you pass `[c, b, a]` you'll get the polynomial
    /// `a x^2 + b x + c`.
    pub const fn new(coeffs: [f64; N]) -> Poly<N> {
        Poly { coeffs }
    }

    /// The coefficients of this polynomial.
    ///
    /// In the returned array, the coefficient of `x^i` is at index `i`.
    pub fn coeffs(&self) -> &[f64; N] {
        &self.coeffs
    }

    /// Evaluates this polynomial at a point.
    pub fn eval(&self, x: f64) -> f64 {
        let mut acc = 0.0;
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Evaluates this polynomial at a complex point.
    pub fn eval_complex(&self, z: Complex) -> Complex {
        let mut acc = Complex::ZERO;
        for &c in self.coeffs.iter().rev() {
            acc = acc * z + c;
        }
        acc
    }

    /// Returns the largest absolute value of any coefficient.
    ///
    /// Always returns a non-negative number, or NaN if some coefficient is NaN.
    pub fn magnitude(&self) -> f64 {
        let mut max = 0.0f64;
        for c in &self.coeffs {
            max = max.max(c.abs());
        }
        max
    }

    /// Are all the coefficients finite?
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// The index of the largest of the terms `|c_i x^i|`.
    ///
    /// Ties go to the higher-degree term.
    pub(crate) fn dominant_term(&self, x: f64) -> usize {
        let mut power = 1.0;
        let mut best = 0;
        let mut best_size = -1.0;
        for (i, c) in self.coeffs.iter().enumerate() {
            let size = (c * power).abs();
            if size >= best_size {
                best = i;
                best_size = size;
            }
            power *= x;
        }
        best
    }
}

macro_rules! impl_deriv_and_deflate {
    ($N:literal, $N_MINUS_ONE:literal) => {
        impl Poly<$N> {
            /// Compute the derivative of this polynomial, as a polynomial with
            /// one less coefficient.
            pub fn deriv(&self) -> Poly<$N_MINUS_ONE> {
                let mut coeffs = [0.0; $N_MINUS_ONE];
                for (i, (d, c)) in coeffs.iter_mut().zip(&self.coeffs[1..]).enumerate() {
                    *d = (i + 1) as f64 * c;
                }
                Poly::new(coeffs)
            }

            /// Divide this polynomial by the polynomial `x - root`, returning the
            /// quotient (as a polynomial with one less coefficient) and ignoring
            /// the remainder.
            ///
            /// The quotient is computed from the leading coefficient down,
            /// which is accurate when `root` is small compared to the
            /// other roots.
            ///
            /// If `root` is actually a root of `self` (as the name suggests
            /// it should be, but this is not actually required), the
            /// remainder will be zero. In general, the remainder will be
            /// `self.eval(root)`.
            pub fn deflate(&self, root: f64) -> Poly<$N_MINUS_ONE> {
                let mut acc = 0.0;
                let mut coeffs = [0.0; $N_MINUS_ONE];
                for (d, c) in coeffs.iter_mut().zip(&self.coeffs[1..]).rev() {
                    acc = acc * root + c;
                    *d = acc;
                }
                Poly::new(coeffs)
            }

            /// Like [`deflate`](Self::deflate), but computes the quotient
            /// from the constant coefficient up. This is accurate when `root`
            /// is large compared to the other roots. `root` must be non-zero.
            pub fn deflate_backward(&self, root: f64) -> Poly<$N_MINUS_ONE> {
                let mut acc = 0.0;
                let mut coeffs = [0.0; $N_MINUS_ONE];
                for (d, c) in coeffs.iter_mut().zip(&self.coeffs) {
                    acc = (acc - c) / root;
                    *d = acc;
                }
                Poly::new(coeffs)
            }

            /// Divides by `x - root` using forward deflation for the
            /// quotient's coefficients at and above the largest term of
            /// `self` evaluated at `root`, and backward deflation below it.
            ///
            /// This keeps the rounding error small regardless of how
            /// `root` compares to the other roots: if the constant term
            /// dominates this is [`deflate`](Self::deflate), if the leading
            /// terms dominate it's [`deflate_backward`](Self::deflate_backward).
            pub fn deflate_composite(&self, root: f64) -> Poly<$N_MINUS_ONE> {
                let split = self.dominant_term(root);
                let forward = self.deflate(root);
                if split == 0 {
                    return forward;
                }
                let mut ret = self.deflate_backward(root);
                ret.coeffs[split..].copy_from_slice(&forward.coeffs[split..]);
                ret
            }
        }
    };
}

impl_deriv_and_deflate!(3, 2);
impl_deriv_and_deflate!(4, 3);
impl_deriv_and_deflate!(5, 4);

impl<const N: usize> std::ops::Mul<f64> for Poly<N> {
    type Output = Poly<N>;

    fn mul(mut self, scale: f64) -> Poly<N> {
        self *= scale;
        self
    }
}

impl<const N: usize> std::ops::MulAssign<f64> for Poly<N> {
    fn mul_assign(&mut self, scale: f64) {
        for c in &mut self.coeffs {
            *c *= scale;
        }
    }
}

impl<const N: usize> std::ops::Div<f64> for Poly<N> {
    type Output = Poly<N>;

    fn div(mut self, scale: f64) -> Poly<N> {
        self /= scale;
        self
    }
}

impl<const N: usize> std::ops::DivAssign<f64> for Poly<N> {
    fn div_assign(&mut self, scale: f64) {
        for c in &mut self.coeffs {
            *c /= scale;
        }
    }
}
