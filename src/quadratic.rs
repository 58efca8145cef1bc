use arrayvec::ArrayVec;

use crate::{Complex, Linear, Quadratic, sign};

/// The root of `q1 x + q0`, if there is one.
///
/// If `q1` is zero there are no roots (or, if `q0` is also zero, every
/// number is a root) and we return nothing.
pub fn linear_roots(q1: f64, q0: f64) -> ArrayVec<Complex, 1> {
    let mut ret = ArrayVec::new();
    if q1 != 0.0 {
        ret.push(Complex::real(-q0 / q1));
    }
    ret
}

/// All roots of `q2 x^2 + q1 x + q0`.
///
/// If `q2` is zero, this is [`linear_roots`]. Otherwise, there are exactly
/// two roots, ordered as described in the [crate documentation](crate).
pub fn quadratic_roots(q2: f64, q1: f64, q0: f64) -> ArrayVec<Complex, 2> {
    if q2 == 0.0 {
        linear_roots(q1, q0).into_iter().collect()
    } else {
        monic_quadratic_roots(q1 / q2, q0 / q2)
    }
}

/// Both roots of `x^2 + q1 x + q0`.
///
/// Real roots come in decreasing order; a complex conjugate pair comes with
/// the positive imaginary part first.
pub fn monic_quadratic_roots(q1: f64, q0: f64) -> ArrayVec<Complex, 2> {
    let mut ret = ArrayVec::new();

    if q0 == 0.0 && q1 == 0.0 {
        ret.push(Complex::ZERO);
        ret.push(Complex::ZERO);
    } else if q0 == 0.0 {
        // x (x + q1)
        push_real(&mut ret, 0.0, -q1);
    } else if q1 == 0.0 {
        let s = q0.abs().sqrt();
        if q0 < 0.0 {
            push_real(&mut ret, s, -s);
        } else {
            ret.push(Complex::new(0.0, s));
            ret.push(Complex::new(0.0, -s));
        }
    } else {
        // The roots are h ± sqrt(h^2 - q0). Computing h^2 could overflow, so
        // we write the discriminant as scale^2 * disc, where
        // scale = max(|h|, sqrt|q0|) and |disc| <= 2.
        let h = -0.5 * q1;
        let sqrt_q0 = q0.abs().sqrt();
        let (scale, disc) = if h.abs() >= sqrt_q0 {
            (h.abs(), 1.0 - q0 / h / h)
        } else {
            let ratio = h / sqrt_q0;
            (sqrt_q0, ratio * ratio - q0.signum())
        };

        if disc >= 0.0 {
            // Compute the larger root directly, and the smaller one from
            // x0 * x1 = q0 to avoid cancellation.
            let x0 = h + sign(scale * disc.sqrt(), h);
            push_real(&mut ret, x0, q0 / x0);
        } else {
            let im = scale * (-disc).sqrt();
            ret.push(Complex::new(h, im));
            ret.push(Complex::new(h, -im));
        }
    }
    ret
}

fn push_real(roots: &mut ArrayVec<Complex, 2>, x0: f64, x1: f64) {
    roots.push(Complex::real(x0.max(x1)));
    roots.push(Complex::real(x0.min(x1)));
}

impl Linear {
    /// The root of this polynomial, if it has exactly one.
    pub fn complex_roots(&self) -> ArrayVec<Complex, 1> {
        let &[c0, c1] = self.coeffs();
        linear_roots(c1, c0)
    }
}

impl Quadratic {
    /// All the roots of this polynomial, as in [`quadratic_roots`].
    pub fn complex_roots(&self) -> ArrayVec<Complex, 2> {
        let &[c0, c1, c2] = self.coeffs();
        quadratic_roots(c2, c1, c0)
    }
}
