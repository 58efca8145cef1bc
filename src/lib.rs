//! Complex arithmetic and closed-interval root finding for polynomials of
//! degree at most four.
//!
//! The [`Complex`] type is a plain `(re, im)` pair of `f64`s with the usual
//! arithmetic, and [`cmath`] has the elementary functions on it. The root
//! solvers ([`quadratic_roots`], [`cubic_roots`] and [`quartic_roots`], plus
//! their monic variants) return every root, real or complex, in an
//! [`ArrayVec`](arrayvec::ArrayVec).
//!
//! # Root order
//!
//! All solvers return their roots in the same order: real roots first, in
//! decreasing order, followed by the complex roots. Complex roots come in
//! conjugate pairs, and the two members of a pair are always adjacent with
//! the positive imaginary part first. The pairs are in decreasing order of
//! their real part, and pairs with the same real part are in decreasing
//! order of the size of their imaginary part. For example, the roots of
//! `(x^2 + 1)(x^2 + 4)` come out as `[2i, -2i, i, -i]`.
//!
//! # Degenerate inputs
//!
//! If the leading coefficient is zero, the solvers fall back to the
//! lower-degree solver. So `cubic_roots(0.0, 1.0, -3.0, 2.0)` returns the two
//! roots of `x^2 - 3x + 2`, and a polynomial whose coefficients are all zero
//! has no roots at all.
//!
//! # Tracing
//!
//! The cubic and quartic solvers report their case analysis and iteration
//! counts through the [`log`] crate at the `trace` level.

pub mod cmath;
mod complex;
mod cubic;
mod hypot;
mod newton;
mod poly;
mod quadratic;
mod quartic;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

#[cfg(any(test, feature = "dashu-float"))]
pub mod accurate;

pub use complex::Complex;
pub use cubic::{cubic_roots, monic_cubic_roots};
pub use hypot::hypot;
pub use poly::{Cubic, Linear, Poly, Quadratic, Quartic};
pub use quadratic::{linear_roots, monic_quadratic_roots, quadratic_roots};
pub use quartic::{monic_quartic_roots, quartic_roots};

/// `|a|` with the sign of `b`, where a zero `b` counts as positive.
///
/// Unlike `f64::copysign`, this ignores the sign bit of a zero `b`.
pub(crate) fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 { a.abs() } else { -a.abs() }
}

/// Puts roots into the order described in the [crate documentation](crate).
pub(crate) fn sort_roots(roots: &mut [Complex]) {
    roots.sort_by(|a, b| {
        b.is_real()
            .cmp(&a.is_real())
            .then_with(|| b.re().total_cmp(&a.re()))
            .then_with(|| b.im().abs().total_cmp(&a.im().abs()))
            .then_with(|| b.im().total_cmp(&a.im()))
    });
}

#[cfg(test)]
fn check_order(roots: &[Complex]) {
    for pair in roots.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.is_real() && b.is_real() {
            assert!(a.re() >= b.re(), "{roots:?} out of order");
        } else {
            assert!(a.is_real() || !b.is_real(), "{roots:?} out of order");
            if !a.is_real() {
                let (a_im, b_im) = (a.im().abs(), b.im().abs());
                assert!(
                    a.re() > b.re()
                        || (a.re() == b.re()
                            && (a_im > b_im || (a_im == b_im && a.im() >= b.im()))),
                    "{roots:?} out of order"
                );
            }
        }
    }
}

/// Checks that every root makes `p` vanish to within `|r| / 1e6`, in both
/// the real and the imaginary part.
#[cfg(test)]
fn check_residuals<const N: usize>(p: Poly<N>, roots: &[Complex]) {
    for &r in roots {
        let y = p.eval_complex(r);
        let tol = r.norm() / 1e6;
        assert!(
            y.re().abs() <= tol && y.im().abs() <= tol,
            "{p:?} had root {r} evaluate to {y}"
        );
    }
}
