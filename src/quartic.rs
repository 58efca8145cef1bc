use arrayvec::ArrayVec;

use crate::cubic::{self, unscale_root};
use crate::{Complex, Quartic, cmath, newton, quadratic, sort_roots};

/// All roots of `q4 x^4 + q3 x^3 + q2 x^2 + q1 x + q0`.
///
/// If `q4` is zero, this is [`cubic_roots`](crate::cubic_roots). Otherwise,
/// there are exactly four roots, ordered as described in the
/// [crate documentation](crate).
pub fn quartic_roots(q4: f64, q3: f64, q2: f64, q1: f64, q0: f64) -> ArrayVec<Complex, 4> {
    if q4 == 0.0 {
        cubic::cubic_roots(q3, q2, q1, q0).into_iter().collect()
    } else {
        monic_quartic_roots(q3 / q4, q2 / q4, q1 / q4, q0 / q4)
    }
}

/// All four roots of `x^4 + q3 x^3 + q2 x^2 + q1 x + q0`.
///
/// After rescaling so that all the coefficients are at most `1` in absolute
/// value, every root lies in `(-2, 2)`. If the quartic is non-positive at
/// one of its stationary points then it has a real root between there and
/// `±2`. We find that root by a Newton iteration, deflate it out, and solve
/// the cubic. Otherwise, the quartic has no real roots and we split it into
/// two quadratics with Ferrari's method.
pub fn monic_quartic_roots(q3: f64, q2: f64, q1: f64, q0: f64) -> ArrayVec<Complex, 4> {
    let mut ret = ArrayVec::new();

    if q0 == 0.0 {
        log::trace!("quartic with a root at zero");
        ret.push(Complex::ZERO);
        ret.extend(cubic::monic_cubic_roots(q3, q2, q1));
        sort_roots(&mut ret);
        return ret;
    }

    if q3 == 0.0 && q1 == 0.0 {
        log::trace!("biquadratic quartic");
        biquadratic_roots(&mut ret, q2, q0);
        sort_roots(&mut ret);
        return ret;
    }

    // Substitute x = scale * y.
    let scale = q3
        .abs()
        .max(q2.abs().sqrt())
        .max(q1.abs().cbrt())
        .max(q0.abs().sqrt().sqrt());
    let a3 = q3 / scale;
    let a2 = q2 / scale / scale;
    let a1 = q1 / scale / scale / scale;
    let a0 = q0 / scale / scale / scale / scale;
    log::trace!("quartic scaled by {scale:e}: y^4 + {a3} y^3 + {a2} y^2 + {a1} y + {a0}");

    let p = Quartic::new([a0, a1, a2, a3, 1.0]);
    let dp = p.deriv();

    // The stationary points are the roots of dp / 4.
    let mut lowest = None::<(f64, f64)>;
    for s in cubic::monic_cubic_roots(0.75 * a3, 0.5 * a2, 0.25 * a1) {
        if s.is_real() {
            let val = p.eval(s.re());
            if lowest.is_none_or(|(_, v)| val < v) {
                lowest = Some((s.re(), val));
            }
        }
    }
    // A cubic with real coefficients always has a real root.
    let Some((stationary, lowest_val)) = lowest else {
        unreachable!("no real stationary point for {p:?}");
    };

    if lowest_val <= 0.0 {
        let root = if lowest_val == 0.0 {
            stationary
        } else {
            // p(±2) >= 1 because all the coefficients are at most 1.
            let far = if stationary <= 0.0 { 2.0 } else { -2.0 };
            newton::find_root(|y| (p.eval(y), dp.eval(y)), far, stationary, far)
        };
        log::trace!("quartic real root {root}, minimum {lowest_val:e} at {stationary}");

        let c = p.deflate_composite(root);
        let &[b0, b1, b2, b3] = c.coeffs();
        ret.push(Complex::real(root * scale));
        for z in cubic::cubic_roots(b3, b2, b1, b0) {
            ret.push(unscale_root(z, scale));
        }
    } else {
        log::trace!("quartic has no real roots, minimum {lowest_val:e} at {stationary}");
        for z in ferrari_roots(a3, a2, a1, a0) {
            ret.push(unscale_root(z, scale));
        }
    }

    sort_roots(&mut ret);
    ret
}

/// The roots of `x^4 + q2 x^2 + q0`, which are the square roots of the
/// roots of `z^2 + q2 z + q0`.
fn biquadratic_roots(ret: &mut ArrayVec<Complex, 4>, q2: f64, q0: f64) {
    for z in quadratic::monic_quadratic_roots(q2, q0) {
        if z.is_real() && z.re() >= 0.0 {
            let r = z.re().sqrt();
            ret.push(Complex::real(r));
            ret.push(Complex::real(-r));
        } else if z.is_real() {
            let r = (-z.re()).sqrt();
            ret.push(Complex::new(0.0, r));
            ret.push(Complex::new(0.0, -r));
        } else {
            let w = cmath::sqrt(z);
            ret.push(w);
            ret.push(-w);
        }
    }
}

/// Splits a quartic into two quadratics, and returns all their roots.
///
/// We substitute `y = x + a3 / 4` to get the depressed quartic
/// `y^4 + p y^2 + q y + r`. If `m` is a positive root of the resolvent
/// cubic `m^3 + p m^2 + (p^2 / 4 - r) m - q^2 / 8`, then the depressed
/// quartic is
/// `(y^2 + p / 2 + m)^2 - (sqrt(2m) y - q / (2 sqrt(2m)))^2`.
///
/// When the two quadratic factors have roots of very different sizes, the
/// factors read off from `m` are only accurate relative to the larger one,
/// so we polish them with [`refine_factors`] before solving them.
fn ferrari_roots(a3: f64, a2: f64, a1: f64, a0: f64) -> ArrayVec<Complex, 4> {
    let shift = -0.25 * a3;
    let a3_sq = a3 * a3;
    let p = a2 - 0.375 * a3_sq;
    let q = a1 - 0.5 * a3 * a2 + 0.125 * a3_sq * a3;
    let r = a0 - 0.25 * a3 * a1 + 0.0625 * a3_sq * a2 - 0.01171875 * a3_sq * a3_sq;

    let mut ret = ArrayVec::new();

    // The largest root of the resolvent comes first.
    let m = cubic::monic_cubic_roots(p, 0.25 * p * p - r, -0.125 * q * q)
        .first()
        .map_or(0.0, |m| m.re());
    log::trace!("depressed quartic y^4 + {p} y^2 + {q} y + {r}, resolvent root {m}");

    if q == 0.0 || m <= 0.0 {
        let mut ys = ArrayVec::<Complex, 4>::new();
        biquadratic_roots(&mut ys, p, r);
        ret.extend(ys.into_iter().map(|z| z + shift));
    } else {
        let s = (2.0 * m).sqrt();
        let t = q / (2.0 * s);
        let half_p = 0.5 * p + m;

        // Substituting y = x - shift turns y^2 + b y + c into a factor in x.
        let unshift = |b: f64, c: f64| Factor {
            alpha: b - 2.0 * shift,
            beta: shift * shift - b * shift + c,
        };
        let mut f = unshift(-s, half_p + t);
        let mut g = unshift(s, half_p - t);

        // The smaller constant term suffers from cancellation, but the
        // product of the two is a0.
        if f.beta.abs() < g.beta.abs() {
            if g.beta != 0.0 {
                f.beta = a0 / g.beta;
            }
        } else if f.beta != 0.0 {
            g.beta = a0 / f.beta;
        }

        let (f, g) = refine_factors([a3, a2, a1, a0], f, g);
        log::trace!(
            "quartic factors x^2 + {} x + {} and x^2 + {} x + {}",
            f.alpha,
            f.beta,
            g.alpha,
            g.beta
        );
        ret.extend(quadratic::monic_quadratic_roots(f.alpha, f.beta));
        ret.extend(quadratic::monic_quadratic_roots(g.alpha, g.beta));
    }
    ret
}

/// The monic quadratic `x^2 + alpha x + beta`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Factor {
    alpha: f64,
    beta: f64,
}

const MAX_REFINEMENTS: usize = 8;

// The relative error of `computed` as an approximation of `target`.
fn rel_error(computed: f64, target: f64) -> f64 {
    if target == 0.0 {
        computed.abs()
    } else {
        ((computed - target) / target).abs()
    }
}

// How far the product of `f` and `g` is from
// `x^4 + a3 x^3 + a2 x^2 + a1 x + a0`, summed over the coefficients.
fn factor_error([a3, a2, a1, a0]: [f64; 4], f: Factor, g: Factor) -> f64 {
    rel_error(f.alpha + g.alpha, a3)
        + rel_error(f.beta + f.alpha * g.alpha + g.beta, a2)
        + rel_error(f.beta * g.alpha + f.alpha * g.beta, a1)
        + rel_error(f.beta * g.beta, a0)
}

/// Polishes an approximate factorization
/// `x^4 + a3 x^3 + a2 x^2 + a1 x + a0 = f(x) g(x)` by Newton's method on
/// the four coefficients of the factors.
///
/// A step is only taken if it reduces [`factor_error`], so the result is
/// never worse than the input.
fn refine_factors(coeffs: [f64; 4], mut f: Factor, mut g: Factor) -> (Factor, Factor) {
    let [a3, a2, a1, a0] = coeffs;
    let mut err = factor_error(coeffs, f, g);
    for i in 0..MAX_REFINEMENTS {
        if err == 0.0 {
            break;
        }
        let Factor { alpha: al1, beta: be1 } = f;
        let Factor { alpha: al2, beta: be2 } = g;

        let f0 = be1 * be2 - a0;
        let f1 = be1 * al2 + al1 * be2 - a1;
        let f2 = be1 + al1 * al2 + be2 - a2;
        let f3 = al1 + al2 - a3;

        // The Jacobian is the Sylvester matrix of the two factors, which is
        // singular exactly when they share a root.
        let c1 = al1 - al2;
        let c2 = be2 - be1;
        let c3 = be1 * al2 - al1 * be2;
        let det = be1 * be1 - be1 * (al2 * c1 + 2.0 * be2) + be2 * (al1 * c1 + be2);
        if det == 0.0 {
            break;
        }
        let inv = det.recip();

        let d_al1 = c1 * f0 + c2 * f1 + c3 * f2 - (be1 * c2 + al1 * c3) * f3;
        let d_be1 = (al1 * c1 + c2) * f0 - be1 * c1 * f1 - be1 * c2 * f2 - be1 * c3 * f3;
        let d_al2 = -c1 * f0 - c2 * f1 - c3 * f2 + (al2 * c3 + be2 * c2) * f3;
        let d_be2 = -(al2 * c1 + c2) * f0 + be2 * c1 * f1 + be2 * c2 * f2 + be2 * c3 * f3;

        let next_f = Factor {
            alpha: al1 - inv * d_al1,
            beta: be1 - inv * d_be1,
        };
        let next_g = Factor {
            alpha: al2 - inv * d_al2,
            beta: be2 - inv * d_be2,
        };
        let next_err = factor_error(coeffs, next_f, next_g);
        if next_err < err {
            f = next_f;
            g = next_g;
            err = next_err;
        } else {
            log::trace!("factor refinement stopped after {i} steps, error {err:e}");
            break;
        }
    }
    (f, g)
}

impl Quartic {
    /// All the roots of this polynomial, as in [`quartic_roots`].
    pub fn complex_roots(&self) -> ArrayVec<Complex, 4> {
        let &[c0, c1, c2, c3, c4] = self.coeffs();
        quartic_roots(c4, c3, c2, c1, c0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[Complex], expected: &[Complex], tol: f64) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (*a - *e).norm() <= tol * e.norm().max(1.0),
                "{actual:?} vs {expected:?}"
            );
        }
    }

    fn check_roots(p: Quartic, roots: &[Complex]) {
        let p = p / p.coeffs()[4];
        let magnitude = p.magnitude().max(1.0);
        for &r in roots {
            let size = r.norm().max(1.0);
            let threshold = 1e-9 * magnitude * size.powi(4);
            let y = p.eval_complex(r);
            if threshold.is_finite() && y.is_finite() {
                assert!(
                    y.norm() <= threshold,
                    "{p:?} had root {r} evaluate to {y}, threshold {threshold:e}"
                );
            }
        }
    }

    #[test]
    fn biquadratic() {
        // x^4 - 16 = (x - 2)(x + 2)(x - 2i)(x + 2i)
        assert_eq!(
            quartic_roots(1.0, 0.0, 0.0, 0.0, -16.0).as_slice(),
            &[
                Complex::real(2.0),
                Complex::real(-2.0),
                Complex::new(0.0, 2.0),
                Complex::new(0.0, -2.0)
            ]
        );

        // (x^2 - 1)(x^2 - 4)
        assert_close(
            &monic_quartic_roots(0.0, -5.0, 0.0, 4.0),
            &[
                Complex::real(2.0),
                Complex::real(1.0),
                Complex::real(-1.0),
                Complex::real(-2.0),
            ],
            1e-15,
        );

        // x^4 + 4 = (x^2 - 2x + 2)(x^2 + 2x + 2)
        let roots = monic_quartic_roots(0.0, 0.0, 0.0, 4.0);
        assert_close(
            &roots,
            &[
                Complex::new(1.0, 1.0),
                Complex::new(1.0, -1.0),
                Complex::new(-1.0, 1.0),
                Complex::new(-1.0, -1.0),
            ],
            1e-15,
        );
        crate::check_order(&roots);
    }

    #[test]
    fn degenerate() {
        assert!(quartic_roots(0.0, 0.0, 0.0, 0.0, 0.0).is_empty());
        assert_close(
            &quartic_roots(0.0, 1.0, -6.0, 11.0, -6.0),
            &[Complex::real(3.0), Complex::real(2.0), Complex::real(1.0)],
            1e-12,
        );
        assert_eq!(
            monic_quartic_roots(0.0, 0.0, 0.0, 0.0).as_slice(),
            &[Complex::ZERO; 4]
        );
        // x (x - 1)(x - 2)(x - 3)
        assert_close(
            &monic_quartic_roots(-6.0, 11.0, -6.0, 0.0),
            &[
                Complex::real(3.0),
                Complex::real(2.0),
                Complex::real(1.0),
                Complex::ZERO,
            ],
            1e-12,
        );
    }

    #[test]
    fn real_roots() {
        // (x - 1)(x - 2)(x - 3)(x - 4)
        let p = Quartic::new([24.0, -50.0, 35.0, -10.0, 1.0]);
        assert_close(
            &p.complex_roots(),
            &[
                Complex::real(4.0),
                Complex::real(3.0),
                Complex::real(2.0),
                Complex::real(1.0),
            ],
            1e-12,
        );

        // (x - 1)(x + 2)(x^2 + 1)
        let p = Quartic::new([-2.0, 1.0, -1.0, 1.0, 1.0]);
        let roots = p.complex_roots();
        assert_close(
            &roots,
            &[Complex::real(1.0), Complex::real(-2.0), Complex::I, Complex::MINUS_I],
            1e-12,
        );
        check_roots(p, &roots);

        // (x - 1)^2 (x^2 + 1) has a double root.
        let p = Quartic::new([1.0, -2.0, 2.0, -2.0, 1.0]);
        let roots = p.complex_roots();
        assert_eq!(roots.len(), 4);
        check_roots(p, &roots);
    }

    #[test]
    fn no_real_roots() {
        // (x^2 - 2x + 5)(x^2 + 4x + 13): roots 1 ± 2i and -2 ± 3i.
        let p = Quartic::new([65.0, -6.0, 10.0, 2.0, 1.0]);
        let roots = p.complex_roots();
        assert_close(
            &roots,
            &[
                Complex::new(1.0, 2.0),
                Complex::new(1.0, -2.0),
                Complex::new(-2.0, 3.0),
                Complex::new(-2.0, -3.0),
            ],
            1e-12,
        );
        assert_eq!(roots[0].conj(), roots[1]);
        assert_eq!(roots[2].conj(), roots[3]);

        // (x^2 + 1)(x^2 + 4) shifted by one: the depressed quartic has no
        // linear term.
        let p = Quartic::new([10.0, -14.0, 11.0, -4.0, 1.0]);
        let roots = p.complex_roots();
        assert_close(
            &roots,
            &[
                Complex::new(1.0, 2.0),
                Complex::new(1.0, -2.0),
                Complex::new(1.0, 1.0),
                Complex::new(1.0, -1.0),
            ],
            1e-12,
        );
        crate::check_order(&roots);

        // (x^2 + 1)(x^2 + 4)
        assert_close(
            &quartic_roots(1.0, 0.0, 5.0, 0.0, 4.0),
            &[
                Complex::new(0.0, 2.0),
                Complex::new(0.0, -2.0),
                Complex::I,
                Complex::MINUS_I,
            ],
            1e-15,
        );
    }

    #[test]
    fn widely_separated_pairs() {
        // (x^2 + x + 1)(x^2 + 1e10)
        let p = Quartic::new([1e10, 1e10, 1e10 + 1.0, 1.0, 1.0]);
        let roots = p.complex_roots();
        assert_close(
            &roots,
            &[
                Complex::new(0.0, 1e5),
                Complex::new(0.0, -1e5),
                Complex::new(-0.5, 0.8660254037844386),
                Complex::new(-0.5, -0.8660254037844386),
            ],
            1e-12,
        );
        assert_eq!(roots[2].conj(), roots[3]);

        // A pair near 12462.5 ± 2894796i and another of size about 6e-7.
        let p = Quartic::new([3.25, 7.38e6, 8.38e12, -24925.0, 1.0]);
        let roots = p.complex_roots();
        assert_eq!(roots.len(), 4);
        assert!(roots.iter().all(|r| !r.is_real()));
        assert!((roots[0].re() / 12462.5 - 1.0).abs() <= 1e-9);
        assert!((roots[0].im() / 2894796.1389524066 - 1.0).abs() <= 1e-9);
        // The small pair has product 3.25 / |big pair|^2.
        let expected = 3.25 / roots[0].norm_sqr();
        assert!((roots[2].norm_sqr() / expected - 1.0).abs() <= 1e-9);
        // Each root is accurate relative to the terms of the polynomial.
        let c = p.coeffs();
        for &r in &roots {
            let terms: f64 = (0..5).map(|i| c[i].abs() * r.norm().powi(i as i32)).sum();
            assert!(p.eval_complex(r).norm() <= 1e-12 * terms, "{r}");
        }
    }

    #[test]
    fn residuals() {
        for p in [
            // (x - 1)(x - 2)(x - 3)(x - 4)
            Quartic::new([24.0, -50.0, 35.0, -10.0, 1.0]),
            // (x - 1)(x + 2)(x^2 + 1)
            Quartic::new([-2.0, 1.0, -1.0, 1.0, 1.0]),
            // (x^2 - 2x + 5)(x^2 + 4x + 13)
            Quartic::new([65.0, -6.0, 10.0, 2.0, 1.0]),
            // (x^2 + 1)(x^2 + 4)
            Quartic::new([4.0, 0.0, 5.0, 0.0, 1.0]),
            // (x^2 + x + 1)(x^2 - 3x + 3), times 2
            Quartic::new([6.0, 0.0, 2.0, -4.0, 2.0]),
            // (x^2 + 0.1)(x^2 + 6x + 10)
            Quartic::new([1.0, 0.6, 10.1, 6.0, 1.0]),
        ] {
            let roots = p.complex_roots();
            assert_eq!(roots.len(), 4);
            crate::check_order(&roots);
            crate::check_residuals(p, &roots);
        }
    }

    #[test]
    fn huge_coefficients() {
        // Approximately (x - 1e80)(x - 1)(x^2 + 1).
        let p = Quartic::new([1e80, -1e80, 1e80, -1e80, 1.0]);
        let roots = p.complex_roots();
        assert_eq!(roots.len(), 4);
        assert!((roots[0].re() / 1e80 - 1.0).abs() <= 1e-14);
        assert!(roots[0].is_real());
    }

    #[test]
    fn root_evaluation() {
        arbtest::arbtest(|u| {
            let p = crate::arbitrary::quartic(u)?;
            let &[c0, c1, c2, c3, c4] = p.coeffs();
            if c4 == 0.0 || !(p / c4).is_finite() {
                return Ok(());
            }
            let roots = quartic_roots(c4, c3, c2, c1, c0);
            assert_eq!(roots.len(), 4);
            crate::check_order(&roots);
            check_roots(p, &roots);

            let complex = roots.iter().filter(|r| !r.is_real()).count();
            assert!(complex % 2 == 0, "{roots:?}");
            Ok(())
        })
        .budget_ms(5_000);
    }
}
