use arrayvec::ArrayVec;

use crate::{Complex, Cubic, newton, quadratic, sign, sort_roots};

// Fitted coefficients for the Newton starting point. Each set approximates
// the root in (0, 2) of the rescaled cubic as a bilinear function of the two
// coefficients that aren't ±1.

// Constant term dominates (a0 = -1).
const P1: f64 = 1.09574;
const Q1: f64 = 0.3239;
const R1: f64 = 0.3239;
const S1: f64 = 0.0957439;

// Linear term dominates with a1 = -1.
const P3: f64 = 1.14413;
const Q3: f64 = 0.275509;
const R3: f64 = 0.445578;
const S3: f64 = 0.0259342;

// Linear term dominates with a1 = +1.
const Q4: f64 = 0.771845;
const S4: f64 = 0.228155;

// Quadratic term dominates with a2 = -1 and a1 < 0.
const P51: f64 = 0.878558;
const Q51: f64 = 0.571888;
const R51: f64 = 0.711154;
const S51: f64 = 0.322313;

// Quadratic term dominates with a2 = -1 and a1 >= 0.
const P53: f64 = 1.19748;
const Q53: f64 = 0.283772;
const R53: f64 = 0.837476;
const S53: f64 = 0.356228;

// Quadratic term dominates with a2 = +1 and a1 < 0.
const P52: f64 = 0.192823;
const Q52: f64 = 0.566324;
const R52: f64 = 0.505734;
const S52: f64 = 0.264881;

// Quadratic term dominates with a2 = +1 and a1 >= 0.
const P54: f64 = 0.345219;
const Q54: f64 = 0.401231;
const R54: f64 = 0.207216;
const S54: f64 = 0.00445532;

/// Which coefficient of `x^3 + a2 x^2 + a1 x + a0` determined the scale.
///
/// After rescaling, this coefficient is exactly `±1` and the others are at
/// most `1` in absolute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dominant {
    A2,
    A1,
    A0,
}

/// All roots of `c3 x^3 + c2 x^2 + c1 x + c0`.
///
/// If `c3` is zero, this is [`quadratic_roots`](crate::quadratic_roots).
/// Otherwise, there are exactly three roots, ordered as described in the
/// [crate documentation](crate).
pub fn cubic_roots(c3: f64, c2: f64, c1: f64, c0: f64) -> ArrayVec<Complex, 3> {
    if c3 == 0.0 {
        quadratic::quadratic_roots(c2, c1, c0).into_iter().collect()
    } else {
        monic_cubic_roots(c2 / c3, c1 / c3, c0 / c3)
    }
}

/// All three roots of `x^3 + c2 x^2 + c1 x + c0`.
///
/// We find one real root with a safeguarded Newton iteration on a rescaled
/// version of the cubic, deflate it out, and solve the remaining quadratic.
/// The rescaling means that nothing overflows, even when the coefficients
/// are huge.
pub fn monic_cubic_roots(c2: f64, c1: f64, c0: f64) -> ArrayVec<Complex, 3> {
    let mut ret = ArrayVec::new();

    if c0 == 0.0 {
        ret.push(Complex::ZERO);
        if c1 == 0.0 {
            // x^2 (x + c2)
            log::trace!("cubic with a double root at zero");
            ret.push(Complex::ZERO);
            if c2 == 0.0 {
                ret.push(Complex::ZERO);
            } else {
                ret.push(Complex::real(-c2));
            }
        } else {
            log::trace!("cubic with a root at zero");
            ret.extend(quadratic::monic_quadratic_roots(c2, c1));
        }
        sort_roots(&mut ret);
        return ret;
    }

    let scale2 = c2.abs();
    let scale1 = c1.abs().sqrt();
    let scale0 = c0.abs().cbrt();
    let (dominant, scale) = if scale0 >= scale1 && scale0 >= scale2 {
        (Dominant::A0, scale0)
    } else if scale1 >= scale2 {
        (Dominant::A1, scale1)
    } else {
        (Dominant::A2, scale2)
    };

    // Substitute x = scale * y.
    let mut a2 = c2 / scale;
    let mut a1 = c1 / scale / scale;
    let mut a0 = c0 / scale / scale / scale;
    match dominant {
        Dominant::A2 => a2 = sign(1.0, a2),
        Dominant::A1 => a1 = sign(1.0, a1),
        Dominant::A0 => a0 = sign(1.0, a0),
    }

    // Substitute y -> -y if necessary to make the constant term negative.
    // Then the cubic is negative at zero and positive at 2, because
    // 8 + 4 a2 + 2 a1 + a0 >= 1.
    let flipped = a0 > 0.0;
    if flipped {
        a2 = -a2;
        a0 = -a0;
    }
    log::trace!(
        "cubic scaled by {scale:e} (dominant {dominant:?}, flipped {flipped}): \
         y^3 + {a2} y^2 + {a1} y + {a0}"
    );

    let p = Cubic::new([a0, a1, a2, 1.0]);
    let dp = p.deriv();
    let start = starting_point(dominant, a2, a1, a0);
    let root = newton::find_root(|y| (p.eval(y), dp.eval(y)), start, 0.0, 2.0);
    log::trace!("cubic root {root} from starting point {start}");

    let q = p.deflate_composite(root);
    let &[b0, b1, b2] = q.coeffs();

    let unscale = if flipped { -scale } else { scale };
    ret.push(Complex::real(root * unscale));
    for z in quadratic::quadratic_roots(b2, b1, b0) {
        ret.push(unscale_root(z, unscale));
    }
    sort_roots(&mut ret);
    ret
}

/// Multiplies a root by a real factor, keeping real roots exactly real.
pub(crate) fn unscale_root(z: Complex, factor: f64) -> Complex {
    if z.is_real() {
        Complex::real(z.re() * factor)
    } else {
        Complex::new(z.re() * factor, z.im() * factor)
    }
}

/// A guess for the root in `(0, 2)` of the rescaled cubic.
///
/// The guesses are rough, and in some corners of the quadratic-dominant
/// classes they are off by more than `1`. That's fine because the Newton
/// iteration is bracketed anyway.
fn starting_point(dominant: Dominant, a2: f64, a1: f64, a0: f64) -> f64 {
    match dominant {
        Dominant::A0 => P1 - Q1 * a1 - R1 * a2 + S1 * a1 * a2,
        Dominant::A1 if a1 < 0.0 => P3 - Q3 * a0 - R3 * a2 + S3 * a2 * a0,
        Dominant::A1 => -a0 * (Q4 - S4 * a2),
        Dominant::A2 => match (a2 < 0.0, a1 < 0.0) {
            (true, true) => P51 - Q51 * a1 - R51 * a0 - S51 * a1 * a0,
            (true, false) => P53 - Q53 * a1 - R53 * a0 + S53 * a1 * a0,
            (false, true) => P52 - Q52 * a1 - R52 * a0 - S52 * a1 * a0,
            (false, false) => P54 - Q54 * a1 - R54 * a0 - S54 * a1 * a0,
        },
    }
}

impl Cubic {
    /// All the roots of this polynomial, as in [`cubic_roots`].
    pub fn complex_roots(&self) -> ArrayVec<Complex, 3> {
        let &[c0, c1, c2, c3] = self.coeffs();
        cubic_roots(c3, c2, c1, c0)
    }
}
