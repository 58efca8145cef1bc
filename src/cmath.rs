//! Elementary functions of a complex variable.
//!
//! Every function here is analytically continued from its real counterpart,
//! taking the principal branch. When the argument is real and so is the
//! mathematical result, the returned real part agrees with the corresponding
//! `f64` method and the imaginary part is zero.
//!
//! Near the branch points on the real axis (`acosh` below 1, `atanh` at ±1)
//! the results are not very accurate.

use crate::{Complex, hypot, sign};

/// The principal square root, with non-negative real part.
///
/// On the negative real axis, the root is on the positive imaginary axis
/// regardless of the sign of the zero imaginary part.
pub fn sqrt(z: Complex) -> Complex {
    // Below this, halving the norm loses bits to the subnormal range.
    const TINY: f64 = f64::MIN_POSITIVE * (1u64 << 52) as f64;
    const SCALE_UP: f64 = (1u128 << 108) as f64;
    const SCALE_DOWN: f64 = 1.0 / (1u64 << 54) as f64;

    let (x, y) = (z.re(), z.im());
    if x == 0.0 && y == 0.0 {
        return Complex::ZERO;
    }

    let norm = z.norm();
    if norm < TINY {
        return sqrt(z * SCALE_UP) * SCALE_DOWN;
    }
    // One of `(norm + x) / 2` and `(norm - x) / 2` suffers from cancellation.
    // We compute the other one and get the cancelling component from
    // `2 · re · im = y`.
    if x >= 0.0 {
        let re = (0.5 * x + 0.5 * norm).sqrt();
        Complex::new(re, y / (2.0 * re))
    } else {
        let im = sign((0.5 * norm - 0.5 * x).sqrt(), y);
        Complex::new(y.abs() / (2.0 * im.abs()), im)
    }
}

/// The principal cube root, the one with argument in `(-π/3, π/3]`.
///
/// Note that this is *not* the real cube root for negative real numbers.
pub fn cbrt(z: Complex) -> Complex {
    Complex::from_polar(z.norm().cbrt(), z.phi() / 3.0)
}

pub fn exp(z: Complex) -> Complex {
    Complex::from_polar(z.re().exp(), z.im())
}

/// The principal natural logarithm, with imaginary part in `[-π, π]`.
pub fn ln(z: Complex) -> Complex {
    Complex::new(z.norm().ln(), z.phi())
}

/// `z` raised to the power `w`, on the principal branch of `ln`.
///
/// Zero to a power with positive real part is zero.
pub fn pow(z: Complex, w: Complex) -> Complex {
    if z.re() == 0.0 && z.im() == 0.0 && w.re() > 0.0 {
        return Complex::ZERO;
    }
    exp(w * ln(z))
}

/// `z` raised to a real power, on the principal branch.
pub fn powf(z: Complex, x: f64) -> Complex {
    Complex::from_polar(z.norm().powf(x), z.phi() * x)
}

pub fn sin(z: Complex) -> Complex {
    let (x, y) = (z.re(), z.im());
    Complex::new(x.sin() * y.cosh(), x.cos() * y.sinh())
}

pub fn cos(z: Complex) -> Complex {
    let (x, y) = (z.re(), z.im());
    Complex::new(x.cos() * y.cosh(), -x.sin() * y.sinh())
}

pub fn tan(z: Complex) -> Complex {
    let (x2, y2) = (2.0 * z.re(), 2.0 * z.im());
    let denom = x2.cos() + y2.cosh();
    Complex::new(x2.sin() / denom, y2.sinh() / denom)
}

pub fn sinh(z: Complex) -> Complex {
    let (x, y) = (z.re(), z.im());
    Complex::new(x.sinh() * y.cos(), x.cosh() * y.sin())
}

pub fn cosh(z: Complex) -> Complex {
    let (x, y) = (z.re(), z.im());
    Complex::new(x.cosh() * y.cos(), x.sinh() * y.sin())
}

pub fn tanh(z: Complex) -> Complex {
    let (x2, y2) = (2.0 * z.re(), 2.0 * z.im());
    let denom = x2.cosh() + y2.cos();
    Complex::new(x2.sinh() / denom, y2.sin() / denom)
}

// With `A = (|z + 1| + |z - 1|) / 2`, the inverse sine is
// `asin(re / A) + i·sign(im)·acosh(A)` (and the inverse cosine is similar).
// This returns `re / A` and `acosh(A)`.
//
// `A` is close to 1 near the real segment [-1, 1], where computing `A - 1`
// naively would cancel badly. Following Hull, Fairgrieve and Tang, we
// compute `A - 1` directly in that region.
fn inverse_sine_parts(z: Complex) -> (f64, f64) {
    let x = z.re().abs();
    let y = z.im().abs();

    if y == 0.0 {
        return if x <= 1.0 {
            (z.re(), 0.0)
        } else {
            (z.re() / x, x.acosh())
        };
    }

    let r = hypot(x + 1.0, y);
    let s = hypot(x - 1.0, y);
    let a = 0.5 * (r + s);
    let b = (z.re() / a).clamp(-1.0, 1.0);

    let acosh_a = if a <= 1.5 {
        let y_sq = y * y;
        let a_minus_one = if x < 1.0 {
            0.5 * (y_sq / (r + (x + 1.0)) + y_sq / (s + (1.0 - x)))
        } else {
            0.5 * (y_sq / (r + (x + 1.0)) + (s + (x - 1.0)))
        };
        (a_minus_one + (a_minus_one * (a + 1.0)).sqrt()).ln_1p()
    } else {
        (a + (a - 1.0).sqrt() * (a + 1.0).sqrt()).ln()
    };
    (b, acosh_a)
}

/// The inverse sine, `-i·ln(iz + sqrt(1 - z²))`.
pub fn asin(z: Complex) -> Complex {
    let (b, acosh_a) = inverse_sine_parts(z);
    Complex::new(b.asin(), sign(acosh_a, z.im()))
}

/// The inverse cosine, `π/2 - asin(z)`.
pub fn acos(z: Complex) -> Complex {
    let (b, acosh_a) = inverse_sine_parts(z);
    Complex::new(b.acos(), -sign(acosh_a, z.im()))
}

/// The value returned by [`atan`] at its singular inputs.
pub const ATAN_SINGULAR: Complex = Complex::new(f64::MAX, f64::MAX);

/// The inverse tangent.
///
/// Returns [`ATAN_SINGULAR`] at `i` (where it has a pole) and on the
/// positive imaginary axis above `i`, where the real part would have to pick
/// a side of the branch cut.
pub fn atan(z: Complex) -> Complex {
    let (x, y) = (z.re(), z.im());
    if x == 0.0 && y > 1.0 {
        return ATAN_SINGULAR;
    }
    let denom = x * x + (y - 1.0) * (y - 1.0);
    if denom == 0.0 {
        return ATAN_SINGULAR;
    }

    let re = 0.5 * (2.0 * x).atan2(1.0 - x * x - y * y);
    // ln(|z + i|² / |z - i|²) / 4, where |z + i|² - |z - i|² = 4y.
    let im = 0.25 * (4.0 * y / denom).ln_1p();
    Complex::new(re, im)
}

/// The inverse hyperbolic sine, `-i·asin(iz)`.
pub fn asinh(z: Complex) -> Complex {
    asin(z.mul_i()).mul_minus_i()
}

/// The inverse hyperbolic cosine, `i·acos(z)`.
pub fn acosh(z: Complex) -> Complex {
    acos(z).mul_i()
}

/// The inverse hyperbolic tangent, `-i·atan(iz)`.
pub fn atanh(z: Complex) -> Complex {
    atan(z.mul_i()).mul_minus_i()
}
