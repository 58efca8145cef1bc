//! An accurate `hypot`, following Borges, "An Improved Algorithm for
//! hypot(a, b)" (2019), in its corrected fused variant.

/// `sqrt(f64::EPSILON / 2)`, i.e. `2^-26.5`. If the smaller argument is
/// below this fraction of the larger one, its square doesn't affect the
/// correctly rounded result.
const SQRT_HALF_EPSILON: f64 = 1.0536712127723509e-8;

// Arguments this large (or small) might overflow (or underflow) when
// squared, so we rescale them by a power of two first.
const BIG: f64 = pow2(500);
const SMALL: f64 = pow2(-500);
const SCALE_UP: f64 = pow2(600);
const SCALE_DOWN: f64 = pow2(-600);

// 2^exp, for exponents in the normal range.
const fn pow2(exp: i64) -> f64 {
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Computes `sqrt(x² + y²)` without undue overflow or underflow.
///
/// Infinity wins over NaN: if either argument is infinite the result is
/// `+∞`, even if the other one is NaN. Otherwise NaN propagates.
///
/// The result is symmetric under swapping the arguments and under flipping
/// their signs, and `hypot(x, 0.0) == x.abs()` exactly.
pub fn hypot(x: f64, y: f64) -> f64 {
    if x.is_infinite() || y.is_infinite() {
        return f64::INFINITY;
    }
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }

    let (mut x, mut y) = (x.abs(), y.abs());
    if y > x {
        std::mem::swap(&mut x, &mut y);
    }
    if y <= x * SQRT_HALF_EPSILON {
        return x;
    }

    let scale = if x > BIG {
        x *= SCALE_DOWN;
        y *= SCALE_DOWN;
        SCALE_UP
    } else if y < SMALL {
        x *= SCALE_UP;
        y *= SCALE_UP;
        SCALE_DOWN
    } else {
        1.0
    };

    let mut h = x.mul_add(x, y * y).sqrt();
    let h_sq = h * h;
    let x_sq = x * x;
    // The rounding errors of `h²` and `x²` are recovered exactly with fused
    // multiply-adds; one Newton step then removes the error of the sqrt.
    let delta = (-y).mul_add(y, h_sq - x_sq) + h.mul_add(h, -h_sq) - x.mul_add(x, -x_sq);
    h -= delta / (2.0 * h);
    h * scale
}
