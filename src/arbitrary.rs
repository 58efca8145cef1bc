//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::{Complex, Cubic, Poly, Quadratic, Quartic};

type Result<T> = std::result::Result<T, arbitrary::Error>;

fn check_finite(f: f64) -> Result<f64> {
    if f.is_finite() {
        Ok(f)
    } else {
        Err(arbitrary::Error::IncorrectFormat)
    }
}

/// Generate any finite float, including subnormals and huge values.
pub fn finite_float(u: &mut Unstructured<'_>) -> Result<f64> {
    check_finite(u.arbitrary()?)
}

/// Generate a finite float, but give it a chance to be close to another float.
pub fn another_finite_float(orig: f64, u: &mut Unstructured<'_>) -> Result<f64> {
    close_or(orig, u, finite_float)
}

/// Generate a float between `2^-30` and `2^30` in absolute value (or zero).
///
/// Polynomials built from these have coefficients that are comfortably
/// finite, and their roots don't span so many orders of magnitude that no
/// error bound makes sense.
pub fn moderate_float(u: &mut Unstructured<'_>) -> Result<f64> {
    const MANTISSA: i64 = 1 << 20;
    let mantissa = u.int_in_range(-MANTISSA..=MANTISSA)? as f64 / MANTISSA as f64;
    let exp: i32 = u.int_in_range(-30..=30)?;
    Ok(mantissa * 2.0f64.powi(exp))
}

fn another_moderate_float(orig: f64, u: &mut Unstructured<'_>) -> Result<f64> {
    close_or(orig, u, moderate_float)
}

fn close_or(
    orig: f64,
    u: &mut Unstructured<'_>,
    other: impl FnOnce(&mut Unstructured<'_>) -> Result<f64>,
) -> Result<f64> {
    let close: bool = u.arbitrary()?;
    if close {
        let ulps: i32 = u.int_in_range(-32..=32)?;
        let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
        check_finite(orig * scale)
    } else {
        other(u)
    }
}

/// Generate an arbitrary finite complex number.
pub fn complex(u: &mut Unstructured<'_>) -> Result<Complex> {
    let re = finite_float(u)?;
    let im = another_finite_float(re, u)?;
    Ok(Complex::new(re, im))
}

/// Generate an arbitrary quadratic polynomial.
pub fn quadratic(u: &mut Unstructured<'_>) -> Result<Quadratic> {
    poly(u)
}

/// Generate an arbitrary cubic polynomial.
pub fn cubic(u: &mut Unstructured<'_>) -> Result<Cubic> {
    poly(u)
}

/// Generate an arbitrary quartic polynomial.
pub fn quartic(u: &mut Unstructured<'_>) -> Result<Quartic> {
    poly(u)
}

/// Generate a polynomial of degree `N - 1`, either from its coefficients or
/// from its roots.
///
/// When generating from roots there's a bias towards almost-repeated roots,
/// and roots can be real or come in complex conjugate pairs.
pub fn poly<const N: usize>(u: &mut Unstructured<'_>) -> Result<Poly<N>> {
    assert!(N >= 2);

    let use_coeffs: bool = u.arbitrary()?;
    let mut coeffs = [0.0; N];
    if use_coeffs {
        coeffs[0] = moderate_float(u)?;
        for i in 1..N {
            coeffs[i] = another_moderate_float(coeffs[i - 1], u)?;
        }
    } else {
        coeffs[0] = 1.0;
        let mut degree = 0;
        let mut re = moderate_float(u)?;
        while degree < N - 1 {
            let pair = degree + 2 < N && u.arbitrary::<bool>()?;
            if pair {
                let im = another_moderate_float(re, u)?;
                mul_quadratic(&mut coeffs, -2.0 * re, re * re + im * im);
                degree += 2;
            } else {
                mul_linear(&mut coeffs, re);
                degree += 1;
            }
            re = another_moderate_float(re, u)?;
        }

        let scale = moderate_float(u)?;
        for c in &mut coeffs {
            *c *= scale;
        }
    }

    for &c in &coeffs {
        check_finite(c)?;
    }
    Ok(Poly::new(coeffs))
}

// Multiplies the polynomial in `coeffs` by (x - root).
// (Only correct if the last coefficient is zero.)
fn mul_linear<const N: usize>(coeffs: &mut [f64; N], root: f64) {
    for i in (1..N).rev() {
        coeffs[i] = coeffs[i - 1] - root * coeffs[i];
    }
    coeffs[0] *= -root;
}

// Multiplies the polynomial in `coeffs` by (x^2 + b x + c).
// (Only correct if the last two coefficients are zero.)
fn mul_quadratic<const N: usize>(coeffs: &mut [f64; N], b: f64, c: f64) {
    for i in (0..N).rev() {
        let mut acc = c * coeffs[i];
        if i >= 1 {
            acc += b * coeffs[i - 1];
        }
        if i >= 2 {
            acc += coeffs[i - 2];
        }
        coeffs[i] = acc;
    }
}
