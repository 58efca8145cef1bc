use std::hash::{Hash, Hasher};

use crate::hypot;

/// A complex number with `f64` components.
///
/// There is no normalization: either component can be any `f64`, including
/// signed zeros, infinities and NaN.
///
/// Equality (and hashing) compares bit patterns, not IEEE-754 values. So
/// `Complex::new(-0.0, 0.0) != Complex::ZERO`, but a NaN component compares
/// equal to an identical NaN. This makes `Complex` usable as a map key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const MINUS_ONE: Complex = Complex::new(-1.0, 0.0);
    pub const I: Complex = Complex::new(0.0, 1.0);
    pub const MINUS_I: Complex = Complex::new(0.0, -1.0);

    pub const fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    /// A complex number on the real axis.
    pub const fn real(re: f64) -> Complex {
        Complex { re, im: 0.0 }
    }

    /// Builds `r·(cos φ, sin φ)`.
    pub fn from_polar(r: f64, phi: f64) -> Complex {
        let (sin, cos) = phi.sin_cos();
        Complex::new(r * cos, r * sin)
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    /// The distance from the origin, computed with [`hypot`] so that it
    /// neither overflows nor underflows unless the result does.
    pub fn norm(&self) -> f64 {
        hypot(self.re, self.im)
    }

    /// The squared norm, computed naively.
    pub fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// The argument, in `[-π, π]` (the endpoints only for signed zeros).
    pub fn phi(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Is the imaginary part exactly zero?
    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    /// Is the real part exactly zero?
    pub fn is_imaginary(&self) -> bool {
        self.re == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn plus(self, rhs: impl Into<Complex>) -> Complex {
        self + rhs.into()
    }

    pub fn minus(self, rhs: impl Into<Complex>) -> Complex {
        self - rhs.into()
    }

    pub fn times(self, rhs: impl Into<Complex>) -> Complex {
        self * rhs.into()
    }

    /// Division by a complex number.
    ///
    /// Dividing by zero is done componentwise: `self.re / 0.0` and
    /// `self.im / 0.0`. So `ONE / ZERO` is `(∞, NaN)` and `ZERO / ZERO` is
    /// `(NaN, NaN)`.
    pub fn divide_by(self, rhs: impl Into<Complex>) -> Complex {
        self / rhs.into()
    }

    /// `1 / self`, except that the reciprocal of zero is `(∞, ∞)`.
    pub fn recip(self) -> Complex {
        if self.re == 0.0 && self.im == 0.0 {
            Complex::new(f64::INFINITY, f64::INFINITY)
        } else {
            Complex::ONE / self
        }
    }

    pub fn conj(self) -> Complex {
        Complex::new(self.re, -self.im)
    }

    /// Rotates counter-clockwise around the origin by `angle` radians.
    pub fn rotate(self, angle: f64) -> Complex {
        let (sin, cos) = angle.sin_cos();
        Complex::new(
            self.re * cos - self.im * sin,
            self.re * sin + self.im * cos,
        )
    }

    /// Multiplies by `i`, without the rounding or NaN-generation of a full
    /// complex multiplication.
    pub fn mul_i(self) -> Complex {
        Complex::new(-self.im, self.re)
    }

    /// Multiplies by `-i`.
    pub fn mul_minus_i(self) -> Complex {
        Complex::new(self.im, -self.re)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Complex) -> bool {
        self.re.to_bits() == other.re.to_bits() && self.im.to_bits() == other.im.to_bits()
    }
}

impl Eq for Complex {}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.to_bits().hash(state);
        self.im.to_bits().hash(state);
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Complex {
        Complex::real(re)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Complex {
        Complex::new(re, im)
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl std::ops::Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl std::ops::Add<Complex> for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl std::ops::Add<f64> for Complex {
    type Output = Complex;

    fn add(self, rhs: f64) -> Complex {
        Complex::new(self.re + rhs, self.im)
    }
}

impl std::ops::Sub<Complex> for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl std::ops::Sub<f64> for Complex {
    type Output = Complex;

    fn sub(self, rhs: f64) -> Complex {
        Complex::new(self.re - rhs, self.im)
    }
}

impl std::ops::Mul<Complex> for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl std::ops::Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl std::ops::Mul<Complex> for f64 {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        rhs * self
    }
}

impl std::ops::Div<Complex> for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        if rhs.re == 0.0 && rhs.im == 0.0 {
            if self.re == 0.0 && self.im == 0.0 {
                return Complex::new(f64::NAN, f64::NAN);
            }
            return Complex::new(self.re / 0.0, self.im / 0.0);
        }

        // Smith's algorithm: divide through by the larger component of the
        // divisor, so that we never square anything.
        if rhs.re.abs() >= rhs.im.abs() {
            let ratio = rhs.im / rhs.re;
            let denom = rhs.re + rhs.im * ratio;
            Complex::new(
                (self.re + self.im * ratio) / denom,
                (self.im - self.re * ratio) / denom,
            )
        } else {
            let ratio = rhs.re / rhs.im;
            let denom = rhs.re * ratio + rhs.im;
            Complex::new(
                (self.re * ratio + self.im) / denom,
                (self.im * ratio - self.re) / denom,
            )
        }
    }
}

impl std::ops::Div<f64> for Complex {
    type Output = Complex;

    fn div(self, rhs: f64) -> Complex {
        Complex::new(self.re / rhs, self.im / rhs)
    }
}

impl std::ops::AddAssign<Complex> for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<Complex> for Complex {
    fn sub_assign(&mut self, rhs: Complex) {
        *self = *self - rhs;
    }
}

impl std::ops::MulAssign<Complex> for Complex {
    fn mul_assign(&mut self, rhs: Complex) {
        *self = *self * rhs;
    }
}

impl std::ops::MulAssign<f64> for Complex {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl std::ops::DivAssign<Complex> for Complex {
    fn div_assign(&mut self, rhs: Complex) {
        *self = *self / rhs;
    }
}

impl std::ops::DivAssign<f64> for Complex {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}
