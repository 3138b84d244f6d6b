//! The [`Amplitude`] trait: the per-cell scalar every operator works on.
//!
//! Fields are either real (`f64`) or complex ([`Complex64`]). Operators
//! are written once, generically over `Amplitude`, and monomorphised for
//! both element types.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::values::Dtype;

/// A per-cell field value.
///
/// Implemented for `f64` (real fields) and [`Complex64`] (complex fields).
/// Arithmetic follows the usual array semantics: `*` and [`sqrt`] are the
/// element type's own multiplication and principal square root.
///
/// [`sqrt`]: Amplitude::sqrt
pub trait Amplitude:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + 'static
{
    /// The [`Dtype`] tag for buffers of this element type.
    const DTYPE: Dtype;

    /// Lift a real number into this element type.
    fn from_real(re: f64) -> Self;

    /// Absolute value (`|v|`).
    fn magnitude(self) -> f64;

    /// Squared absolute value (`|v|²`), without the square root.
    fn norm_sqr(self) -> f64;

    /// Multiply by a real scalar.
    fn scale(self, k: f64) -> Self;

    /// Principal square root.
    fn sqrt(self) -> Self;

    /// `true` if every component is finite.
    fn is_finite(self) -> bool;
}

impl Amplitude for f64 {
    const DTYPE: Dtype = Dtype::Real;

    #[inline]
    fn from_real(re: f64) -> Self {
        re
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn norm_sqr(self) -> f64 {
        self * self
    }

    #[inline]
    fn scale(self, k: f64) -> Self {
        self * k
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Amplitude for Complex64 {
    const DTYPE: Dtype = Dtype::Complex;

    #[inline]
    fn from_real(re: f64) -> Self {
        Complex64::new(re, 0.0)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn norm_sqr(self) -> f64 {
        Complex64::norm_sqr(&self)
    }

    #[inline]
    fn scale(self, k: f64) -> Self {
        Complex64::new(self.re * k, self.im * k)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Complex64::sqrt(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        Complex64::is_finite(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_magnitude_is_abs() {
        assert_eq!((-3.5f64).magnitude(), 3.5);
        assert_eq!(<f64 as Amplitude>::norm_sqr(-3.0), 9.0);
    }

    #[test]
    fn complex_magnitude_is_modulus() {
        let z = Complex64::new(3.0, 4.0);
        assert_eq!(z.magnitude(), 5.0);
        assert_eq!(Amplitude::norm_sqr(z), 25.0);
    }

    #[test]
    fn complex_sqrt_is_principal_branch() {
        let z = Complex64::new(-4.0, 0.0);
        let r = Amplitude::sqrt(z);
        assert!((r.re - 0.0).abs() < 1e-12);
        assert!((r.im - 2.0).abs() < 1e-12);
    }

    #[test]
    fn from_real_has_zero_imaginary_part() {
        let z = Complex64::from_real(1.25);
        assert_eq!(z, Complex64::new(1.25, 0.0));
        assert_eq!(f64::from_real(1.25), 1.25);
    }

    #[test]
    fn dtype_tags() {
        assert_eq!(<f64 as Amplitude>::DTYPE, Dtype::Real);
        assert_eq!(<Complex64 as Amplitude>::DTYPE, Dtype::Complex);
    }

    #[test]
    fn finiteness() {
        assert!(!Amplitude::is_finite(f64::NAN));
        assert!(!Amplitude::is_finite(Complex64::new(0.0, f64::INFINITY)));
        assert!(Amplitude::is_finite(Complex64::new(1.0, -1.0)));
    }
}
