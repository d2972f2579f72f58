use crate::{Error, Result};
use num_traits::ToPrimitive;
use std::fmt;

/// How [Transform::inverse_with_rounding_mode] turns a scaled value into an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Drop the fractional part, moving toward zero. This is what the codec uses.
    #[default]
    TowardZero,
    /// Round half away from zero.
    Nearest,
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceil,
}

impl RoundingMode {
    fn apply(self, n: f64) -> f64 {
        match self {
            RoundingMode::TowardZero => n.trunc(),
            RoundingMode::Nearest => n.round(),
            RoundingMode::Floor => n.floor(),
            RoundingMode::Ceil => n.ceil(),
        }
    }
}

/// A scale and an offset that quantize one axis of real coordinates into i32s.
///
/// `real = raw * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The scale.
    pub scale: f64,
    /// The offset.
    pub offset: f64,
}

impl Transform {
    /// Applies this transform to an i32, returning a float.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(3., transform.direct(1));
    /// ```
    pub fn direct(&self, n: i32) -> f64 {
        self.scale * f64::from(n) + self.offset
    }

    /// Applies the inverse transform, truncating toward zero.
    ///
    /// Returns an error if the resultant value can't be represented as an i32.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(0, transform.inverse(2.9).unwrap());
    /// assert_eq!(-1, transform.inverse(-2.9).unwrap());
    /// assert!(transform.inverse(1e12).is_err());
    /// ```
    pub fn inverse(&self, n: f64) -> Result<i32> {
        self.inverse_with_rounding_mode(n, RoundingMode::TowardZero)
    }

    /// Applies the inverse transform with an explicit rounding mode.
    ///
    /// A quotient within floating point error of an integer is taken to be that integer, so a value that
    /// was produced by [Transform::direct] always comes back to the same i32 regardless of mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use lasfile::{RoundingMode, Transform};
    /// let transform = Transform { scale: 0.5, offset: 0. };
    /// assert_eq!(3, transform.inverse_with_rounding_mode(1.3, RoundingMode::Ceil).unwrap());
    /// assert_eq!(3, transform.inverse_with_rounding_mode(1.3, RoundingMode::Nearest).unwrap());
    /// assert_eq!(2, transform.inverse_with_rounding_mode(1.3, RoundingMode::Floor).unwrap());
    /// ```
    pub fn inverse_with_rounding_mode(&self, n: f64, rounding_mode: RoundingMode) -> Result<i32> {
        let quotient = (n - self.offset) / self.scale;
        let nearest = quotient.round();
        let tolerance =
            4. * f64::EPSILON * ((n.abs() + self.offset.abs()) / self.scale.abs() + nearest.abs());
        let quantized = if (quotient - nearest).abs() <= tolerance {
            nearest
        } else {
            rounding_mode.apply(quotient)
        };
        quantized.to_i32().ok_or(Error::InverseTransform {
            value: n,
            transform: *self,
        })
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            scale: 0.001,
            offset: 0.,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} * x + {}`", self.scale, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large() {
        let transform = Transform::default();
        let n = i32::MAX as f64 * transform.scale + 1.;
        assert!(transform.inverse(n).is_err());
    }

    #[test]
    fn too_small() {
        let transform = Transform::default();
        let n = i32::MIN as f64 * transform.scale - 1.;
        assert!(transform.inverse(n).is_err());
    }

    #[test]
    fn not_a_number() {
        assert!(Transform::default().inverse(f64::NAN).is_err());
    }

    #[test]
    fn truncates_toward_zero() {
        let transform = Transform {
            scale: 0.01,
            offset: 0.,
        };
        assert_eq!(123, transform.inverse(1.2399).unwrap());
        assert_eq!(-123, transform.inverse(-1.2399).unwrap());
    }

    #[test]
    fn direct_then_inverse() {
        let transform = Transform {
            scale: 0.001,
            offset: 5000.,
        };
        for raw in [-1_000_000, -299, -1, 0, 1, 29, 299, 123_456_789] {
            assert_eq!(raw, transform.inverse(transform.direct(raw)).unwrap());
        }
        let transform = Transform {
            scale: 0.01,
            offset: 0.,
        };
        for raw in 0..1000 {
            assert_eq!(raw, transform.inverse(transform.direct(raw)).unwrap());
        }
    }

    #[test]
    fn offset() {
        let transform = Transform {
            scale: 0.01,
            offset: 100.,
        };
        assert_eq!(101., transform.direct(100));
        assert_eq!(100, transform.inverse(101.).unwrap());
    }

    #[test]
    fn display() {
        let transform = Transform {
            scale: 0.5,
            offset: 2.,
        };
        assert_eq!("`0.5 * x + 2`", transform.to_string());
    }
}
