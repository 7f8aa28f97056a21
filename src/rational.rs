//! Rational numbers and bounded reduction.
//!
//! Aspect ratios, frame rates and time bases all travel through the report
//! as [`Rational`] values. [`reduce`] finds the closest fraction whose terms
//! stay under a bound (used for display aspect ratios), while [`simplify`]
//! performs a plain GCD reduction (used for time bases).

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A rational number with 32-bit terms.
///
/// A zero numerator or a zero denominator marks the value as absent for
/// formatting purposes (see [`Rational::is_absent`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rational {
    /// Numerator.
    pub num: i32,
    /// Denominator.
    pub den: i32,
}

impl Rational {
    /// The absent value `0/0`.
    pub const ZERO: Rational = Rational { num: 0, den: 0 };

    /// Create a rational from its terms. No reduction is performed.
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// `true` when either term is zero.
    pub fn is_absent(self) -> bool {
        self.num == 0 || self.den == 0
    }

    /// Convert to a double. A zero denominator yields an infinity or NaN,
    /// exactly as a plain division would.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Compare two rationals by value.
    ///
    /// Returns `None` when the comparison is undefined, i.e. when a
    /// denominator is zero and the cross products do not settle the order
    /// (`0/0` against anything, for example).
    pub fn compare(self, other: Rational) -> Option<Ordering> {
        let cross = self.num as i64 * other.den as i64 - other.num as i64 * self.den as i64;
        if cross != 0 {
            // A negative denominator flips the sign of the cross product.
            let negative = (cross ^ self.den as i64 ^ other.den as i64) < 0;
            return Some(if negative {
                Ordering::Less
            } else {
                Ordering::Greater
            });
        }
        if self.den != 0 && other.den != 0 {
            Some(Ordering::Equal)
        } else if self.num != 0 && other.num != 0 {
            // Both infinities: only the signs can differ.
            Some((self.num < 0).cmp(&(other.num < 0)).reverse())
        } else {
            None
        }
    }

    /// `true` unless both values compare equal.
    pub fn differs_from(self, other: Rational) -> bool {
        self.compare(other) != Some(Ordering::Equal)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Greatest common divisor. `gcd(a, 0) == |a|` and `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a as i64
}

/// Reduce `num / den` to the closest fraction whose terms do not exceed
/// `max`, using continued-fraction expansion.
///
/// Returns the reduced rational and whether the reduction was exact.
pub fn reduce(num: i64, den: i64, max: i64) -> (Rational, bool) {
    let negative = (num < 0) ^ (den < 0);
    let divisor = gcd(num, den);

    let (mut num, mut den) = (num.unsigned_abs() as i64, den.unsigned_abs() as i64);
    if divisor != 0 {
        num /= divisor;
        den /= divisor;
    }

    // Convergents a0 and a1, stored as (numerator, denominator).
    let mut a0: (i64, i64) = (0, 1);
    let mut a1: (i64, i64) = (1, 0);

    if num <= max && den <= max {
        a1 = (num, den);
        den = 0;
    }

    while den != 0 {
        let mut x = num / den;
        let next_den = num - den * x;
        let a2n = x as i128 * a1.0 as i128 + a0.0 as i128;
        let a2d = x as i128 * a1.1 as i128 + a0.1 as i128;

        if a2n > max as i128 || a2d > max as i128 {
            if a1.0 != 0 {
                x = (max - a0.0) / a1.0;
            }
            if a1.1 != 0 {
                x = x.min((max - a0.1) / a1.1);
            }
            // Take the semiconvergent only if it beats the last convergent.
            if den as i128 * (2 * x as i128 * a1.1 as i128 + a0.1 as i128)
                > num as i128 * a1.1 as i128
            {
                a1 = (x * a1.0 + a0.0, x * a1.1 + a0.1);
            }
            break;
        }

        a0 = a1;
        a1 = (a2n as i64, a2d as i64);
        num = den;
        den = next_den;
    }

    let reduced_num = if negative { -a1.0 } else { a1.0 };
    (Rational::new(reduced_num as i32, a1.1 as i32), den == 0)
}

/// Divide both terms by their GCD.
///
/// A `0/0` value has no GCD and is returned unchanged.
pub fn simplify(value: Rational) -> Rational {
    let divisor = gcd(value.num as i64, value.den as i64);
    if divisor == 0 {
        return value;
    }
    Rational::new(
        (value.num as i64 / divisor) as i32,
        (value.den as i64 / divisor) as i32,
    )
}

/// Display aspect ratio of a `width`×`height` picture with the given
/// sample aspect ratio, bounded to 1024×1024 terms.
pub fn display_aspect_ratio(width: i32, height: i32, sample_aspect_ratio: Rational) -> Rational {
    let (dar, _) = reduce(
        width as i64 * sample_aspect_ratio.num as i64,
        height as i64 * sample_aspect_ratio.den as i64,
        1024 * 1024,
    );
    dar
}
