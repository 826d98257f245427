use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Fixed-point scalar with 6 decimal places of precision.
///
/// Persisted entity values (exhaustion, skill, hit points, money) are carried
/// as `Scalar`; per-turn stats decode them to `f64`. Serialized as a plain
/// JSON number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Scalar(i64);

impl Scalar {
    pub const SCALE: i64 = 1_000_000;

    pub fn from_f64(value: f64) -> Self {
        Self((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(value * Self::SCALE)
    }

    pub fn from_u32(value: u32) -> Self {
        Self((value as i64) * Self::SCALE)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Scalar> for f64 {
    fn from(value: Scalar) -> Self {
        value.to_f64()
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

// Products of two large raws overflow i64, so widen before rescaling.
impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(((self.0 as i128 * rhs.0 as i128) / Self::SCALE as i128) as i64)
    }
}

impl Div for Scalar {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(((self.0 as i128 * Self::SCALE as i128) / rhs.0 as i128) as i64)
    }
}

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, value| acc + value)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_f64())
    }
}

pub fn scalar_from_f64(value: f64) -> Scalar {
    Scalar::from_f64(value)
}

pub fn scalar_zero() -> Scalar {
    Scalar::zero()
}
