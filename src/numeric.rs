//! Exact arbitrary-precision arithmetic.
//!
//! This module provides newtype wrappers over `num-bigint` / `num-rational`
//! so that every statistic in the crate can be evaluated symbolically,
//! without floating-point drift. Conversion to `f64` is always explicit.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use crate::error::{LinarrError, Result};

/// An arbitrary-precision signed integer.
///
/// Addition, subtraction and multiplication are total. Division is offered in
/// two forms: [`checked_div`][Integer::checked_div] returns an error for a
/// zero divisor, while the `/` operator panics and is reserved for divisors
/// that are statically known to be nonzero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    /// Creates an integer from a machine value.
    pub fn new(value: i64) -> Self {
        Integer(BigInt::from(value))
    }

    /// Raises `self` to a non-negative machine exponent.
    pub fn pow(&self, exp: u32) -> Self {
        Integer(Pow::pow(&self.0, exp))
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Integer(self.0.abs())
    }

    /// Truncating division, failing with [`LinarrError::DivisionByZero`] when
    /// the divisor is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.0.is_zero() {
            return Err(LinarrError::DivisionByZero);
        }
        Ok(Integer(&self.0 / &rhs.0))
    }

    /// Lossy conversion to `f64`.
    ///
    /// Values outside the representable range map to infinities.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer(BigInt::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer(BigInt::from(value))
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Integer(BigInt::from(value))
    }
}

impl FromStr for Integer {
    type Err = LinarrError;

    fn from_str(s: &str) -> Result<Self> {
        let value = BigInt::from_str(s)
            .map_err(|e| LinarrError::PreconditionViolation(format!("invalid integer {:?}: {}", s, e)))?;
        Ok(Integer(value))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(self.0 + rhs.0)
    }
}

impl Sub for Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(self.0 - rhs.0)
    }
}

impl Mul for Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(self.0 * rhs.0)
    }
}

impl Div for Integer {
    type Output = Integer;

    /// Truncating division.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`Integer::checked_div`] when the divisor
    /// is not statically known to be nonzero.
    fn div(self, rhs: Self) -> Self::Output {
        assert!(!rhs.0.is_zero(), "division by zero");
        Integer(self.0 / rhs.0)
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-self.0)
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Integer(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Integer(BigInt::one())
    }
}

/// An exact rational number.
///
/// # Invariants
///
/// - The denominator is positive and never zero.
/// - Numerator and denominator are coprime (lowest terms), maintained by
///   every operation.
/// - Comparison is by cross-multiplication, never through `f64`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rational(BigRational);

impl Rational {
    /// Creates the reduced rational `numer / denom`.
    ///
    /// Fails with [`LinarrError::DivisionByZero`] if `denom` is zero.
    pub fn new(numer: Integer, denom: Integer) -> Result<Self> {
        if denom.0.is_zero() {
            return Err(LinarrError::DivisionByZero);
        }
        Ok(Rational(BigRational::new(numer.0, denom.0)))
    }

    /// Creates the reduced rational `numer / denom` from machine values.
    ///
    /// # Panics
    ///
    /// Panics if `denom == 0`. Use [`Rational::new`] for divisors that are
    /// not statically known to be nonzero.
    pub fn from_frac(numer: i64, denom: i64) -> Self {
        assert_ne!(denom, 0, "denominator must be nonzero");
        Rational(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Converts an integer into a rational with denominator 1.
    pub fn from_integer(value: Integer) -> Self {
        Rational(BigRational::from_integer(value.0))
    }

    /// The numerator (sign-carrying).
    pub fn numer(&self) -> Integer {
        Integer(self.0.numer().clone())
    }

    /// The denominator (always positive).
    pub fn denom(&self) -> Integer {
        Integer(self.0.denom().clone())
    }

    /// Division, failing with [`LinarrError::DivisionByZero`] when the
    /// divisor is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.0.is_zero() {
            return Err(LinarrError::DivisionByZero);
        }
        Ok(Rational(&self.0 / &rhs.0))
    }

    /// Raises `self` to a non-negative machine exponent.
    pub fn pow(&self, exp: u32) -> Self {
        // Lowest terms are preserved: gcd(n, d) = 1 implies gcd(n^k, d^k) = 1.
        Rational(BigRational::new_raw(
            Pow::pow(self.0.numer(), exp),
            Pow::pow(self.0.denom(), exp),
        ))
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Rational(self.0.abs())
    }

    /// Lossy conversion to `f64`.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl From<Integer> for Rational {
    fn from(value: Integer) -> Self {
        Rational::from_integer(value)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational(BigRational::from_integer(BigInt::from(value)))
    }
}

impl FromStr for Rational {
    type Err = LinarrError;

    /// Parses `"n"` or `"n/d"` with arbitrary-precision parts.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            None => {
                let numer = s.parse::<Integer>()?;
                Ok(Rational::from_integer(numer))
            }
            Some((n, d)) => {
                let numer = n.parse::<Integer>()?;
                let denom = d.parse::<Integer>()?;
                Rational::new(numer, denom)
            }
        }
    }
}

impl fmt::Display for Rational {
    /// Prints `n/d`, or just `n` when the denominator is 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(self.0 + rhs.0)
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(self.0 - rhs.0)
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(self.0 * rhs.0)
    }
}

impl Div for Rational {
    type Output = Rational;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`Rational::checked_div`] when the
    /// divisor is not statically known to be nonzero.
    fn div(self, rhs: Self) -> Self::Output {
        assert!(!rhs.0.is_zero(), "division by zero");
        Rational(self.0 / rhs.0)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-self.0)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational(BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational(BigRational::one())
    }
}
