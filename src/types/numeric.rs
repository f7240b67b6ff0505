//! Exact-decimal numerics with IEEE-like special states
//!
//! A `Numeric` is an arbitrary-precision decimal tagged with an explicit
//! state: a normal value, negative or positive infinity, or not-a-number.
//! Null is a first-class state of the kind rather than a wrapper. The
//! special states exist so that division by zero can produce a domain
//! value instead of an error.

use crate::error::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The non-null states of a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericState {
    Normal,
    NegativeInfinity,
    PositiveInfinity,
    NotANumber,
}

/// An immutable SQL numeric value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Numeric(Repr);

/// `Small` is a fast path for scale-zero values that fit a 64-bit
/// integer. It never changes observable behavior: every operation that
/// would leave the i64 domain falls back to the decimal representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum Repr {
    Null,
    Small(i64),
    Big(Decimal),
    NegativeInfinity,
    PositiveInfinity,
    NotANumber,
}

fn overflow() -> Error {
    Error::InvalidValue("numeric overflow".into())
}

impl Numeric {
    pub fn null() -> Numeric {
        Numeric(Repr::Null)
    }

    pub fn nan() -> Numeric {
        Numeric(Repr::NotANumber)
    }

    pub fn positive_infinity() -> Numeric {
        Numeric(Repr::PositiveInfinity)
    }

    pub fn negative_infinity() -> Numeric {
        Numeric(Repr::NegativeInfinity)
    }

    pub fn zero() -> Numeric {
        Numeric(Repr::Small(0))
    }

    pub fn one() -> Numeric {
        Numeric(Repr::Small(1))
    }

    pub fn from_i64(value: i64) -> Numeric {
        Numeric(Repr::Small(value))
    }

    pub fn from_decimal(value: Decimal) -> Numeric {
        if value.scale() == 0 {
            if let Some(small) = value.to_i64() {
                return Numeric(Repr::Small(small));
            }
        }
        Numeric(Repr::Big(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.0, Repr::Null)
    }

    /// The state tag, or `None` for a null numeric.
    pub fn state(&self) -> Option<NumericState> {
        match self.0 {
            Repr::Null => None,
            Repr::Small(_) | Repr::Big(_) => Some(NumericState::Normal),
            Repr::NegativeInfinity => Some(NumericState::NegativeInfinity),
            Repr::PositiveInfinity => Some(NumericState::PositiveInfinity),
            Repr::NotANumber => Some(NumericState::NotANumber),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.0, Repr::NotANumber)
    }

    /// True for a normal zero only; nulls and special states are not zero.
    pub fn is_zero(&self) -> bool {
        match self.0 {
            Repr::Small(v) => v == 0,
            Repr::Big(d) => d.is_zero(),
            _ => false,
        }
    }

    /// The decimal payload of a normal value.
    pub fn decimal(&self) -> Option<Decimal> {
        match self.0 {
            Repr::Small(v) => Some(Decimal::from(v)),
            Repr::Big(d) => Some(d),
            _ => None,
        }
    }

    /// The integral payload, when the value is normal and whole.
    pub fn to_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::Small(v) => Some(v),
            Repr::Big(d) if d.fract().is_zero() => d.to_i64(),
            _ => None,
        }
    }

    pub fn add(&self, other: &Numeric) -> Result<Numeric> {
        use Repr::*;
        Ok(match (self.0, other.0) {
            (Null, _) | (_, Null) => Numeric::null(),
            (NotANumber, _) | (_, NotANumber) => Numeric::nan(),
            (PositiveInfinity, NegativeInfinity) | (NegativeInfinity, PositiveInfinity) => {
                Numeric::nan()
            }
            (PositiveInfinity, _) | (_, PositiveInfinity) => Numeric::positive_infinity(),
            (NegativeInfinity, _) | (_, NegativeInfinity) => Numeric::negative_infinity(),
            (Small(a), Small(b)) => match a.checked_add(b) {
                Some(v) => Numeric(Small(v)),
                None => checked(Decimal::from(a).checked_add(Decimal::from(b)))?,
            },
            (Small(a), Big(b)) => checked(Decimal::from(a).checked_add(b))?,
            (Big(a), Small(b)) => checked(a.checked_add(Decimal::from(b)))?,
            (Big(a), Big(b)) => checked(a.checked_add(b))?,
        })
    }

    pub fn subtract(&self, other: &Numeric) -> Result<Numeric> {
        use Repr::*;
        Ok(match (self.0, other.0) {
            (Null, _) | (_, Null) => Numeric::null(),
            (NotANumber, _) | (_, NotANumber) => Numeric::nan(),
            (PositiveInfinity, PositiveInfinity) | (NegativeInfinity, NegativeInfinity) => {
                Numeric::nan()
            }
            (PositiveInfinity, _) | (_, NegativeInfinity) => Numeric::positive_infinity(),
            (NegativeInfinity, _) | (_, PositiveInfinity) => Numeric::negative_infinity(),
            (Small(a), Small(b)) => match a.checked_sub(b) {
                Some(v) => Numeric(Small(v)),
                None => checked(Decimal::from(a).checked_sub(Decimal::from(b)))?,
            },
            (Small(a), Big(b)) => checked(Decimal::from(a).checked_sub(b))?,
            (Big(a), Small(b)) => checked(a.checked_sub(Decimal::from(b)))?,
            (Big(a), Big(b)) => checked(a.checked_sub(b))?,
        })
    }

    pub fn multiply(&self, other: &Numeric) -> Result<Numeric> {
        use Repr::*;
        Ok(match (self.0, other.0) {
            (Null, _) | (_, Null) => Numeric::null(),
            (NotANumber, _) | (_, NotANumber) => Numeric::nan(),
            (PositiveInfinity | NegativeInfinity, b) if is_normal_zero(b) => Numeric::nan(),
            (a, PositiveInfinity | NegativeInfinity) if is_normal_zero(a) => Numeric::nan(),
            (a @ (PositiveInfinity | NegativeInfinity), b)
            | (a, b @ (PositiveInfinity | NegativeInfinity)) => {
                signed_infinity(is_negative(a) != is_negative(b))
            }
            (Small(a), Small(b)) => match a.checked_mul(b) {
                Some(v) => Numeric(Small(v)),
                None => checked(Decimal::from(a).checked_mul(Decimal::from(b)))?,
            },
            (Small(a), Big(b)) => checked(Decimal::from(a).checked_mul(b))?,
            (Big(a), Small(b)) => checked(a.checked_mul(Decimal::from(b)))?,
            (Big(a), Big(b)) => checked(a.checked_mul(b))?,
        })
    }

    /// Division. A zero divisor yields `NotANumber` — never an error and
    /// never null.
    pub fn divide(&self, other: &Numeric) -> Result<Numeric> {
        use Repr::*;
        if other.is_zero() {
            return Ok(Numeric::nan());
        }
        Ok(match (self.0, other.0) {
            (Null, _) | (_, Null) => Numeric::null(),
            (NotANumber, _) | (_, NotANumber) => Numeric::nan(),
            (
                PositiveInfinity | NegativeInfinity,
                PositiveInfinity | NegativeInfinity,
            ) => Numeric::nan(),
            (a @ (PositiveInfinity | NegativeInfinity), b) => {
                signed_infinity(is_negative(a) != is_negative(b))
            }
            (_, PositiveInfinity | NegativeInfinity) => Numeric::zero(),
            (a, b) => match (as_decimal(a), as_decimal(b)) {
                (Some(a), Some(b)) => checked(a.checked_div(b))?,
                _ => Numeric::nan(),
            },
        })
    }

    /// Remainder. A zero divisor yields `NotANumber`, like division.
    pub fn remainder(&self, other: &Numeric) -> Result<Numeric> {
        use Repr::*;
        if other.is_zero() {
            return Ok(Numeric::nan());
        }
        Ok(match (self.0, other.0) {
            (Null, _) | (_, Null) => Numeric::null(),
            (NotANumber, _) | (_, NotANumber) => Numeric::nan(),
            (PositiveInfinity | NegativeInfinity, _) => Numeric::nan(),
            (a, PositiveInfinity | NegativeInfinity) => Numeric(a),
            (Small(a), Small(b)) => match a.checked_rem(b) {
                Some(v) => Numeric(Small(v)),
                None => checked(Decimal::from(a).checked_rem(Decimal::from(b)))?,
            },
            (a, b) => match (as_decimal(a), as_decimal(b)) {
                (Some(a), Some(b)) => checked(a.checked_rem(b))?,
                _ => Numeric::nan(),
            },
        })
    }

    pub fn negate(&self) -> Result<Numeric> {
        use Repr::*;
        Ok(match self.0 {
            Null => Numeric::null(),
            NotANumber => Numeric::nan(),
            PositiveInfinity => Numeric::negative_infinity(),
            NegativeInfinity => Numeric::positive_infinity(),
            Small(v) => match v.checked_neg() {
                Some(n) => Numeric(Small(n)),
                None => checked(Decimal::from(v).checked_mul(Decimal::NEGATIVE_ONE))?,
            },
            Big(d) => Numeric::from_decimal(-d),
        })
    }

    pub fn abs(&self) -> Numeric {
        use Repr::*;
        match self.0 {
            Small(v) if v < 0 => Numeric::from_decimal(Decimal::from(v).abs()),
            Big(d) => Numeric::from_decimal(d.abs()),
            NegativeInfinity => Numeric::positive_infinity(),
            other => Numeric(other),
        }
    }

    /// Square root. Negative operands and negative infinity yield
    /// `NotANumber`.
    pub fn sqrt(&self) -> Numeric {
        use Repr::*;
        match self.0 {
            Null => Numeric::null(),
            NotANumber | NegativeInfinity => Numeric::nan(),
            PositiveInfinity => Numeric::positive_infinity(),
            Small(_) | Big(_) => match self.decimal().and_then(|d| d.sqrt()) {
                Some(root) => Numeric::from_decimal(tidy(root)),
                None => Numeric::nan(),
            },
        }
    }

    /// Base-2 logarithm. Zero yields negative infinity, negative
    /// operands yield `NotANumber`.
    pub fn log2(&self) -> Result<Numeric> {
        use Repr::*;
        Ok(match self.0 {
            Null => Numeric::null(),
            NotANumber | NegativeInfinity => Numeric::nan(),
            PositiveInfinity => Numeric::positive_infinity(),
            Small(_) | Big(_) => {
                if self.is_zero() {
                    return Ok(Numeric::negative_infinity());
                }
                let Some(d) = self.decimal() else {
                    return Ok(Numeric::nan());
                };
                if d.is_sign_negative() {
                    return Ok(Numeric::nan());
                }
                let ln = d.checked_ln().ok_or_else(overflow)?;
                let ln2 = Decimal::TWO.checked_ln().ok_or_else(overflow)?;
                let ratio = ln.checked_div(ln2).ok_or_else(overflow)?;
                Numeric::from_decimal(tidy(ratio))
            }
        })
    }

    pub fn power(&self, exponent: &Numeric) -> Result<Numeric> {
        use Repr::*;
        Ok(match (self.0, exponent.0) {
            (Null, _) | (_, Null) => Numeric::null(),
            (NotANumber, _) | (_, NotANumber) => Numeric::nan(),
            (PositiveInfinity, e @ (Small(_) | Big(_))) => match sign_class(e) {
                Ordering::Equal => Numeric::one(),
                Ordering::Greater => Numeric::positive_infinity(),
                Ordering::Less => Numeric::zero(),
            },
            (NegativeInfinity, e @ (Small(_) | Big(_))) => match sign_class(e) {
                Ordering::Equal => Numeric::one(),
                Ordering::Less => Numeric::zero(),
                Ordering::Greater => match exponent_parity(e) {
                    Some(true) => Numeric::negative_infinity(),
                    Some(false) => Numeric::positive_infinity(),
                    None => Numeric::nan(),
                },
            },
            (b @ (Small(_) | Big(_)), PositiveInfinity) => match magnitude_class(b) {
                Ordering::Greater => Numeric::positive_infinity(),
                Ordering::Equal => Numeric::one(),
                Ordering::Less => Numeric::zero(),
            },
            (b @ (Small(_) | Big(_)), NegativeInfinity) => match magnitude_class(b) {
                Ordering::Greater => Numeric::zero(),
                Ordering::Equal => Numeric::one(),
                Ordering::Less => Numeric::positive_infinity(),
            },
            (PositiveInfinity | NegativeInfinity, PositiveInfinity) => Numeric::positive_infinity(),
            (PositiveInfinity | NegativeInfinity, NegativeInfinity) => Numeric::zero(),
            (b, e) => match (as_decimal(b), as_decimal(e)) {
                (Some(base), Some(exp)) => finite_power(base, exp)?,
                _ => Numeric::nan(),
            },
        })
    }

    pub fn sin(&self) -> Numeric {
        self.trig(Decimal::sin)
    }

    pub fn cos(&self) -> Numeric {
        self.trig(Decimal::cos)
    }

    pub fn tan(&self) -> Numeric {
        self.trig(Decimal::tan)
    }

    fn trig(&self, f: fn(&Decimal) -> Decimal) -> Numeric {
        use Repr::*;
        match self.0 {
            Null => Numeric::null(),
            NotANumber | PositiveInfinity | NegativeInfinity => Numeric::nan(),
            Small(_) | Big(_) => match self.decimal() {
                Some(d) => Numeric::from_decimal(f(&d)),
                None => Numeric::nan(),
            },
        }
    }

    /// Round to the given number of decimal places.
    pub fn round(&self, digits: u32) -> Numeric {
        match self.decimal() {
            Some(d) => Numeric::from_decimal(d.round_dp(digits)),
            None => *self,
        }
    }

    pub fn floor(&self) -> Numeric {
        match self.decimal() {
            Some(d) => Numeric::from_decimal(d.floor()),
            None => *self,
        }
    }

    pub fn ceil(&self) -> Numeric {
        match self.decimal() {
            Some(d) => Numeric::from_decimal(d.ceil()),
            None => *self,
        }
    }

    /// State-aware ordering. `None` when either side is null. A normal
    /// value ranks above negative infinity and below positive infinity
    /// and not-a-number; among the special states the rank is
    /// -Infinity < +Infinity < NaN.
    pub fn compare(&self, other: &Numeric) -> Option<Ordering> {
        use Repr::*;
        match (self.0, other.0) {
            (Null, _) | (_, Null) => None,
            (Small(a), Small(b)) => Some(a.cmp(&b)),
            (Small(a), Big(b)) => Some(Decimal::from(a).cmp(&b)),
            (Big(a), Small(b)) => Some(a.cmp(&Decimal::from(b))),
            (Big(a), Big(b)) => Some(a.cmp(&b)),
            (Small(_) | Big(_), NegativeInfinity) => Some(Ordering::Greater),
            (Small(_) | Big(_), PositiveInfinity | NotANumber) => Some(Ordering::Less),
            (NegativeInfinity, Small(_) | Big(_)) => Some(Ordering::Less),
            (PositiveInfinity | NotANumber, Small(_) | Big(_)) => Some(Ordering::Greater),
            (a, b) => Some(state_rank(a).cmp(&state_rank(b))),
        }
    }

    /// Canonical text form; round-trips through `FromStr` for non-null
    /// values.
    pub fn to_text(&self) -> String {
        match self.0 {
            Repr::Null => "NULL".into(),
            Repr::Small(v) => v.to_string(),
            Repr::Big(d) => d.to_string(),
            Repr::NegativeInfinity => "-Infinity".into(),
            Repr::PositiveInfinity => "Infinity".into(),
            Repr::NotANumber => "NaN".into(),
        }
    }

    pub fn try_parse(text: &str) -> Option<Numeric> {
        text.parse().ok()
    }
}

fn checked(value: Option<Decimal>) -> Result<Numeric> {
    value.map(Numeric::from_decimal).ok_or_else(overflow)
}

/// Rounds away the tail noise of the iterative functions (sqrt, ln) so
/// exact results come out exact, then drops trailing zeros.
fn tidy(value: Decimal) -> Decimal {
    value.round_dp(26).normalize()
}

fn as_decimal(repr: Repr) -> Option<Decimal> {
    match repr {
        Repr::Small(v) => Some(Decimal::from(v)),
        Repr::Big(d) => Some(d),
        _ => None,
    }
}

fn is_normal_zero(repr: Repr) -> bool {
    match repr {
        Repr::Small(v) => v == 0,
        Repr::Big(d) => d.is_zero(),
        _ => false,
    }
}

fn is_negative(repr: Repr) -> bool {
    match repr {
        Repr::Small(v) => v < 0,
        Repr::Big(d) => d.is_sign_negative() && !d.is_zero(),
        Repr::NegativeInfinity => true,
        _ => false,
    }
}

fn signed_infinity(negative: bool) -> Numeric {
    if negative {
        Numeric::negative_infinity()
    } else {
        Numeric::positive_infinity()
    }
}

/// Sign of a finite exponent: Less/Equal/Greater vs. zero.
fn sign_class(repr: Repr) -> Ordering {
    if is_normal_zero(repr) {
        Ordering::Equal
    } else if is_negative(repr) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// `Some(true)` for an odd integer exponent, `Some(false)` for an even
/// one, `None` for a fractional exponent.
fn exponent_parity(repr: Repr) -> Option<bool> {
    let d = as_decimal(repr)?;
    if !d.fract().is_zero() {
        return None;
    }
    let rem = d.abs().checked_rem(Decimal::TWO)?;
    Some(!rem.is_zero())
}

/// |base| compared to one, for infinite exponents.
fn magnitude_class(repr: Repr) -> Ordering {
    match as_decimal(repr) {
        Some(d) => d.abs().cmp(&Decimal::ONE),
        None => Ordering::Equal,
    }
}

fn finite_power(base: Decimal, exp: Decimal) -> Result<Numeric> {
    if base.is_zero() && exp.is_sign_negative() && !exp.is_zero() {
        return Ok(Numeric::nan());
    }
    if base.is_sign_negative() && !base.is_zero() {
        let Some(odd) = exponent_parity(Repr::Big(exp)) else {
            return Ok(Numeric::nan());
        };
        let magnitude = base.abs().checked_powd(exp).ok_or_else(overflow)?;
        let signed = if odd {
            magnitude.checked_mul(Decimal::NEGATIVE_ONE).ok_or_else(overflow)?
        } else {
            magnitude
        };
        return Ok(Numeric::from_decimal(tidy(signed)));
    }
    let raised = base.checked_powd(exp).ok_or_else(overflow)?;
    Ok(Numeric::from_decimal(tidy(raised)))
}

fn state_rank(repr: Repr) -> u8 {
    match repr {
        Repr::NegativeInfinity => 1,
        Repr::PositiveInfinity => 2,
        Repr::NotANumber => 3,
        Repr::Null | Repr::Small(_) | Repr::Big(_) => 0,
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Repr::Null, Repr::Null) => true,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

impl FromStr for Numeric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        match text.to_ascii_lowercase().as_str() {
            "nan" => return Ok(Numeric::nan()),
            "infinity" | "+infinity" | "inf" | "+inf" => return Ok(Numeric::positive_infinity()),
            "-infinity" | "-inf" => return Ok(Numeric::negative_infinity()),
            _ => {}
        }
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map(Numeric::from_decimal)
            .map_err(|_| Error::InvalidValue(format!("invalid numeric literal {:?}", text)))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::from_i64(value)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::from_decimal(value)
    }
}
