use std::{fmt, iter::Sum, ops, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{Currency, EngineError};

/// An amount of money as a whole number of cents.
///
/// Every amount handled by Tally goes through this type: entry amounts,
/// running balances, totals and breakdowns. Integer cents keep sums exact, so
/// the last ledger balance always equals the net balance.
///
/// Expenses are stored negative and incomes positive.
///
/// ```rust
/// use engine::MoneyCents;
///
/// let rent: MoneyCents = "-450,5".parse().unwrap();
/// assert_eq!(rent.cents(), -45_050);
/// assert_eq!(rent.to_string(), "-450.50");
/// assert!("3.999".parse::<MoneyCents>().is_err());
/// ```
///
/// On the wire an amount is a plain JSON number of major units (`-10.5`).
/// Decoding also takes strings (`"-10.50"`), which older stored lists contain.
///
/// Parsed and decoded amounts are limited to [`MoneyCents::MAX`] in magnitude,
/// so every accepted amount survives the trip through an `f64`. Sums saturate
/// at the `i64` bounds instead of overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest accepted magnitude: 9 999 999 999 999.99 major units.
    pub const MAX: MoneyCents = MoneyCents(999_999_999_999_999);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// `Some` when the magnitude is within [`MoneyCents::MAX`].
    #[must_use]
    pub const fn bounded(cents: i64) -> Option<Self> {
        if cents.unsigned_abs() <= Self::MAX.0 as u64 {
            Some(Self(cents))
        } else {
            None
        }
    }

    /// Amount in major units. Only for output: never feed it back into sums.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `EUR -10.50`. The currency is a label, no conversion happens.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        format!("{} {self}", currency.code())
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

macro_rules! money_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $saturating:ident) => {
        impl ops::$trait for MoneyCents {
            type Output = MoneyCents;

            fn $method(self, rhs: MoneyCents) -> MoneyCents {
                MoneyCents(self.0.$saturating(rhs.0))
            }
        }

        impl ops::$assign_trait for MoneyCents {
            fn $assign_method(&mut self, rhs: MoneyCents) {
                self.0 = self.0.$saturating(rhs.0);
            }
        }
    };
}

money_op!(Add, add, AddAssign, add_assign, saturating_add);
money_op!(Sub, sub, SubAssign, sub_assign, saturating_sub);

impl ops::Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> MoneyCents {
        MoneyCents(self.0.saturating_neg())
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

fn digits(text: &str) -> Option<&str> {
    (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())).then_some(text)
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses `[+-]units[(.|,)cents]` with at most two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount(format!("'{}' is not an amount", s.trim()));
        let too_large = || EngineError::InvalidAmount(format!("'{}' is too large", s.trim()));

        let text = s.trim();
        if text.is_empty() {
            return Err(EngineError::InvalidAmount("amount is required".to_string()));
        }

        let (sign, unsigned) = match text.as_bytes()[0] {
            b'-' => (-1, &text[1..]),
            b'+' => (1, &text[1..]),
            _ => (1, text),
        };
        let (whole, fraction) = match unsigned.split_once(['.', ',']) {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let whole: i64 = digits(whole)
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| too_large())?;
        let fraction = match fraction.len() {
            0 => 0,
            1 | 2 => {
                let value: i64 = digits(fraction)
                    .ok_or_else(invalid)?
                    .parse()
                    .map_err(|_| invalid())?;
                if fraction.len() == 1 { value * 10 } else { value }
            }
            _ => {
                return Err(EngineError::InvalidAmount(format!(
                    "'{}' has more than two decimals",
                    s.trim()
                )));
            }
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .and_then(|cents| cents.checked_mul(sign))
            .and_then(MoneyCents::bounded)
            .ok_or_else(too_large)
    }
}

impl Serialize for MoneyCents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = MoneyCents;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or decimal string with at most two fractional digits")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        v.checked_mul(100)
            .and_then(MoneyCents::bounded)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Display of f64 is the shortest round-trip decimal, without exponent.
        self.visit_str(&v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
