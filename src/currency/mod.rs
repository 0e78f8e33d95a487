//! Arbitrary-magnitude currency for long idle sessions.
//!
//! `Coin` wraps a nonnegative big integer and round-trips exactly through
//! its decimal string form, which is also how amounts are persisted. Only
//! integral amounts are ever produced by the game, so there is no
//! fractional representation to worry about. Subtraction clamps at zero:
//! underflow is a caller-side state bug, not an arithmetic error, and the
//! command boundary warns about it instead of panicking.

use std::fmt;

use num_bigint::BigUint;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coin(BigUint);

impl Coin {
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    /// Parse a decimal string. Malformed or empty input degrades to zero so
    /// that hydrating a damaged save never fails.
    pub fn from_text(text: &str) -> Self {
        text.trim()
            .parse::<BigUint>()
            .map(Self)
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::default()
    }

    pub fn add(&self, other: &Coin) -> Coin {
        Coin(&self.0 + &other.0)
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(&self, other: &Coin) -> Coin {
        if self.0 >= other.0 {
            Coin(&self.0 - &other.0)
        } else {
            Coin::zero()
        }
    }

    pub fn mul(&self, factor: u64) -> Coin {
        Coin(&self.0 * factor)
    }

    /// Integer division. Dividing by zero yields zero rather than
    /// panicking; no game path produces a zero divisor.
    #[allow(dead_code)]
    pub fn div(&self, divisor: u64) -> Coin {
        if divisor == 0 {
            Coin::zero()
        } else {
            Coin(&self.0 / divisor)
        }
    }
}

impl From<u64> for Coin {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Format an amount with thousands separators for display, e.g. "1,234g".
pub fn format_gold(amount: &Coin) -> String {
    let s = amount.to_string();
    let mut result = String::new();
    let digits: Vec<char> = s.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push('g');
    result
}
