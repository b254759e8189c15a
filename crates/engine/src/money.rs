use std::fmt;

use serde::{Serialize, Serializer};

/// The only currency prefix accepted on price text.
pub const CURRENCY_SYMBOL: char = '$';

/// An amount in integer minor units (cents).
///
/// Prices and revenues never pass through f64, so a revenue such as
/// `$18000.00 × 10` is exactly `180000.00` and ties compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Parse currency text such as `"$1234.56"`.
    ///
    /// The symbol is mandatory. The remainder is a plain decimal with at most
    /// two fractional digits; no grouping separators, no exponent. Parsing is
    /// locale-independent: `.` is always the decimal point.
    pub fn parse_price(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let rest = s
            .strip_prefix(CURRENCY_SYMBOL)
            .ok_or_else(|| format!("missing '{CURRENCY_SYMBOL}' prefix"))?;
        parse_decimal_cents(rest).map(Self::from_cents)
    }

    /// `self × qty`, or `None` on overflow.
    pub fn checked_mul(self, qty: u64) -> Option<Self> {
        let product = i128::from(self.cents).checked_mul(i128::from(qty))?;
        i64::try_from(product).ok().map(Self::from_cents)
    }

    /// Decimal text without the currency symbol, always two fractional digits.
    pub fn to_decimal_string(self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.to_decimal_string())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

/// "1234.56", "1234.5", "1234", "-12.00" → cents.
fn parse_decimal_cents(s: &str) -> Result<i64, String> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("bad whole part '{whole}'"));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("bad fractional part '{frac}'"));
    }
    if frac.len() > 2 {
        return Err(format!("too many decimal places: {}", frac.len()));
    }

    let units: i64 = whole.parse().map_err(|e| format!("bad whole part: {e}"))?;
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|e| format!("bad fractional part: {e}"))? * 10,
        _ => frac.parse().map_err(|e| format!("bad fractional part: {e}"))?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac_cents))
        .ok_or_else(|| "amount too large".to_string())?;
    Ok(if negative { -cents } else { cents })
}
