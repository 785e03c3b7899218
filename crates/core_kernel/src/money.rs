//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Amounts read off scanned documents arrive as free text, so the module
//! also owns the parsing of grouped figures such as `"1,25,000"`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    INR,
    AUD,
    CAD,
    SGD,
    HKD,
}

impl Currency {
    /// Every supported currency, in declaration order
    pub const ALL: [Currency; 10] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CHF,
        Currency::INR,
        Currency::AUD,
        Currency::CAD,
        Currency::SGD,
        Currency::HKD,
    ];

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::INR => "₹",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::SGD => "S$",
            Currency::HKD => "HK$",
        }
    }

    /// Prefix written before amounts in plain-text messages
    pub fn text_prefix(&self) -> &'static str {
        match self {
            Currency::INR => "Rs.",
            other => other.symbol(),
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::INR => "INR",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::SGD => "SGD",
            Currency::HKD => "HKD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

/// A monetary amount with associated currency
///
/// Money uses rust_decimal for precise arithmetic without floating-point errors.
/// Currency amounts are stored with 4 decimal places internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Parses a free-text figure such as `"25,000"` or `" 1,25,000.50 "`
    ///
    /// Thousands separators (`,`) and surrounding whitespace are stripped;
    /// anything else that is not a plain decimal number is rejected. Currency
    /// symbols are not stripped. The amount keeps every digit written, so a
    /// figure just under a threshold never rounds up onto it.
    ///
    /// # Errors
    ///
    /// [`MoneyError::OutOfRange`] for a well-formed number too large to
    /// represent, [`MoneyError::InvalidAmount`] for anything else.
    pub fn parse(text: &str, currency: Currency) -> Result<Self, MoneyError> {
        let digits: String = text.chars().filter(|c| *c != ',').collect();
        let digits = digits.trim();

        match Decimal::from_str(digits) {
            Ok(amount) => Ok(Self { amount, currency }),
            Err(_) if is_plain_number(digits) => Err(MoneyError::OutOfRange(text.to_string())),
            Err(_) => Err(MoneyError::InvalidAmount(text.to_string())),
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Amount with `,` between thousands groups and no trailing zeros,
    /// e.g. `25,000` or `24,999.99999`
    pub fn grouped(&self) -> String {
        let plain = self.amount.abs().normalize().to_string();
        let (whole, fraction) = match plain.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (plain.as_str(), None),
        };

        let mut out = String::with_capacity(plain.len() + whole.len() / 3 + 1);
        if self.is_negative() {
            out.push('-');
        }
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    /// Compares two amounts, failing on currency mismatch
    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

/// Optional sign, digits, at most one decimal point
fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
}
