//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every monetary amount is quantized to.
pub const MONEY_PLACES: u32 = 2;

/// A unit price, always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// Creates a new price, or `None` if `value` is zero or negative.
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Price { value })
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

/// Round a monetary amount to [`MONEY_PLACES`], ties away from zero.
pub fn round(value: Decimal) -> Decimal {
    round_dp(value, MONEY_PLACES)
}

/// Round `value` to `places` decimal places using round-half-up.
///
/// Midpoints move away from zero, so `0.005` becomes `0.01` and `-0.005`
/// becomes `-0.01`. This is not banker's rounding.
pub fn round_dp(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}
