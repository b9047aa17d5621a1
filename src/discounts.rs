//! Discounts
//!
//! Works out how much a single basket line saves under its product's offer.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{
    offers::{Deal, Offer, rate_fraction},
    prices::{Price, round},
};

/// The part of an offer that produced a line discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppliedOffer {
    /// A multi-buy deal whose threshold was met.
    Deal(Deal),

    /// A percentage off the line total.
    Percentage(Percentage),
}

impl fmt::Display for AppliedOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedOffer::Deal(deal) => write!(f, "{deal}"),
            AppliedOffer::Percentage(rate) => {
                write!(f, "{}% off", (rate_fraction(*rate) * Decimal::ONE_HUNDRED).normalize())
            }
        }
    }
}

/// Discount earned by one basket line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDiscount {
    /// Offer that was applied, if any
    pub applied: Option<AppliedOffer>,

    /// Amount taken off the line, rounded to two places
    pub amount: Decimal,
}

impl LineDiscount {
    /// A line without any applicable offer.
    pub fn none() -> Self {
        Self {
            applied: None,
            amount: Decimal::ZERO,
        }
    }
}

/// Calculate the discount for `quantity` units at `unit_price` under `offer`.
///
/// A deal applies once `quantity` reaches its group size and then takes
/// precedence; the percentage is only used when there is no deal or the deal's
/// threshold is not met. `line_total` is the already rounded undiscounted
/// line price.
///
/// Returns `None` if the discount cannot be represented as a [`Decimal`].
pub fn line_discount(
    offer: &Offer,
    quantity: u32,
    unit_price: Price,
    line_total: Decimal,
) -> Option<LineDiscount> {
    if let Some(deal) = offer.deal().filter(|deal| deal.applies_to(quantity)) {
        let free_units = Decimal::from(deal.free_units(quantity));

        return Some(LineDiscount {
            applied: Some(AppliedOffer::Deal(deal)),
            amount: round(free_units.checked_mul(*unit_price)?),
        });
    }

    if let Some(rate) = offer.rate() {
        return Some(LineDiscount {
            applied: Some(AppliedOffer::Percentage(rate)),
            amount: round(line_total.checked_mul(rate_fraction(rate))?),
        });
    }

    Some(LineDiscount::none())
}
