//! Offers
//!
//! Promotional rules attached to individual products. A product may carry a
//! multi-buy [`Deal`], a percentage discount on its line total, or both.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::ProductId;

pub mod deal;

pub use deal::Deal;

/// Errors raised while building offers.
#[derive(Debug, Error, PartialEq)]
pub enum OfferError {
    /// An offer key was not a string.
    #[error("offer key {0} is not a string")]
    NonStringKey(String),

    /// An offer was not a mapping of offer fields.
    #[error("offer for product {product} is not a mapping: {value}")]
    NotADescriptor {
        /// Product the offer belongs to
        product: ProductId,
        /// The offending value
        value: String,
    },

    /// An offer carried a field other than `deal` or `discount`.
    #[error("offer for product {product} has unknown field {field}")]
    UnknownField {
        /// Product the offer belongs to
        product: ProductId,
        /// The unrecognised field
        field: String,
    },

    /// A deal was not written as `N-for-M`.
    #[error("deal {0} is not of the form N-for-M")]
    MalformedDeal(String),

    /// A deal's terms do not give anything away.
    #[error("deal {buy}-for-{pay} must satisfy {buy} > {pay} >= 1")]
    InvalidDealTerms {
        /// Units in one deal group
        buy: u32,
        /// Units charged per deal group
        pay: u32,
    },

    /// A discount rate could not be read as a number.
    #[error("discount rate {0} is not a number")]
    NonNumericRate(String),

    /// A discount rate was outside `[0, 1)`.
    #[error("discount rate {0} must be at least 0 and below 1")]
    RateOutOfRange(Decimal),
}

/// Build a discount rate, checking it lies in `[0, 1)`.
///
/// # Errors
///
/// - [`OfferError::RateOutOfRange`]: the rate is negative or at least 1.
/// - [`OfferError::NonNumericRate`]: the rate cannot be represented as a percentage.
pub fn discount_rate(rate: Decimal) -> Result<Percentage, OfferError> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(OfferError::RateOutOfRange(rate));
    }

    let text = rate.normalize().to_string();

    Percentage::try_from(text.as_str()).map_err(|_err| OfferError::NonNumericRate(text))
}

/// Express a rate as a decimal fraction, e.g. `0.25`.
pub fn rate_fraction(rate: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the inner Decimal
    rate * Decimal::ONE
}

/// Offer attached to one product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Offer {
    /// No promotion.
    #[default]
    None,

    /// Percentage off the line total (e.g. "25% off").
    Percentage(Percentage),

    /// Multi-buy deal (e.g. "3-for-2").
    Deal(Deal),

    /// Both kinds; the deal wins whenever its threshold is met.
    Both(Deal, Percentage),
}

impl Offer {
    /// Combine optional offer parts into a single offer.
    pub fn from_parts(deal: Option<Deal>, rate: Option<Percentage>) -> Self {
        match (deal, rate) {
            (None, None) => Offer::None,
            (None, Some(rate)) => Offer::Percentage(rate),
            (Some(deal), None) => Offer::Deal(deal),
            (Some(deal), Some(rate)) => Offer::Both(deal, rate),
        }
    }

    /// The multi-buy deal, if any.
    pub fn deal(&self) -> Option<Deal> {
        match self {
            Offer::Deal(deal) | Offer::Both(deal, _) => Some(*deal),
            Offer::None | Offer::Percentage(_) => None,
        }
    }

    /// The percentage discount, if any.
    pub fn rate(&self) -> Option<Percentage> {
        match self {
            Offer::Percentage(rate) | Offer::Both(_, rate) => Some(*rate),
            Offer::None | Offer::Deal(_) => None,
        }
    }
}

/// Offers keyed by product.
#[derive(Debug, Clone, Default)]
pub struct Offers {
    offers: FxHashMap<ProductId, Offer>,
}

impl Offers {
    /// Create an empty set of offers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an offer to a product, returning any offer it replaces.
    pub fn insert(&mut self, product: impl Into<ProductId>, offer: Offer) -> Option<Offer> {
        self.offers.insert(product.into(), offer)
    }

    /// Offer for a product, if any.
    pub fn get(&self, product: &str) -> Option<&Offer> {
        self.offers.get(product)
    }

    /// Iterate over products and their offers.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &Offer)> {
        self.offers.iter()
    }

    /// Number of products with an offer.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if there are no offers.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

impl<K: Into<ProductId>> FromIterator<(K, Offer)> for Offers {
    fn from_iter<I: IntoIterator<Item = (K, Offer)>>(iter: I) -> Self {
        Self {
            offers: iter
                .into_iter()
                .map(|(product, offer)| (product.into(), offer))
                .collect(),
        }
    }
}
