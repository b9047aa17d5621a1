//! Pricing
//!
//! [`BasketPricer`] holds a validated catalogue, offers and basket and prices
//! the basket on demand.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    basket::{Basket, BasketError},
    discounts::{LineDiscount, line_discount},
    offers::{OfferError, Offers},
    prices::round,
    products::{Catalogue, CatalogueError, ProductId},
    receipt::{Receipt, ReceiptLine},
};

/// Errors raised when configuring a pricer.
#[derive(Debug, Error, PartialEq)]
pub enum PricerError {
    /// The catalogue is empty or holds an invalid entry.
    #[error("invalid catalogue: {0}")]
    InvalidCatalogue(#[from] CatalogueError),

    /// The basket holds an invalid entry or a product missing from the catalogue.
    #[error("invalid basket: {0}")]
    InvalidBasket(#[from] BasketError),

    /// An offer is malformed.
    #[error("invalid offer: {0}")]
    InvalidOffer(#[from] OfferError),
}

/// Prices a basket against a catalogue and a set of offers.
#[derive(Debug, Clone)]
pub struct BasketPricer {
    catalogue: Catalogue,
    offers: Offers,
    basket: Basket,
    receipt: Receipt,
}

impl BasketPricer {
    /// Create a pricer with an empty basket.
    ///
    /// # Errors
    ///
    /// Returns [`PricerError::InvalidCatalogue`] if the catalogue is empty.
    pub fn new(catalogue: Catalogue, offers: Offers) -> Result<Self, PricerError> {
        Self::with_basket(catalogue, offers, Basket::new())
    }

    /// Create a pricer for an initial basket.
    ///
    /// # Errors
    ///
    /// - [`PricerError::InvalidCatalogue`]: the catalogue is empty.
    /// - [`PricerError::InvalidBasket`]: the basket names a product missing
    ///   from the catalogue, or its amounts are too large to represent.
    pub fn with_basket(
        catalogue: Catalogue,
        offers: Offers,
        basket: Basket,
    ) -> Result<Self, PricerError> {
        catalogue.validate()?;

        for (product, _) in offers.iter() {
            if !catalogue.contains(product.as_str()) {
                debug!(%product, "offer references a product missing from the catalogue");
            }
        }

        let receipt = price_basket(&catalogue, &offers, &basket)?;

        Ok(Self {
            catalogue,
            offers,
            basket,
            receipt,
        })
    }

    /// Replace the basket to be priced.
    ///
    /// The stored basket is left untouched if validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`PricerError::InvalidBasket`] if the basket names a product
    /// missing from the catalogue, or its amounts are too large to represent.
    pub fn set_basket(&mut self, basket: Basket) -> Result<(), PricerError> {
        let receipt = price_basket(&self.catalogue, &self.offers, &basket)?;

        self.basket = basket;
        self.receipt = receipt;

        Ok(())
    }

    /// The catalogue prices are looked up in.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// The offers applied to the basket.
    pub fn offers(&self) -> &Offers {
        &self.offers
    }

    /// The basket currently being priced.
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Price the basket, returning `(sub_total, discount, total)`.
    ///
    /// Every amount is rounded to two places, half up. An empty basket prices
    /// at zero across the board.
    pub fn get_basket_price(&self) -> (Decimal, Decimal, Decimal) {
        self.receipt.prices()
    }

    /// The basket priced line by line.
    pub fn receipt(&self) -> Receipt {
        self.receipt.clone()
    }
}

/// Price every line of `basket`, ordered by product.
///
/// Every product must be in the catalogue and every amount must fit a
/// [`Decimal`].
#[tracing::instrument(skip_all, fields(lines = basket.len()))]
fn price_basket(
    catalogue: &Catalogue,
    offers: &Offers,
    basket: &Basket,
) -> Result<Receipt, BasketError> {
    let mut lines = basket
        .iter()
        .map(|(product, quantity)| price_line(catalogue, offers, product, quantity))
        .collect::<Result<Vec<_>, _>>()?;

    lines.sort_by(|a, b| a.product.cmp(&b.product));

    let totals = lines.iter().try_fold(Totals::default(), |totals, line| {
        totals.add(line).ok_or_else(|| BasketError::AmountOutOfRange {
            product: line.product.clone(),
            quantity: line.quantity,
        })
    })?;

    let (sub_total, discount, total) = totals.into_prices();

    debug!(%sub_total, %discount, %total, "priced basket");

    Ok(Receipt::new(lines, sub_total, discount, total))
}

fn price_line(
    catalogue: &Catalogue,
    offers: &Offers,
    product: &ProductId,
    quantity: u32,
) -> Result<ReceiptLine, BasketError> {
    let unit_price = catalogue
        .price(product.as_str())
        .ok_or_else(|| BasketError::UnknownProduct(product.clone()))?;

    let out_of_range = || BasketError::AmountOutOfRange {
        product: product.clone(),
        quantity,
    };

    let line_total = Decimal::from(quantity)
        .checked_mul(*unit_price)
        .map(round)
        .ok_or_else(out_of_range)?;

    let discount = match offers.get(product.as_str()) {
        Some(offer) => {
            line_discount(offer, quantity, unit_price, line_total).ok_or_else(out_of_range)?
        }
        None => LineDiscount::none(),
    };

    debug!(
        %product,
        quantity,
        %line_total,
        discount = %discount.amount,
        "priced line"
    );

    Ok(ReceiptLine {
        product: product.clone(),
        quantity,
        unit_price,
        line_total,
        discount,
    })
}

/// Running sub-total and discount, re-rounded after every line.
#[derive(Debug, Default)]
struct Totals {
    sub_total: Decimal,
    discount: Decimal,
}

impl Totals {
    fn add(self, line: &ReceiptLine) -> Option<Self> {
        Some(Self {
            sub_total: round(self.sub_total.checked_add(line.line_total)?),
            discount: round(self.discount.checked_add(line.discount.amount)?),
        })
    }

    fn into_prices(self) -> (Decimal, Decimal, Decimal) {
        // Each line's discount is at most its line total, so this cannot go
        // below zero.
        let total = round(self.sub_total - self.discount);

        (self.sub_total, self.discount, total)
    }
}
