//! Basket Pricer prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    discounts::{AppliedOffer, LineDiscount},
    fixtures::{Fixture, FixtureError},
    offers::{Deal, Offer, OfferError, Offers, discount_rate},
    prices::{Price, round, round_dp},
    pricing::{BasketPricer, PricerError},
    products::{Catalogue, CatalogueError, ProductId},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
