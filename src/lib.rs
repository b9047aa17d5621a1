//! Basket Pricer
//!
//! Prices a customer's basket against a product catalogue and a set of
//! promotional offers, producing a sub-total, a discount and a total, each
//! rounded half up to two decimal places.

pub mod basket;
pub mod discounts;
pub mod fixtures;
pub mod offers;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod receipt;
