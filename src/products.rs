//! Products

use std::{borrow::Borrow, fmt};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::prices::Price;

/// Errors raised while building or validating a catalogue.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    /// The catalogue has no products.
    #[error("catalogue has no products")]
    Empty,

    /// A product was registered under an empty identifier.
    #[error("product identifier is empty")]
    EmptyProductId,

    /// A catalogue key was not a string.
    #[error("product key {0} is not a string")]
    NonStringKey(String),

    /// A price could not be read as a number.
    #[error("price {value} of product {product} is not a number")]
    NonNumericPrice {
        /// Product the price belongs to
        product: ProductId,
        /// The offending value
        value: String,
    },

    /// A price was zero or negative.
    #[error("price {price} of product {product} must be greater than zero")]
    NonPositivePrice {
        /// Product the price belongs to
        product: ProductId,
        /// The offending price
        price: Decimal,
    },
}

/// Product identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit prices of every purchasable product.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    prices: FxHashMap<ProductId, Price>,
}

impl Catalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalogue from `(product, price)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogueError`] if any product identifier is empty or any
    /// price is not greater than zero.
    pub fn from_prices<I, K>(prices: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<ProductId>,
    {
        let mut catalogue = Self::new();

        for (product, price) in prices {
            catalogue.insert(product, price)?;
        }

        Ok(catalogue)
    }

    /// Add or replace a product's unit price, returning the previous price.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::EmptyProductId`]: the identifier is empty.
    /// - [`CatalogueError::NonPositivePrice`]: the price is zero or negative.
    pub fn insert(
        &mut self,
        product: impl Into<ProductId>,
        price: Decimal,
    ) -> Result<Option<Price>, CatalogueError> {
        let product = product.into();

        if product.as_str().is_empty() {
            return Err(CatalogueError::EmptyProductId);
        }

        let Some(price) = Price::new(price) else {
            return Err(CatalogueError::NonPositivePrice { product, price });
        };

        Ok(self.prices.insert(product, price))
    }

    /// Unit price of a product, if it is in the catalogue.
    pub fn price(&self, product: &str) -> Option<Price> {
        self.prices.get(product).copied()
    }

    /// Whether the catalogue lists a product.
    pub fn contains(&self, product: &str) -> bool {
        self.prices.contains_key(product)
    }

    /// Number of products in the catalogue.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Check the catalogue can be priced against.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Empty`] if there are no products.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        if self.is_empty() {
            Err(CatalogueError::Empty)
        } else {
            Ok(())
        }
    }
}
