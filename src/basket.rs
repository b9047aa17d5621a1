//! Basket

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::ProductId;

/// Errors related to basket contents.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// A basket key was not a string.
    #[error("basket key {0} is not a string")]
    NonStringKey(String),

    /// A quantity was not an integer.
    #[error("quantity {value} of product {product} is not an integer")]
    NotAnInteger {
        /// Product the quantity belongs to
        product: ProductId,
        /// The offending value
        value: String,
    },

    /// A quantity was zero or negative.
    #[error("quantity {quantity} of product {product} must be greater than zero")]
    NonPositiveQuantity {
        /// Product the quantity belongs to
        product: ProductId,
        /// The offending quantity
        quantity: i64,
    },

    /// A quantity did not fit the supported range.
    #[error("quantity {value} of product {product} is too large")]
    QuantityOutOfRange {
        /// Product the quantity belongs to
        product: ProductId,
        /// The offending value
        value: String,
    },

    /// A line or running total for the basket exceeds what can be priced.
    #[error("price of {quantity} x {product} is too large to represent")]
    AmountOutOfRange {
        /// Product whose line overflowed
        product: ProductId,
        /// Units of the product in the basket
        quantity: u32,
    },

    /// A product is not listed in the catalogue.
    #[error("product {0} is not in the catalogue")]
    UnknownProduct(ProductId),
}

/// A customer's selection: product to quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    items: FxHashMap<ProductId, u32>,
}

impl Basket {
    /// Create an empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a basket from `(product, quantity)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`BasketError::NonPositiveQuantity`] if any quantity is zero.
    pub fn from_quantities<I, K>(quantities: I) -> Result<Self, BasketError>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<ProductId>,
    {
        let mut basket = Self::new();

        for (product, quantity) in quantities {
            basket.insert(product, quantity)?;
        }

        Ok(basket)
    }

    /// Set the quantity of a product, returning the previous quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`BasketError::NonPositiveQuantity`] if `quantity` is zero.
    pub fn insert(
        &mut self,
        product: impl Into<ProductId>,
        quantity: u32,
    ) -> Result<Option<u32>, BasketError> {
        let product = product.into();

        if quantity == 0 {
            return Err(BasketError::NonPositiveQuantity {
                product,
                quantity: 0,
            });
        }

        Ok(self.items.insert(product, quantity))
    }

    /// Quantity of a product in the basket.
    pub fn quantity(&self, product: &str) -> Option<u32> {
        self.items.get(product).copied()
    }

    /// Iterate over products and their quantities.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.items.iter().map(|(product, quantity)| (product, *quantity))
    }

    /// Get the number of distinct products in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_is_empty() {
        let basket = Basket::new();

        assert!(basket.is_empty());
        assert_eq!(basket.len(), 0);
    }

    #[test]
    fn from_quantities_keeps_each_product() -> TestResult {
        let basket = Basket::from_quantities([("baked_beans", 4), ("biscuits", 1)])?;

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.quantity("baked_beans"), Some(4));
        assert_eq!(basket.quantity("biscuits"), Some(1));
        assert_eq!(basket.quantity("sardines"), None);

        Ok(())
    }

    #[test]
    fn insert_rejects_zero_quantity() {
        let mut basket = Basket::new();

        let result = basket.insert("test_good", 0);

        assert_eq!(
            result,
            Err(BasketError::NonPositiveQuantity {
                product: ProductId::from("test_good"),
                quantity: 0,
            })
        );
        assert!(basket.is_empty());
    }

    #[test]
    fn insert_replaces_quantity() -> TestResult {
        let mut basket = Basket::from_quantities([("sardines", 1)])?;

        let previous = basket.insert("sardines", 3)?;

        assert_eq!(previous, Some(1));
        assert_eq!(basket.quantity("sardines"), Some(3));

        Ok(())
    }
}
