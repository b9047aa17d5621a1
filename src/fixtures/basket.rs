//! Basket Fixtures

use serde_norway::{Mapping, Value};

use crate::{
    basket::{Basket, BasketError},
    fixtures::describe,
    pricing::PricerError,
    products::ProductId,
};

/// Build a basket from a YAML mapping of product key -> quantity.
///
/// Products are not checked against a catalogue here; the pricer does that.
///
/// # Errors
///
/// Returns [`PricerError::InvalidBasket`] if a key is not a string or a
/// quantity is not a positive integer.
pub fn basket_from_mapping(mapping: &Mapping) -> Result<Basket, PricerError> {
    let mut basket = Basket::new();

    for (key, value) in mapping {
        let product = key
            .as_str()
            .ok_or_else(|| BasketError::NonStringKey(describe(key)))?;

        basket.insert(product, quantity(product, value)?)?;
    }

    Ok(basket)
}

fn quantity(product: &str, value: &Value) -> Result<u32, BasketError> {
    let not_an_integer = || BasketError::NotAnInteger {
        product: ProductId::from(product),
        value: describe(value),
    };

    let Value::Number(number) = value else {
        return Err(not_an_integer());
    };

    if let Some(quantity) = number.as_u64() {
        return u32::try_from(quantity).map_err(|_err| BasketError::QuantityOutOfRange {
            product: ProductId::from(product),
            value: describe(value),
        });
    }

    match number.as_i64() {
        Some(quantity) => Err(BasketError::NonPositiveQuantity {
            product: ProductId::from(product),
            quantity,
        }),
        None => Err(not_an_integer()),
    }
}
