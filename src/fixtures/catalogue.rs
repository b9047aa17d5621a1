//! Catalogue Fixtures

use serde_norway::Mapping;

use crate::{
    fixtures::{decimal, describe},
    pricing::PricerError,
    products::{Catalogue, CatalogueError, ProductId},
};

/// Build a catalogue from a YAML mapping of product key -> unit price.
///
/// # Errors
///
/// Returns [`PricerError::InvalidCatalogue`] if a key is not a string, a
/// price is not a number, or a price is not greater than zero.
pub fn catalogue_from_mapping(mapping: &Mapping) -> Result<Catalogue, PricerError> {
    let mut catalogue = Catalogue::new();

    for (key, value) in mapping {
        let product = key
            .as_str()
            .ok_or_else(|| CatalogueError::NonStringKey(describe(key)))?;

        let price = decimal(value).ok_or_else(|| CatalogueError::NonNumericPrice {
            product: ProductId::from(product),
            value: describe(value),
        })?;

        catalogue.insert(product, price)?;
    }

    Ok(catalogue)
}
