//! Fixtures
//!
//! Loads catalogues, offers and baskets from YAML files laid out as
//!
//! ```text
//! <base>/catalogues/<name>.yml   products: { baked_beans: 0.99, ... }
//! <base>/offers/<name>.yml       offers:   { baked_beans: { deal: 3-for-2 }, ... }
//! <base>/baskets/<name>.yml      items:    { baked_beans: 4, ... }
//! ```
//!
//! The files are read as loosely-typed YAML so malformed entries are reported
//! with the same errors the pricer uses.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_norway::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

use crate::{
    basket::Basket,
    offers::Offers,
    pricing::{BasketPricer, PricerError},
    products::Catalogue,
};

pub mod basket;
pub mod catalogue;
pub mod offers;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A fixture section was not a mapping
    #[error("Fixture section `{0}` is not a mapping")]
    NotAMapping(&'static str),

    /// No catalogue loaded
    #[error("No catalogue loaded; cannot build a pricer")]
    NoCatalogue,

    /// Invalid catalogue, offer or basket data
    #[error(transparent)]
    Pricer(#[from] PricerError),
}

/// Wrapper for catalogues in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogueFixture {
    /// Map of product key -> unit price
    pub products: Option<Value>,
}

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Map of product key -> offer descriptor
    #[serde(default)]
    pub offers: Option<Value>,
}

/// Wrapper for baskets in YAML
#[derive(Debug, Deserialize)]
pub struct BasketFixture {
    /// Map of product key -> quantity
    #[serde(default)]
    pub items: Option<Value>,
}

/// Catalogue, offers and basket loaded from fixture files
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalogue: Option<Catalogue>,
    offers: Offers,
    basket: Basket,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalogue: None,
            offers: Offers::new(),
            basket: Basket::new(),
        }
    }

    /// Load a catalogue from `catalogues/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an entry
    /// is not a string key with a numeric, positive price.
    pub fn load_catalogue(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogueFixture = read_yaml(&self.file_path("catalogues", name))?;
        let mapping = section(fixture.products.as_ref(), "products")?;

        let catalogue = catalogue::catalogue_from_mapping(&mapping)?;

        debug!(name, products = catalogue.len(), "loaded catalogue");

        self.catalogue = Some(catalogue);

        Ok(self)
    }

    /// Load offers from `offers/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an offer
    /// is malformed.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: OffersFixture = read_yaml(&self.file_path("offers", name))?;
        let mapping = section(fixture.offers.as_ref(), "offers")?;

        self.offers = offers::offers_from_mapping(&mapping)?;

        debug!(name, offers = self.offers.len(), "loaded offers");

        Ok(self)
    }

    /// Load offers from `offers/<name>.yml` if that file exists
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_offers_if_present(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        if self.file_path("offers", name).exists() {
            self.load_offers(name)
        } else {
            debug!(name, "no offers file; pricing without offers");

            Ok(self)
        }
    }

    /// Load a basket from `baskets/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an entry
    /// is not a string key with a positive integer quantity.
    pub fn load_basket(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: BasketFixture = read_yaml(&self.file_path("baskets", name))?;
        let mapping = section(fixture.items.as_ref(), "items")?;

        self.basket = basket::basket_from_mapping(&mapping)?;

        debug!(name, items = self.basket.len(), "loaded basket");

        Ok(self)
    }

    /// Load a complete fixture set (catalogue, offers and basket with the same
    /// name); the offers and basket files are optional
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn load_set(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.load_catalogue(name)?.load_offers_if_present(name)?;

        if self.file_path("baskets", name).exists() {
            self.load_basket(name)?;
        }

        Ok(self)
    }

    /// Load a complete fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_set(name)?;

        Ok(fixture)
    }

    /// The loaded catalogue, if any
    pub fn catalogue(&self) -> Option<&Catalogue> {
        self.catalogue.as_ref()
    }

    /// The loaded offers
    pub fn offers(&self) -> &Offers {
        &self.offers
    }

    /// The loaded basket
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Build a pricer from the loaded catalogue, offers and basket
    ///
    /// # Errors
    ///
    /// - [`FixtureError::NoCatalogue`]: no catalogue has been loaded.
    /// - [`FixtureError::Pricer`]: the loaded data does not validate.
    pub fn pricer(&self) -> Result<BasketPricer, FixtureError> {
        let catalogue = self.catalogue.clone().ok_or(FixtureError::NoCatalogue)?;

        Ok(BasketPricer::with_basket(
            catalogue,
            self.offers.clone(),
            self.basket.clone(),
        )?)
    }

    fn file_path(&self, kind: &str, name: &str) -> PathBuf {
        self.base_path.join(kind).join(format!("{name}.yml"))
    }
}

fn read_yaml<T>(path: &Path) -> Result<T, FixtureError>
where
    T: for<'de> Deserialize<'de>,
{
    let contents = fs::read_to_string(path)?;

    Ok(serde_norway::from_str(&contents)?)
}

/// Fetch a fixture section as a mapping; a missing or empty section is an
/// empty mapping.
fn section(value: Option<&Value>, name: &'static str) -> Result<Mapping, FixtureError> {
    match value {
        None | Some(Value::Null) => Ok(Mapping::new()),
        Some(Value::Mapping(mapping)) => Ok(mapping.clone()),
        Some(_) => Err(FixtureError::NotAMapping(name)),
    }
}

/// Describe a YAML value for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(_) => "a tagged value".to_string(),
    }
}

/// Read a YAML number as an exact decimal.
///
/// The number's textual form is parsed rather than its `f64` value, so `0.99`
/// stays exactly `0.99`.
pub(crate) fn decimal(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };

    let text = number.to_string();

    Decimal::from_str(&text)
        .or_else(|_err| Decimal::from_scientific(&text))
        .ok()
}
