//! Offer Fixtures

use serde_norway::{Mapping, Value};

use crate::{
    fixtures::{decimal, describe},
    offers::{Deal, Offer, OfferError, Offers, discount_rate},
    pricing::PricerError,
    products::ProductId,
};

/// Build offers from a YAML mapping of product key -> offer descriptor.
///
/// A descriptor is a mapping with an optional `deal` (`"N-for-M"`) and an
/// optional `discount` (a rate in `[0, 1)`):
///
/// ```yaml
/// baked_beans: { deal: 3-for-2, discount: 0.1 }
/// sardines: { discount: 0.25 }
/// ```
///
/// # Errors
///
/// Returns [`PricerError::InvalidOffer`] if a key is not a string, a
/// descriptor is not a mapping or has fields other than `deal` and
/// `discount`, or either field is malformed.
pub fn offers_from_mapping(mapping: &Mapping) -> Result<Offers, PricerError> {
    let mut offers = Offers::new();

    for (key, value) in mapping {
        let product = key
            .as_str()
            .ok_or_else(|| OfferError::NonStringKey(describe(key)))?;

        let Value::Mapping(descriptor) = value else {
            return Err(OfferError::NotADescriptor {
                product: ProductId::from(product),
                value: describe(value),
            }
            .into());
        };

        offers.insert(product, offer_from_descriptor(product, descriptor)?);
    }

    Ok(offers)
}

fn offer_from_descriptor(product: &str, descriptor: &Mapping) -> Result<Offer, OfferError> {
    let mut deal = None;
    let mut rate = None;

    for (field, value) in descriptor {
        match field.as_str() {
            Some("deal") => {
                let text = value
                    .as_str()
                    .ok_or_else(|| OfferError::MalformedDeal(describe(value)))?;

                deal = Some(text.parse::<Deal>()?);
            }
            Some("discount") => {
                let fraction =
                    decimal(value).ok_or_else(|| OfferError::NonNumericRate(describe(value)))?;

                rate = Some(discount_rate(fraction)?);
            }
            _ => {
                return Err(OfferError::UnknownField {
                    product: ProductId::from(product),
                    field: describe(field),
                });
            }
        }
    }

    Ok(Offer::from_parts(deal, rate))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn mapping(yaml: &str) -> Result<Mapping, serde_norway::Error> {
        serde_norway::from_str(yaml)
    }

    #[test]
    fn reads_deal_and_discount() -> TestResult {
        let offers = offers_from_mapping(&mapping(
            "{baked_beans: {deal: 3-for-2, discount: 0.1}, sardines: {discount: 0.25}}",
        )?)?;

        assert_eq!(
            offers.get("baked_beans"),
            Some(&Offer::Both(Deal::new(3, 2)?, discount_rate(dec!(0.1))?))
        );
        assert_eq!(
            offers.get("sardines"),
            Some(&Offer::Percentage(discount_rate(dec!(0.25))?))
        );

        Ok(())
    }

    #[test]
    fn empty_descriptor_is_no_offer() -> TestResult {
        let offers = offers_from_mapping(&mapping("{biscuits: {}}")?)?;

        assert_eq!(offers.get("biscuits"), Some(&Offer::None));

        Ok(())
    }

    #[test]
    fn rejects_non_string_key() -> TestResult {
        let result = offers_from_mapping(&mapping("{2: 2}")?);

        assert!(matches!(
            result,
            Err(PricerError::InvalidOffer(OfferError::NonStringKey(_)))
        ));

        Ok(())
    }

    #[test]
    fn rejects_descriptor_that_is_not_a_mapping() -> TestResult {
        let result = offers_from_mapping(&mapping("{test_good: wrong_input}")?);

        assert!(matches!(
            result,
            Err(PricerError::InvalidOffer(OfferError::NotADescriptor { .. }))
        ));

        Ok(())
    }

    #[test]
    fn rejects_unknown_field() -> TestResult {
        let result = offers_from_mapping(&mapping("{test_good: {bogof: true}}")?);

        assert!(matches!(
            result,
            Err(PricerError::InvalidOffer(OfferError::UnknownField { field, .. }))
                if field == "\"bogof\""
        ));

        Ok(())
    }

    #[test]
    fn rejects_malformed_deal() -> TestResult {
        for yaml in [
            "{test_good: {deal: three-for-two}}",
            "{test_good: {deal: 3}}",
            "{test_good: {deal: 2-for-2}}",
        ] {
            let result = offers_from_mapping(&mapping(yaml)?);

            assert!(
                matches!(
                    result,
                    Err(PricerError::InvalidOffer(
                        OfferError::MalformedDeal(_) | OfferError::InvalidDealTerms { .. }
                    ))
                ),
                "expected deal error for {yaml}"
            );
        }

        Ok(())
    }

    #[test]
    fn rejects_bad_discount() -> TestResult {
        let text = offers_from_mapping(&mapping("{test_good: {discount: lots}}")?);
        let too_big = offers_from_mapping(&mapping("{test_good: {discount: 1.5}}")?);

        assert!(matches!(
            text,
            Err(PricerError::InvalidOffer(OfferError::NonNumericRate(_)))
        ));
        assert!(matches!(
            too_big,
            Err(PricerError::InvalidOffer(OfferError::RateOutOfRange(_)))
        ));

        Ok(())
    }
}
