//! End-to-end pricing of grocery baskets through the public API.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use testresult::TestResult;

use basket_pricer::prelude::*;

fn catalogue() -> Result<Catalogue, CatalogueError> {
    Catalogue::from_prices([
        ("baked_beans", dec!(0.99)),
        ("biscuits", dec!(1.20)),
        ("sardines", dec!(1.89)),
        ("shampoo_small", dec!(2.00)),
        ("shampoo_medium", dec!(2.50)),
        ("shampoo_large", dec!(3.50)),
    ])
}

fn offers() -> Result<Offers, OfferError> {
    Ok([
        (
            "baked_beans",
            Offer::Both("3-for-2".parse()?, discount_rate(dec!(0.1))?),
        ),
        ("sardines", Offer::Percentage(discount_rate(dec!(0.25))?)),
    ]
    .into_iter()
    .collect())
}

fn pricer() -> Result<BasketPricer, Box<dyn std::error::Error>> {
    Ok(BasketPricer::new(catalogue()?, offers()?)?)
}

#[test]
fn deal_applies_to_complete_groups() -> TestResult {
    let catalogue =
        Catalogue::from_prices([("baked_beans", dec!(0.99)), ("biscuits", dec!(1.20))])?;
    let offers: Offers = [("baked_beans", Offer::Deal("3-for-2".parse()?))]
        .into_iter()
        .collect();
    let basket = Basket::from_quantities([("baked_beans", 4), ("biscuits", 1)])?;

    let pricer = BasketPricer::with_basket(catalogue, offers, basket)?;

    assert_eq!(
        pricer.get_basket_price(),
        (dec!(5.16), dec!(0.99), dec!(4.17))
    );

    Ok(())
}

#[test]
fn percentage_used_below_deal_threshold() -> TestResult {
    let mut pricer = pricer()?;

    pricer.set_basket(Basket::from_quantities([
        ("baked_beans", 2),
        ("biscuits", 1),
        ("sardines", 2),
    ])?)?;

    assert_eq!(
        pricer.get_basket_price(),
        (dec!(6.96), dec!(1.15), dec!(5.81))
    );

    Ok(())
}

#[test]
fn deal_and_percentage_on_different_lines() -> TestResult {
    let mut pricer = pricer()?;

    pricer.set_basket(Basket::from_quantities([
        ("baked_beans", 7),
        ("biscuits", 1),
        ("sardines", 2),
    ])?)?;

    assert_eq!(
        pricer.get_basket_price(),
        (dec!(11.91), dec!(2.93), dec!(8.98))
    );

    Ok(())
}

#[test]
fn multiple_deals_take_precedence_over_percentages() -> TestResult {
    let offers: Offers = [
        (
            "baked_beans",
            Offer::Both("2-for-1".parse()?, discount_rate(dec!(0.1))?),
        ),
        ("sardines", Offer::Percentage(discount_rate(dec!(0.25))?)),
        (
            "biscuits",
            Offer::Both("5-for-1".parse()?, discount_rate(dec!(0.15))?),
        ),
    ]
    .into_iter()
    .collect();
    let basket =
        Basket::from_quantities([("baked_beans", 7), ("sardines", 1), ("biscuits", 7)])?;

    let pricer = BasketPricer::with_basket(catalogue()?, offers, basket)?;

    assert_eq!(
        pricer.get_basket_price(),
        (dec!(17.22), dec!(8.24), dec!(8.98))
    );

    Ok(())
}

#[test]
fn no_offers_means_no_discount() -> TestResult {
    let basket =
        Basket::from_quantities([("baked_beans", 7), ("sardines", 1), ("biscuits", 7)])?;

    let pricer = BasketPricer::with_basket(catalogue()?, Offers::new(), basket)?;
    let (sub_total, discount, total) = pricer.get_basket_price();

    assert_eq!(sub_total, dec!(17.22));
    assert_eq!(discount, Decimal::ZERO);
    assert_eq!(total, sub_total);

    Ok(())
}

#[test]
fn basket_without_matching_offers_is_undiscounted() -> TestResult {
    let mut pricer = pricer()?;

    pricer.set_basket(Basket::from_quantities([
        ("shampoo_small", 3),
        ("shampoo_large", 1),
        ("biscuits", 2),
    ])?)?;

    let (sub_total, discount, total) = pricer.get_basket_price();

    assert_eq!(sub_total, dec!(11.90));
    assert_eq!(discount, Decimal::ZERO);
    assert_eq!(total, sub_total);

    Ok(())
}

#[test]
fn emptied_basket_prices_at_zero() -> TestResult {
    let mut pricer = pricer()?;

    pricer.set_basket(Basket::from_quantities([("baked_beans", 4)])?)?;
    pricer.set_basket(Basket::new())?;

    assert_eq!(
        pricer.get_basket_price(),
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    );

    Ok(())
}

#[test]
fn basket_too_large_to_price_is_rejected_and_basket_kept() -> TestResult {
    let catalogue = Catalogue::from_prices([("gold", Decimal::MAX), ("biscuits", dec!(1.20))])?;
    let basket = Basket::from_quantities([("biscuits", 1)])?;
    let mut pricer = BasketPricer::with_basket(catalogue, Offers::new(), basket.clone())?;

    let result = pricer.set_basket(Basket::from_quantities([("gold", 2), ("biscuits", 1)])?);

    assert_eq!(
        result,
        Err(PricerError::InvalidBasket(BasketError::AmountOutOfRange {
            product: ProductId::from("gold"),
            quantity: 2,
        }))
    );
    assert_eq!(pricer.basket(), &basket);
    assert_eq!(
        pricer.get_basket_price(),
        (dec!(1.20), Decimal::ZERO, dec!(1.20))
    );

    Ok(())
}

#[test]
fn midpoint_discount_rounds_up() -> TestResult {
    let catalogue = Catalogue::from_prices([("sweets", dec!(0.05))])?;
    let offers: Offers = [("sweets", Offer::Percentage(discount_rate(dec!(0.1))?))]
        .into_iter()
        .collect();
    let basket = Basket::from_quantities([("sweets", 1)])?;

    let pricer = BasketPricer::with_basket(catalogue, offers, basket)?;

    // 0.05 * 0.1 = 0.005
    assert_eq!(
        pricer.get_basket_price(),
        (dec!(0.05), dec!(0.01), dec!(0.04))
    );

    Ok(())
}

#[test]
fn unknown_basket_product_is_rejected_and_basket_kept() -> TestResult {
    let mut pricer = pricer()?;
    let basket = Basket::from_quantities([("baked_beans", 4), ("biscuits", 1)])?;

    pricer.set_basket(basket.clone())?;

    let result = pricer.set_basket(Basket::from_quantities([("test_good2", 2)])?);

    assert_eq!(
        result,
        Err(PricerError::InvalidBasket(BasketError::UnknownProduct(
            ProductId::from("test_good2")
        )))
    );
    assert_eq!(pricer.basket(), &basket);
    assert_eq!(
        pricer.get_basket_price(),
        (dec!(5.16), dec!(0.99), dec!(4.17))
    );

    Ok(())
}

#[test]
fn receipt_itemises_each_line() -> TestResult {
    let basket =
        Basket::from_quantities([("sardines", 2), ("baked_beans", 7), ("biscuits", 1)])?;
    let pricer = BasketPricer::with_basket(catalogue()?, offers()?, basket)?;

    let receipt = pricer.receipt();
    let lines = receipt.lines();

    assert_eq!(lines.len(), 3);

    let beans = lines.first().ok_or("missing baked_beans line")?;

    assert_eq!(beans.product.as_str(), "baked_beans");
    assert_eq!(beans.line_total, dec!(6.93));
    assert_eq!(beans.discount.amount, dec!(1.98));
    assert!(matches!(beans.discount.applied, Some(AppliedOffer::Deal(_))));

    let sardines = lines.last().ok_or("missing sardines line")?;

    assert_eq!(sardines.discount.amount, dec!(0.95));
    assert!(matches!(
        sardines.discount.applied,
        Some(AppliedOffer::Percentage(_))
    ));

    assert_eq!(receipt.prices(), (dec!(11.91), dec!(2.93), dec!(8.98)));

    Ok(())
}
