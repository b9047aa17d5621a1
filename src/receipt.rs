//! Receipt

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    discounts::LineDiscount,
    prices::{Price, round},
    products::ProductId,
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Writing to the output failed.
    #[error("failed to write receipt: {0}")]
    IO(#[from] io::Error),
}

/// One priced basket line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product being bought
    pub product: ProductId,

    /// Units bought
    pub quantity: u32,

    /// Catalogue unit price
    pub unit_price: Price,

    /// Undiscounted line price, rounded to two places
    pub line_total: Decimal,

    /// Discount earned by the line
    pub discount: LineDiscount,
}

impl ReceiptLine {
    /// Amount paid for the line after its discount.
    pub fn net(&self) -> Decimal {
        round(self.line_total - self.discount.amount)
    }
}

/// Final receipt for a priced basket.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Priced lines, ordered by product
    lines: Vec<ReceiptLine>,

    /// Sum of undiscounted line totals
    sub_total: Decimal,

    /// Sum of line discounts
    discount: Decimal,

    /// Amount to pay
    total: Decimal,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(
        lines: Vec<ReceiptLine>,
        sub_total: Decimal,
        discount: Decimal,
        total: Decimal,
    ) -> Self {
        Self {
            lines,
            sub_total,
            discount,
            total,
        }
    }

    /// Priced lines, ordered by product.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total cost before any offers
    pub fn sub_total(&self) -> Decimal {
        self.sub_total
    }

    /// Amount saved through offers
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Total amount to pay
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// `(sub_total, discount, total)`
    pub fn prices(&self) -> (Decimal, Decimal, Decimal) {
        (self.sub_total, self.discount, self.total)
    }

    /// Render the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Item",
            "Qty",
            "Unit Price",
            "Line Total",
            "Offer",
            "Discount",
            "Net",
        ]);

        for line in &self.lines {
            builder.push_record([
                line.product.to_string(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                format!("{:.2}", line.line_total),
                line.discount
                    .applied
                    .as_ref()
                    .map_or_else(String::new, ToString::to_string),
                discount_cell(line.discount.amount),
                format!("{:.2}", line.net()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());
        table.modify(Columns::new(5..7), Alignment::right());

        writeln!(out, "\n{table}")?;

        write_summary(&mut out, self)?;

        Ok(())
    }
}

fn discount_cell(amount: Decimal) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        format!("-{amount:.2}")
    }
}

fn write_summary(out: &mut impl io::Write, receipt: &Receipt) -> Result<(), ReceiptError> {
    let rows = [
        (" Subtotal:", format!("{:.2}", receipt.sub_total)),
        (" Discount:", format!("-{:.2}", receipt.discount)),
        (" Total:", format!("{:.2}", receipt.total)),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")?;
    }

    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;
    use crate::{discounts::AppliedOffer, offers::Deal};

    fn beans_line() -> Result<ReceiptLine, Box<dyn std::error::Error>> {
        Ok(ReceiptLine {
            product: ProductId::from("baked_beans"),
            quantity: 4,
            unit_price: Price::new(dec!(0.99)).ok_or("price must be positive")?,
            line_total: dec!(3.96),
            discount: LineDiscount {
                applied: Some(AppliedOffer::Deal(Deal::new(3, 2)?)),
                amount: dec!(0.99),
            },
        })
    }

    #[test]
    fn accessors_return_values_from_constructor() -> TestResult {
        let receipt = Receipt::new(vec![beans_line()?], dec!(3.96), dec!(0.99), dec!(2.97));

        assert_eq!(receipt.sub_total(), dec!(3.96));
        assert_eq!(receipt.discount(), dec!(0.99));
        assert_eq!(receipt.total(), dec!(2.97));
        assert_eq!(receipt.prices(), (dec!(3.96), dec!(0.99), dec!(2.97)));
        assert_eq!(receipt.lines().len(), 1);

        Ok(())
    }

    #[test]
    fn line_net_subtracts_discount() -> TestResult {
        assert_eq!(beans_line()?.net(), dec!(2.97));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let receipt = Receipt::new(vec![beans_line()?], dec!(3.96), dec!(0.99), dec!(2.97));

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("baked_beans"), "missing product: {rendered}");
        assert!(rendered.contains("3-for-2"), "missing offer: {rendered}");
        assert!(rendered.contains("-0.99"), "missing discount: {rendered}");
        assert!(rendered.contains("Subtotal:"), "missing summary: {rendered}");
        assert!(rendered.contains("2.97"), "missing total: {rendered}");

        Ok(())
    }

    #[test]
    fn write_to_renders_empty_receipt() -> TestResult {
        let receipt = Receipt::new(Vec::new(), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Total:"), "missing summary: {rendered}");
        assert!(rendered.contains("0.00"), "missing zero total: {rendered}");

        Ok(())
    }
}
