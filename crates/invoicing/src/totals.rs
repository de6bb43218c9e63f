//! Invoice totals, derived from the current lines on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{percent_of, round_for_display, DomainError, DomainResult, ValueObject};

use crate::line::LineItem;

/// `quantity * unit_rate`, unrounded.
pub fn line_amount(item: &LineItem) -> DomainResult<Decimal> {
    item.quantity()
        .checked_mul(item.unit_rate())
        .ok_or_else(|| DomainError::out_of_range(format!("amount of line {}", item.id_typed())))
}

/// `line_amount * tax_rate_percent / 100`, unrounded.
pub fn line_tax(item: &LineItem) -> DomainResult<Decimal> {
    percent_of(line_amount(item)?, item.tax_rate_percent())
}

pub fn subtotal(items: &[LineItem]) -> DomainResult<Decimal> {
    checked_sum(items, line_amount, "subtotal")
}

pub fn tax_total(items: &[LineItem]) -> DomainResult<Decimal> {
    checked_sum(items, line_tax, "tax total")
}

pub fn grand_total(items: &[LineItem]) -> DomainResult<Decimal> {
    Totals::of(items).map(|totals| totals.grand_total)
}

fn checked_sum(
    items: &[LineItem],
    figure: fn(&LineItem) -> DomainResult<Decimal>,
    what: &str,
) -> DomainResult<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(figure(item)?)
            .ok_or_else(|| DomainError::out_of_range(what))
    })
}

/// Subtotal, tax and grand total of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

impl ValueObject for Totals {}

impl Totals {
    /// Fails with `DomainError::OutOfRange` when any figure, per line or
    /// summed, does not fit a `Decimal`.
    pub fn of(items: &[LineItem]) -> DomainResult<Self> {
        let subtotal = subtotal(items)?;
        let tax_total = tax_total(items)?;
        let grand_total = subtotal
            .checked_add(tax_total)
            .ok_or_else(|| DomainError::out_of_range("grand total"))?;
        Ok(Self {
            subtotal,
            tax_total,
            grand_total,
        })
    }

    /// Each figure rounded to two fraction digits, half up.
    ///
    /// Rounds the exact figures independently, so the rounded grand total can
    /// differ by a cent from the sum of the rounded parts.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_for_display(self.subtotal),
            tax_total: round_for_display(self.tax_total),
            grand_total: round_for_display(self.grand_total),
        }
    }
}
