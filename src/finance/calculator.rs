// src/finance/calculator.rs

use crate::domain::{Dollars, Field};
use crate::finance::rates::RateTable;

pub const DOWN_PAYMENT_RATIO: f64 = 0.20;
pub const TERM_MONTHS: i32 = 30 * 12;

/// Above this price the luxury insurance rate applies.
pub const HIGH_VALUE_THRESHOLD: u64 = 1_000_000;
pub const INSURANCE_RATE: f64 = 0.35;
pub const HIGH_VALUE_INSURANCE_RATE: f64 = 0.50;

/// Parses a currency string by keeping only its digits.
/// Returns `None` when no digits remain or the amount is zero.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().ok().filter(|p| *p > 0)
}

/// Standard fixed-rate amortization: M = P * r(1+r)^n / ((1+r)^n - 1).
pub fn amortized_payment(principal: f64, annual_rate_pct: f64, months: i32) -> f64 {
    let r = annual_rate_pct / 100.0 / 12.0;
    if r == 0.0 {
        return principal / months as f64;
    }
    let growth = (1.0 + r).powi(months);
    principal * (r * growth) / (growth - 1.0)
}

/// Derived amounts for one listing. Either all three are computed or none is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Estimate {
    pub down_payment: Field<Dollars>,
    pub mortgage: Field<Dollars>,
    pub total_monthly: Field<Dollars>,
}

impl Estimate {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Down payment, principal & interest, and total carrying cost from a
/// purchase price and an optional jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    rates: RateTable,
}

impl Calculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn estimate(&self, price: Option<u64>, jurisdiction: Option<&str>) -> Estimate {
        let Some(price) = price.filter(|p| *p > 0) else {
            return Estimate::unavailable();
        };
        let Some(mortgage) = Dollars::from_f64(self.principal_and_interest(price, jurisdiction))
        else {
            return Estimate::unavailable();
        };
        self.assemble(price, jurisdiction, mortgage)
    }

    /// Like [`Calculator::estimate`], but with a principal & interest figure
    /// taken from the listing page instead of the amortization formula.
    pub fn estimate_with_payment(
        &self,
        price: Option<u64>,
        jurisdiction: Option<&str>,
        principal_and_interest: &Field<Dollars>,
    ) -> Estimate {
        let Some(price) = price.filter(|p| *p > 0) else {
            return Estimate::unavailable();
        };
        match principal_and_interest {
            Field::Value(mortgage) => self.assemble(price, jurisdiction, *mortgage),
            Field::Unavailable => Estimate {
                down_payment: self.down_payment(price).into(),
                ..Estimate::unavailable()
            },
        }
    }

    pub fn principal_and_interest(&self, price: u64, jurisdiction: Option<&str>) -> f64 {
        let loan = price as f64 * (1.0 - DOWN_PAYMENT_RATIO);
        amortized_payment(loan, self.rates.interest_rate(jurisdiction), TERM_MONTHS)
    }

    fn down_payment(&self, price: u64) -> Option<Dollars> {
        Dollars::from_f64(price as f64 * DOWN_PAYMENT_RATIO)
    }

    fn assemble(&self, price: u64, jurisdiction: Option<&str>, mortgage: Dollars) -> Estimate {
        let (Some(down), Some(total)) = (
            self.down_payment(price),
            self.total_monthly(price, jurisdiction, mortgage),
        ) else {
            return Estimate::unavailable();
        };

        Estimate {
            down_payment: Field::Value(down),
            mortgage: Field::Value(mortgage),
            total_monthly: Field::Value(total),
        }
    }

    /// Rounded P&I plus monthly tax and insurance, rounded once at the end.
    fn total_monthly(
        &self,
        price: u64,
        jurisdiction: Option<&str>,
        mortgage: Dollars,
    ) -> Option<Dollars> {
        let value = price as f64;
        let monthly_tax = value * (self.rates.property_tax_rate(jurisdiction) / 100.0) / 12.0;
        let insurance_rate = if price > HIGH_VALUE_THRESHOLD {
            HIGH_VALUE_INSURANCE_RATE
        } else {
            INSURANCE_RATE
        };
        let monthly_insurance = value * (insurance_rate / 100.0) / 12.0;

        Dollars::from_f64(mortgage.amount() as f64 + monthly_tax + monthly_insurance)
    }
}
