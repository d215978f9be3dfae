//! Limits command - the accepted input ranges, as JSON

use crate::growth::{
    MAX_ANNUAL_RATE, MAX_MONTHLY_PAYMENT, MAX_PRINCIPAL, MAX_YEARS, MIN_ANNUAL_RATE,
    MIN_PRINCIPAL, MIN_YEARS,
};
use chrono::Local;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct LimitsCommand {}

#[derive(Debug, Serialize)]
struct Limits {
    max_principal: Decimal,
    min_principal: Decimal,
    max_monthly_payment: Decimal,
    min_monthly_payment: Decimal,
    max_annual_rate: Decimal,
    min_annual_rate: Decimal,
    max_years: u32,
    min_years: u32,
    supported_frequencies: [&'static str; 3],
    currency: &'static str,
    locale: &'static str,
    precision: u32,
    last_updated: String,
    version: &'static str,
}

impl LimitsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let limits = Limits {
            max_principal: MAX_PRINCIPAL,
            min_principal: MIN_PRINCIPAL,
            max_monthly_payment: MAX_MONTHLY_PAYMENT,
            min_monthly_payment: Decimal::ZERO,
            max_annual_rate: MAX_ANNUAL_RATE,
            min_annual_rate: MIN_ANNUAL_RATE,
            max_years: MAX_YEARS,
            min_years: MIN_YEARS,
            supported_frequencies: ["monthly", "quarterly", "yearly"],
            currency: "EUR",
            locale: "de_DE",
            precision: 2,
            last_updated: Local::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        };
        println!("{}", serde_json::to_string_pretty(&limits)?);
        Ok(())
    }
}
