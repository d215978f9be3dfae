//! Abgeltungssteuer on capital income, with Solidaritätszuschlag,
//! Kirchensteuer, Sparerpauschbetrag and Teilfreistellung

use crate::tax::de::{
    TaxSettings, TaxYear, ABGELTUNGSSTEUER_RATE, SOLIDARITAETSZUSCHLAG_RATE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Tax assessment of one year's gross capital income
#[derive(Debug, Clone, Serialize)]
pub struct YearlyTax {
    pub gross_income: Decimal,
    /// Portion exempt through the fund category's Teilfreistellung
    pub teilfreistellung_amount: Decimal,
    /// The allowance applied (full Sparerpauschbetrag or Freistellungsauftrag cap)
    pub tax_free_amount: Decimal,
    pub taxable_income: Decimal,
    pub abgeltungssteuer: Decimal,
    pub solidaritaetszuschlag: Decimal,
    pub kirchensteuer: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
    /// Total tax as percent of the gross income
    pub effective_tax_rate: Decimal,
}

/// Assess one year's gross capital income with the statutory allowance
pub fn calculate_yearly_tax(
    gross_income: Decimal,
    settings: &TaxSettings,
    year: TaxYear,
) -> YearlyTax {
    let allowance = year.sparerpauschbetrag(settings.married);
    calculate_yearly_tax_with_allowance(gross_income, settings, allowance)
}

/// Assess with an explicit allowance, e.g. capped by a Freistellungsauftrag plan
pub fn calculate_yearly_tax_with_allowance(
    gross_income: Decimal,
    settings: &TaxSettings,
    allowance: Decimal,
) -> YearlyTax {
    let teilfreistellung_amount =
        (gross_income * settings.fund_category.teilfreistellung_rate()).round_dp(2);
    let assessed = gross_income - teilfreistellung_amount;

    let taxable_income = (assessed - allowance).max(Decimal::ZERO);
    let abgeltungssteuer = (taxable_income * ABGELTUNGSSTEUER_RATE).round_dp(2);
    let solidaritaetszuschlag = (abgeltungssteuer * SOLIDARITAETSZUSCHLAG_RATE).round_dp(2);
    let kirchensteuer = settings
        .kirchensteuer
        .map(|rate| (abgeltungssteuer * rate).round_dp(2))
        .unwrap_or(Decimal::ZERO);

    let total_tax = abgeltungssteuer + solidaritaetszuschlag + kirchensteuer;
    let net_income = gross_income - total_tax;
    let effective_tax_rate = if gross_income > Decimal::ZERO {
        (total_tax / gross_income * dec!(100)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "Brutto {}: steuerpflichtig {}, Abgeltungssteuer {}, Soli {}, Kirche {}",
        gross_income,
        taxable_income,
        abgeltungssteuer,
        solidaritaetszuschlag,
        kirchensteuer
    );

    YearlyTax {
        gross_income,
        teilfreistellung_amount,
        tax_free_amount: allowance,
        taxable_income,
        abgeltungssteuer,
        solidaritaetszuschlag,
        kirchensteuer,
        total_tax,
        net_income,
        effective_tax_rate,
    }
}

/// One plan year with its assessment and the running total
#[derive(Debug, Clone, Serialize)]
pub struct PlanYearTax {
    pub year: u32,
    pub tax: YearlyTax,
    pub cumulative_tax: Decimal,
}

/// Multi-year tax report over a savings plan's interest series
#[derive(Debug, Clone, Serialize)]
pub struct TaxReport {
    pub years: Vec<PlanYearTax>,
    pub total_gross: Decimal,
    pub total_tax: Decimal,
    pub total_net: Decimal,
}

/// Assess a series of yearly gross incomes. The allowance resets every
/// year; `allowance` caps it when a Freistellungsauftrag plan covers
/// less than the statutory Sparerpauschbetrag.
pub fn calculate_plan_tax(
    yearly_gross: &[Decimal],
    settings: &TaxSettings,
    start_year: TaxYear,
    allowance: Option<Decimal>,
) -> TaxReport {
    let mut years = Vec::with_capacity(yearly_gross.len());
    let mut cumulative_tax = Decimal::ZERO;
    let mut total_gross = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;

    for (offset, &gross) in yearly_gross.iter().enumerate() {
        let tax_year = TaxYear(start_year.0 + offset as i32);
        let statutory = tax_year.sparerpauschbetrag(settings.married);
        let applied = allowance.map_or(statutory, |a| a.min(statutory));

        let tax = calculate_yearly_tax_with_allowance(gross, settings, applied);
        cumulative_tax += tax.total_tax;
        total_gross += gross;
        total_net += tax.net_income;

        years.push(PlanYearTax {
            year: offset as u32 + 1,
            tax,
            cumulative_tax,
        });
    }

    TaxReport {
        years,
        total_gross,
        total_tax: cumulative_tax,
        total_net,
    }
}

/// German-language suggestions for reducing the tax burden
pub fn optimization_tips(gross_income: Decimal, settings: &TaxSettings) -> Vec<String> {
    let mut tips = Vec::new();
    let allowance = TaxYear::current().sparerpauschbetrag(settings.married);

    if gross_income > allowance {
        tips.push(
            "Nutzen Sie Ihren Sparerpauschbetrag voll aus und verteilen Sie \
             Freistellungsaufträge auf alle Banken mit Kapitalerträgen."
                .to_string(),
        );
    }
    if settings.married {
        tips.push(
            "Als Ehepaar steht Ihnen der doppelte Sparerpauschbetrag von 2.000€ zu."
                .to_string(),
        );
    }
    if settings.fund_category.teilfreistellung_rate() == Decimal::ZERO
        && gross_income > allowance
    {
        tips.push(
            "Aktienfonds profitieren von 30% Teilfreistellung auf alle Erträge."
                .to_string(),
        );
    }
    if settings.kirchensteuer.is_some() && gross_income > allowance * dec!(5) {
        tips.push(
            "Die Kirchensteuer erhöht Ihre Steuerlast auf Kapitalerträge um bis zu 9% \
             der Abgeltungssteuer."
                .to_string(),
        );
    }
    tips
}
