//! Compound interest engine (Zinseszins) for savings plans

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Calculation limits, also served by the `limits` command
pub const MIN_PRINCIPAL: Decimal = dec!(1);
pub const MAX_PRINCIPAL: Decimal = dec!(10_000_000);
pub const MAX_MONTHLY_PAYMENT: Decimal = dec!(50_000);
pub const MIN_ANNUAL_RATE: Decimal = dec!(0.01);
pub const MAX_ANNUAL_RATE: Decimal = dec!(20);
pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 50;

/// How often interest is credited (Zinszahlungsfrequenz)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl CompoundFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundFrequency::Monthly => 12,
            CompoundFrequency::Quarterly => 4,
            CompoundFrequency::Yearly => 1,
        }
    }

    pub fn rate_per_period(&self, annual_rate: Decimal) -> Decimal {
        annual_rate / Decimal::from(self.periods_per_year())
    }

    /// German display name for reports and exports
    pub fn display_de(&self) -> &'static str {
        match self {
            CompoundFrequency::Monthly => "Monatlich",
            CompoundFrequency::Quarterly => "Vierteljährlich",
            CompoundFrequency::Yearly => "Jährlich",
        }
    }
}

/// Validation error with the user-facing German message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Das Startkapital muss größer als 0€ sein")]
    PrincipalTooSmall,
    #[error("Das Startkapital darf nicht größer als 10.000.000€ sein")]
    PrincipalTooLarge,
    #[error("Die monatliche Sparrate kann nicht negativ sein")]
    MonthlyPaymentNegative,
    #[error("Die monatliche Sparrate darf nicht größer als 50.000€ sein")]
    MonthlyPaymentTooLarge,
    #[error("Der Zinssatz muss größer als 0% sein")]
    RateTooSmall,
    #[error("Der Zinssatz darf nicht größer als 20% sein")]
    RateTooLarge,
    #[error("Die Laufzeit muss mindestens 1 Jahr betragen")]
    TermTooShort,
    #[error("Die Laufzeit darf nicht länger als 50 Jahre sein")]
    TermTooLong,
}

/// Input parameters for a savings projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsPlan {
    /// Startkapital in Euro
    pub principal: Decimal,
    /// Monatliche Sparrate in Euro
    pub monthly_payment: Decimal,
    /// Jährlicher Zinssatz in Prozent (e.g. 4.0 for 4 %)
    pub annual_rate: Decimal,
    /// Anlagedauer in Jahren
    pub years: u32,
    pub frequency: CompoundFrequency,
    /// Jährliche Inflationsrate in Prozent, for the purchasing-power figure
    #[serde(default)]
    pub inflation_rate: Option<Decimal>,
}

impl SavingsPlan {
    /// All limit violations, in input order
    pub fn validation_errors(&self) -> Vec<PlanError> {
        let mut errors = Vec::new();
        if self.principal <= Decimal::ZERO {
            errors.push(PlanError::PrincipalTooSmall);
        }
        if self.principal > MAX_PRINCIPAL {
            errors.push(PlanError::PrincipalTooLarge);
        }
        if self.monthly_payment < Decimal::ZERO {
            errors.push(PlanError::MonthlyPaymentNegative);
        }
        if self.monthly_payment > MAX_MONTHLY_PAYMENT {
            errors.push(PlanError::MonthlyPaymentTooLarge);
        }
        if self.annual_rate <= Decimal::ZERO {
            errors.push(PlanError::RateTooSmall);
        }
        if self.annual_rate > MAX_ANNUAL_RATE {
            errors.push(PlanError::RateTooLarge);
        }
        if self.years < MIN_YEARS {
            errors.push(PlanError::TermTooShort);
        }
        if self.years > MAX_YEARS {
            errors.push(PlanError::TermTooLong);
        }
        errors
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Non-fatal plausibility warnings (German, user-facing)
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.monthly_payment > Decimal::ZERO && self.principal > Decimal::ZERO {
            let yearly_to_principal = self.monthly_payment * dec!(12) / self.principal;
            if yearly_to_principal > dec!(2) {
                warnings.push(
                    "Die monatliche Sparrate ist sehr hoch im Verhältnis zum Startkapital. \
                     Bitte überprüfen Sie Ihre Eingaben."
                        .to_string(),
                );
            }
        }
        if self.years > 40 {
            warnings.push(
                "Eine Laufzeit von über 40 Jahren ist sehr lang. \
                 Berücksichtigen Sie Inflation und Lebensumstände."
                    .to_string(),
            );
        }
        warnings
    }

    /// Run the projection period by period.
    ///
    /// Monthly compounding credits the savings rate before each interest
    /// period; quarterly and yearly compounding add the accumulated annual
    /// contribution at year end, after interest.
    pub fn simulate(&self) -> GrowthReport {
        let rate = self.annual_rate / dec!(100);
        let rate_per_period = self.frequency.rate_per_period(rate);
        let periods_per_year = self.frequency.periods_per_year();

        let mut current = self.principal;
        let mut total_contributions = self.principal;
        let mut yearly = Vec::with_capacity(self.years as usize);

        for year in 1..=self.years {
            let start_amount = current;
            let mut contributions = Decimal::ZERO;
            let mut interest = Decimal::ZERO;

            for _ in 0..periods_per_year {
                if self.frequency == CompoundFrequency::Monthly
                    && self.monthly_payment > Decimal::ZERO
                {
                    current += self.monthly_payment;
                    contributions += self.monthly_payment;
                    total_contributions += self.monthly_payment;
                }
                let period_interest = current * rate_per_period;
                current += period_interest;
                interest += period_interest;
            }

            if self.frequency != CompoundFrequency::Monthly
                && self.monthly_payment > Decimal::ZERO
            {
                let annual_contribution = self.monthly_payment * dec!(12);
                current += annual_contribution;
                contributions += annual_contribution;
                total_contributions += annual_contribution;
            }

            let growth_rate = if start_amount > Decimal::ZERO {
                (current - start_amount) / start_amount * dec!(100)
            } else {
                Decimal::ZERO
            };

            log::debug!(
                "Jahr {}: Start {}, Einzahlungen {}, Zinsen {}, Ende {}",
                year,
                start_amount,
                contributions,
                interest,
                current
            );

            yearly.push(YearlyBreakdown {
                year,
                start_amount: start_amount.round_dp(2),
                contributions: contributions.round_dp(2),
                interest: interest.round_dp(2),
                end_amount: current.round_dp(2),
                growth_rate: growth_rate.round_dp(2),
            });
        }

        let final_amount = current;
        let total_interest = final_amount - total_contributions;
        let annual_return = annualized_return(final_amount, total_contributions, self.years);
        let real_final_amount = self
            .inflation_rate
            .map(|inflation| deflate(final_amount, inflation, self.years).round_dp(2));

        GrowthReport {
            final_amount: final_amount.round_dp(2),
            total_contributions: total_contributions.round_dp(2),
            total_interest: total_interest.round_dp(2),
            annual_return,
            real_final_amount,
            yearly,
        }
    }
}

/// One year of the projection, rounded to cents
#[derive(Debug, Clone, Serialize)]
pub struct YearlyBreakdown {
    pub year: u32,
    pub start_amount: Decimal,
    pub contributions: Decimal,
    pub interest: Decimal,
    pub end_amount: Decimal,
    /// Percent growth over the year
    pub growth_rate: Decimal,
}

/// Full projection result
#[derive(Debug, Clone, Serialize)]
pub struct GrowthReport {
    pub final_amount: Decimal,
    pub total_contributions: Decimal,
    pub total_interest: Decimal,
    /// Effective annualized return in percent
    pub annual_return: Decimal,
    /// Final amount in today's purchasing power, if an inflation rate was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_final_amount: Option<Decimal>,
    pub yearly: Vec<YearlyBreakdown>,
}

/// Geometric mean return in percent: `((final/contributions)^(1/years) - 1) * 100`.
/// Display metric only, so the f64 round trip for the root is fine.
fn annualized_return(final_amount: Decimal, contributions: Decimal, years: u32) -> Decimal {
    if contributions <= Decimal::ZERO || years == 0 {
        return Decimal::ZERO;
    }
    let ratio = (final_amount / contributions).to_f64().unwrap_or(0.0);
    if ratio <= 0.0 {
        return Decimal::ZERO;
    }
    let annual = (ratio.powf(1.0 / f64::from(years)) - 1.0) * 100.0;
    Decimal::from_f64(annual)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

/// Divide out `years` of inflation at `rate` percent per year
fn deflate(amount: Decimal, rate: Decimal, years: u32) -> Decimal {
    let factor = Decimal::ONE + rate / dec!(100);
    let mut real = amount;
    for _ in 0..years {
        real /= factor;
    }
    real
}
