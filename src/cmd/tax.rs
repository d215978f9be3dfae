//! Tax command - Abgeltungssteuer report for a one-off gain or a savings plan

use crate::cmd::read_exemption_plan;
use crate::growth::{CompoundFrequency, SavingsPlan};
use crate::money::{format_de, format_eur, format_pct};
use crate::tax::{
    calculate_plan_tax, calculate_yearly_tax_with_allowance, optimization_tips, Bundesland,
    FundCategory, TaxReport, TaxSettings, TaxYear, YearlyTax,
};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TaxCommand {
    /// Einmaliger Bruttoertrag in Euro (statt einer Sparplan-Simulation)
    #[arg(long, conflicts_with_all = ["principal", "rate"])]
    gain: Option<Decimal>,

    /// Startkapital in Euro
    #[arg(short, long, required_unless_present = "gain")]
    principal: Option<Decimal>,

    /// Monatliche Sparrate in Euro
    #[arg(short, long, default_value = "0")]
    monthly: Decimal,

    /// Jährlicher Zinssatz in Prozent
    #[arg(short, long, required_unless_present = "gain")]
    rate: Option<Decimal>,

    /// Anlagedauer in Jahren
    #[arg(short, long, default_value_t = 1)]
    years: u32,

    /// Zinszahlungsfrequenz
    #[arg(short, long, value_enum, default_value_t = CompoundFrequency::Monthly)]
    frequency: CompoundFrequency,

    /// Steuerjahr (Kalenderjahr), Standard: aktuelles Jahr
    #[arg(long)]
    tax_year: Option<i32>,

    /// Zusammenveranlagung (doppelter Sparerpauschbetrag)
    #[arg(long)]
    married: bool,

    /// Kirchensteuerpflichtig
    #[arg(short, long)]
    kirchensteuer: bool,

    /// Bundesland für den Kirchensteuersatz (8% BW/BY, sonst 9%)
    #[arg(short, long, value_enum)]
    bundesland: Option<Bundesland>,

    /// Fondskategorie für die Teilfreistellung
    #[arg(long, value_enum, default_value_t = FundCategory::Sonstige)]
    fund: FundCategory,

    /// Freistellungsauftrag-Plan (JSON), begrenzt den angesetzten Freibetrag
    #[arg(short, long)]
    exemption: Option<PathBuf>,

    /// Steuerspar-Hinweise mit ausgeben
    #[arg(long)]
    tips: bool,

    /// Output as JSON instead of formatted report
    #[arg(long)]
    json: bool,
}

impl TaxCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let settings = self.settings();
        let tax_year = self.tax_year.map_or_else(TaxYear::current, TaxYear);
        let allowance_cap = self.allowance_cap()?;

        match self.gain {
            Some(gain) => self.exec_single(gain, &settings, tax_year, allowance_cap),
            None => self.exec_plan(&settings, tax_year, allowance_cap),
        }
    }

    fn settings(&self) -> TaxSettings {
        let kirchensteuer = self.kirchensteuer.then(|| {
            self.bundesland
                .map_or(dec!(0.09), |b| b.kirchensteuer_rate())
        });
        TaxSettings {
            married: self.married,
            kirchensteuer,
            fund_category: self.fund,
        }
    }

    /// Effective allowance from a Freistellungsauftrag plan, if given.
    /// A plan with consistency issues is rejected.
    fn allowance_cap(&self) -> anyhow::Result<Option<Decimal>> {
        let Some(ref path) = self.exemption else {
            return Ok(None);
        };
        let plan = read_exemption_plan(path)?;
        let issues = plan.validate();
        if !issues.is_empty() {
            let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
            anyhow::bail!(
                "Freistellungsauftrag-Plan ist fehlerhaft: {}",
                messages.join("; ")
            );
        }
        log::info!(
            "Freistellungsauftrag: {} von {} verteilt",
            plan.total_allocated(),
            plan.allowance()
        );
        Ok(Some(plan.effective_allowance()))
    }

    fn exec_single(
        &self,
        gain: Decimal,
        settings: &TaxSettings,
        tax_year: TaxYear,
        allowance_cap: Option<Decimal>,
    ) -> anyhow::Result<()> {
        let statutory = tax_year.sparerpauschbetrag(settings.married);
        let allowance = allowance_cap.map_or(statutory, |cap| cap.min(statutory));
        let result = calculate_yearly_tax_with_allowance(gain, settings, allowance);

        if self.json {
            let output = SingleOutput {
                tax_year: tax_year.0,
                tax: &result,
                tips: self.tips.then(|| optimization_tips(gain, settings)),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        print_single_report(&result, settings, tax_year);
        if self.tips {
            print_tips(&optimization_tips(gain, settings));
        }
        Ok(())
    }

    fn exec_plan(
        &self,
        settings: &TaxSettings,
        tax_year: TaxYear,
        allowance_cap: Option<Decimal>,
    ) -> anyhow::Result<()> {
        let plan = SavingsPlan {
            // clap enforces presence when --gain is absent
            principal: self.principal.unwrap_or_default(),
            monthly_payment: self.monthly,
            annual_rate: self.rate.unwrap_or_default(),
            years: self.years,
            frequency: self.frequency,
            inflation_rate: None,
        };
        let growth = super::grow::simulate_validated(&plan)?;

        let yearly_interest: Vec<Decimal> =
            growth.yearly.iter().map(|y| y.interest).collect();
        let report = calculate_plan_tax(&yearly_interest, settings, tax_year, allowance_cap);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        print_plan_report(&report, settings, tax_year);
        if self.tips {
            let avg_gross = if report.years.is_empty() {
                Decimal::ZERO
            } else {
                report.total_gross / Decimal::from(report.years.len() as u64)
            };
            print_tips(&optimization_tips(avg_gross, settings));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SingleOutput<'a> {
    tax_year: i32,
    tax: &'a YearlyTax,
    #[serde(skip_serializing_if = "Option::is_none")]
    tips: Option<Vec<String>>,
}

fn print_single_report(result: &YearlyTax, settings: &TaxSettings, year: TaxYear) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                        STEUERBERECHNUNG ({:^6})                              ║", year.0);
    println!("╠══════════════════════════════════════════════════════════════════════════════╣");
    println!("║  Bruttoertrag:                  {:>16}                             ║", format_eur(result.gross_income));
    if result.teilfreistellung_amount > Decimal::ZERO {
        println!(
            "║  Teilfreistellung ({:>4}):       {:>16}                             ║",
            format_pct(settings.fund_category.teilfreistellung_rate() * dec!(100)),
            format_eur(result.teilfreistellung_amount)
        );
    }
    println!("║  Sparerpauschbetrag:            {:>16}                             ║", format_eur(result.tax_free_amount));
    println!("║  Steuerpflichtiger Ertrag:      {:>16}                             ║", format_eur(result.taxable_income));
    println!("╟──────────────────────────────────────────────────────────────────────────────╢");
    println!("║  Abgeltungssteuer (25%):        {:>16}                             ║", format_eur(result.abgeltungssteuer));
    println!("║  Solidaritätszuschlag (5,5%):   {:>16}                             ║", format_eur(result.solidaritaetszuschlag));
    if let Some(rate) = settings.kirchensteuer {
        println!(
            "║  Kirchensteuer ({:>5}):         {:>16}                             ║",
            format_pct(rate * dec!(100)),
            format_eur(result.kirchensteuer)
        );
    }
    println!("╟──────────────────────────────────────────────────────────────────────────────╢");
    println!("║  Gesamtsteuer:                  {:>16}                             ║", format_eur(result.total_tax));
    println!("║  Nettoertrag:                   {:>16}                             ║", format_eur(result.net_income));
    println!("║  Effektiver Steuersatz:         {:>16}                             ║", format_pct(result.effective_tax_rate));
    println!("╚══════════════════════════════════════════════════════════════════════════════╝");
}

fn print_plan_report(report: &TaxReport, settings: &TaxSettings, start_year: TaxYear) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                 STEUERREPORT SPARPLAN (AB {:^6})                            ║", start_year.0);
    println!("╠══════════════════════════════════════════════════════════════════════════════╣");
    println!("║  Jahr │       Zinsen │ Steuerpfl. │     Steuer │       Netto │   Kumuliert  ║");
    println!("╟───────┼──────────────┼────────────┼────────────┼─────────────┼──────────────╢");

    for year in &report.years {
        println!(
            "║  {:>4} │ {:>12} │ {:>10} │ {:>10} │ {:>11} │ {:>12} ║",
            year.year,
            format_de(year.tax.gross_income, 2),
            format_de(year.tax.taxable_income, 2),
            format_de(year.tax.total_tax, 2),
            format_de(year.tax.net_income, 2),
            format_de(year.cumulative_tax, 2),
        );
    }

    println!("╠══════════════════════════════════════════════════════════════════════════════╣");
    println!("║  ZUSAMMENFASSUNG                                                             ║");
    println!("╟──────────────────────────────────────────────────────────────────────────────╢");
    println!("║  Zinserträge gesamt:        {:>18}                               ║", format_eur(report.total_gross));
    println!("║  Steuern gesamt:            {:>18}                               ║", format_eur(report.total_tax));
    println!("║  Netto nach Steuern:        {:>18}                               ║", format_eur(report.total_net));
    if settings.married {
        println!("║  Veranlagung: Zusammenveranlagung (doppelter Freibetrag)                     ║");
    }
    println!("╚══════════════════════════════════════════════════════════════════════════════╝");
}

fn print_tips(tips: &[String]) {
    if tips.is_empty() {
        return;
    }
    println!();
    println!("HINWEISE");
    for (i, tip) in tips.iter().enumerate() {
        println!("  {}. {}", i + 1, tip);
    }
}
