//! Grow command - compound interest projection for a savings plan

use crate::growth::{CompoundFrequency, GrowthReport, SavingsPlan};
use crate::money::{format_eur, format_pct};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;

#[derive(Args, Debug)]
pub struct GrowCommand {
    /// Startkapital in Euro
    #[arg(short, long)]
    principal: Decimal,

    /// Monatliche Sparrate in Euro
    #[arg(short, long, default_value = "0")]
    monthly: Decimal,

    /// Jährlicher Zinssatz in Prozent (z.B. 4.0)
    #[arg(short, long)]
    rate: Decimal,

    /// Anlagedauer in Jahren
    #[arg(short, long)]
    years: u32,

    /// Zinszahlungsfrequenz
    #[arg(short, long, value_enum, default_value_t = CompoundFrequency::Monthly)]
    frequency: CompoundFrequency,

    /// Jährliche Inflationsrate in Prozent, für die Kaufkraft-Angabe
    #[arg(long)]
    inflation: Option<Decimal>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl GrowCommand {
    pub fn plan(&self) -> SavingsPlan {
        SavingsPlan {
            principal: self.principal,
            monthly_payment: self.monthly,
            annual_rate: self.rate,
            years: self.years,
            frequency: self.frequency,
            inflation_rate: self.inflation,
        }
    }

    pub fn exec(&self) -> anyhow::Result<()> {
        let plan = self.plan();
        let report = simulate_validated(&plan)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        } else if self.csv {
            write_csv(&report, io::stdout())
        } else {
            print_report(&plan, &report);
            Ok(())
        }
    }
}

/// Validate the plan, surface warnings, and simulate
pub fn simulate_validated(plan: &SavingsPlan) -> anyhow::Result<GrowthReport> {
    let errors = plan.validation_errors();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Ungültige Eingaben: {}", messages.join("; "));
    }
    for warning in plan.warnings() {
        log::warn!("{}", warning);
    }
    log::info!(
        "Berechnung: Startkapital {}, Laufzeit {} Jahre",
        plan.principal,
        plan.years
    );
    Ok(plan.simulate())
}

#[derive(Debug, Serialize)]
struct YearlyCsvRecord {
    year: u32,
    start_amount: String,
    contributions: String,
    interest: String,
    end_amount: String,
    growth_rate_pct: String,
}

fn write_csv<W: io::Write>(report: &GrowthReport, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for year in &report.yearly {
        wtr.serialize(YearlyCsvRecord {
            year: year.year,
            start_amount: format!("{:.2}", year.start_amount),
            contributions: format!("{:.2}", year.contributions),
            interest: format!("{:.2}", year.interest),
            end_amount: format!("{:.2}", year.end_amount),
            growth_rate_pct: format!("{:.2}", year.growth_rate),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_report(plan: &SavingsPlan, report: &GrowthReport) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                       ZINSESZINS-BERECHNUNG ({:>2} JAHRE)                       ║", plan.years);
    println!("╠══════════════════════════════════════════════════════════════════════════════╣");
    println!("║  Jahr │    Startbetrag │  Einzahlungen │        Zinsen │         Endbetrag   ║");
    println!("╟───────┼────────────────┼───────────────┼───────────────┼─────────────────────╢");

    for year in &report.yearly {
        println!(
            "║  {:>4} │ {:>14} │ {:>13} │ {:>13} │ {:>19} ║",
            year.year,
            format_eur(year.start_amount),
            format_eur(year.contributions),
            format_eur(year.interest),
            format_eur(year.end_amount),
        );
    }

    println!("╠══════════════════════════════════════════════════════════════════════════════╣");
    println!("║  ÜBERSICHT                                                                   ║");
    println!("╟──────────────────────────────────────────────────────────────────────────────╢");
    println!("║  Endkapital:                {:>18}                               ║", format_eur(report.final_amount));
    println!("║  Eingezahlt gesamt:         {:>18}                               ║", format_eur(report.total_contributions));
    println!("║  Zinserträge:               {:>18}                               ║", format_eur(report.total_interest));
    println!("║  Jährliche Rendite:         {:>18}                               ║", format_pct(report.annual_return));
    if let Some(real) = report.real_final_amount {
        println!("║  Kaufkraft (inflationsber.):{:>18}                               ║", format_eur(real));
    }
    println!("╚══════════════════════════════════════════════════════════════════════════════╝");
}
