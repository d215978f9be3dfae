//! Export command - CSV file with a summary section and the yearly development

use crate::growth::{CompoundFrequency, GrowthReport, SavingsPlan};
use crate::money::format_de;
use crate::tax::{calculate_plan_tax, TaxReport, TaxSettings, TaxYear};
use chrono::Local;
use clap::Args;
use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Startkapital in Euro
    #[arg(short, long)]
    principal: Decimal,

    /// Monatliche Sparrate in Euro
    #[arg(short, long, default_value = "0")]
    monthly: Decimal,

    /// Jährlicher Zinssatz in Prozent
    #[arg(short, long)]
    rate: Decimal,

    /// Anlagedauer in Jahren
    #[arg(short, long)]
    years: u32,

    /// Zinszahlungsfrequenz
    #[arg(short, long, value_enum, default_value_t = CompoundFrequency::Monthly)]
    frequency: CompoundFrequency,

    /// Steuerspalten (Abgeltungssteuer pro Jahr) mit exportieren
    #[arg(long)]
    tax: bool,

    /// Steuerjahr für die Steuerspalten, Standard: aktuelles Jahr
    #[arg(long, requires = "tax")]
    tax_year: Option<i32>,

    /// Zusammenveranlagung (doppelter Sparerpauschbetrag)
    #[arg(long, requires = "tax")]
    married: bool,

    /// Zieldatei, Standard: generierter Dateiname im aktuellen Verzeichnis
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let plan = SavingsPlan {
            principal: self.principal,
            monthly_payment: self.monthly,
            annual_rate: self.rate,
            years: self.years,
            frequency: self.frequency,
            inflation_rate: None,
        };
        let report = super::grow::simulate_validated(&plan)?;

        let tax_report = self.tax.then(|| {
            let settings = TaxSettings {
                married: self.married,
                ..TaxSettings::default()
            };
            let start_year = self.tax_year.map_or_else(TaxYear::current, TaxYear);
            let yearly_interest: Vec<Decimal> =
                report.yearly.iter().map(|y| y.interest).collect();
            calculate_plan_tax(&yearly_interest, &settings, start_year, None)
        });

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(generate_filename(&plan)));

        let mut file = File::create(&path)?;
        write_export(&mut file, &plan, &report, tax_report.as_ref())?;

        log::info!("Export geschrieben: {}", path.display());
        println!("Datei erstellt: {}", path.display());
        Ok(())
    }
}

/// `Zinseszins-Berechnung_{principal in k}k-EUR_{years}Jahre_{date}.csv`
fn generate_filename(plan: &SavingsPlan) -> String {
    let date = Local::now().format("%Y-%m-%d");
    let principal_k = (plan.principal / Decimal::from(1000)).trunc();
    format!(
        "Zinseszins-Berechnung_{}k-EUR_{}Jahre_{}.csv",
        principal_k, plan.years, date
    )
}

fn format_currency(amount: Decimal) -> String {
    format!("{} €", format_de(amount, 2))
}

fn format_percentage(value: Decimal) -> String {
    format!("{}%", format_de(value, 1))
}

fn write_export<W: Write>(
    writer: &mut W,
    plan: &SavingsPlan,
    report: &GrowthReport,
    tax_report: Option<&TaxReport>,
) -> anyhow::Result<()> {
    // BOM so spreadsheet applications pick up UTF-8
    writer.write_all("\u{feff}".as_bytes())?;
    writeln!(writer, "ZINSESZINS-BERECHNUNG ÜBERSICHT")?;
    writeln!(writer)?;

    let total_return = if report.total_contributions > Decimal::ZERO {
        (report.final_amount - report.total_contributions) / report.total_contributions
            * Decimal::from(100)
    } else {
        Decimal::ZERO
    };

    let summary: [(&str, String); 11] = [
        ("Startkapital", format_currency(plan.principal)),
        ("Monatliche Sparrate", format_currency(plan.monthly_payment)),
        ("Zinssatz", format_percentage(plan.annual_rate)),
        ("Laufzeit", format!("{} Jahre", plan.years)),
        ("Zinszahlungsfrequenz", plan.frequency.display_de().to_string()),
        ("Endkapital", format_currency(report.final_amount)),
        ("Eingezahlt gesamt", format_currency(report.total_contributions)),
        ("Zinserträge", format_currency(report.total_interest)),
        ("Gesamtrendite", format_percentage(total_return)),
        ("Jährliche Rendite", format_percentage(report.annual_return)),
        (
            "Berechnet am",
            Local::now().format("%d.%m.%Y").to_string(),
        ),
    ];
    for (key, value) in summary {
        writeln!(writer, "\"{}\",\"{}\"", key, value)?;
    }

    writeln!(writer)?;
    writeln!(writer)?;
    writeln!(writer, "JÄHRLICHE ENTWICKLUNG")?;
    writeln!(writer)?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);
    let mut header = vec![
        "Jahr",
        "Startbetrag",
        "Einzahlungen",
        "Zinserträge",
        "Endbetrag",
        "Wachstum",
    ];
    if tax_report.is_some() {
        header.push("Steuer");
        header.push("Zinsen netto");
    }
    wtr.write_record(&header)?;

    for (i, year) in report.yearly.iter().enumerate() {
        let mut record = vec![
            year.year.to_string(),
            format_currency(year.start_amount),
            format_currency(year.contributions),
            format_currency(year.interest),
            format_currency(year.end_amount),
            format_percentage(year.growth_rate),
        ];
        if let Some(taxes) = tax_report {
            let tax = &taxes.years[i].tax;
            record.push(format_currency(tax.total_tax));
            record.push(format_currency(tax.net_income));
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn plan() -> SavingsPlan {
        SavingsPlan {
            principal: dec!(10000),
            monthly_payment: dec!(100),
            annual_rate: dec!(4),
            years: 5,
            frequency: CompoundFrequency::Monthly,
            inflation_rate: None,
        }
    }

    #[test]
    fn filename_carries_principal_and_years() {
        let name = generate_filename(&plan());
        assert!(name.starts_with("Zinseszins-Berechnung_10k-EUR_5Jahre_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn export_has_bom_sections_and_german_numbers() {
        let report = plan().simulate();
        let mut buffer = Vec::new();
        write_export(&mut buffer, &plan(), &report, None).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with('\u{feff}'));
        assert!(text.contains("ZINSESZINS-BERECHNUNG ÜBERSICHT"));
        assert!(text.contains("JÄHRLICHE ENTWICKLUNG"));
        assert!(text.contains("\"Startkapital\",\"10.000,00 €\""));
        assert!(text.contains("\"Laufzeit\",\"5 Jahre\""));
        assert!(text.contains("\"Zinszahlungsfrequenz\",\"Monatlich\""));
        // yearly rows are fully quoted
        assert!(text.contains("\"1\",\"10.000,00 €\""));
    }

    #[test]
    fn german_number_formatting() {
        assert_eq!(format_currency(dec!(1234.56)), "1.234,56 €");
        assert_eq!(format_percentage(dec!(5)), "5,0%");
    }

    #[test]
    fn tax_columns_appended_when_requested() {
        let report = plan().simulate();
        let yearly_interest: Vec<Decimal> = report.yearly.iter().map(|y| y.interest).collect();
        let taxes = calculate_plan_tax(
            &yearly_interest,
            &TaxSettings::default(),
            TaxYear(2023),
            None,
        );

        let mut buffer = Vec::new();
        write_export(&mut buffer, &plan(), &report, Some(&taxes)).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("\"Steuer\""));
        assert!(text.contains("\"Zinsen netto\""));
    }
}
