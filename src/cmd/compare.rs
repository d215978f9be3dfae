//! Compare command - tax burden across fund categories and Kirchensteuer rates

use crate::money::{format_eur, format_pct};
use crate::tax::{calculate_yearly_tax, FundCategory, TaxSettings, TaxYear};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

const FUND_CATEGORIES: [FundCategory; 5] = [
    FundCategory::Sonstige,
    FundCategory::Mischfonds,
    FundCategory::Aktienfonds,
    FundCategory::Immobilienfonds,
    FundCategory::AuslandsImmobilienfonds,
];

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Jährlicher Bruttoertrag in Euro
    #[arg(short, long)]
    gain: Decimal,

    /// Steuerjahr (Kalenderjahr), Standard: aktuelles Jahr
    #[arg(long)]
    tax_year: Option<i32>,

    /// Zusammenveranlagung (doppelter Sparerpauschbetrag)
    #[arg(long)]
    married: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let tax_year = self.tax_year.map_or_else(TaxYear::current, TaxYear);
        let entries = comparison_entries(self.gain, self.married, tax_year);

        if self.json {
            let output = CompareOutput {
                gross_income: self.gain,
                tax_year: tax_year.0,
                married: self.married,
                entries,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        self.print_table(&entries, tax_year);
        Ok(())
    }

    fn print_table(&self, entries: &[CompareEntry], tax_year: TaxYear) {
        println!();
        println!(
            "STEUERVERGLEICH {} ({} Bruttoertrag, {})",
            tax_year,
            format_eur(self.gain),
            if self.married {
                "Zusammenveranlagung"
            } else {
                "Einzelveranlagung"
            }
        );
        println!();

        let rows: Vec<CompareRow> = entries
            .iter()
            .map(|e| CompareRow {
                fund: e.fund_category.clone(),
                church: e.kirchensteuer_label.clone(),
                total_tax: format_eur(e.total_tax),
                net_income: format_eur(e.net_income),
                effective_rate: format_pct(e.effective_tax_rate),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

#[derive(Debug, Clone, Serialize)]
struct CompareEntry {
    fund_category: String,
    kirchensteuer_label: String,
    total_tax: Decimal,
    net_income: Decimal,
    effective_tax_rate: Decimal,
}

#[derive(Debug, Serialize)]
struct CompareOutput {
    gross_income: Decimal,
    tax_year: i32,
    married: bool,
    entries: Vec<CompareEntry>,
}

#[derive(Debug, Clone, Tabled)]
struct CompareRow {
    #[tabled(rename = "Fondskategorie")]
    fund: String,
    #[tabled(rename = "Kirchensteuer")]
    church: String,
    #[tabled(rename = "Steuer gesamt")]
    total_tax: String,
    #[tabled(rename = "Netto")]
    net_income: String,
    #[tabled(rename = "Eff. Satz")]
    effective_rate: String,
}

fn comparison_entries(gain: Decimal, married: bool, tax_year: TaxYear) -> Vec<CompareEntry> {
    let church_variants: [(Option<Decimal>, &str); 3] = [
        (None, "keine"),
        (Some(dec!(0.08)), "8% (BW/BY)"),
        (Some(dec!(0.09)), "9%"),
    ];

    let mut entries = Vec::with_capacity(FUND_CATEGORIES.len() * church_variants.len());
    for fund in FUND_CATEGORIES {
        for (kirchensteuer, label) in church_variants {
            let settings = TaxSettings {
                married,
                kirchensteuer,
                fund_category: fund,
            };
            let result = calculate_yearly_tax(gain, &settings, tax_year);
            entries.push(CompareEntry {
                fund_category: fund.display_de().to_string(),
                kirchensteuer_label: label.to_string(),
                total_tax: result.total_tax,
                net_income: result.net_income,
                effective_tax_rate: result.effective_tax_rate,
            });
        }
    }
    entries
}
