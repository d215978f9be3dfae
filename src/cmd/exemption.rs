//! Exemption command - inspect and check a Freistellungsauftrag plan

use crate::cmd::read_exemption_plan;
use crate::exemption::ExemptionPlan;
use crate::money::format_eur;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ExemptionCommand {
    /// Freistellungsauftrag-Plan (JSON). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ExemptionOutput<'a> {
    plan: &'a ExemptionPlan,
    allowance: String,
    total_allocated: String,
    total_used: String,
    total_remaining: String,
    unallocated: String,
    issue_count: usize,
    issues: Vec<String>,
}

impl ExemptionCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let plan = read_exemption_plan(&self.file)?;
        let issues: Vec<String> = plan.validate().iter().map(|i| i.to_string()).collect();

        if self.json {
            let output = ExemptionOutput {
                plan: &plan,
                allowance: plan.allowance().to_string(),
                total_allocated: plan.total_allocated().to_string(),
                total_used: plan.total_used().to_string(),
                total_remaining: plan.total_remaining().to_string(),
                unallocated: plan.unallocated().to_string(),
                issue_count: issues.len(),
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&plan, &issues);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, plan: &ExemptionPlan, issues: &[String]) {
        println!();
        println!(
            "FREISTELLUNGSAUFTRÄGE {} ({})",
            plan.year,
            if plan.married {
                "Zusammenveranlagung"
            } else {
                "Einzelveranlagung"
            }
        );
        println!();

        if plan.allocations.is_empty() {
            println!("  (keine Freistellungsaufträge erfasst)");
        } else {
            let rows: Vec<AllocationRow> = plan
                .allocations
                .iter()
                .map(|a| AllocationRow {
                    bank: a.bank.clone(),
                    account_type: a.account_type.clone().unwrap_or_default(),
                    amount: format_eur(a.amount),
                    used: format_eur(a.used),
                    remaining: format_eur(a.remaining()),
                    note: a.note.clone().unwrap_or_default(),
                })
                .collect();

            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }

        println!();
        println!("  Sparerpauschbetrag:  {:>14}", format_eur(plan.allowance()));
        println!("  Verteilt:            {:>14}", format_eur(plan.total_allocated()));
        println!("  Verbraucht:          {:>14}", format_eur(plan.total_used()));
        println!("  Verbleibend:         {:>14}", format_eur(plan.total_remaining()));
        println!("  Nicht verteilt:      {:>14}", format_eur(plan.unallocated()));
        println!();

        if issues.is_empty() {
            println!("\u{2713} Keine Probleme gefunden.");
        } else {
            println!("\u{26A0} {} Problem(e) gefunden:", issues.len());
            println!();
            for (i, issue) in issues.iter().enumerate() {
                println!("  {}. {}", i + 1, issue);
            }
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct AllocationRow {
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Kontoart")]
    account_type: String,
    #[tabled(rename = "Freigestellt")]
    amount: String,
    #[tabled(rename = "Verbraucht")]
    used: String,
    #[tabled(rename = "Verbleibend")]
    remaining: String,
    #[tabled(rename = "Notiz")]
    note: String,
}
