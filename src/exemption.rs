//! Freistellungsauftrag plan: per-bank exemption allocations for one tax year

use crate::tax::TaxYear;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One exemption order placed with a bank
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExemptionAllocation {
    /// Bank or broker the order was placed with
    pub bank: String,
    /// Account type, e.g. "Depot" or "Tagesgeld"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// Allocated amount in Euro
    pub amount: Decimal,
    /// Already consumed portion of the allocation
    #[serde(default)]
    pub used: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ExemptionAllocation {
    pub fn remaining(&self) -> Decimal {
        (self.amount - self.used).max(Decimal::ZERO)
    }
}

/// All exemption orders of one filer for one tax year
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExemptionPlan {
    /// Tax year the orders apply to
    pub year: i32,
    /// Married filers have the doubled allowance
    #[serde(default)]
    pub married: bool,
    pub allocations: Vec<ExemptionAllocation>,
}

/// A consistency problem in an exemption plan, with the German message
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExemptionIssue {
    #[error("{bank}: Der freigestellte Betrag darf nicht negativ sein")]
    NegativeAmount { bank: String },
    #[error("{bank}: Der Verbrauch darf nicht negativ sein")]
    NegativeUsed { bank: String },
    #[error("{bank}: Verbrauch ({used}€) übersteigt den freigestellten Betrag ({amount}€)")]
    OverUsed {
        bank: String,
        used: Decimal,
        amount: Decimal,
    },
    #[error("Mehrere Freistellungsaufträge bei derselben Bank: {bank}")]
    DuplicateBank { bank: String },
    #[error(
        "Die Summe der Freistellungsaufträge ({total}€) übersteigt den Sparerpauschbetrag ({allowance}€)"
    )]
    OverAllocated { total: Decimal, allowance: Decimal },
}

impl ExemptionPlan {
    /// Statutory Sparerpauschbetrag for this plan's year and filing status
    pub fn allowance(&self) -> Decimal {
        TaxYear(self.year).sparerpauschbetrag(self.married)
    }

    pub fn total_allocated(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    pub fn total_used(&self) -> Decimal {
        self.allocations.iter().map(|a| a.used).sum()
    }

    pub fn total_remaining(&self) -> Decimal {
        self.allocations.iter().map(|a| a.remaining()).sum()
    }

    /// Allowance not yet distributed to any bank
    pub fn unallocated(&self) -> Decimal {
        (self.allowance() - self.total_allocated()).max(Decimal::ZERO)
    }

    /// The allowance a tax calculation may apply: what is actually
    /// distributed to banks, never more than the statutory amount.
    pub fn effective_allowance(&self) -> Decimal {
        self.total_allocated().min(self.allowance())
    }

    /// All consistency issues: per-allocation range checks, duplicate
    /// banks, and the statutory cap on the sum of allocations.
    pub fn validate(&self) -> Vec<ExemptionIssue> {
        let mut issues = Vec::new();

        let mut seen: Vec<&str> = Vec::new();
        for allocation in &self.allocations {
            if allocation.amount < Decimal::ZERO {
                issues.push(ExemptionIssue::NegativeAmount {
                    bank: allocation.bank.clone(),
                });
            }
            if allocation.used < Decimal::ZERO {
                issues.push(ExemptionIssue::NegativeUsed {
                    bank: allocation.bank.clone(),
                });
            }
            if allocation.used > allocation.amount {
                issues.push(ExemptionIssue::OverUsed {
                    bank: allocation.bank.clone(),
                    used: allocation.used,
                    amount: allocation.amount,
                });
            }
            if seen
                .iter()
                .any(|b| b.eq_ignore_ascii_case(&allocation.bank))
            {
                issues.push(ExemptionIssue::DuplicateBank {
                    bank: allocation.bank.clone(),
                });
            }
            seen.push(&allocation.bank);
        }

        let total = self.total_allocated();
        let allowance = self.allowance();
        if total > allowance {
            issues.push(ExemptionIssue::OverAllocated { total, allowance });
        }

        issues
    }
}

/// Read an exemption plan from JSON
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<ExemptionPlan> {
    let plan: ExemptionPlan = serde_json::from_reader(reader)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn allocation(bank: &str, amount: Decimal, used: Decimal) -> ExemptionAllocation {
        ExemptionAllocation {
            bank: bank.to_string(),
            account_type: None,
            amount,
            used,
            note: None,
        }
    }

    fn plan(allocations: Vec<ExemptionAllocation>) -> ExemptionPlan {
        ExemptionPlan {
            year: 2024,
            married: false,
            allocations,
        }
    }

    #[test]
    fn totals_and_remaining() {
        let plan = plan(vec![
            allocation("DKB", dec!(600), dec!(150)),
            allocation("ING", dec!(400), dec!(400)),
        ]);

        assert_eq!(plan.allowance(), dec!(1000));
        assert_eq!(plan.total_allocated(), dec!(1000));
        assert_eq!(plan.total_used(), dec!(550));
        assert_eq!(plan.total_remaining(), dec!(450));
        assert_eq!(plan.unallocated(), Decimal::ZERO);
        assert_eq!(plan.effective_allowance(), dec!(1000));
        assert!(plan.validate().is_empty());
    }

    #[test]
    fn partial_allocation_leaves_headroom() {
        let plan = plan(vec![allocation("DKB", dec!(600), dec!(0))]);

        assert_eq!(plan.unallocated(), dec!(400));
        assert_eq!(plan.effective_allowance(), dec!(600));
    }

    #[test]
    fn married_doubles_allowance() {
        let mut p = plan(vec![allocation("DKB", dec!(1500), dec!(0))]);
        assert_eq!(p.validate().len(), 1);

        p.married = true;
        assert_eq!(p.allowance(), dec!(2000));
        assert!(p.validate().is_empty());
    }

    #[test]
    fn over_allocation_detected() {
        let plan = plan(vec![
            allocation("DKB", dec!(700), dec!(0)),
            allocation("ING", dec!(500), dec!(0)),
        ]);

        let issues = plan.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            ExemptionIssue::OverAllocated {
                total: dec!(1200),
                allowance: dec!(1000),
            }
        );
        // Tax calculations never apply more than the statutory allowance
        assert_eq!(plan.effective_allowance(), dec!(1000));
    }

    #[test]
    fn over_used_detected() {
        let plan = plan(vec![allocation("DKB", dec!(500), dec!(600))]);

        let issues = plan.validate();
        assert!(issues.iter().any(|i| matches!(
            i,
            ExemptionIssue::OverUsed { used, amount, .. }
                if *used == dec!(600) && *amount == dec!(500)
        )));
    }

    #[test]
    fn duplicate_banks_detected() {
        let plan = plan(vec![
            allocation("DKB", dec!(300), dec!(0)),
            allocation("dkb", dec!(300), dec!(0)),
        ]);

        let issues = plan.validate();
        assert!(issues
            .iter()
            .any(|i| matches!(i, ExemptionIssue::DuplicateBank { .. })));
    }

    #[test]
    fn pre_2023_allowance_applies() {
        let p = ExemptionPlan {
            year: 2022,
            married: false,
            allocations: vec![allocation("DKB", dec!(801), dec!(0))],
        };
        assert!(p.validate().is_empty());
        assert_eq!(p.allowance(), dec!(801));
    }

    #[test]
    fn issues_carry_german_messages() {
        let plan = plan(vec![allocation("DKB", dec!(500), dec!(600))]);
        let issues = plan.validate();
        assert_eq!(
            issues[0].to_string(),
            "DKB: Verbrauch (600€) übersteigt den freigestellten Betrag (500€)"
        );
    }

    #[test]
    fn parse_json_plan() {
        let json = r#"{
            "year": 2024,
            "married": false,
            "allocations": [
                { "bank": "DKB", "account_type": "Depot", "amount": 600, "used": 150 },
                { "bank": "ING", "amount": 400, "note": "Tagesgeld" }
            ]
        }"#;

        let plan = read_json(json.as_bytes()).unwrap();
        assert_eq!(plan.allocations.len(), 2);
        assert_eq!(plan.allocations[0].used, dec!(150));
        assert_eq!(plan.allocations[1].used, Decimal::ZERO);
        assert_eq!(plan.allocations[1].note.as_deref(), Some("Tagesgeld"));
    }
}
