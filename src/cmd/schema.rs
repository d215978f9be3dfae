//! Schema command - print the expected Freistellungsauftrag input format

use crate::exemption::{ExemptionAllocation, ExemptionPlan};
use clap::Args;
use rust_decimal_macros::dec;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or example
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the Freistellungsauftrag plan format
    JsonSchema,
    /// A complete example plan
    Example,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Example => self.print_example(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ExemptionPlan);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_example(&self) -> anyhow::Result<()> {
        let plan = ExemptionPlan {
            year: 2024,
            married: false,
            allocations: vec![
                ExemptionAllocation {
                    bank: "DKB".to_string(),
                    account_type: Some("Depot".to_string()),
                    amount: dec!(600),
                    used: dec!(150),
                    note: Some("ETF-Sparplan".to_string()),
                },
                ExemptionAllocation {
                    bank: "ING".to_string(),
                    account_type: Some("Tagesgeld".to_string()),
                    amount: dec!(400),
                    used: dec!(0),
                    note: None,
                },
            ],
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
        Ok(())
    }
}
