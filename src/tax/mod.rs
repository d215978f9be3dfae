pub mod abgeltung;
pub mod de;

pub use abgeltung::{
    calculate_plan_tax, calculate_yearly_tax, calculate_yearly_tax_with_allowance,
    optimization_tips, TaxReport, YearlyTax,
};
pub use de::{Bundesland, FundCategory, TaxSettings, TaxYear};
