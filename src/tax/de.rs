use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Abgeltungssteuer: flat 25 % on capital income
pub const ABGELTUNGSSTEUER_RATE: Decimal = dec!(0.25);

/// Solidaritätszuschlag: 5.5 % of the Abgeltungssteuer
pub const SOLIDARITAETSZUSCHLAG_RATE: Decimal = dec!(0.055);

/// German tax year (calendar year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    pub fn current() -> Self {
        TaxYear(Local::now().year())
    }

    /// Sparerpauschbetrag: annual tax-free allowance for capital income.
    /// Raised from 801 € / 1 602 € to 1 000 € / 2 000 € in 2023.
    pub fn sparerpauschbetrag(&self, married: bool) -> Decimal {
        match (self.0, married) {
            (2023.., false) => dec!(1000),
            (2023.., true) => dec!(2000),
            (_, false) => dec!(801),
            (_, true) => dec!(1602),
        }
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The sixteen German federal states, for the Kirchensteuer rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Bundesland {
    BadenWuerttemberg,
    Bayern,
    Berlin,
    Brandenburg,
    Bremen,
    Hamburg,
    Hessen,
    MecklenburgVorpommern,
    Niedersachsen,
    NordrheinWestfalen,
    RheinlandPfalz,
    Saarland,
    Sachsen,
    SachsenAnhalt,
    SchleswigHolstein,
    Thueringen,
}

impl Bundesland {
    /// Kirchensteuer on capital income: 8 % in Baden-Württemberg and
    /// Bayern, 9 % everywhere else.
    pub fn kirchensteuer_rate(&self) -> Decimal {
        match self {
            Bundesland::BadenWuerttemberg | Bundesland::Bayern => dec!(0.08),
            _ => dec!(0.09),
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Bundesland::BadenWuerttemberg => "Baden-Württemberg",
            Bundesland::Bayern => "Bayern",
            Bundesland::Berlin => "Berlin",
            Bundesland::Brandenburg => "Brandenburg",
            Bundesland::Bremen => "Bremen",
            Bundesland::Hamburg => "Hamburg",
            Bundesland::Hessen => "Hessen",
            Bundesland::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Bundesland::Niedersachsen => "Niedersachsen",
            Bundesland::NordrheinWestfalen => "Nordrhein-Westfalen",
            Bundesland::RheinlandPfalz => "Rheinland-Pfalz",
            Bundesland::Saarland => "Saarland",
            Bundesland::Sachsen => "Sachsen",
            Bundesland::SachsenAnhalt => "Sachsen-Anhalt",
            Bundesland::SchleswigHolstein => "Schleswig-Holstein",
            Bundesland::Thueringen => "Thüringen",
        }
    }
}

impl std::fmt::Display for Bundesland {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Fund category for the Teilfreistellung (§ 20 InvStG)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FundCategory {
    /// Equity funds (>= 51 % equity): 30 % exempt
    Aktienfonds,
    /// Mixed funds (>= 25 % equity): 15 % exempt
    Mischfonds,
    /// Domestic real-estate funds: 60 % exempt
    Immobilienfonds,
    /// Foreign real-estate funds: 80 % exempt
    AuslandsImmobilienfonds,
    /// Everything else, including plain interest: no exemption
    #[default]
    Sonstige,
}

impl FundCategory {
    pub fn teilfreistellung_rate(&self) -> Decimal {
        match self {
            FundCategory::Aktienfonds => dec!(0.30),
            FundCategory::Mischfonds => dec!(0.15),
            FundCategory::Immobilienfonds => dec!(0.60),
            FundCategory::AuslandsImmobilienfonds => dec!(0.80),
            FundCategory::Sonstige => Decimal::ZERO,
        }
    }

    pub fn display_de(&self) -> &'static str {
        match self {
            FundCategory::Aktienfonds => "Aktienfonds",
            FundCategory::Mischfonds => "Mischfonds",
            FundCategory::Immobilienfonds => "Immobilienfonds",
            FundCategory::AuslandsImmobilienfonds => "Auslands-Immobilienfonds",
            FundCategory::Sonstige => "Sonstige",
        }
    }
}

/// Personal settings that determine the tax burden
#[derive(Debug, Clone, Default)]
pub struct TaxSettings {
    pub married: bool,
    /// Kirchensteuer rate (e.g. 0.09), `None` if not church-tax liable
    pub kirchensteuer: Option<Decimal>,
    pub fund_category: FundCategory,
}

impl TaxSettings {
    /// Settings with the Kirchensteuer rate of the given state
    pub fn with_kirchensteuer(married: bool, bundesland: Bundesland) -> Self {
        TaxSettings {
            married,
            kirchensteuer: Some(bundesland.kirchensteuer_rate()),
            fund_category: FundCategory::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparerpauschbetrag_from_2023() {
        assert_eq!(TaxYear(2023).sparerpauschbetrag(false), dec!(1000));
        assert_eq!(TaxYear(2023).sparerpauschbetrag(true), dec!(2000));
        assert_eq!(TaxYear(2026).sparerpauschbetrag(false), dec!(1000));
    }

    #[test]
    fn sparerpauschbetrag_before_2023() {
        assert_eq!(TaxYear(2022).sparerpauschbetrag(false), dec!(801));
        assert_eq!(TaxYear(2022).sparerpauschbetrag(true), dec!(1602));
        assert_eq!(TaxYear(2010).sparerpauschbetrag(false), dec!(801));
    }

    #[test]
    fn kirchensteuer_rates_by_state() {
        assert_eq!(
            Bundesland::BadenWuerttemberg.kirchensteuer_rate(),
            dec!(0.08)
        );
        assert_eq!(Bundesland::Bayern.kirchensteuer_rate(), dec!(0.08));
        assert_eq!(Bundesland::Berlin.kirchensteuer_rate(), dec!(0.09));
        assert_eq!(Bundesland::Hamburg.kirchensteuer_rate(), dec!(0.09));
        assert_eq!(Bundesland::Sachsen.kirchensteuer_rate(), dec!(0.09));
    }

    #[test]
    fn teilfreistellung_rates() {
        assert_eq!(FundCategory::Aktienfonds.teilfreistellung_rate(), dec!(0.30));
        assert_eq!(FundCategory::Mischfonds.teilfreistellung_rate(), dec!(0.15));
        assert_eq!(
            FundCategory::Immobilienfonds.teilfreistellung_rate(),
            dec!(0.60)
        );
        assert_eq!(
            FundCategory::AuslandsImmobilienfonds.teilfreistellung_rate(),
            dec!(0.80)
        );
        assert_eq!(FundCategory::Sonstige.teilfreistellung_rate(), Decimal::ZERO);
    }

    #[test]
    fn settings_from_bundesland() {
        let settings = TaxSettings::with_kirchensteuer(false, Bundesland::Bayern);
        assert_eq!(settings.kirchensteuer, Some(dec!(0.08)));
        assert!(!settings.married);
    }

    #[test]
    fn tax_year_display() {
        assert_eq!(TaxYear(2024).to_string(), "2024");
    }
}
