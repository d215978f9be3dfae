use clap::{Parser, Subcommand};

mod cmd;
mod exemption;
mod growth;
mod money;
mod tax;

use cmd::{
    compare::CompareCommand, exemption::ExemptionCommand, export::ExportCommand,
    grow::GrowCommand, limits::LimitsCommand, schema::SchemaCommand, tax::TaxCommand,
};

/// Zinseszins- und Abgeltungssteuer-Rechner für deutsche Sparer
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Zinseszins-Entwicklung eines Sparplans berechnen
    Grow(GrowCommand),
    /// Abgeltungssteuer auf Kapitalerträge berechnen
    Tax(TaxCommand),
    /// Steuerlast über Fondskategorien und Kirchensteuersätze vergleichen
    Compare(CompareCommand),
    /// Freistellungsauftrag-Plan anzeigen und prüfen
    Exemption(ExemptionCommand),
    /// Berechnung als CSV-Datei exportieren
    Export(ExportCommand),
    /// Zulässige Eingabebereiche als JSON ausgeben
    Limits(LimitsCommand),
    /// Eingabeformat für Freistellungsaufträge ausgeben
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Grow(cmd) => cmd.exec(),
        Command::Tax(cmd) => cmd.exec(),
        Command::Compare(cmd) => cmd.exec(),
        Command::Exemption(cmd) => cmd.exec(),
        Command::Export(cmd) => cmd.exec(),
        Command::Limits(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
