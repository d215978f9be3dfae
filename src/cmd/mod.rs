pub mod compare;
pub mod exemption;
pub mod export;
pub mod grow;
pub mod limits;
pub mod schema;
pub mod tax;

use crate::exemption::{self as exemption_plan, ExemptionPlan};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a Freistellungsauftrag plan (JSON) from a file, or stdin with "-"
pub fn read_exemption_plan(path: &Path) -> anyhow::Result<ExemptionPlan> {
    if path.as_os_str() == "-" {
        read_plan_from_stdin()
    } else {
        let file = File::open(path)?;
        exemption_plan::read_json(BufReader::new(file))
    }
}

fn read_plan_from_stdin() -> anyhow::Result<ExemptionPlan> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("Keine Eingabe erhalten. Datei angeben oder Daten über stdin leiten.");
    }

    exemption_plan::read_json(io::Cursor::new(buffer))
}
