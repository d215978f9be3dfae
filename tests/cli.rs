//! E2E tests for the grow, tax, exemption and limits commands

use std::process::Command;

/// Run the binary with the given arguments
fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--"].iter().copied().chain(args.iter().copied()))
        .output()
        .expect("Failed to execute command")
}

#[test]
fn grow_report_shows_summary() {
    let output = run(&["grow", "-p", "10000", "-r", "5", "-y", "10", "-f", "yearly"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("ZINSESZINS-BERECHNUNG"));
    assert!(stdout.contains("ÜBERSICHT"));
    assert!(stdout.contains("Endkapital"));
    // 10000 at 5 % over 10 years, no contributions
    assert!(stdout.contains("16.288,95 €"));
}

#[test]
fn grow_json_has_yearly_breakdown() {
    let output = run(&["grow", "-p", "5000", "-m", "100", "-r", "4", "-y", "3", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"final_amount\""));
    assert!(stdout.contains("\"total_contributions\""));
    assert!(stdout.contains("\"yearly\""));
}

#[test]
fn grow_rejects_out_of_range_input() {
    let output = run(&["grow", "-p", "0", "-r", "5", "-y", "10"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Ungültige Eingaben"));
    assert!(stderr.contains("Startkapital"));
}

#[test]
fn tax_single_gain_report() {
    let output = run(&["tax", "--gain", "2000", "--tax-year", "2023"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("STEUERBERECHNUNG"));
    assert!(stdout.contains("Abgeltungssteuer"));
    assert!(stdout.contains("Solidaritätszuschlag"));
    // 1000 taxable: 250 + 13.75
    assert!(stdout.contains("263,75 €"));
    assert!(stdout.contains("1.736,25 €"));
}

#[test]
fn tax_with_kirchensteuer_and_bundesland() {
    let output = run(&[
        "tax",
        "--gain",
        "2000",
        "--tax-year",
        "2023",
        "-k",
        "-b",
        "baden-wuerttemberg",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Kirchensteuer"));
    // 8 % of 250
    assert!(stdout.contains("283,75 €"));
}

#[test]
fn tax_plan_mode_lists_years() {
    let output = run(&[
        "tax", "-p", "50000", "-m", "500", "-r", "6", "-y", "5", "--tax-year", "2023",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("STEUERREPORT SPARPLAN"));
    assert!(stdout.contains("ZUSAMMENFASSUNG"));
    assert!(stdout.contains("Steuern gesamt"));
}

#[test]
fn tax_json_single_gain() {
    let output = run(&["tax", "--gain", "2000", "--tax-year", "2023", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"abgeltungssteuer\""));
    assert!(stdout.contains("\"total_tax\""));
}

#[test]
fn compare_lists_fund_categories() {
    let output = run(&["compare", "--gain", "10000", "--tax-year", "2023"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("STEUERVERGLEICH"));
    assert!(stdout.contains("Aktienfonds"));
    assert!(stdout.contains("Mischfonds"));
    assert!(stdout.contains("Sonstige"));
}

#[test]
fn exemption_plan_summary() {
    let output = run(&["exemption", "tests/data/freistellung.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("FREISTELLUNGSAUFTRÄGE 2024"));
    assert!(stdout.contains("DKB"));
    assert!(stdout.contains("ING"));
    assert!(stdout.contains("Keine Probleme gefunden"));
}

#[test]
fn exemption_invalid_plan_fails() {
    let output = run(&["exemption", "tests/data/freistellung_invalid.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());
    assert!(stdout.contains("Problem(e) gefunden"));
    assert!(stdout.contains("übersteigt"));
}

#[test]
fn tax_rejects_invalid_exemption_plan() {
    let output = run(&[
        "tax",
        "--gain",
        "2000",
        "-e",
        "tests/data/freistellung_invalid.json",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("fehlerhaft"));
}

#[test]
fn tax_caps_allowance_with_exemption_plan() {
    let output = run(&[
        "tax",
        "--gain",
        "2000",
        "--tax-year",
        "2024",
        "-e",
        "tests/data/freistellung.json",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    // Plan only distributes 900 of the 1000 allowance
    assert!(stdout.contains("\"tax_free_amount\": \"900\""));
}

#[test]
fn limits_json() {
    let output = run(&["limits"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"max_principal\""));
    assert!(stdout.contains("\"supported_frequencies\""));
    assert!(stdout.contains("\"currency\": \"EUR\""));
    assert!(stdout.contains("\"locale\": \"de_DE\""));
}

#[test]
fn schema_outputs_plan_schema() {
    let output = run(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("ExemptionPlan"));
    assert!(stdout.contains("allocations"));
}
