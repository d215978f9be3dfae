//! German-locale formatting for amounts and percentages

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as German-locale Euro, e.g. `1.234,56 €`
pub fn format_eur(amount: Decimal) -> String {
    format!("{} €", format_de(amount, 2))
}

/// Format an amount as Euro with an explicit sign for losses, e.g. `-1.234,56 €`
pub fn format_eur_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{} €", format_de(amount.abs(), 2))
    } else {
        format_eur(amount)
    }
}

/// Format a percentage with decimal comma, e.g. `4,2 %`
pub fn format_pct(value: Decimal) -> String {
    format!("{} %", format_de(value, 1))
}

/// Decimal with German thousands separator (`.`) and decimal comma (`,`)
pub fn format_de(value: Decimal, dp: u32) -> String {
    // Kaufmännische Rundung (half away from zero), not banker's rounding
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", dp as usize, rounded);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let negative = int_part.starts_with('-');
    let digits = int_part.trim_start_matches('-');

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}
