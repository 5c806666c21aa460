// Output formatting — terminal display helpers.

pub mod terminal;

/// Format a dollar amount with thousands separators and two decimals,
/// e.g. 1234567.891 -> "1,234,567.89". Display-only — the engine keeps
/// full precision internally.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}
