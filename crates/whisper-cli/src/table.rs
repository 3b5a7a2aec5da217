//! Fixed-width table rendering for the three scan outputs.

use signal_core::{ClassifiedEarnings, ClassifiedFiling, ClassifiedInsider};

const NO_DATA: &str = "No signals. The feed may be empty or unavailable.";

/// Display width of the filing title column.
const TITLE_WIDTH: usize = 80;

fn move_cell(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:+.2}%", pct),
        None => "-".to_string(),
    }
}

fn elide(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

pub fn render_earnings(rows: &[ClassifiedEarnings]) {
    if rows.is_empty() {
        println!("{}", NO_DATA);
        return;
    }

    println!(
        "{:<8} {:<28} {:>10} {:<13} {:>8}",
        "SYMBOL", "COMPANY", "SURPRISE%", "SIGNAL", "MOVE%"
    );
    for row in rows {
        println!(
            "{:<8} {:<28} {:>10.1} {:<13} {:>8}",
            row.record.symbol,
            elide(&row.record.company, 28),
            row.surprise_pct,
            row.signal.label(),
            move_cell(row.price_move_pct),
        );
    }
    println!("\n{} earnings signal(s)", rows.len());
}

pub fn render_filings(rows: &[ClassifiedFiling]) {
    if rows.is_empty() {
        println!("{}", NO_DATA);
        return;
    }

    println!(
        "{:<8} {:<80} {:>7} {:<13} {:>8}  {}",
        "SYMBOL", "TITLE", "SCORE", "SIGNAL", "MOVE%", "LINK"
    );
    for row in rows {
        println!(
            "{:<8} {:<80} {:>7.3} {:<13} {:>8}  {}",
            row.record.symbol,
            elide(&row.record.title, TITLE_WIDTH),
            row.score,
            row.signal.label(),
            move_cell(row.price_move_pct),
            row.record.link,
        );
    }
    println!("\n{} filing signal(s)", rows.len());
}

pub fn render_insiders(rows: &[ClassifiedInsider]) {
    if rows.is_empty() {
        println!("{}", NO_DATA);
        return;
    }

    println!(
        "{:<8} {:<12} {:<24} {:>10} {:>10} {:>14} {:<13} {:>8}",
        "SYMBOL", "DATE", "INSIDER", "PRICE", "QTY", "VALUE", "SIGNAL", "MOVE%"
    );
    for row in rows {
        println!(
            "{:<8} {:<12} {:<24} {:>10.2} {:>10} {:>14.0} {:<13} {:>8}",
            row.record.symbol,
            row.record.trade_date,
            elide(&row.record.insider_name, 24),
            row.record.price,
            row.record.quantity,
            row.record.value,
            row.signal.label(),
            move_cell(row.price_move_pct),
        );
    }
    println!("\n{} insider buy(s)", rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_cell_distinguishes_missing_from_zero() {
        assert_eq!(move_cell(None), "-");
        assert_eq!(move_cell(Some(0.0)), "+0.00%");
        assert_eq!(move_cell(Some(-1.5)), "-1.50%");
    }

    #[test]
    fn elide_keeps_short_text() {
        assert_eq!(elide("short", 10), "short");
    }

    #[test]
    fn elide_truncates_long_text() {
        let long = "x".repeat(100);
        let out = elide(&long, 80);
        assert_eq!(out.chars().count(), 80);
        assert!(out.ends_with("..."));
    }
}
