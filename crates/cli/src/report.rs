//! Text rendering of the ledger view.
//!
//! Rendering produces plain [`Line`]s tagged with a [`Tone`]; colors are only
//! applied when the lines are written to a terminal.
use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use engine::{CategoryTotal, Currency, EntryKind, LedgerRow, LedgerView, MoneyCents, Totals};

const BAR_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Positive,
    Negative,
    Plain,
}

impl Tone {
    fn for_amount(amount: MoneyCents) -> Self {
        if amount.is_positive() {
            Self::Positive
        } else if amount.is_negative() {
            Self::Negative
        } else {
            Self::Plain
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            Self::Positive => Some(Color::Green),
            Self::Negative => Some(Color::Red),
            Self::Heading | Self::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Horizontal bar of `width` cells, filled in proportion to `value / max`.
#[must_use]
pub fn ascii_bar(value: MoneyCents, max: MoneyCents, width: usize) -> String {
    if !max.is_positive() {
        return "░".repeat(width);
    }

    let ratio = (value.abs().cents() as f64 / max.cents() as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn ledger_lines(rows: &[LedgerRow], currency: Currency) -> Vec<Line> {
    let mut lines = vec![Line::new(Tone::Heading, "Ledger")];
    if rows.is_empty() {
        lines.push(Line::new(Tone::Plain, "  no entries yet"));
        return lines;
    }

    lines.push(Line::new(
        Tone::Plain,
        format!(
            "  {:<10}  {:<20}  {:>14}  {:>14}",
            "date", "category", "amount", "balance"
        ),
    ));
    lines.extend(rows.iter().map(|row| {
        Line::new(
            Tone::for_amount(row.entry.amount),
            format!(
                "  {:<10}  {:<20}  {:>14}  {:>14}",
                row.entry.date.format("%Y-%m-%d").to_string(),
                row.entry.category,
                row.entry.amount.format(currency),
                row.balance.format(currency),
            ),
        )
    }));
    lines
}

fn totals_lines(totals: &Totals, currency: Currency) -> Vec<Line> {
    vec![
        Line::new(Tone::Heading, "Totals"),
        Line::new(
            Tone::Positive,
            format!("  {:<10}  {:>14}", "income", totals.income_total.format(currency)),
        ),
        Line::new(
            Tone::Negative,
            format!("  {:<10}  {:>14}", "expenses", totals.expense_total.format(currency)),
        ),
        Line::new(
            Tone::for_amount(totals.net_balance),
            format!("  {:<10}  {:>14}", "balance", totals.net_balance.format(currency)),
        ),
    ]
}

fn breakdown_lines(kind: EntryKind, totals: &[CategoryTotal], currency: Currency) -> Vec<Line> {
    let title = match kind {
        EntryKind::Expense => "Expenses by category",
        EntryKind::Income => "Income by category",
    };
    let mut lines = vec![Line::new(Tone::Heading, title)];
    if totals.is_empty() {
        lines.push(Line::new(Tone::Plain, "  no categories"));
        return lines;
    }

    let max = totals
        .iter()
        .map(|total| total.total)
        .max()
        .unwrap_or(MoneyCents::ZERO);
    let tone = match kind {
        EntryKind::Expense => Tone::Negative,
        EntryKind::Income => Tone::Positive,
    };
    lines.extend(totals.iter().map(|total| {
        Line::new(
            tone,
            format!(
                "  {:<20}  {}  {:>14}",
                total.category,
                ascii_bar(total.total, max, BAR_WIDTH),
                total.total.format(currency),
            ),
        )
    }));
    lines
}

/// Full report: ledger, totals and the breakdowns.
///
/// With `only` set, just the breakdown of that kind is included.
#[must_use]
pub fn render(view: &LedgerView, currency: Currency, only: Option<EntryKind>) -> Vec<Line> {
    let mut lines = ledger_lines(&view.ledger, currency);
    lines.push(Line::new(Tone::Plain, ""));
    lines.extend(totals_lines(&view.totals, currency));

    for kind in EntryKind::ALL {
        if only.is_some_and(|only| only != kind) {
            continue;
        }
        lines.push(Line::new(Tone::Plain, ""));
        lines.extend(breakdown_lines(kind, view.breakdown(kind), currency));
    }
    lines
}

/// Write `lines` to `out`, coloring them when `color` is set.
pub fn print(lines: &[Line], out: &mut impl Write, color: bool) -> std::io::Result<()> {
    for line in lines {
        if !color {
            writeln!(out, "{}", line.text)?;
            continue;
        }

        if line.tone == Tone::Heading {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if let Some(fg) = line.tone.color() {
            queue!(out, SetForegroundColor(fg))?;
        }
        queue!(
            out,
            Print(&line.text),
            ResetColor,
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Entry, Snapshot};

    use super::*;

    fn entry(id: i64, date: &str, category: &str, cents: i64) -> Entry {
        Entry {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category: category.to_string(),
            amount: MoneyCents::new(cents),
        }
    }

    fn view() -> LedgerView {
        Snapshot {
            expenses: vec![
                entry(1, "2024-01-02", "Food", -1_000),
                entry(2, "2024-01-03", "Rent", -4_000),
            ],
            incomes: vec![entry(3, "2024-01-01", "Salary", 10_000)],
            expense_categories: vec!["Food".to_string(), "Rent".to_string()],
            income_categories: vec!["Salary".to_string()],
        }
        .view()
    }

    #[test]
    fn bar_is_proportional() {
        let max = MoneyCents::new(4_000);
        assert_eq!(ascii_bar(MoneyCents::new(4_000), max, 4), "████");
        assert_eq!(ascii_bar(MoneyCents::new(1_000), max, 4), "█░░░");
        assert_eq!(ascii_bar(MoneyCents::ZERO, max, 4), "░░░░");
    }

    #[test]
    fn bar_with_zero_max_is_empty() {
        assert_eq!(ascii_bar(MoneyCents::ZERO, MoneyCents::ZERO, 3), "░░░");
    }

    #[test]
    fn ledger_rows_carry_balance() {
        let lines = render(&view(), Currency::Eur, None);
        let salary = lines
            .iter()
            .find(|line| line.text.contains("Salary") && line.text.contains("2024-01-01"))
            .unwrap();
        assert_eq!(salary.tone, Tone::Positive);
        assert!(salary.text.trim_end().ends_with("EUR 100.00"));

        let rent = lines
            .iter()
            .find(|line| line.text.contains("2024-01-03"))
            .unwrap();
        assert_eq!(rent.tone, Tone::Negative);
        assert!(rent.text.trim_end().ends_with("EUR 50.00"));
    }

    #[test]
    fn totals_section_matches_view() {
        let lines = render(&view(), Currency::Usd, None);
        let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
        assert!(texts.iter().any(|t| t.contains("income") && t.contains("USD 100.00")));
        assert!(texts.iter().any(|t| t.contains("expenses") && t.contains("USD 50.00")));
        assert!(texts.iter().any(|t| t.contains("balance") && t.contains("USD 50.00")));
    }

    #[test]
    fn only_filters_breakdowns() {
        let lines = render(&view(), Currency::Eur, Some(EntryKind::Income));
        assert!(lines.iter().any(|line| line.text == "Income by category"));
        assert!(!lines.iter().any(|line| line.text == "Expenses by category"));
    }

    #[test]
    fn empty_view_renders_placeholders() {
        let lines = render(&Snapshot::default().view(), Currency::Eur, None);
        assert!(lines.iter().any(|line| line.text == "  no entries yet"));
        assert_eq!(
            lines
                .iter()
                .filter(|line| line.text == "  no categories")
                .count(),
            2
        );
    }

    #[test]
    fn plain_print_has_no_escape_codes() {
        let mut out = Vec::new();
        print(&render(&view(), Currency::Eur, None), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Ledger\n"));
        assert!(!text.contains('\u{1b}'));
    }
}
