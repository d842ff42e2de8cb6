//! Plain-text rendering of the form outputs.
use std::fmt::Write;

use engine::{COLUMNS, History, Notice, Preview, Severity};

pub fn preview(preview: &Preview) -> String {
    let mut out = preview.to_string();
    if !preview.complete {
        out.push_str("(enter bill amount and advance given to compute the totals)\n");
    }
    out
}

fn tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "ok",
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}

pub fn notice(notice: &Notice) -> String {
    let mut out = format!("[{}] {}\n", tag(notice.severity()), notice.message());
    if let Notice::Saved { record, rows } = notice {
        let _ = writeln!(out, "Saved: {record} (row {rows})");
    }
    out
}

/// Ledger as an aligned text table, or the empty notice.
pub fn history(history: &History) -> String {
    let records = match history {
        History::Empty => {
            return format!(
                "[{}] {}\n",
                tag(History::EMPTY_SEVERITY),
                History::EMPTY_MESSAGE
            );
        }
        History::Records(records) => records,
    };

    let rows: Vec<[String; 16]> = records.iter().map(|record| record.cells()).collect();
    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("Saved Data\n");
    push_row(&mut out, COLUMNS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{EntryInput, Money, Record, Rejection};

    use super::*;

    fn record() -> Record {
        let mut input = EntryInput::new(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        input.name = "Asha".to_string();
        input.bill_amount = Money::from_major(500);
        input.advance_given = Money::from_major(1000);
        input.initial_cash = Money::from_major(2000);
        Record::from_input(input).unwrap()
    }

    #[test]
    fn empty_history_shows_notice() {
        assert_eq!(history(&History::Empty), "[info] No data saved yet.\n");
    }

    #[test]
    fn history_table_has_header_rule_and_rows() {
        let text = history(&History::Records(vec![record(), record()]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Saved Data");
        assert!(lines[1].starts_with("Date       | Name | Lab | Initial Cash in Hand"));
        assert!(lines[2].starts_with("---------- | ----"));
        assert!(lines[3].starts_with("2024-07-01 | Asha |     | 2000.00"));
        assert_eq!(lines[3], lines[4]);
    }

    #[test]
    fn notices_carry_severity_tag() {
        assert_eq!(
            notice(&Notice::Rejected(Rejection::NegativeAmount)),
            "[error] Negative values are not allowed.\n"
        );
        assert_eq!(notice(&Notice::NothingToReset), "[warning] No data to reset.\n");
        let saved = notice(&Notice::Saved {
            record: record(),
            rows: 3,
        });
        assert!(saved.starts_with("[ok] Data saved successfully!\n"));
        assert!(saved.contains("(row 3)"));
    }
}
