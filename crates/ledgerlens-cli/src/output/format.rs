use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MAX_LABEL_WIDTH: usize = 32;
const BAR_WIDTH: usize = 24;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a header plus rows. The first column is truncated so the table
/// fits `max_width`; the other columns keep their natural width.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>], max_width: usize) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let rest = widths.iter().skip(1).sum::<usize>() + COLUMN_GAP * (columns.len() - 1);
    let first_budget = cmp::max(
        cmp::min(max_width.saturating_sub(INDENT + rest), MAX_LABEL_WIDTH),
        columns[0].name.chars().count(),
    );
    widths[0] = cmp::min(widths[0], first_budget);

    let mut output = Vec::with_capacity(rows.len() + 1);
    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    output.push(format_row(columns, &header, &widths));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

/// `$1,234.50`, with the sign in front of the symbol for negatives.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

pub fn format_share(part: i64, total: i64) -> String {
    if total <= 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", (part as f64 / total as f64) * 100.0)
}

/// Horizontal bar scaled against the largest magnitude in the series.
pub fn bar(value: f64, max_magnitude: f64) -> String {
    if max_magnitude <= 0.0 || value == 0.0 {
        return String::new();
    }
    let ratio = (value.abs() / max_magnitude).min(1.0);
    let length = cmp::max((ratio * BAR_WIDTH as f64).round() as usize, 1);
    let glyph = if value < 0.0 { "-" } else { "#" };
    glyph.repeat(length)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(character);
    }
    grouped
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = widths.get(index).copied().unwrap_or(0);
        let value = truncate(cells.get(index).map(String::as_str).unwrap_or(""), width);

        let piece = match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        };
        pieces.push(piece);
    }

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width || width == 0 {
        return value.to_string();
    }
    let mut kept = value.chars().take(width - 1).collect::<String>();
    kept.push('…');
    kept
}
