use std::io;

use serde_json::{Map, Value};

use super::format::{self, Align, Column};

const WARNING_PREVIEW_LIMIT: usize = 10;

pub fn render_summary(command: &str, data: &Value) -> io::Result<String> {
    let merchant_totals = data
        .get("merchant_totals")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("summary output requires merchant_totals"))?;
    let category_totals = data
        .get("category_totals")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("summary output requires category_totals"))?;

    let title = match command {
        "analysis" => "Transaction Analysis",
        _ => "Dashboard",
    };
    let mut lines = vec![title.to_string(), source_line(data), String::new()];

    if let Some(gender) = data.get("gender_counts").and_then(Value::as_object) {
        lines.push("Gender Distribution:".to_string());
        lines.extend(render_counts(
            gender,
            &[("Male", "male"), ("Female", "female")],
        ));
        lines.push(String::new());
    }

    if let Some(fraud) = data.get("fraud_counts").and_then(Value::as_object) {
        lines.push("Fraud Status:".to_string());
        lines.extend(render_counts(
            fraud,
            &[("No Fraud", "no_fraud"), ("Fraud", "fraud")],
        ));
        lines.push(String::new());
    }

    lines.push("Total Spent by Merchant:".to_string());
    lines.extend(render_totals("Merchant", merchant_totals)?);
    lines.push(String::new());

    lines.push("Total Spent by Category:".to_string());
    lines.extend(render_totals("Category", category_totals)?);
    lines.push(String::new());

    let stats_title = match command {
        "analysis" => "Overall Transaction Statistics:",
        _ => "Transaction Statistics:",
    };
    lines.push(stats_title.to_string());
    lines.extend(format::key_value_rows(
        &[
            (
                "Mean Transaction Amount:",
                format::format_currency(statistic(data, "mean_amount")?),
            ),
            (
                "Median Transaction Amount:",
                format::format_currency(statistic(data, "median_amount")?),
            ),
        ],
        2,
    ));

    let warnings = data
        .get("warnings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.extend(render_warnings(&warnings));
    }

    Ok(lines.join("\n"))
}

fn source_line(data: &Value) -> String {
    let records_read = data.get("records_read").and_then(Value::as_u64).unwrap_or(0);
    let amounts_counted = data
        .get("amounts_counted")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let source = match data.get("source_ref").and_then(Value::as_str) {
        Some(path) => path.to_string(),
        None => data
            .get("source_used")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
    };
    format!("{records_read} records from {source} ({amounts_counted} with a usable amount)")
}

fn render_counts(counts: &Map<String, Value>, labels: &[(&str, &str)]) -> Vec<String> {
    let values = labels
        .iter()
        .map(|(_, key)| counts.get(*key).and_then(Value::as_i64).unwrap_or(0))
        .collect::<Vec<i64>>();
    let total = values.iter().sum::<i64>();

    let columns = [
        Column {
            name: "Label",
            align: Align::Left,
        },
        Column {
            name: "Count",
            align: Align::Right,
        },
        Column {
            name: "Share",
            align: Align::Right,
        },
    ];
    let rows = labels
        .iter()
        .zip(values.iter())
        .map(|((label, _), count)| {
            vec![
                (*label).to_string(),
                count.to_string(),
                format::format_share(*count, total),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &rows, format::terminal_width())
}

fn render_totals(label: &str, totals: &Map<String, Value>) -> io::Result<Vec<String>> {
    if totals.is_empty() {
        return Ok(vec!["  (none)".to_string()]);
    }

    let max_magnitude = totals
        .values()
        .filter_map(Value::as_f64)
        .map(f64::abs)
        .fold(0.0, f64::max);

    let columns = [
        Column {
            name: label,
            align: Align::Left,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
        Column {
            name: "",
            align: Align::Left,
        },
    ];
    let mut rows = Vec::with_capacity(totals.len());
    for (key, value) in totals {
        let amount = value
            .as_f64()
            .ok_or_else(|| io::Error::other(format!("total for `{key}` is not a number")))?;
        rows.push(vec![
            key.clone(),
            format::format_currency(amount),
            format::bar(amount, max_magnitude),
        ]);
    }

    Ok(format::render_table(
        &columns,
        &rows,
        format::terminal_width(),
    ))
}

fn render_warnings(warnings: &[Value]) -> Vec<String> {
    let mut lines = vec![format!(
        "Skipped values ({}): these records were left out of the affected figures only.",
        warnings.len()
    )];

    for warning in warnings.iter().take(WARNING_PREVIEW_LIMIT) {
        let row = warning.get("row").and_then(Value::as_i64).unwrap_or(0);
        let description = warning
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("");
        lines.push(format!("  Row {row}: {description}"));
    }

    if warnings.len() > WARNING_PREVIEW_LIMIT {
        lines.push(format!(
            "  ... and {} more. Use --json to see every skipped value.",
            warnings.len() - WARNING_PREVIEW_LIMIT
        ));
    }

    lines
}

/// A missing or null statistic is an output failure, never a printed zero.
fn statistic(data: &Value, key: &str) -> io::Result<f64> {
    data.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| io::Error::other(format!("summary output requires a numeric {key}")))
}
