use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::aggregate::TransactionRecord;
use crate::commands::common::{optional_record_field_names, required_record_field_names};
use crate::ingest::invalid_input_error;
use crate::{ClientError, ClientResult};

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<TransactionRecord>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Transaction source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_import_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_import_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    Err(ClientError::invalid_import_format(
        "Unsupported input format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<TransactionRecord>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        records.push(record_from_object((index as i64) + 1, object));
    }

    Ok(records)
}

fn record_from_object(row: i64, object: &Map<String, Value>) -> TransactionRecord {
    TransactionRecord {
        row,
        amount: read_optional_string(object.get("amount")),
        merchant: read_optional_string(object.get("merchant")),
        category: read_optional_string(object.get("category")),
        gender: read_optional_string(object.get("gender")),
        fraud: read_optional_string(object.get("fraud")),
    }
}

fn parse_csv(content: &str) -> ClientResult<Vec<TransactionRecord>> {
    // Ragged rows stay readable; absent cells reach the engine as missing.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::record_schema_mismatch(
            required_record_field_names()
                .iter()
                .map(|value| value.to_string())
                .collect(),
            optional_record_field_names()
                .iter()
                .map(|value| value.to_string())
                .collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut records = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        records.push(TransactionRecord {
            row: (row_index as i64) + 1,
            amount: value_for(&record, &index_by_name, "amount"),
            merchant: value_for(&record, &index_by_name, "merchant"),
            category: value_for(&record, &index_by_name, "category"),
            gender: value_for(&record, &index_by_name, "gender"),
            fraud: value_for(&record, &index_by_name, "fraud"),
        });
    }

    Ok(records)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    // Numbers keep serde_json's own text so large integers stay exact.
    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        let parsed = serde_json::from_str::<Value>(line.trim());
        if let Ok(value) = parsed {
            return value.is_object();
        }
        false
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    let required_fields = required_record_field_names();
    let optional_fields = optional_record_field_names();

    for required in &required_fields {
        if !actual_headers.iter().any(|value| value == required) {
            return false;
        }
    }

    actual_headers.iter().all(|header| {
        required_fields.contains(&header.as_str()) || optional_fields.contains(&header.as_str())
    })
}
