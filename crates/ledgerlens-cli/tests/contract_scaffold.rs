use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

const TRANSACTIONS_JSON: &str = r#"[
  {"amount": 50, "merchant": "Fresh Mart", "category": "Groceries", "gender": "'M'", "fraud": 0},
  {"amount": 20, "merchant": "Netflix", "category": "Entertainment", "gender": "'F'", "fraud": 0},
  {"amount": 40, "merchant": "Acme Fuel", "category": "Transport", "gender": "'M'", "fraud": 1},
  {"amount": 50, "merchant": "Fresh Mart", "category": "Groceries", "gender": "'F'", "fraud": 0}
]"#;

const TRANSACTIONS_CSV: &str = "amount,merchant,category,gender,fraud
50,Fresh Mart,Groceries,M,0
20,Netflix,Entertainment,F,0
40,Acme Fuel,Transport,M,1
50,Fresh Mart,Groceries,F,0
";

struct CliRun {
    success: bool,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

fn run_cli_with_env(args: &[&str], input: Option<&str>, env: &[(&str, &Path)]) -> CliRun {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ledgerlens"));
    command.args(args);
    command.env_remove("LEDGERLENS_SOURCE");
    command.env_remove("LEDGERLENS_LOG");
    for (key, value) in env {
        command.env(key, value);
    }
    if input.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::null());
    }
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input {
            let stdin = child.stdin.take();
            assert!(stdin.is_some());
            if let Some(mut pipe) = stdin {
                let write_result = pipe.write_all(body.as_bytes());
                assert!(write_result.is_ok());
            }
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return CliRun {
                success: result.status.success(),
                exit_code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
            };
        }
    }

    CliRun {
        success: false,
        exit_code: None,
        stdout: String::new(),
        stderr: String::new(),
    }
}

fn run_cli_with_input(args: &[&str], input: Option<&str>) -> CliRun {
    run_cli_with_env(args, input, &[])
}

fn run_cli(args: &[&str]) -> CliRun {
    run_cli_with_input(args, None)
}

fn source_dir() -> TempDir {
    let dir = tempdir();
    assert!(dir.is_ok());
    match dir {
        Ok(value) => value,
        Err(error) => panic!("tempdir failed: {error}"),
    }
}

fn write_source_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let source_path = dir.join(name);
    let write = fs::write(&source_path, body);
    assert!(write.is_ok());
    source_path
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong, but it's easy to fix."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

fn assert_json_error_contract(body: &str, code: &str) -> Value {
    let payload = parse_json(body);
    assert_eq!(payload["error"]["code"], Value::String(code.to_string()));
    assert!(payload["error"]["message"].is_string());
    assert!(payload["error"]["recovery_steps"].is_array());
    payload
}

#[test]
fn bare_invocation_prints_root_help() {
    let run = run_cli(&[]);
    assert!(run.success);
    assert!(run.stdout.starts_with("Ledgerlens - transaction summaries"));
    assert!(run.stdout.contains("ledgerlens dashboard --help"));
}

#[test]
fn top_level_help_lists_both_summaries() {
    let run = run_cli(&["--help"]);
    assert!(run.success);
    assert!(run.stdout.contains("ledgerlens dashboard <path>"));
    assert!(run.stdout.contains("ledgerlens analysis <path>"));
    assert!(run.stdout.contains("LEDGERLENS_SOURCE"));
}

#[test]
fn dashboard_help_documents_record_schema() {
    let run = run_cli(&["dashboard", "--help"]);
    assert!(run.success);
    assert!(run.stdout.contains("Record schema:"));
    assert!(run.stdout.contains("amount,merchant,category,gender,fraud"));
}

#[test]
fn dashboard_text_renders_every_section() {
    let dir = source_dir();
    let path = write_source_file(dir.path(), "rows.json", TRANSACTIONS_JSON);
    let source = path.display().to_string();

    let run = run_cli(&["dashboard", source.as_str()]);
    assert!(run.success, "stdout: {} stderr: {}", run.stdout, run.stderr);
    assert!(run.stdout.starts_with("Dashboard\n4 records from"));
    assert!(run.stdout.contains("Gender Distribution:"));
    assert!(run.stdout.contains("Fraud Status:"));
    assert!(run.stdout.contains("Total Spent by Merchant:"));
    assert!(run.stdout.contains("$100.00"));
    assert!(run.stdout.contains("Mean Transaction Amount:    $40.00"));
    assert!(run.stdout.contains("Median Transaction Amount:  $45.00"));
    assert!(!run.stdout.contains("Skipped values"));
}

#[test]
fn dashboard_json_reports_aggregates_in_first_seen_order() {
    let dir = source_dir();
    let path = write_source_file(dir.path(), "rows.json", TRANSACTIONS_JSON);
    let source = path.display().to_string();

    let run = run_cli(&["dashboard", source.as_str(), "--json"]);
    assert!(run.success);
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["version"], json!("v1"));

    let data = &payload["data"];
    assert_eq!(data["records_read"], json!(4));
    assert_eq!(data["gender_counts"], json!({"male": 2, "female": 2}));
    assert_eq!(data["fraud_counts"], json!({"no_fraud": 3, "fraud": 1}));
    assert_eq!(data["mean_amount"], json!(40.0));
    assert_eq!(data["median_amount"], json!(45.0));
    assert_eq!(data["merchant_totals"]["Fresh Mart"], json!(100.0));

    let merchants = data["merchant_totals"]
        .as_object()
        .map(|totals| totals.keys().cloned().collect::<Vec<String>>())
        .unwrap_or_default();
    assert_eq!(merchants, vec!["Fresh Mart", "Netflix", "Acme Fuel"]);
}

#[test]
fn analysis_json_omits_categorical_counts() {
    let dir = source_dir();
    let path = write_source_file(dir.path(), "rows.csv", TRANSACTIONS_CSV);
    let source = path.display().to_string();

    let run = run_cli(&["analysis", source.as_str(), "--json"]);
    assert!(run.success);
    let payload = parse_json(&run.stdout);
    let data = &payload["data"];
    assert_eq!(data["view"], json!("analysis"));
    assert!(data.get("gender_counts").is_none());
    assert!(data.get("fraud_counts").is_none());
    assert_eq!(data["category_totals"]["Groceries"], json!(100.0));
    assert_eq!(data["median_amount"], json!(45.0));
}

#[test]
fn stdin_dash_reads_piped_records() {
    let run = run_cli_with_input(&["analysis", "-", "--json"], Some(TRANSACTIONS_CSV));
    assert!(run.success);
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["data"]["source_used"], json!("stdin"));
    assert_eq!(payload["data"]["mean_amount"], json!(40.0));
}

#[test]
fn default_source_env_var_is_used_without_a_path() {
    let dir = source_dir();
    let path = write_source_file(dir.path(), "rows.json", TRANSACTIONS_JSON);

    let run = run_cli_with_env(
        &["dashboard", "--json"],
        None,
        &[("LEDGERLENS_SOURCE", path.as_path())],
    );
    assert!(run.success);
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["data"]["records_read"], json!(4));
}

#[test]
fn malformed_values_become_warnings() {
    let body = r#"[
      {"amount": 10, "merchant": "Shop", "category": "General", "gender": "E", "fraud": 0},
      {"amount": "pending", "merchant": "Shop", "category": "General", "gender": "M", "fraud": 7}
    ]"#;
    let run = run_cli_with_input(&["dashboard", "-", "--json"], Some(body));
    assert!(run.success);
    let payload = parse_json(&run.stdout);
    let data = &payload["data"];
    assert_eq!(data["amounts_counted"], json!(1));
    assert_eq!(data["gender_counts"], json!({"male": 1, "female": 0}));
    assert_eq!(data["fraud_counts"], json!({"no_fraud": 1, "fraud": 0}));

    let codes = data["warnings"]
        .as_array()
        .map(|warnings| {
            warnings
                .iter()
                .filter_map(|warning| warning["code"].as_str().map(str::to_string))
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    assert!(codes.contains(&"unknown_gender".to_string()));
    assert!(codes.contains(&"invalid_amount".to_string()));
    assert!(codes.contains(&"unknown_fraud".to_string()));
}

#[test]
fn csv_with_a_short_row_still_summarizes_every_record() {
    let run = run_cli_with_input(
        &["dashboard", "-", "--json"],
        Some("amount,merchant,category,gender,fraud\n10,A,X,M,0\n20,B,Y\n30,C,Z,F,1\n"),
    );
    assert!(run.success, "stdout: {}", run.stdout);
    let payload = parse_json(&run.stdout);
    assert_eq!(payload["data"]["records_read"], json!(3));
    assert_eq!(payload["data"]["mean_amount"], json!(20.0));
}

#[test]
fn analysis_without_optional_columns_logs_nothing_per_row() {
    let run = run_cli_with_input(
        &["analysis", "-"],
        Some("amount,merchant,category\n10,A,X\n20,B,Y\n"),
    );
    assert!(run.success);
    assert!(!run.stdout.contains("Skipped values"));
    assert!(run.stderr.is_empty(), "stderr: {}", run.stderr);
}

#[test]
fn overflowing_totals_fail_instead_of_printing_zero() {
    let run = run_cli_with_input(
        &["analysis", "-"],
        Some("amount,merchant,category\n1.7976931348623157e308,A,X\n1.7976931348623157e308,A,X\n"),
    );
    assert!(!run.success);
    assert_eq!(run.exit_code, Some(1));
    assert_text_error_contract(&run.stdout, "non_finite_figure");
    assert!(!run.stdout.contains("$0.00"));
}

#[test]
fn empty_array_is_a_no_data_error() {
    let run = run_cli_with_input(&["dashboard", "-"], Some("[]"));
    assert!(!run.success);
    assert_eq!(run.exit_code, Some(1));
    assert_text_error_contract(&run.stdout, "no_data");
    assert!(run.stdout.contains("Input Troubleshooting:"));
}

#[test]
fn empty_array_json_error_carries_records_read() {
    let run = run_cli_with_input(&["analysis", "-", "--json"], Some("[]"));
    assert!(!run.success);
    assert_eq!(run.exit_code, Some(1));
    let payload = assert_json_error_contract(&run.stdout, "no_data");
    assert!(payload.get("ok").is_none());
}

#[test]
fn missing_source_is_reported() {
    let dir = source_dir();
    let missing = dir.path().join("nope.json");
    let source = missing.display().to_string();

    let run = run_cli(&["dashboard", source.as_str(), "--json"]);
    assert!(!run.success);
    assert_eq!(run.exit_code, Some(1));
    assert_json_error_contract(&run.stdout, "source_unreadable");
}

#[test]
fn no_path_and_no_stdin_is_an_invalid_argument() {
    let run = run_cli(&["dashboard"]);
    assert!(!run.success);
    assert_text_error_contract(&run.stdout, "invalid_argument");
}

#[test]
fn csv_without_required_columns_is_rejected() {
    let run = run_cli_with_input(
        &["dashboard", "-", "--json"],
        Some("amount,shop\n10,Fresh Mart\n"),
    );
    assert!(!run.success);
    assert_json_error_contract(&run.stdout, "record_schema_mismatch");
}

#[test]
fn clap_errors_use_error_contract() {
    let run = run_cli(&["dashboard", "a.json", "b.json", "--json"]);
    assert!(!run.success);
    assert_eq!(run.exit_code, Some(1));
    let payload = assert_json_error_contract(&run.stdout, "invalid_argument");
    let message = payload["error"]["message"].as_str().unwrap_or_default();
    assert!(!message.contains("Usage:"));
}

#[test]
fn verbose_logs_go_to_stderr_only() {
    let run = run_cli_with_input(
        &["--verbose", "dashboard", "-", "--json"],
        Some(TRANSACTIONS_CSV),
    );
    assert!(run.success);
    parse_json(&run.stdout);
    assert!(!run.stderr.is_empty());
}

#[test]
fn closed_stdout_pipe_does_not_panic() {
    let dir = source_dir();
    let path = write_source_file(dir.path(), "rows.json", TRANSACTIONS_JSON);

    let mut producer = Command::new(env!("CARGO_BIN_EXE_ledgerlens"));
    producer.arg("dashboard").arg(&path);
    producer.env_remove("LEDGERLENS_SOURCE");
    producer.stdin(Stdio::null());
    producer.stdout(Stdio::piped());
    producer.stderr(Stdio::piped());

    let producer_spawn = producer.spawn();
    assert!(producer_spawn.is_ok());
    if let Ok(mut child) = producer_spawn {
        if let Some(stdout_pipe) = child.stdout.take() {
            let mut reader = BufReader::new(stdout_pipe);
            let mut first_line = String::new();
            let read_result = reader.read_line(&mut first_line);
            assert!(read_result.is_ok());
            assert!(!first_line.is_empty());
        }

        let status = child.wait();
        assert!(status.is_ok());

        if let Some(mut stderr_pipe) = child.stderr.take() {
            let mut stderr_text = String::new();
            let stderr_read = stderr_pipe.read_to_string(&mut stderr_text);
            assert!(stderr_read.is_ok());
            assert!(!stderr_text.contains("Broken pipe"));
            assert!(!stderr_text.contains("panicked"));
        }
    }
}
