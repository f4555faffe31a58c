use ledgerlens_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    let help_section = error.data.as_ref().and_then(|data| {
        let command = data.get("help_command").and_then(Value::as_str)?;
        let title = data
            .get("help_section_title")
            .and_then(Value::as_str)
            .unwrap_or("Help");
        Some((title, command))
    });
    if let Some((title, command)) = help_section {
        lines.push(String::new());
        lines.push(format!("{title}:"));
        lines.push(format!("  Run `{command}` for the record fields and accepted formats."));
    }

    lines.join("\n")
}
