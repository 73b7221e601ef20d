use parley::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("  \n "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_it_trimmed() {
    assert_eq!(sanitize_prompt("  Tell me a joke  "), "Tell me a joke");
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "é".repeat(150);

    let result = sanitize_prompt(&prompt);

    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_redacts_values() {
    let result = sanitize_prompt("use Bearer abc123 with password=hunter2 please");

    assert!(result.contains("Bearer [REDACTED]"));
    assert!(result.contains("password=[REDACTED]"));
    assert!(!result.contains("abc123"));
    assert!(!result.contains("hunter2"));
}
