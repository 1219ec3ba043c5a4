//! Static fixtures shared across harnesses.

/// Valid JSON-lines signals, oldest first.
pub const JSONL_VALID: &[&str] = &[
    r#"{"timestamp":"2024-01-15T15:00:00Z","symbol":"NZDUSD","side":"SELL","volume":0.25,"price":0.6123,"origin":"10.1.0.1","status":"sent"}"#,
    r#"{"timestamp":"2024-01-15T15:00:05Z","symbol":"USDCAD","side":"BUY","volume":0.4,"price":1.3412,"origin":"10.1.0.2","status":"pending"}"#,
    r#"{"timestamp":"2024-01-15T15:00:10Z","symbol":"EURGBP","side":"BUY","volume":0.12,"price":0.8571,"origin":"10.1.0.3","status":"failed"}"#,
];

/// Lines a JSON-lines feed must skip without stopping.
pub const JSONL_INVALID: &[&str] = &[
    "not json at all",
    r#"{"timestamp":"2024-01-15T15:00:00Z","symbol":"EURUSD"}"#,
    r#"{"timestamp":"2024-01-15T15:00:00Z","symbol":"EURUSD","side":"HOLD","volume":0.1,"price":1.0,"origin":"x","status":"sent"}"#,
    r#"{"timestamp":"2024-01-15T15:00:00Z","symbol":"EURUSD","side":"BUY","volume":-1.0,"price":1.0,"origin":"x","status":"sent"}"#,
];

/// A JSON-lines document interleaving valid and invalid lines.
pub fn jsonl_mixed() -> String {
    let mut out = String::new();
    for (i, line) in JSONL_VALID.iter().enumerate() {
        out.push_str(line);
        out.push('\n');
        if let Some(bad) = JSONL_INVALID.get(i) {
            out.push_str(bad);
            out.push('\n');
        }
    }
    out.push('\n');
    out
}
