//! Reading recorded events from JSON input.
//!
//! Two layouts are accepted:
//! - a JSON array of event objects
//! - newline-delimited JSON, one event object per line (blank lines skipped)
//!
//! Records are returned as raw JSON values; field validation happens when
//! they are added to a generator.

use crate::utils::error::ParseError;
use log::debug;
use serde_json::Value;
use std::path::Path;

/// Parse event records from JSON text
///
/// # Errors
/// * `ParseError::JsonError` - the text is not valid JSON
/// * `ParseError::InvalidFormat` - the top level is neither an array nor an object per line
pub fn parse_events(raw: &str) -> Result<Vec<Value>, ParseError> {
    let trimmed = raw.trim_start();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let records: Vec<Value> = serde_json::from_str(trimmed)?;
        debug!("Parsed {} events from JSON array", records.len());
        return Ok(records);
    }

    let mut records = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: Value = serde_json::from_str(line).map_err(|e| {
            ParseError::InvalidFormat(format!("line {}: {}", line_no + 1, e))
        })?;
        if !record.is_object() {
            return Err(ParseError::InvalidFormat(format!(
                "line {}: expected an event object",
                line_no + 1
            )));
        }
        records.push(record);
    }

    debug!("Parsed {} events from newline-delimited JSON", records.len());
    Ok(records)
}

/// Read event records from a file
pub fn read_events(input_path: impl AsRef<Path>) -> Result<Vec<Value>, ParseError> {
    let input_path = input_path.as_ref();
    debug!("Reading events from: {}", input_path.display());

    let raw = std::fs::read_to_string(input_path)?;
    parse_events(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_array() {
        let records = parse_events(r#"[{"name": "F0", "start": 1, "finish": 2}]"#).unwrap();
        assert_eq!(records, vec![json!({"name": "F0", "start": 1, "finish": 2})]);
    }

    #[test]
    fn test_parse_lines() {
        let raw = "{\"name\": \"F0\", \"start\": 1, \"finish\": 2}\n\n{\"name\": \"F1\", \"start\": 2, \"finish\": 3}\n";
        let records = parse_events(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], "F1");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_events("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_lines_reports_line_number() {
        let raw = "{\"name\": \"F0\", \"start\": 1, \"finish\": 2}\n{oops";
        let err = parse_events(raw).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_lines_rejects_non_objects() {
        assert!(matches!(
            parse_events("42\n"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
