//! Structured-record extraction from raw generation output.
//!
//! Models wrap their JSON in prose and markdown fences. The extractor carves
//! the substring between the first `{` and the last `}` and parses that as a
//! JSON object. Parse failure is an explicit error, never a defaulted
//! record, so callers can tell "nothing usable" apart from a sparse but
//! valid record.

use super::MoMRecord;
use crate::error::{ReferatError, Result};
use serde_json::Value;

/// Extract a minutes record from raw generation output.
pub fn extract_record(raw: &str) -> Result<MoMRecord> {
    if raw.trim().is_empty() {
        return Err(ReferatError::Extraction(
            "Generation output was empty".to_string(),
        ));
    }

    let start = raw.find('{');
    let end = raw.rfind('}');

    let json_str = match (start, end) {
        (Some(start), Some(end)) if start <= end => &raw[start..=end],
        _ => {
            return Err(ReferatError::Extraction(
                "No JSON object found in generation output".to_string(),
            ))
        }
    };

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| ReferatError::Extraction(format!("Invalid JSON object: {}", e)))?;

    if !value.is_object() {
        return Err(ReferatError::Extraction(
            "Generation output JSON is not an object".to_string(),
        ));
    }

    Ok(MoMRecord::from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_json_wrapped_in_prose() {
        let raw = "Here is the MoM:\n{\"title\": \"Sync\"}\nThanks!";
        let record = extract_record(raw).unwrap();
        assert_eq!(record.title.as_deref(), Some("Sync"));
    }

    #[test]
    fn test_extracts_json_wrapped_in_fences() {
        let raw = "```json\n{\"title\": \"Sync\", \"attendees\": [\"Alice\"]}\n```";
        let record = extract_record(raw).unwrap();
        assert_eq!(record.title.as_deref(), Some("Sync"));
        assert_eq!(record.attendees, vec!["Alice"]);
    }

    #[test]
    fn test_no_braces_is_an_explicit_failure() {
        let err = extract_record("The meeting went well, nothing to report.").unwrap_err();
        assert!(matches!(err, ReferatError::Extraction(_)));
    }

    #[test]
    fn test_empty_output_is_an_explicit_failure() {
        let err = extract_record("   \n").unwrap_err();
        assert!(matches!(err, ReferatError::Extraction(_)));
    }

    #[test]
    fn test_unparseable_carve_is_an_explicit_failure() {
        let err = extract_record("result: {not valid json}").unwrap_err();
        assert!(matches!(err, ReferatError::Extraction(_)));
    }

    #[test]
    fn test_sparse_but_valid_record_is_not_a_failure() {
        let record = extract_record("{}").unwrap();
        assert_eq!(record, MoMRecord::default());
    }

    #[test]
    fn test_reversed_braces_fail() {
        let err = extract_record("} nothing {").unwrap_err();
        assert!(matches!(err, ReferatError::Extraction(_)));
    }
}
