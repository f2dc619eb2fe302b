//! Line status normalization.

use serde_json::Value;

use crate::types::LineStatus;

/// Extract the headline status from a TfL `Line/{id}/Status` payload.
///
/// Takes the first line's first status description. Any missing level
/// yields [`LineStatus::unknown`].
pub fn normalize_status(raw: &Value) -> LineStatus {
    raw.get(0)
        .and_then(|line| line.get("lineStatuses"))
        .and_then(|statuses| statuses.get(0))
        .and_then(|status| status.get("statusSeverityDescription"))
        .and_then(Value::as_str)
        .map(LineStatus::new)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_good_service() {
        let raw = json!([{"lineStatuses": [{"statusSeverityDescription": "Good Service"}]}]);
        assert_eq!(normalize_status(&raw).as_str(), "Good Service");
    }

    #[test]
    fn test_takes_first_entries_only() {
        let raw = json!([
            {
                "id": "elizabeth",
                "lineStatuses": [
                    {"statusSeverity": 9, "statusSeverityDescription": "Minor Delays"},
                    {"statusSeverity": 10, "statusSeverityDescription": "Good Service"}
                ]
            },
            {"lineStatuses": [{"statusSeverityDescription": "Suspended"}]}
        ]);
        assert_eq!(normalize_status(&raw).as_str(), "Minor Delays");
    }

    #[test]
    fn test_malformed_payloads_are_unknown() {
        let cases = [
            Value::Null,
            json!([]),
            json!({}),
            json!([{}]),
            json!([{"lineStatuses": []}]),
            json!([{"lineStatuses": null}]),
            json!([{"lineStatuses": [{}]}]),
            json!([{"lineStatuses": [{"statusSeverityDescription": 10}]}]),
            json!("Good Service"),
        ];
        for raw in cases {
            assert!(normalize_status(&raw).is_unknown(), "payload: {raw}");
        }
    }
}
