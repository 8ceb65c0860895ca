use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /api/submit`.
///
/// Missing or null fields read as empty; numbers and booleans are taken in
/// their textual form, so `{"enrollment_no": 2301}` is the enrollment "2301".
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SubmitClaimRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "22BCE1001")]
    pub enrollment_no: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "GOLDEN-EAGLE")]
    pub secret_code: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// A submission after whitespace trimming, ready for validation.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ClaimSubmission {
    #[validate(length(min = 1, message = "Missing data"))]
    pub enrollment_no: String,
    #[validate(length(min = 1, message = "Missing data"))]
    pub secret_code: String,
}

impl From<SubmitClaimRequest> for ClaimSubmission {
    fn from(request: SubmitClaimRequest) -> Self {
        Self {
            enrollment_no: request.enrollment_no.trim().to_string(),
            secret_code: request.secret_code.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitClaimResponse {
    pub success: bool,
    /// Total score of the submitter including this claim
    pub score: i64,
}

impl SubmitClaimResponse {
    pub fn accepted(score: i64) -> Self {
        Self {
            success: true,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ClaimSubmission {
        serde_json::from_str::<SubmitClaimRequest>(json).unwrap().into()
    }

    #[test]
    fn test_fields_are_trimmed() {
        let submission = parse(r#"{"enrollment_no": "  E1 ", "secret_code": "\tC1\n"}"#);
        assert_eq!(submission.enrollment_no, "E1");
        assert_eq!(submission.secret_code, "C1");
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_numbers_are_read_as_text() {
        let submission = parse(r#"{"enrollment_no": 2301, "secret_code": "C1"}"#);
        assert_eq!(submission.enrollment_no, "2301");
    }

    #[test]
    fn test_missing_and_null_fields_fail_validation() {
        let submission = parse(r#"{"enrollment_no": null}"#);
        let errors = submission.validate().unwrap_err();

        let fields = errors.field_errors();
        assert!(fields.contains_key("enrollment_no"));
        assert!(fields.contains_key("secret_code"));
    }

    #[test]
    fn test_whitespace_only_code_is_missing_data() {
        let submission = parse(r#"{"enrollment_no": "E1", "secret_code": "   "}"#);
        let errors = submission.validate().unwrap_err();
        let message = errors.field_errors()["secret_code"][0]
            .message
            .as_ref()
            .map(|m| m.to_string());

        assert_eq!(message.as_deref(), Some("Missing data"));
    }
}
