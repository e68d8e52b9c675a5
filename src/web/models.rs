use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::Sentiment;

// Body of `POST /analyze`. Must be a JSON object; `text` defaults to "" when
// absent and is rejected when present with any non-string value, null included.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct AnalyzeRequest {
    pub text: String,
}

impl TryFrom<Map<String, Value>> for AnalyzeRequest {
    type Error = String;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        match body.remove("text") {
            None => Ok(Self { text: String::new() }),
            Some(Value::String(text)) => Ok(Self { text }),
            Some(other) => Err(format!("field `text` must be a string, got {}", kind_of(&other))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub text: String,
    pub sentiment: Sentiment,
    pub polarity: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub analyzer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_defaults_to_empty() {
        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.text, "");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"text": "hi", "lang": "en"}"#).unwrap();
        assert_eq!(req.text, "hi");
    }

    #[test]
    fn non_string_text_is_rejected() {
        for body in [r#"{"text": 42}"#, r#"{"text": null}"#, r#"{"text": ["a"]}"#] {
            let err = serde_json::from_str::<AnalyzeRequest>(body).unwrap_err();
            assert!(err.to_string().contains("must be a string"), "{}: {}", body, err);
        }
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(serde_json::from_str::<AnalyzeRequest>(r#"["hello"]"#).is_err());
        assert!(serde_json::from_str::<AnalyzeRequest>(r#""hello""#).is_err());
    }
}
