//! JSON wire contract of the classification service.
//!
//! Status codes are classified before any body is looked at. A predict
//! body is read as a JSON object and only the fields the `success` branch
//! needs are taken from it, so a missing field is reported by name and
//! unrelated fields never fail the call.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{ClientError, ParseError, ServiceError};
use crate::types::{AnalysisMeta, AnalysisResult, HealthStatus};

#[derive(Debug, Deserialize)]
struct HealthEnvelope {
    status: Option<String>,
    model_ready: Option<bool>,
}

/// Map a non-2xx status to its error. `None` for 2xx.
pub fn classify_status(status: u16) -> Option<ServiceError> {
    match status {
        200..=299 => None,
        400 => Some(ServiceError::BadRequest(status)),
        500 => Some(ServiceError::ServerError(status)),
        code => Some(ServiceError::Unknown {
            code,
            message: None,
        }),
    }
}

/// Interpret the body of a 2xx predict reply.
///
/// `status` is only carried into the error of a `success: false` reply.
pub fn parse_predict(status: u16, body: &[u8]) -> Result<AnalysisResult, ClientError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ParseError::Malformed(e.to_string()))?;
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(
                ParseError::Malformed(format!("expected a JSON object, got {}", other)).into(),
            )
        }
    };

    let success = field(&fields, "success", Value::as_bool, "a boolean")?;
    if !success {
        let message = field(&fields, "error", Value::as_str, "a string")?;
        return Err(ServiceError::Unknown {
            code: status,
            message: Some(message.to_string()),
        }
        .into());
    }

    let prediction = field(&fields, "prediction", Value::as_str, "a string")?.to_string();
    let confidence = probability(
        "confidence",
        field(&fields, "confidence", Value::as_f64, "a number")?,
    )?;
    let hate_probability = probability(
        "hate_probability",
        field(&fields, "hate_probability", Value::as_f64, "a number")?,
    )?;

    Ok(AnalysisResult {
        prediction,
        confidence,
        hate_probability,
        analysis: fields.remove("analysis").and_then(analysis_meta),
    })
}

/// Required field: absent or `null` is missing, any other type is malformed.
fn field<'a, T>(
    fields: &'a Map<String, Value>,
    name: &'static str,
    read: impl Fn(&'a Value) -> Option<T>,
    expected: &str,
) -> Result<T, ParseError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(ParseError::MissingField(name)),
        Some(value) => read(value).ok_or_else(|| {
            ParseError::Malformed(format!("{} must be {}, got {}", name, expected, value))
        }),
    }
}

/// Interpret the body of a 2xx health reply.
pub fn parse_health(body: &[u8]) -> Result<HealthStatus, ParseError> {
    let envelope: HealthEnvelope =
        serde_json::from_slice(body).map_err(|e| ParseError::Malformed(e.to_string()))?;

    Ok(HealthStatus {
        status: envelope.status.ok_or(ParseError::MissingField("status"))?,
        model_ready: envelope
            .model_ready
            .ok_or(ParseError::MissingField("model_ready"))?,
    })
}

fn probability(field: &'static str, value: f64) -> Result<f64, ParseError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ParseError::OutOfRange { field, value })
    }
}

/// Diagnostic block: each sub-field is taken only when present and of the
/// expected type. Anything else is skipped, never an error.
fn analysis_meta(value: Value) -> Option<AnalysisMeta> {
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return None,
        other => {
            warn!("Ignoring analysis block that is not an object: {}", other);
            return None;
        }
    };

    let count = |key: &str| map.get(key).and_then(Value::as_u64);

    Some(AnalysisMeta {
        text_length: count("text_length"),
        word_count: count("word_count"),
        sentence_count: count("sentence_count"),
        language_detected: map
            .get("language_detected")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
