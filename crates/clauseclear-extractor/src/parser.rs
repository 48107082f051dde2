//! Parse classifier output into classifications

use crate::error::ExtractorError;
use clauseclear_domain::traits::Classification;
use clauseclear_domain::Severity;
use serde_json::Value;
use tracing::warn;

/// Justification used when the classifier omits one
pub const DEFAULT_JUSTIFICATION: &str = "No justification provided.";

/// Parse a classifier response into classifications
///
/// Unknown severities become [`Severity::Info`]; entries without an integer
/// `id` are skipped. Anything that is not a JSON array is an error.
pub fn parse_classifier_response(response: &str) -> Result<Vec<Classification>, ExtractorError> {
    let json_str = strip_code_fences(response);

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let items = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut classifications = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match parse_item(item) {
            Ok(c) => classifications.push(c),
            Err(e) => warn!("Skipping classification {}: {}", idx, e),
        }
    }

    Ok(classifications)
}

/// Remove a surrounding markdown code fence, if present
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    let body = rest.strip_prefix("json").unwrap_or(rest);
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

fn parse_item(item: &Value) -> Result<Classification, String> {
    let obj = item
        .as_object()
        .ok_or_else(|| "Classification is not a JSON object".to_string())?;

    let id = match obj.get("id") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .and_then(|n| u32::try_from(n).ok())
    .ok_or_else(|| "Missing or invalid 'id'".to_string())?;

    let severity = obj
        .get("severity")
        .and_then(|v| v.as_str())
        .and_then(Severity::parse)
        .unwrap_or(Severity::Info);

    let justification = obj
        .get("justification")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_JUSTIFICATION.to_string());

    Ok(Classification {
        id,
        severity,
        justification,
    })
}
