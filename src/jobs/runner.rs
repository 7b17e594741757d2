//! Built-in job kinds and their execution.

use chrono::Utc;
use serde_json::json;

/// Job kind that logs a greeting and returns it.
pub const HELLO_WORLD: &str = "hello_world";
/// Job kind that echoes its payload back with processing metadata.
pub const PROCESS_DATA: &str = "process_data";

/// All kinds the worker knows how to execute.
pub const KNOWN_KINDS: &[&str] = &[HELLO_WORLD, PROCESS_DATA];

/// Whether the given kind has a registered executor.
#[must_use]
pub fn is_known_kind(kind: &str) -> bool {
    KNOWN_KINDS.contains(&kind)
}

/// Executes one job and produces its result payload.
///
/// # Errors
///
/// Returns a message describing the failure; the worker records it and
/// decides whether to retry.
pub async fn execute(kind: &str, payload: &serde_json::Value) -> Result<serde_json::Value, String> {
    match kind {
        HELLO_WORLD => {
            let name = payload
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("World");
            tracing::info!(name, "hello task executed");
            Ok(json!({
                "message": format!("Hello, {name}!"),
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
        PROCESS_DATA => {
            let mut result = match payload {
                serde_json::Value::Object(map) => serde_json::Value::Object(map.clone()),
                other => json!({ "data": other }),
            };
            if let Some(map) = result.as_object_mut() {
                map.insert("processed".to_string(), json!(true));
                map.insert(
                    "processed_at".to_string(),
                    json!(Utc::now().to_rfc3339()),
                );
            }
            Ok(result)
        }
        other => Err(format!("unknown job kind: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hello_world_greets_the_payload_name() {
        let result = execute(HELLO_WORLD, &json!({ "name": "Vibeify" })).await;
        let Ok(value) = result else {
            panic!("hello_world should succeed");
        };
        assert_eq!(
            value.get("message").and_then(|v| v.as_str()),
            Some("Hello, Vibeify!")
        );
    }

    #[tokio::test]
    async fn hello_world_defaults_the_name() {
        let Ok(value) = execute(HELLO_WORLD, &json!({})).await else {
            panic!("hello_world should succeed");
        };
        assert_eq!(
            value.get("message").and_then(|v| v.as_str()),
            Some("Hello, World!")
        );
    }

    #[tokio::test]
    async fn process_data_marks_the_payload_processed() {
        let Ok(value) = execute(PROCESS_DATA, &json!({ "rows": 3 })).await else {
            panic!("process_data should succeed");
        };
        assert_eq!(value.get("rows"), Some(&json!(3)));
        assert_eq!(value.get("processed"), Some(&json!(true)));
        assert!(value.get("processed_at").is_some());
    }

    #[tokio::test]
    async fn process_data_wraps_non_object_payloads() {
        let Ok(value) = execute(PROCESS_DATA, &json!([1, 2, 3])).await else {
            panic!("process_data should succeed");
        };
        assert_eq!(value.get("data"), Some(&json!([1, 2, 3])));
        assert_eq!(value.get("processed"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn unknown_kind_fails_with_a_message() {
        let result = execute("nope", &json!({})).await;
        assert!(result.is_err());
    }

    #[test]
    fn kind_registry_matches_the_executor() {
        assert!(is_known_kind(HELLO_WORLD));
        assert!(is_known_kind(PROCESS_DATA));
        assert!(!is_known_kind("nope"));
    }
}
