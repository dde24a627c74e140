//! Asynchronous notification sent by the upstream when a hosted flow ends.

use serde_json::Value;

/// Notify webhook payload.
///
/// No schema is enforced: bodies that are not JSON are kept as text so they
/// can still be logged.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyEvent {
    Json(Value),
    Raw(String),
    Empty,
}

impl NotifyEvent {
    pub fn from_bytes(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Account id reported by the upstream, if the payload carries one.
    pub fn account_id(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("account_id").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Flow status reported by the upstream, if the payload carries one.
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("status").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Compact single-line rendering for logs.
    pub fn to_log_string(&self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Raw(text) => text.clone(),
            Self::Empty => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_payload() {
        let event =
            NotifyEvent::from_bytes(br#"{"status":"CREATION_SUCCESS","account_id":"abc"}"#);
        assert_eq!(event.status(), Some("CREATION_SUCCESS"));
        assert_eq!(event.account_id(), Some("abc"));
    }

    #[test]
    fn test_non_object_json() {
        let event = NotifyEvent::from_bytes(b"[1,2,3]");
        assert_eq!(event, NotifyEvent::Json(json!([1, 2, 3])));
        assert_eq!(event.status(), None);
    }

    #[test]
    fn test_raw_and_empty() {
        assert_eq!(
            NotifyEvent::from_bytes(b"not json"),
            NotifyEvent::Raw("not json".to_string())
        );
        assert_eq!(NotifyEvent::from_bytes(b"  \n"), NotifyEvent::Empty);
        assert_eq!(NotifyEvent::from_bytes(b""), NotifyEvent::Empty);
    }
}
