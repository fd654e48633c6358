use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

pub const MIN_MESSAGE_LEN: usize = 5;
pub const MAX_MESSAGE_LEN: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: Uuid,
    pub message: String,
    pub hearts: i64,
    #[serde(with = "created_at_format")]
    pub created_at: OffsetDateTime,
}

/// Current UTC time, truncated to whole milliseconds.
pub fn now_millis() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000_000))
}

// `2024-03-01T12:30:00.000Z` out, any RFC 3339 in
mod created_at_format {
    use serde::{Deserializer, Serializer};
    use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime, UtcOffset};

    const FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

    pub fn serialize<S: Serializer>(at: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = at
            .to_offset(UtcOffset::UTC)
            .format(FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        time::serde::rfc3339::deserialize(deserializer)
    }
}

/// Outcome of a like, shaped like a document store's update result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
    pub upserted_count: u64,
}

impl LikeSummary {
    pub fn matched(count: u64) -> Self {
        LikeSummary {
            acknowledged: true,
            matched_count: count,
            modified_count: count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Required,
    Minlength,
    Maxlength,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub path: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

impl ValidationError {
    /// Field-keyed error map, e.g. `{"message": {"kind": "minlength", ...}}`.
    pub fn to_errors(&self) -> Value {
        let mut errors = Map::new();
        errors.insert(
            self.path.to_owned(),
            serde_json::to_value(self).unwrap_or(Value::Null),
        );
        Value::Object(errors)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Scalars are coerced to their string form; objects and arrays are rejected.
pub fn validate_message(value: Option<&Value>) -> Result<String, ValidationError> {
    const PATH: &str = "message";

    let message = match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(ValidationError {
                kind: ValidationKind::String,
                path: PATH,
                message: format!("Cast to string failed for value {other} at path \"{PATH}\""),
                value: other.clone(),
            });
        }
    };

    let Some(message) = message.filter(|m| !m.is_empty()) else {
        return Err(ValidationError {
            kind: ValidationKind::Required,
            path: PATH,
            message: format!("Path `{PATH}` is required."),
            value: Value::Null,
        });
    };

    let len = message.chars().count();
    if len < MIN_MESSAGE_LEN {
        return Err(ValidationError {
            kind: ValidationKind::Minlength,
            path: PATH,
            message: format!("Path `{PATH}` (`{message}`) is shorter than the minimum allowed length ({MIN_MESSAGE_LEN})."),
            value: Value::String(message),
        });
    }
    if len > MAX_MESSAGE_LEN {
        return Err(ValidationError {
            kind: ValidationKind::Maxlength,
            path: PATH,
            message: format!("Path `{PATH}` (`{message}`) is longer than the maximum allowed length ({MAX_MESSAGE_LEN})."),
            value: Value::String(message),
        });
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(validate_message(Some(&json!("12345"))).unwrap(), "12345");
        let longest = "x".repeat(MAX_MESSAGE_LEN);
        assert_eq!(validate_message(Some(&json!(longest))).unwrap(), longest);
    }

    #[test]
    fn rejects_missing_and_empty() {
        for value in [None, Some(json!(null)), Some(json!(""))] {
            let err = validate_message(value.as_ref()).unwrap_err();
            assert_eq!(err.kind, ValidationKind::Required);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        let err = validate_message(Some(&json!("four"))).unwrap_err();
        assert_eq!(err.kind, ValidationKind::Minlength);

        let err = validate_message(Some(&json!("x".repeat(MAX_MESSAGE_LEN + 1)))).unwrap_err();
        assert_eq!(err.kind, ValidationKind::Maxlength);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 5 chars, 15 bytes
        assert!(validate_message(Some(&json!("ねこねこね"))).is_ok());
        // 140 chars, well over 140 bytes
        assert!(validate_message(Some(&json!("é".repeat(MAX_MESSAGE_LEN)))).is_ok());
    }

    #[test]
    fn coerces_scalars() {
        assert_eq!(validate_message(Some(&json!(123456))).unwrap(), "123456");
        assert_eq!(validate_message(Some(&json!(false))).unwrap(), "false");
        assert_eq!(validate_message(Some(&json!(true))).unwrap_err().kind, ValidationKind::Minlength);
    }

    #[test]
    fn rejects_structures() {
        let err = validate_message(Some(&json!({ "text": "hello world" }))).unwrap_err();
        assert_eq!(err.kind, ValidationKind::String);
        assert!(validate_message(Some(&json!(["hello world"]))).is_err());
    }

    #[test]
    fn errors_are_keyed_by_field() {
        let errors = validate_message(Some(&json!("hey"))).unwrap_err().to_errors();
        assert_eq!(errors["message"]["kind"], "minlength");
        assert_eq!(errors["message"]["path"], "message");
        assert_eq!(errors["message"]["value"], "hey");
    }

    #[test]
    fn created_at_has_millisecond_precision() {
        let thought = Thought {
            id: Uuid::nil(),
            message: "hello world".to_owned(),
            hearts: 3,
            created_at: datetime!(2024-03-01 12:30:00.123456789 UTC),
        };
        let value = serde_json::to_value(&thought).unwrap();
        assert_eq!(value["createdAt"], "2024-03-01T12:30:00.123Z");

        let back: Thought = serde_json::from_value(value).unwrap();
        assert_eq!(back.created_at, datetime!(2024-03-01 12:30:00.123 UTC));

        assert_eq!(now_millis().nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn thought_serializes_camel_case() {
        let thought = Thought {
            id: Uuid::nil(),
            message: "hello world".to_owned(),
            hearts: 0,
            created_at: datetime!(2024-03-01 12:30:00 UTC),
        };
        assert_eq!(
            serde_json::to_value(&thought).unwrap(),
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "message": "hello world",
                "hearts": 0,
                "createdAt": "2024-03-01T12:30:00.000Z",
            })
        );
    }
}
