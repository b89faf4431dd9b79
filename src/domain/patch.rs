//! Partial-update field values.
//!
//! Update payloads treat a missing field, `null` and `""` as "leave unchanged".
//! Scalars are accepted either as their JSON type or as a string
//! (`"5"`, `"true"`, `"2024-05-01T00:00:00Z"`).

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Keep,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Keep => None,
            Patch::Set(value) => Some(value),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

impl Patch<i32> {
    /// Foreign keys use `0` as an additional "unchanged" marker.
    pub fn into_foreign_key(self) -> Option<i32> {
        self.into_option().filter(|id| *id != 0)
    }
}

/// `Keep` is written as `null`, so a serialized patch reads back unchanged.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Keep => serializer.serialize_none(),
            Patch::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: DeserializeOwned + FromStr,
    T::Err: Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Patch::Keep),
            Value::String(s) if s.is_empty() => Ok(Patch::Keep),
            Value::String(s) => s.parse::<T>().map(Patch::Set).map_err(|e| {
                D::Error::custom(format!("invalid value {:?}: {}", s, e))
            }),
            other => serde_json::from_value(other)
                .map(Patch::Set)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        level: Patch<i32>,
        #[serde(default)]
        active: Patch<bool>,
        #[serde(default)]
        at: Patch<DateTime<Utc>>,
    }

    #[test]
    fn missing_null_and_empty_mean_keep() {
        let p: Payload = serde_json::from_str(r#"{"name": "", "level": null}"#).unwrap();
        assert!(p.name.is_keep());
        assert!(p.level.is_keep());
        assert!(p.active.is_keep());
        assert!(p.at.is_keep());
    }

    #[test]
    fn accepts_native_and_string_forms() {
        let p: Payload = serde_json::from_str(
            r#"{"name": "Gold", "level": "7", "active": false, "at": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(p.name, Patch::Set("Gold".to_string()));
        assert_eq!(p.level, Patch::Set(7));
        assert_eq!(p.active, Patch::Set(false));
        assert!(matches!(p.at, Patch::Set(_)));

        let p: Payload = serde_json::from_str(r#"{"level": 3, "active": "true"}"#).unwrap();
        assert_eq!(p.level, Patch::Set(3));
        assert_eq!(p.active, Patch::Set(true));
    }

    #[test]
    fn rejects_unparsable_values() {
        assert!(serde_json::from_str::<Payload>(r#"{"level": "seven"}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"active": "maybe"}"#).is_err());
        assert!(serde_json::from_str::<Payload>(r#"{"at": "yesterday"}"#).is_err());
    }

    #[test]
    fn keep_serializes_as_null() {
        assert_eq!(serde_json::to_value(Patch::<i32>::Keep).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(Patch::Set(5)).unwrap(), serde_json::json!(5));
    }

    #[test]
    fn zero_foreign_key_is_unchanged() {
        assert_eq!(Patch::Set(0).into_foreign_key(), None);
        assert_eq!(Patch::Set(4).into_foreign_key(), Some(4));
        assert_eq!(Patch::<i32>::Keep.into_foreign_key(), None);
    }
}
