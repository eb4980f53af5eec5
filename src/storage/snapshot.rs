//! Persisted projection of a session.
//!
//! Stored as JSON with camelCase keys:
//!
//! ```json
//! { "names": ["Bob", "Alice"], "losers": ["Bob"], "numChances": 4, "roundNumber": 3 }
//! ```
//!
//! Older snapshots without `numChances` or `roundNumber` still load; the
//! missing fields come back as `None` and `0`. Both fields are read
//! leniently: numeric strings and fractional numbers are accepted, and any
//! other value is treated as missing. `names` and `losers` are required.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::{Roster, StorageError};

/// Snapshot of a session as written to storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// All names in seating order.
    pub names: Vec<String>,

    /// Eliminated names in elimination order.
    pub losers: Vec<String>,

    /// Elimination denominator, unclamped. `None` if never stored.
    #[serde(
        default,
        deserialize_with = "lenient_chances",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_chances: Option<i64>,

    /// Rounds played so far.
    #[serde(default, deserialize_with = "lenient_round")]
    pub round_number: u64,
}

impl Snapshot {
    /// Capture a roster together with the round state.
    #[must_use]
    pub fn capture(roster: &Roster, num_chances: u32, round_number: u64) -> Self {
        Self {
            names: roster.names().map(String::from).collect(),
            losers: roster.losers().map(String::from).collect(),
            num_chances: Some(i64::from(num_chances)),
            round_number,
        }
    }

    /// Rebuild the roster this snapshot describes.
    #[must_use]
    pub fn to_roster(&self) -> Roster {
        Roster::restore(&self.names, &self.losers)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_chances<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_integer(&value))
}

fn lenient_round<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let exact = match &value {
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    Ok(exact
        .or_else(|| lenient_integer(&value).and_then(|n| u64::try_from(n).ok()))
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            names: vec!["Alice".into(), "Bob".into(), "Carol".into()],
            losers: vec!["Bob".into()],
            num_chances: Some(6),
            round_number: 2,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let snap = snapshot();
        let json = snap.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snap);
    }

    #[test]
    fn test_json_keys() {
        let json = snapshot().to_json().unwrap();
        assert!(json.contains("\"numChances\":6"));
        assert!(json.contains("\"roundNumber\":2"));
    }

    #[test]
    fn test_empty_losers_round_trip() {
        let snap = Snapshot {
            losers: vec![],
            ..snapshot()
        };
        let json = snap.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap().losers, Vec::<String>::new());
    }

    #[test]
    fn test_narrow_shape_defaults() {
        let snap = Snapshot::from_json(r#"{"names":["A","B"],"losers":["A"]}"#).unwrap();
        assert_eq!(snap.num_chances, None);
        assert_eq!(snap.round_number, 0);
    }

    #[test]
    fn test_lenient_fields() {
        let snap = Snapshot::from_json(
            r#"{"names":["A"],"losers":[],"numChances":"7","roundNumber":3.9}"#,
        )
        .unwrap();
        assert_eq!(snap.num_chances, Some(7));
        assert_eq!(snap.round_number, 3);

        let snap = Snapshot::from_json(
            r#"{"names":["A"],"losers":[],"numChances":"abc","roundNumber":-2}"#,
        )
        .unwrap();
        assert_eq!(snap.num_chances, None);
        assert_eq!(snap.round_number, 0);

        let snap =
            Snapshot::from_json(r#"{"names":["A"],"losers":[],"numChances":null}"#).unwrap();
        assert_eq!(snap.num_chances, None);
    }

    #[test]
    fn test_malformed() {
        assert!(Snapshot::from_json("not json").is_err());
        assert!(Snapshot::from_json(r#"{"losers":[]}"#).is_err());
        assert!(Snapshot::from_json(r#"{"names":["A"]}"#).is_err());
        assert!(Snapshot::from_json(r#"{"names":"A","losers":[]}"#).is_err());
        assert!(Snapshot::from_json("null").is_err());
    }

    #[test]
    fn test_capture_and_restore() {
        let mut roster = Roster::restore(["Alice", "Bob", "Carol"], Vec::<String>::new());
        roster.eliminate("Carol").unwrap();

        let snap = Snapshot::capture(&roster, 5, 1);
        assert_eq!(snap.names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(snap.losers, vec!["Carol"]);
        assert_eq!(snap.num_chances, Some(5));

        assert_eq!(snap.to_roster(), roster);
    }
}
