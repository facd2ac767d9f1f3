//! Dataset model and snapshot reader
//!
//! The dataset is a single JSON document produced by an upstream pipeline.
//! It is read-only input: every operation loads a fresh copy through
//! [`DatasetReader::read`] so edits to the file show up on the next request.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::time::parse_timestamp;
use crate::{Error, Result};

/// Root of the dashboard snapshot
///
/// Every collection is optional in the raw JSON; absent or `null` collections
/// deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub live_calls: Vec<ActivityEvent>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<ActivityEvent>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub communication: Vec<Communication>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: Vec<ActivityEvent>,

    #[serde(default)]
    pub patients_satisfaction: Option<PatientsSatisfaction>,

    #[serde(default)]
    pub employees_satisfaction: Option<EmployeesSatisfaction>,
}

impl Dataset {
    /// Parse a dataset from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Patient roster, empty when the wrapper is missing
    pub fn patients(&self) -> &[RosterEntry] {
        self.patients_satisfaction
            .as_ref()
            .map(|s| s.patients_data.as_slice())
            .unwrap_or_default()
    }

    /// Employee roster, empty when the wrapper is missing
    pub fn employees(&self) -> &[RosterEntry] {
        self.employees_satisfaction
            .as_ref()
            .map(|s| s.employees_data.as_slice())
            .unwrap_or_default()
    }
}

/// Anything with a creation timestamp that can be windowed by date
pub trait Timestamped {
    /// Raw `createdAt` value as it appeared in the dataset
    fn raw_created_at(&self) -> &Value;

    /// Parsed creation instant, `None` when missing or malformed
    fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.raw_created_at())
    }
}

/// Live call, task or like entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "createdAt")]
    pub raw_created_at: Value,
}

impl Timestamped for ActivityEvent {
    fn raw_created_at(&self) -> &Value {
        &self.raw_created_at
    }
}

/// Kinds of outbound patient communication counted by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationKind {
    Brushing,
    Instructions,
}

/// Communication entry (`type` is `"brushing"` or `"instructions"`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Communication {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(default, rename = "createdAt")]
    pub raw_created_at: Value,
}

impl Communication {
    /// Recognized kind, `None` for any other `type` string
    pub fn kind(&self) -> Option<CommunicationKind> {
        match self.kind.as_str() {
            "brushing" => Some(CommunicationKind::Brushing),
            "instructions" => Some(CommunicationKind::Instructions),
            _ => None,
        }
    }
}

impl Timestamped for Communication {
    fn raw_created_at(&self) -> &Value {
        &self.raw_created_at
    }
}

/// Satisfaction state of a patient or employee
///
/// Values outside the three known states are kept verbatim in
/// [`Satisfaction::Other`] so the roster passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Satisfaction {
    Positive,
    Neutral,
    Negative,
    Other(String),
}

impl Satisfaction {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Satisfaction::Positive => "positive",
            Satisfaction::Neutral => "neutral",
            Satisfaction::Negative => "negative",
            Satisfaction::Other(raw) => raw,
        }
    }
}

impl From<String> for Satisfaction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "positive" => Satisfaction::Positive,
            "neutral" => Satisfaction::Neutral,
            "negative" => Satisfaction::Negative,
            _ => Satisfaction::Other(raw),
        }
    }
}

impl From<Satisfaction> for String {
    fn from(satisfaction: Satisfaction) -> Self {
        match satisfaction {
            Satisfaction::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Patient or employee with their current satisfaction
///
/// Keys beyond the four known fields are carried in `extra` and serialized
/// back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub satisfaction: Satisfaction,
    pub last_communication_date: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `patientsSatisfaction` wrapper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientsSatisfaction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub patients_data: Vec<RosterEntry>,
}

/// `employeesSatisfaction` wrapper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeesSatisfaction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub employees_data: Vec<RosterEntry>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Loads the snapshot file on every call (no caching)
#[derive(Debug, Clone)]
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the snapshot.
    ///
    /// Fails with [`Error::Read`] when the file cannot be read and with
    /// [`Error::Parse`] when its content is not a valid dataset.
    pub fn read(&self) -> Result<Dataset> {
        let bytes = std::fs::read(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read dataset snapshot");
        Dataset::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> Value {
        json!({
            "liveCalls": [
                { "id": "lc-1", "entityType": "liveCall", "createdAt": "2023-12-01T10:00:00Z" },
                { "createdAt": "2023-11-01T10:00:00Z" }
            ],
            "communication": [
                { "type": "brushing", "createdAt": "2023-12-01T10:00:00Z" },
                { "type": "instructions", "createdAt": "2023-12-15T10:00:00Z" },
                { "type": "reminder", "createdAt": "2023-12-15T10:00:00Z" }
            ],
            "patientsSatisfaction": {
                "summary": { "positive": 1, "neutral": 0, "negative": 0 },
                "patientsData": [
                    { "id": "1", "name": "John Doe", "satisfaction": "positive", "lastCommunicationDate": "2023-01-01" }
                ]
            }
        })
    }

    #[test]
    fn test_parse_partial_dataset() {
        let dataset = Dataset::from_slice(sample().to_string().as_bytes()).unwrap();

        assert_eq!(dataset.live_calls.len(), 2);
        assert!(dataset.tasks.is_empty());
        assert!(dataset.likes.is_empty());
        assert_eq!(dataset.communication.len(), 3);
        assert_eq!(dataset.patients().len(), 1);
        assert!(dataset.employees().is_empty());
    }

    #[test]
    fn test_null_collections_are_empty() {
        let raw = json!({
            "liveCalls": null,
            "tasks": null,
            "patientsSatisfaction": { "patientsData": null },
            "employeesSatisfaction": null
        });
        let dataset = Dataset::from_slice(raw.to_string().as_bytes()).unwrap();

        assert!(dataset.live_calls.is_empty());
        assert!(dataset.tasks.is_empty());
        assert!(dataset.patients().is_empty());
        assert!(dataset.employees().is_empty());
    }

    #[test]
    fn test_empty_object_is_valid_dataset() {
        let dataset = Dataset::from_slice(b"{}").unwrap();
        assert!(dataset.live_calls.is_empty());
        assert!(dataset.patients().is_empty());
    }

    #[test]
    fn test_communication_kinds() {
        let dataset = Dataset::from_slice(sample().to_string().as_bytes()).unwrap();
        let kinds: Vec<_> = dataset.communication.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Some(CommunicationKind::Brushing),
                Some(CommunicationKind::Instructions),
                None
            ]
        );
    }

    #[test]
    fn test_created_at_parsing() {
        let raw = json!({
            "likes": [
                { "createdAt": "2023-12-01T10:00:00Z" },
                { "createdAt": "garbage" },
                {}
            ]
        });
        let dataset = Dataset::from_slice(raw.to_string().as_bytes()).unwrap();

        assert!(dataset.likes[0].created_at().is_some());
        assert!(dataset.likes[1].created_at().is_none());
        assert!(dataset.likes[2].created_at().is_none());
    }

    #[test]
    fn test_roster_entry_serializes_camel_case() {
        let entry = RosterEntry {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            satisfaction: Satisfaction::Neutral,
            last_communication_date: "2023-01-01".to_string(),
            extra: Map::new(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({ "id": "1", "name": "John Doe", "satisfaction": "neutral", "lastCommunicationDate": "2023-01-01" })
        );
    }

    #[test]
    fn test_roster_entry_keeps_unknown_fields() {
        let raw = json!({
            "id": "1",
            "name": "John Doe",
            "satisfaction": "positive",
            "lastCommunicationDate": "2023-01-01",
            "avatar": "a.png",
            "tags": ["vip"]
        });
        let entry: RosterEntry = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(entry.extra.get("avatar"), Some(&json!("a.png")));
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn test_unlisted_satisfaction_is_kept_verbatim() {
        let raw = json!({
            "patientsSatisfaction": {
                "patientsData": [
                    { "id": "1", "name": "John Doe", "satisfaction": "unknown", "lastCommunicationDate": "2023-01-01" },
                    { "id": "2", "name": "Jane Smith", "satisfaction": "negative", "lastCommunicationDate": "2023-01-02" }
                ]
            }
        });
        let dataset = Dataset::from_slice(raw.to_string().as_bytes()).unwrap();

        let patients = dataset.patients();
        assert_eq!(patients[0].satisfaction, Satisfaction::Other("unknown".to_string()));
        assert_eq!(patients[0].satisfaction.as_str(), "unknown");
        assert_eq!(patients[1].satisfaction, Satisfaction::Negative);
        assert_eq!(
            serde_json::to_value(&patients[0]).unwrap()["satisfaction"],
            json!("unknown")
        );
    }

    #[test]
    fn test_invalid_json_is_parse_failure() {
        let err = Dataset::from_slice(b"invalid json").unwrap_err();
        assert!(err.is_parse_failure());

        let err = Dataset::from_slice(b"null").unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_reader_missing_file_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let reader = DatasetReader::new(dir.path().join("DataSet.json"));

        let err = reader.read().unwrap_err();
        assert!(err.is_read_failure());
    }

    #[test]
    fn test_bundled_sample_snapshot_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../db/DataSet.json");
        let dataset = DatasetReader::new(path).read().unwrap();

        assert_eq!(dataset.live_calls.len(), 3);
        assert_eq!(dataset.patients().len(), 5);
        assert_eq!(dataset.employees().len(), 3);
    }

    #[test]
    fn test_reader_sees_file_updates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"liveCalls": []}"#).unwrap();
        file.flush().unwrap();

        let reader = DatasetReader::new(file.path());
        assert!(reader.read().unwrap().live_calls.is_empty());

        std::fs::write(file.path(), sample().to_string()).unwrap();
        assert_eq!(reader.read().unwrap().live_calls.len(), 2);
    }
}
