/// SpaceX rocket catalog.
///
/// The v4 rockets endpoint returns every vehicle in one JSON array. Records
/// are kept as raw JSON for the duration of a single resolution; only the
/// fields we persist are ever read, through `resolve::extract`.
///
/// API Documentation: https://github.com/r-spacex/SpaceX-API/tree/master/docs/rockets/v4

use serde_json::Value;

use crate::model::ExtractError;
use crate::resolve::extract;

pub const SPACEX_ROCKETS_URL: &str = "https://api.spacexdata.com/v4/rockets";

/// Every rocket record from one catalog response, in response order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<Value>,
}

impl Catalog {
    pub fn from_records(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Wraps a fetched payload. The top level must be a JSON array.
    pub fn from_payload(payload: Value) -> Result<Self, ExtractError> {
        match payload {
            Value::Array(records) => Ok(Self { records }),
            other => Err(ExtractError::WrongType {
                path: "<root>".to_string(),
                expected: "array",
                found: extract::kind(&other),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `name` of every record, in catalog order. A record without a
    /// string name makes the whole catalog unusable.
    pub fn names(&self) -> Result<Vec<&str>, ExtractError> {
        Ok(self.entries()?.into_iter().map(|(name, _)| name).collect())
    }

    /// Every record paired with its `name`, in catalog order.
    pub fn entries(&self) -> Result<Vec<(&str, &Value)>, ExtractError> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| match extract::lookup(record, "name") {
                Ok(Value::String(name)) => Ok((name.as_str(), record)),
                Ok(other) => Err(ExtractError::WrongType {
                    path: format!("[{}].name", i),
                    expected: "string",
                    found: extract::kind(other),
                }),
                Err(ExtractError::WrongType { expected, found, .. }) => Err(ExtractError::WrongType {
                    path: format!("[{}]", i),
                    expected,
                    found,
                }),
                Err(ExtractError::MissingField { .. }) => {
                    Err(ExtractError::MissingField { path: format!("[{}].name", i) })
                }
            })
            .collect()
    }
}
