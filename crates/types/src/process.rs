//! Process parameters, instance handles, statuses and datasets

use itpam_errors::{Error, ProcessError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statuses after which a process instance will not change any more
pub const TERMINAL_STATUSES: [&str; 3] = ["Completed", "Failed", "Aborted"];

/// One `name:value` input passed to a started process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessParam {
    pub name: String,
    pub value: String,
}

impl ProcessParam {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse every entry of a `name:value` list, stopping at the first bad one
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::InvalidParameter` for an entry without a colon.
    pub fn parse_all<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Self>, Error> {
        inputs.iter().map(|s| s.as_ref().parse()).collect()
    }
}

impl FromStr for ProcessParam {
    type Err = Error;

    /// Split on the first colon; the value keeps any further colons
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once(':').ok_or_else(|| ProcessError::InvalidParameter {
            input: s.to_string(),
        })?;
        Ok(Self::new(name, value))
    }
}

impl fmt::Display for ProcessParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// Remote object identifier (ROID) of a process instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    #[must_use]
    pub fn new(roid: impl Into<String>) -> Self {
        Self(roid.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for InstanceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Raw `flow-state` value reported by the server
///
/// Only the terminal values are known; everything else is treated as
/// still running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessStatus(String);

impl ProcessStatus {
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive match against `Completed`, `Failed` or `Aborted`
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.0.as_str())
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessStatus {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One output pair of a process instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub name: String,
    pub value: String,
}

impl fmt::Display for DatasetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

/// Ordered output pairs of a process instance, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(Vec<DatasetEntry>);

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(DatasetEntry {
            name: name.into(),
            value: value.into(),
        });
    }

    /// `name:value` strings, the shape the host platform consumes
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<(String, String)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| DatasetEntry { name, value })
                .collect(),
        )
    }
}
