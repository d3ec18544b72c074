//! Static descriptions of each action's inputs and outputs

use serde::Serialize;

/// Category every action is listed under
pub const CATEGORY: &str = "CA Process Automation";

/// Value shape of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Text,
    Secret,
    Integer,
    /// Ordered list of `name:value` strings
    TextList,
}

/// One declared input or output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParameterKind,
    pub order: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

/// Name, category and parameter list of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub inputs: &'static [ParameterDescriptor],
    pub outputs: &'static [ParameterDescriptor],
}

pub const USERNAME: ParameterDescriptor = ParameterDescriptor {
    name: "Username",
    description: "PAM login username",
    kind: ParameterKind::Text,
    order: 1,
    default: None,
};

pub const PASSWORD: ParameterDescriptor = ParameterDescriptor {
    name: "Password",
    description: "PAM login password",
    kind: ParameterKind::Secret,
    order: 2,
    default: None,
};

pub const DOMAIN_URL: ParameterDescriptor = ParameterDescriptor {
    name: "Domain URL",
    description: "Example - http://pamserver:8080/itpam",
    kind: ParameterKind::Text,
    order: 3,
    default: None,
};

pub const PROCESS_PATH: ParameterDescriptor = ParameterDescriptor {
    name: "Process (Full Path)",
    description: "Full path to process",
    kind: ParameterKind::Text,
    order: 4,
    default: None,
};

pub const PROCESS_PARAMS: ParameterDescriptor = ParameterDescriptor {
    name: "Parameters",
    description: "Array of parameters (in the format of name:value) to pass to process",
    kind: ParameterKind::TextList,
    order: 5,
    default: None,
};

pub const INSTANCE_ROID_IN: ParameterDescriptor = ParameterDescriptor {
    name: "Process Instance ROID",
    description: "ROID of process instance to check",
    kind: ParameterKind::Text,
    order: 5,
    default: None,
};

pub const POLLING_SECONDS: ParameterDescriptor = ParameterDescriptor {
    name: "Polling Period (Seconds)",
    description: "How often (in seconds) to check process status",
    kind: ParameterKind::Integer,
    order: 6,
    default: Some("30"),
};

pub const TIMEOUT_SECONDS: ParameterDescriptor = ParameterDescriptor {
    name: "Timeout (Seconds)",
    description: "How long (in seconds) to wait for process to end before timing out",
    kind: ParameterKind::Integer,
    order: 7,
    default: Some("600"),
};

pub const SERVER_STATUS: ParameterDescriptor = ParameterDescriptor {
    name: "Server Status",
    description: "Server Status",
    kind: ParameterKind::Text,
    order: 0,
    default: None,
};

pub const INSTANCE_ROID_OUT: ParameterDescriptor = ParameterDescriptor {
    name: "Process Instance ROID",
    description: "ROID of process instance that was started",
    kind: ParameterKind::Text,
    order: 0,
    default: None,
};

pub const INSTANCE_STATUS: ParameterDescriptor = ParameterDescriptor {
    name: "Process Instance Status",
    description: "Status of process instance",
    kind: ParameterKind::Text,
    order: 0,
    default: None,
};

pub const INSTANCE_DATASET: ParameterDescriptor = ParameterDescriptor {
    name: "Process Instance Dataset",
    description: "Dataset of process instance",
    kind: ParameterKind::TextList,
    order: 0,
    default: None,
};
