use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque reference to an externally executable agent.
///
/// This is usually a filesystem path or a launch command understood by the
/// simulator. The harness never looks inside it; two identities are the same
/// agent exactly when their references are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for AgentId {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}
