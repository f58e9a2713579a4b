//! Error classification for batch handling.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Broad error category for deciding how a failure surfaces to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// The caller broke the processing contract (reserved keys, unsupported shapes).
    Contract,
    /// A requested tool is missing from the registry.
    Lookup,
    /// A parameter value could not be converted to its declared type.
    Coercion,
    /// Internal misuse of an API (bad confirmation token and similar).
    Usage,
    /// The interactive confirmation channel failed.
    Confirmation,
    /// A tool reported an error.
    ToolExecution,
    Configuration,
    Timeout,
    Io,
    Serialization,
}

impl ErrorCategory {
    /// Whether errors in this category abort a whole batch.
    ///
    /// Tool execution failures never do: the invoker turns them into
    /// failure fragments instead.
    pub fn aborts_batch(self) -> bool {
        !matches!(self, Self::ToolExecution)
    }
}
