//! Error types for roc-bridge.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

/// Primary error type for all return-of-control operations.
#[derive(Error, Debug)]
pub enum RocError {
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Function {function} not found in tool registry")]
    ToolNotFound { function: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch for parameter '{parameter}': expected {expected}, got {value:?}")]
    TypeMismatch {
        parameter: String,
        expected: String,
        value: String,
    },

    #[error("Invocation #{index} ({function}): {source}")]
    Request {
        index: usize,
        function: String,
        #[source]
        source: Box<RocError>,
    },

    #[error("Tool execution error: {tool_name} — {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RocError {
    /// Create a tool execution error. Intended for tool implementations.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Attach the position and function name of the request that failed.
    pub fn in_request(self, index: usize, function: impl Into<String>) -> Self {
        Self::Request {
            index,
            function: function.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through [`RocError::Request`] wrappers.
    pub fn root(&self) -> &RocError {
        match self {
            Self::Request { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            Self::ContractViolation(_) => ErrorCategory::Contract,
            Self::ToolNotFound { .. } => ErrorCategory::Lookup,
            Self::InvalidArgument(_) => ErrorCategory::Usage,
            Self::TypeMismatch { .. } => ErrorCategory::Coercion,
            Self::ToolExecution { .. } => ErrorCategory::ToolExecution,
            Self::InvalidState(_) => ErrorCategory::Confirmation,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Io(_) => ErrorCategory::Io,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Request { .. } => unreachable!("root() never returns a Request wrapper"),
        }
    }

    /// Whether this error aborts batch processing when it reaches the processor.
    pub fn is_batch_fatal(&self) -> bool {
        self.category().aborts_batch()
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RocError>;
