//! Convenience re-exports for common use.

pub use crate::coerce::{BooleanCoercion, ParameterCoercer};
pub use crate::config::RocConfig;
pub use crate::error::{Result, RocError};
pub use crate::roc::{ConfirmationPrompt, ReturnControlProcessor, ScriptedPrompt, StdioPrompt};
pub use crate::tools::{AgentTool, Tool, ToolArguments, ToolExecutionContext, ToolRegistry};
pub use crate::types::{
    ActionInvocationType, ConfirmationState, FunctionResult, ReturnControlEvent, SessionStateOut,
};
