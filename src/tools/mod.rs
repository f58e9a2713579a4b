//! Tool system: local functions the remote agent can ask us to run.

pub mod arguments;
pub mod registry;
pub mod tool;

pub use arguments::ToolArguments;
pub use registry::ToolRegistry;
pub use tool::{AgentTool, Tool, ToolExecutionContext};
