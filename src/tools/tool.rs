//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::arguments::ToolArguments;
use crate::error::RocError;

/// Context available during tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutionContext {
    /// Action group of the invocation request.
    pub action_group: String,
    /// Remote agent that asked for the call.
    pub agent_id: String,
    /// Whether the user explicitly approved this call.
    pub confirmed: bool,
}

/// Core tool trait. Implement it to expose a local function to the remote agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match the `function` field of invocation requests).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// Execute the tool with coerced arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, RocError>;
}

type ToolFuture = BoxFuture<'static, Result<serde_json::Value, RocError>>;

enum ToolHandler {
    Async(Arc<dyn Fn(ToolArguments, ToolExecutionContext) -> ToolFuture + Send + Sync>),
    Sync(
        Arc<
            dyn Fn(&ToolArguments, &ToolExecutionContext) -> Result<serde_json::Value, RocError>
                + Send
                + Sync,
        >,
    ),
}

/// Closure-based tool for quick tool creation.
///
/// Both suspending and immediate handlers are supported; immediate handlers
/// run inline on the calling task.
pub struct AgentTool {
    name: String,
    description: String,
    handler: ToolHandler,
}

impl AgentTool {
    /// Create a tool from an async closure.
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, RocError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: ToolHandler::Async(Arc::new(move |args, ctx| Box::pin(handler(args, ctx)))),
        }
    }

    /// Create a tool from a synchronous closure.
    pub fn from_sync<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ToolArguments, &ToolExecutionContext) -> Result<serde_json::Value, RocError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: ToolHandler::Sync(Arc::new(handler)),
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self.handler, ToolHandler::Async(_))
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, RocError> {
        match &self.handler {
            ToolHandler::Async(handler) => handler(args.clone(), ctx.clone()).await,
            ToolHandler::Sync(handler) => handler(args, ctx),
        }
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("async", &self.is_async())
            .finish()
    }
}
