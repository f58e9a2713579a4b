//! Runs one resolved tool and turns its outcome into a result fragment.

use serde_json::Value;

use crate::config::DEFAULT_OUTPUT_PREVIEW_CHARS;
use crate::error::{Result, RocError};
use crate::tools::{Tool, ToolArguments, ToolExecutionContext};
use crate::types::{ConfirmationState, FunctionInvocationInput, FunctionResult};
use crate::util::text::preview;

/// Render tool output as the `TEXT` body sent to the runtime.
///
/// JSON strings are used verbatim, `null` becomes an empty body and any
/// other value is sent as its JSON text.
pub fn stringify_output(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Text placed in the body of a failure fragment.
fn failure_text(error: &RocError) -> String {
    match error {
        RocError::ToolExecution { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Invokes tools and normalizes success and failure into [`FunctionResult`]s.
#[derive(Debug, Clone)]
pub struct ToolInvoker {
    output_preview_chars: usize,
}

impl Default for ToolInvoker {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PREVIEW_CHARS)
    }
}

impl ToolInvoker {
    pub fn new(output_preview_chars: usize) -> Self {
        Self {
            output_preview_chars,
        }
    }

    /// Run `tool` with `args` on behalf of `request`.
    ///
    /// Tool errors never escape: they become a fragment with
    /// `responseState: FAILURE`. With `confirm` set to
    /// [`ConfirmationState::Confirm`] the fragment also records the user's
    /// approval; [`ConfirmationState::Deny`] is rejected with
    /// [`RocError::InvalidArgument`] before the tool runs.
    pub async fn invoke(
        &self,
        request: &FunctionInvocationInput,
        tool: &dyn Tool,
        args: &ToolArguments,
        confirm: Option<ConfirmationState>,
    ) -> Result<FunctionResult> {
        if let Some(state) = confirm {
            if state != ConfirmationState::Confirm {
                return Err(RocError::InvalidArgument(format!(
                    "only {} may accompany a tool invocation, got {state}",
                    ConfirmationState::Confirm
                )));
            }
        }

        let ctx = ToolExecutionContext {
            action_group: request.action_group.clone(),
            agent_id: request.agent_id.clone(),
            confirmed: confirm.is_some(),
        };

        let fragment = match tool.execute(args, &ctx).await {
            Ok(output) => {
                let body = stringify_output(&output);
                tracing::info!(
                    tool = %request.function,
                    action_group = %request.action_group,
                    output = %preview(&body, self.output_preview_chars),
                    "tool output"
                );
                FunctionResult::success(request, body)
            }
            Err(error) => {
                tracing::warn!(
                    tool = %request.function,
                    action_group = %request.action_group,
                    error = %error,
                    "tool invocation failed"
                );
                FunctionResult::failure(request, failure_text(&error))
            }
        };

        Ok(match confirm {
            Some(state) => fragment.with_confirmation(state),
            None => fragment,
        })
    }
}
