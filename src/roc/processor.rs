//! Batch orchestration: one return-of-control event in, one session state out.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use super::confirmation::{ConfirmationGate, ConfirmationPrompt, ConfirmationTarget, StdioPrompt};
use super::invoker::ToolInvoker;
use crate::coerce::ParameterCoercer;
use crate::config::RocConfig;
use crate::error::{Result, RocError};
use crate::tools::ToolRegistry;
use crate::types::{
    FunctionInvocationInput, FunctionResult, InvocationInput, ReturnControlEvent, SessionStateOut,
    RESERVED_SESSION_KEYS,
};
use crate::util::timeout::with_timeout;

/// Fail when the caller's session state already holds a processor-owned key.
pub fn validate_session_state(session_state: &Map<String, Value>) -> Result<()> {
    for key in RESERVED_SESSION_KEYS {
        if session_state.contains_key(key) {
            return Err(RocError::ContractViolation(format!(
                "{key} key is not supported in sessionState"
            )));
        }
    }
    Ok(())
}

/// Processes return-of-control events against a tool registry.
///
/// Requests are handled one at a time in input order; confirmation prompts
/// therefore never interleave. The processor keeps no per-batch state, so a
/// single instance may serve concurrent sessions as long as its prompt
/// channel can.
pub struct ReturnControlProcessor {
    registry: Arc<ToolRegistry>,
    coercer: ParameterCoercer,
    invoker: ToolInvoker,
    gate: ConfirmationGate,
}

impl ReturnControlProcessor {
    /// Processor with [`RocConfig::global`] settings and a stdin/stdout prompt.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self::with_config(registry, Arc::new(StdioPrompt::new()), RocConfig::global())
    }

    pub fn with_config(
        registry: Arc<ToolRegistry>,
        prompt: Arc<dyn ConfirmationPrompt>,
        config: &RocConfig,
    ) -> Self {
        let invoker = ToolInvoker::new(config.output_preview_chars);
        let gate = ConfirmationGate::new(prompt, invoker.clone())
            .with_max_attempts(config.confirm_max_attempts)
            .with_denial_message(config.denial_message.clone());
        Self {
            registry,
            coercer: ParameterCoercer::new(config.boolean_coercion),
            invoker,
            gate,
        }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Process one event.
    ///
    /// Batch-fatal errors (reserved session keys, unsupported input shapes,
    /// parameter type mismatches, unknown tools) abort the whole call; no
    /// partial result is returned. Tool failures are reported inside the
    /// returned state instead.
    pub async fn process(
        &self,
        session_state: &Map<String, Value>,
        event: &ReturnControlEvent,
    ) -> Result<SessionStateOut> {
        validate_session_state(session_state)?;

        let mut state = SessionStateOut::new(event.invocation_id.clone());
        tracing::debug!(
            invocation_id = %event.invocation_id,
            inputs = event.invocation_inputs.len(),
            "processing return-of-control event"
        );

        for (index, input) in event.invocation_inputs.iter().enumerate() {
            let request = match input {
                InvocationInput::Function(request) => request,
                InvocationInput::Api(_) => {
                    return Err(RocError::ContractViolation(format!(
                        "invocation #{index}: apiInvocationInput is not supported in returnControlInvocationResults"
                    )))
                }
                InvocationInput::Unrecognized(name) => {
                    return Err(RocError::ContractViolation(format!(
                        "invocation #{index}: unrecognized invocation input '{name}'"
                    )))
                }
            };

            let fragment = self
                .process_request(request)
                .await
                .map_err(|err| err.in_request(index, &request.function))?;
            state.push(fragment);
        }

        tracing::debug!(
            invocation_id = %state.invocation_id,
            results = state.len(),
            "return-of-control event processed"
        );
        Ok(state)
    }

    /// [`ReturnControlProcessor::process`] on raw JSON values.
    ///
    /// `session_state` may be `null` (treated as empty) or an object.
    pub async fn process_json(&self, session_state: &Value, event: &Value) -> Result<SessionStateOut> {
        let empty = Map::new();
        let session_state = match session_state {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(RocError::ContractViolation(format!(
                    "sessionState must be an object, got {other}"
                )))
            }
        };
        let event: ReturnControlEvent = serde_json::from_value(event.clone())?;
        self.process(session_state, &event).await
    }

    /// [`ReturnControlProcessor::process`] under a deadline.
    pub async fn process_with_timeout(
        &self,
        timeout: Duration,
        session_state: &Map<String, Value>,
        event: &ReturnControlEvent,
    ) -> Result<SessionStateOut> {
        with_timeout(timeout, self.process(session_state, event)).await
    }

    async fn process_request(&self, request: &FunctionInvocationInput) -> Result<FunctionResult> {
        let args = self.coercer.coerce_all(&request.parameters)?;

        let kind = request.action_invocation_type;
        if !kind.requires_confirmation() {
            let tool = self.resolve(&request.function)?;
            return self.invoker.invoke(request, tool.as_ref(), &args, None).await;
        }

        // Confirmation-only requests never run the tool, so the name is not resolved.
        if kind.includes_result() {
            let tool = self.resolve(&request.function)?;
            self.gate
                .confirm(request, ConfirmationTarget::Tool(tool.as_ref()), &args, true)
                .await
        } else {
            self.gate
                .confirm(request, ConfirmationTarget::Name(&request.function), &args, false)
                .await
        }
    }

    fn resolve(&self, function: &str) -> Result<Arc<dyn crate::tools::Tool>> {
        self.registry.get(function).ok_or_else(|| RocError::ToolNotFound {
            function: function.to_string(),
        })
    }
}

impl std::fmt::Debug for ReturnControlProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReturnControlProcessor")
            .field("registry", &self.registry)
            .field("coercer", &self.coercer)
            .field("gate", &self.gate)
            .finish()
    }
}
