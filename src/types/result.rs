//! Result envelope sent back to the remote agent runtime.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::event::FunctionInvocationInput;

/// Body used when the user declines an invocation that expected a result.
pub const ACCESS_DENIED_MESSAGE: &str = "Access Denied to this function. Do not try again.";

/// Session-state keys owned by the processor. Callers must not supply them.
pub const RESERVED_SESSION_KEYS: [&str; 2] = ["returnControlInvocationResults", "invocationId"];

/// User decision recorded on a fragment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ConfirmationState {
    Confirm,
    Deny,
}

/// Marker set on fragments whose tool call failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ResponseState {
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBody {
    pub body: String,
}

/// `responseBody` payload. Only the `TEXT` content type is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "TEXT")]
    pub text: TextBody,
}

impl ResponseBody {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            text: TextBody { body: body.into() },
        }
    }
}

/// Outcome of one invocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub action_group: String,
    pub agent_id: String,
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<ResponseBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_state: Option<ResponseState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_state: Option<ConfirmationState>,
}

impl FunctionResult {
    /// Identity fields only, copied from the request.
    pub fn bare(request: &FunctionInvocationInput) -> Self {
        Self {
            action_group: request.action_group.clone(),
            agent_id: request.agent_id.clone(),
            function: request.function.clone(),
            response_body: None,
            response_state: None,
            confirmation_state: None,
        }
    }

    pub fn success(request: &FunctionInvocationInput, body: impl Into<String>) -> Self {
        Self {
            response_body: Some(ResponseBody::text(body)),
            ..Self::bare(request)
        }
    }

    pub fn failure(request: &FunctionInvocationInput, error: impl Into<String>) -> Self {
        Self {
            response_body: Some(ResponseBody::text(error)),
            response_state: Some(ResponseState::Failure),
            ..Self::bare(request)
        }
    }

    /// A decision-only fragment, no body.
    pub fn decision(request: &FunctionInvocationInput, state: ConfirmationState) -> Self {
        Self {
            confirmation_state: Some(state),
            ..Self::bare(request)
        }
    }

    pub fn with_confirmation(mut self, state: ConfirmationState) -> Self {
        self.confirmation_state = Some(state);
        self
    }

    pub fn is_failure(&self) -> bool {
        self.response_state == Some(ResponseState::Failure)
    }

    /// The `TEXT` body, when present.
    pub fn body(&self) -> Option<&str> {
        self.response_body.as_ref().map(|b| b.text.body.as_str())
    }
}

/// One entry of `returnControlInvocationResults`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnControlResult {
    pub function_result: FunctionResult,
}

impl From<FunctionResult> for ReturnControlResult {
    fn from(function_result: FunctionResult) -> Self {
        Self { function_result }
    }
}

/// Session state handed back to the runtime for its next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateOut {
    pub invocation_id: String,
    pub return_control_invocation_results: Vec<ReturnControlResult>,
}

impl SessionStateOut {
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            return_control_invocation_results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: FunctionResult) {
        self.return_control_invocation_results.push(result.into());
    }

    /// Iterate over the fragments in request order.
    pub fn results(&self) -> impl Iterator<Item = &FunctionResult> {
        self.return_control_invocation_results
            .iter()
            .map(|r| &r.function_result)
    }

    pub fn len(&self) -> usize {
        self.return_control_invocation_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.return_control_invocation_results.is_empty()
    }

    /// Serialize into the JSON object forwarded to the runtime.
    pub fn to_value(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
