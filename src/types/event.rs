//! Return-of-control event types as emitted by the remote agent runtime.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

/// One batch of tool-invocation requests issued in a single agent turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnControlEvent {
    pub invocation_id: String,
    #[serde(default)]
    pub invocation_inputs: Vec<InvocationInput>,
}

/// A single entry of `invocationInputs`.
///
/// The runtime sends a tagged union where exactly one top-level key is set.
/// Clients that see a member they do not know about receive it as
/// `SDK_UNKNOWN_MEMBER: {"name": ...}`; that case, and any other unexpected
/// key, maps to [`InvocationInput::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawInvocationInput")]
pub enum InvocationInput {
    Function(FunctionInvocationInput),
    /// API-schema style invocation. Not supported by the processor.
    Api(serde_json::Value),
    Unrecognized(String),
}

impl InvocationInput {
    /// Short label for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Api(_) => "api",
            Self::Unrecognized(_) => "unrecognized",
        }
    }
}

impl Serialize for InvocationInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Function(function) => map.serialize_entry("functionInvocationInput", function)?,
            Self::Api(api) => map.serialize_entry("apiInvocationInput", api)?,
            Self::Unrecognized(name) => map.serialize_entry(
                "SDK_UNKNOWN_MEMBER",
                &UnknownMember { name: name.clone() },
            )?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UnknownMember {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawInvocationInput {
    #[serde(rename = "functionInvocationInput", default)]
    function: Option<FunctionInvocationInput>,
    #[serde(rename = "apiInvocationInput", default)]
    api: Option<serde_json::Value>,
    #[serde(rename = "SDK_UNKNOWN_MEMBER", default)]
    unknown: Option<UnknownMember>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

impl From<RawInvocationInput> for InvocationInput {
    fn from(raw: RawInvocationInput) -> Self {
        if let Some(api) = raw.api {
            return Self::Api(api);
        }
        if let Some(function) = raw.function {
            return Self::Function(function);
        }
        if let Some(unknown) = raw.unknown {
            return Self::Unrecognized(unknown.name);
        }
        let name = raw
            .other
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "<empty>".to_string());
        Self::Unrecognized(name)
    }
}

/// A function-style tool invocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInvocationInput {
    pub action_group: String,
    pub agent_id: String,
    pub function: String,
    pub action_invocation_type: ActionInvocationType,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

/// How the runtime wants an invocation handled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionInvocationType {
    /// Run the tool and report its output.
    Result,
    /// Ask the user; report only the decision.
    UserConfirmation,
    /// Ask the user; run the tool and report its output when approved.
    UserConfirmationAndResult,
}

impl ActionInvocationType {
    /// Whether the runtime expects the tool's output back.
    pub fn includes_result(self) -> bool {
        matches!(self, Self::Result | Self::UserConfirmationAndResult)
    }

    /// Whether the user has to approve the invocation first.
    pub fn requires_confirmation(self) -> bool {
        matches!(self, Self::UserConfirmation | Self::UserConfirmationAndResult)
    }
}

/// A named, typed, string-encoded parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub value: String,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, kind: ParameterType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }
}

/// Declared type of a [`ParameterDescriptor`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn function_input_deserializes_from_wire_shape() {
        let input: InvocationInput = serde_json::from_value(json!({
            "functionInvocationInput": {
                "actionGroup": "TravelActions",
                "agentId": "INLINE_AGENT",
                "function": "book_hotel",
                "actionInvocationType": "USER_CONFIRMATION_AND_RESULT",
                "parameters": [
                    { "name": "nights", "type": "integer", "value": "3" }
                ]
            }
        }))
        .unwrap();

        let InvocationInput::Function(function) = input else {
            panic!("expected function input");
        };
        assert_eq!(function.function, "book_hotel");
        assert_eq!(
            function.action_invocation_type,
            ActionInvocationType::UserConfirmationAndResult
        );
        assert_eq!(function.parameters[0].kind, ParameterType::Integer);
    }

    #[test]
    fn api_input_maps_to_api_variant() {
        let input: InvocationInput =
            serde_json::from_value(json!({ "apiInvocationInput": { "apiPath": "/x" } })).unwrap();
        assert!(matches!(input, InvocationInput::Api(_)));
    }

    #[test]
    fn sdk_unknown_member_maps_to_unrecognized() {
        let input: InvocationInput =
            serde_json::from_value(json!({ "SDK_UNKNOWN_MEMBER": { "name": "mcpInvocationInput" } }))
                .unwrap();
        assert_eq!(input, InvocationInput::Unrecognized("mcpInvocationInput".into()));
    }

    #[test]
    fn unexpected_key_maps_to_unrecognized() {
        let input: InvocationInput =
            serde_json::from_value(json!({ "somethingNew": {} })).unwrap();
        assert_eq!(input, InvocationInput::Unrecognized("somethingNew".into()));
    }

    #[test]
    fn serializes_back_to_tagged_shape() {
        let input = InvocationInput::Unrecognized("futureInput".into());
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "SDK_UNKNOWN_MEMBER": { "name": "futureInput" } })
        );
    }

    #[test]
    fn missing_parameters_default_to_empty() {
        let function: FunctionInvocationInput = serde_json::from_value(json!({
            "actionGroup": "g",
            "agentId": "a",
            "function": "f",
            "actionInvocationType": "RESULT"
        }))
        .unwrap();
        assert!(function.parameters.is_empty());
    }

    #[test]
    fn invocation_type_flags() {
        assert!(ActionInvocationType::Result.includes_result());
        assert!(!ActionInvocationType::Result.requires_confirmation());
        assert!(!ActionInvocationType::UserConfirmation.includes_result());
        assert!(ActionInvocationType::UserConfirmationAndResult.requires_confirmation());
        assert_eq!(
            ActionInvocationType::UserConfirmationAndResult.to_string(),
            "USER_CONFIRMATION_AND_RESULT"
        );
    }
}
