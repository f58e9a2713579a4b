//! CLI command handlers. Each returns the text to print.

use std::path::Path;

use crate::coerce::{BooleanCoercion, ParameterCoercer};
use crate::config::RocConfig;
use crate::error::Result;
use crate::types::{InvocationInput, ParameterDescriptor, ReturnControlEvent};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Handle `roc-bridge coerce <path>`.
pub fn handle_coerce(path: &Path, strict_booleans: bool, config: &RocConfig) -> Result<String> {
    let params: Vec<ParameterDescriptor> = read_json(path)?;
    let mode = if strict_booleans {
        BooleanCoercion::Strict
    } else {
        config.boolean_coercion
    };
    let args = ParameterCoercer::new(mode).coerce_all(&params)?;
    Ok(serde_json::to_string_pretty(&args.to_value())?)
}

/// Handle `roc-bridge inspect <path>`.
pub fn handle_inspect(path: &Path) -> Result<String> {
    let event: ReturnControlEvent = read_json(path)?;
    let mut lines = vec![format!(
        "invocation {} ({} inputs)",
        event.invocation_id,
        event.invocation_inputs.len()
    )];
    for (index, input) in event.invocation_inputs.iter().enumerate() {
        let line = match input {
            InvocationInput::Function(f) => format!(
                "  #{index} {}.{} [{}] {} parameter(s)",
                f.action_group,
                f.function,
                f.action_invocation_type,
                f.parameters.len()
            ),
            InvocationInput::Api(_) => format!("  #{index} api input (unsupported)"),
            InvocationInput::Unrecognized(name) => {
                format!("  #{index} unrecognized input '{name}' (unsupported)")
            }
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn coerce_prints_arguments() {
        let file = write_temp(
            r#"[{"name": "days", "type": "integer", "value": "2"},
                {"name": "veg", "type": "boolean", "value": "false"}]"#,
        );

        let truthy = handle_coerce(file.path(), false, &RocConfig::default()).unwrap();
        let strict = handle_coerce(file.path(), true, &RocConfig::default()).unwrap();

        let truthy: serde_json::Value = serde_json::from_str(&truthy).unwrap();
        let strict: serde_json::Value = serde_json::from_str(&strict).unwrap();
        assert_eq!(truthy["days"], 2);
        assert_eq!(truthy["veg"], true);
        assert_eq!(strict["veg"], false);
    }

    #[test]
    fn inspect_lists_inputs() {
        let file = write_temp(
            r#"{"invocationId": "inv-9", "invocationInputs": [
                {"functionInvocationInput": {"actionGroup": "Travel", "agentId": "a",
                  "function": "plan_trip", "actionInvocationType": "RESULT", "parameters": []}},
                {"apiInvocationInput": {}}
            ]}"#,
        );

        let out = handle_inspect(file.path()).unwrap();

        assert!(out.starts_with("invocation inv-9 (2 inputs)"));
        assert!(out.contains("#0 Travel.plan_trip [RESULT] 0 parameter(s)"));
        assert!(out.contains("#1 api input (unsupported)"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = handle_inspect(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, crate::error::RocError::Io(_)));
    }
}
