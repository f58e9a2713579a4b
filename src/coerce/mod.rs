//! Parameter coercion: string-encoded, typed descriptors into JSON values.

pub mod literal;
pub mod recovery;

pub use recovery::{Recovered, RecoveryChain, RecoveryStage};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::{Result, RocError};
use crate::tools::ToolArguments;
use crate::types::{ParameterDescriptor, ParameterType};

/// How `boolean` parameters are read.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BooleanCoercion {
    /// Any non-empty string is `true`, including the text `"false"`.
    /// Matches what deployed agents have been receiving so far.
    #[default]
    Truthy,
    /// `true`/`false`, `yes`/`no`, `1`/`0` (case-insensitive); anything
    /// else is a [`RocError::TypeMismatch`].
    Strict,
}

impl BooleanCoercion {
    fn coerce(self, raw: &str) -> Option<bool> {
        match self {
            Self::Truthy => Some(!raw.is_empty()),
            Self::Strict => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

/// Converts parameter descriptors into native values.
#[derive(Debug, Default)]
pub struct ParameterCoercer {
    boolean: BooleanCoercion,
    recovery: RecoveryChain,
}

impl ParameterCoercer {
    pub fn new(boolean: BooleanCoercion) -> Self {
        Self {
            boolean,
            recovery: RecoveryChain::standard(),
        }
    }

    /// Replace the recovery chain used for `array` parameters.
    pub fn with_recovery(mut self, recovery: RecoveryChain) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn boolean_mode(&self) -> BooleanCoercion {
        self.boolean
    }

    /// Coerce one descriptor.
    ///
    /// `string` passes through, `number` and `integer` parse as `i64`,
    /// `boolean` follows [`BooleanCoercion`], and `array` goes through the
    /// recovery chain, which never fails.
    pub fn coerce(&self, param: &ParameterDescriptor) -> Result<Value> {
        let mismatch = || RocError::TypeMismatch {
            parameter: param.name.clone(),
            expected: param.kind.to_string(),
            value: param.value.clone(),
        };
        match param.kind {
            ParameterType::String => Ok(Value::String(param.value.clone())),
            ParameterType::Number | ParameterType::Integer => param
                .value
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| mismatch()),
            ParameterType::Boolean => self
                .boolean
                .coerce(&param.value)
                .map(Value::Bool)
                .ok_or_else(mismatch),
            ParameterType::Array => Ok(self.recovery.recover(&param.name, &param.value).value),
        }
    }

    /// Coerce a full parameter list into keyword arguments. Later duplicates
    /// of a name replace earlier ones.
    pub fn coerce_all(&self, params: &[ParameterDescriptor]) -> Result<ToolArguments> {
        let mut args = ToolArguments::new();
        for param in params {
            let value = self.coerce(param)?;
            args.insert(param.name.clone(), value);
        }
        Ok(args)
    }
}

/// Coerce one descriptor with default settings.
pub fn coerce_parameter(param: &ParameterDescriptor) -> Result<Value> {
    ParameterCoercer::default().coerce(param)
}

/// Coerce a parameter list with default settings.
pub fn coerce_parameters(params: &[ParameterDescriptor]) -> Result<ToolArguments> {
    ParameterCoercer::default().coerce_all(params)
}
