//! Best-effort recovery of structured values from loosely encoded strings.
//!
//! The runtime sends `array` parameters as text, and model-generated text is
//! frequently not valid JSON (`[{name=Lalbagh, area=South}]`,
//! `{'a': True}`). [`RecoveryChain`] runs an ordered list of stages and
//! returns the first value produced; when every stage fails the raw string
//! is returned unchanged.

use serde_json::{Map, Value};

use super::literal::parse_literal;

/// One recovery attempt. Stages are independent and individually testable.
pub trait RecoveryStage: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Try to produce a value from `raw`. The error describes why the stage
    /// did not apply or failed.
    fn attempt(&self, raw: &str) -> Result<Value, String>;
}

fn is_bracketed(raw: &str) -> bool {
    let raw = raw.trim_start();
    raw.starts_with('{') || raw.starts_with('[')
}

/// Strict JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson;

impl RecoveryStage for StrictJson {
    fn name(&self) -> &'static str {
        "strict_json"
    }

    fn attempt(&self, raw: &str) -> Result<Value, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

/// Script-style literal syntax, see [`parse_literal`]. Bracketed input only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralSyntax;

impl RecoveryStage for LiteralSyntax {
    fn name(&self) -> &'static str {
        "literal_syntax"
    }

    fn attempt(&self, raw: &str) -> Result<Value, String> {
        if !is_bracketed(raw) {
            return Err("not a bracketed literal".to_string());
        }
        parse_literal(raw)
    }
}

/// Repairs `=` separators and unquoted tokens, then parses as JSON.
/// Bracketed input only.
///
/// Every bare token becomes a JSON string: `{a=1, b=2}` recovers to
/// `{"a": "1", "b": "2"}`. Quoted strings (single or double) are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterRepair;

impl DelimiterRepair {
    /// Rewrite `raw` into JSON text. Exposed for diagnostics.
    pub fn repair(raw: &str) -> Result<String, String> {
        let mut out = String::with_capacity(raw.len() + 16);
        let mut token = String::new();
        let mut chars = raw.chars();

        fn flush(token: &mut String, out: &mut String) {
            let trimmed = token.trim();
            if !trimmed.is_empty() {
                out.push_str(&Value::String(trimmed.to_string()).to_string());
            }
            token.clear();
        }

        while let Some(c) = chars.next() {
            match c {
                '{' | '}' | '[' | ']' | ',' | ':' => {
                    flush(&mut token, &mut out);
                    out.push(c);
                }
                '=' => {
                    flush(&mut token, &mut out);
                    out.push(':');
                }
                '"' | '\'' if token.trim().is_empty() => {
                    token.clear();
                    let mut quoted = String::new();
                    let mut closed = false;
                    while let Some(q) = chars.next() {
                        match q {
                            '\\' => {
                                if let Some(escaped) = chars.next() {
                                    quoted.push(escaped);
                                }
                            }
                            q if q == c => {
                                closed = true;
                                break;
                            }
                            q => quoted.push(q),
                        }
                    }
                    if !closed {
                        return Err("unterminated quoted string".to_string());
                    }
                    out.push_str(&Value::String(quoted).to_string());
                }
                c => token.push(c),
            }
        }
        flush(&mut token, &mut out);
        Ok(out)
    }
}

impl RecoveryStage for DelimiterRepair {
    fn name(&self) -> &'static str {
        "delimiter_repair"
    }

    fn attempt(&self, raw: &str) -> Result<Value, String> {
        if !is_bracketed(raw) {
            return Err("not a bracketed literal".to_string());
        }
        let repaired = Self::repair(raw)?;
        serde_json::from_str(&repaired).map_err(|e| format!("{e} (repaired text: {repaired})"))
    }
}

/// Flat `key=value, key=value` text into an object of strings. Unbracketed
/// input only; fails when no pair is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValuePairs;

impl RecoveryStage for KeyValuePairs {
    fn name(&self) -> &'static str {
        "key_value_pairs"
    }

    fn attempt(&self, raw: &str) -> Result<Value, String> {
        if is_bracketed(raw) {
            return Err("bracketed input is not a key=value list".to_string());
        }
        let map: Map<String, Value> = raw
            .split(',')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), Value::String(v.trim().to_string())))
            .collect();
        if map.is_empty() {
            return Err("no key=value pairs found".to_string());
        }
        Ok(Value::Object(map))
    }
}

/// Outcome of [`RecoveryChain::recover`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub value: Value,
    /// Name of the stage that produced `value`; `None` for the raw fallback.
    pub stage: Option<&'static str>,
}

/// Ordered list of [`RecoveryStage`]s.
pub struct RecoveryChain {
    stages: Vec<Box<dyn RecoveryStage>>,
}

impl Default for RecoveryChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl RecoveryChain {
    /// Strict JSON, literal syntax, delimiter repair, key=value pairs.
    pub fn standard() -> Self {
        Self {
            stages: vec![
                Box::new(StrictJson),
                Box::new(LiteralSyntax),
                Box::new(DelimiterRepair),
                Box::new(KeyValuePairs),
            ],
        }
    }

    pub fn with_stages(stages: Vec<Box<dyn RecoveryStage>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run the stages in order. Never fails: the raw string is the last resort.
    pub fn recover(&self, parameter: &str, raw: &str) -> Recovered {
        for (position, stage) in self.stages.iter().enumerate() {
            match stage.attempt(raw) {
                Ok(value) => {
                    if position > 0 {
                        tracing::debug!(parameter, stage = stage.name(), "recovered malformed value");
                    }
                    return Recovered {
                        value,
                        stage: Some(stage.name()),
                    };
                }
                Err(reason) => {
                    tracing::debug!(parameter, stage = stage.name(), %reason, raw, "recovery stage failed");
                }
            }
        }
        tracing::warn!(parameter, raw, "could not parse structured value; passing raw string");
        Recovered {
            value: Value::String(raw.to_string()),
            stage: None,
        }
    }
}

impl std::fmt::Debug for RecoveryChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryChain")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn strict_json_parses_valid_arrays() {
        assert_eq!(StrictJson.attempt("[1,2,3]").unwrap(), json!([1, 2, 3]));
        assert!(StrictJson.attempt("{'a': 1}").is_err());
    }

    #[test]
    fn literal_syntax_only_for_bracketed_input() {
        assert_eq!(
            LiteralSyntax.attempt("['a', True]").unwrap(),
            json!(["a", true])
        );
        assert!(LiteralSyntax.attempt("'a'").is_err());
    }

    #[test]
    fn delimiter_repair_quotes_bare_tokens() {
        assert_eq!(
            DelimiterRepair::repair("{a=1, b=2}").unwrap(),
            r#"{"a":"1","b":"2"}"#
        );
        assert_eq!(
            DelimiterRepair
                .attempt("[{name=Cubbon Park, area=Central}, {name=Lalbagh, area=South}]")
                .unwrap(),
            json!([
                {"name": "Cubbon Park", "area": "Central"},
                {"name": "Lalbagh", "area": "South"}
            ])
        );
    }

    #[test]
    fn delimiter_repair_keeps_quoted_strings() {
        assert_eq!(
            DelimiterRepair.attempt("{'note'='a, b', count=2}").unwrap(),
            json!({"note": "a, b", "count": "2"})
        );
    }

    #[test]
    fn delimiter_repair_rejects_unbalanced_input() {
        assert!(DelimiterRepair.attempt("{a=1, b=").is_err());
        assert!(DelimiterRepair.attempt("{'open=1}").is_err());
    }

    #[test]
    fn key_value_pairs_for_flat_text() {
        assert_eq!(
            KeyValuePairs.attempt("city=Bangalore, days = 3").unwrap(),
            json!({"city": "Bangalore", "days": "3"})
        );
        assert!(KeyValuePairs.attempt("just text").is_err());
        assert!(KeyValuePairs.attempt("{a=1}").is_err());
    }

    #[test]
    fn chain_reports_producing_stage() {
        let chain = RecoveryChain::standard();
        assert_eq!(chain.recover("p", "[1,2,3]").stage, Some("strict_json"));
        assert_eq!(chain.recover("p", "[1,2,3,]").stage, Some("literal_syntax"));
        assert_eq!(chain.recover("p", "{a=1, b=2}").stage, Some("delimiter_repair"));
        assert_eq!(chain.recover("p", "a=1").stage, Some("key_value_pairs"));
    }

    #[test]
    fn chain_falls_back_to_raw_string() {
        let garbage = "\u{1}\u{2}\u{fffd}garbage";
        let recovered = RecoveryChain::standard().recover("p", garbage);
        assert_eq!(recovered.stage, None);
        assert_eq!(recovered.value, Value::String(garbage.to_string()));
    }

    #[test]
    fn deeply_nested_input_falls_back_to_raw_string() {
        let raw = "[".repeat(10_000);
        let recovered = RecoveryChain::standard().recover("stops", &raw);
        assert_eq!(recovered.stage, None);
        assert_eq!(recovered.value, Value::String(raw));
    }

    #[test]
    fn custom_chain_order() {
        let chain = RecoveryChain::with_stages(vec![Box::new(KeyValuePairs)]);
        assert_eq!(chain.stage_names(), vec!["key_value_pairs"]);
        assert_eq!(chain.recover("p", "[1]").value, json!("[1]"));
    }
}
