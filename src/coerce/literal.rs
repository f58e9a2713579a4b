//! Permissive literal parser for script-style data (`{'a': 1, 'b': (True, None)}`).
//!
//! Accepts everything JSON accepts plus single-quoted strings, `True` /
//! `False` / `None`, tuples (as arrays), non-string dictionary keys and
//! trailing commas.

use serde_json::{Map, Number, Value};

/// Deepest container nesting accepted; matches serde_json's recursion limit.
pub const MAX_DEPTH: usize = 128;

/// Parse `input` as a literal. The whole input must be consumed.
pub fn parse_literal(input: &str) -> Result<Value, String> {
    let mut parser = LiteralParser {
        chars: input.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(format!("trailing characters at offset {}", parser.pos));
    }
    Ok(value)
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl LiteralParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(format!("expected '{expected}', found '{c}' at offset {}", self.pos - 1)),
            None => Err(format!("expected '{expected}', found end of input")),
        }
    }

    fn value(&mut self) -> Result<Value, String> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.nested(Self::dict),
            Some('[') => self.nested(|p| p.sequence('[', ']')),
            Some('(') => self.nested(|p| p.sequence('(', ')')),
            Some(q @ ('\'' | '"')) => self.string(q).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_alphabetic() => self.keyword(),
            Some(c) => Err(format!("unexpected '{c}' at offset {}", self.pos)),
            None => Err("unexpected end of input".to_string()),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Value, String>,
    ) -> Result<Value, String> {
        if self.depth >= MAX_DEPTH {
            return Err(format!("nesting too deep at offset {}", self.pos));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Value, String> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Array(items)),
                Some(c) => return Err(format!("unexpected '{c}' in sequence at offset {}", self.pos - 1)),
                None => return Err("unterminated sequence".to_string()),
            }
        }
    }

    fn dict(&mut self) -> Result<Value, String> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }
            let key = match self.value()? {
                Value::String(s) => s,
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!("unhashable dictionary key at offset {}", self.pos))
                }
                other => other.to_string(),
            };
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.value()?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => return Err(format!("unexpected '{c}' in dictionary at offset {}", self.pos - 1)),
                None => return Err("unterminated dictionary".to_string()),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, String> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err("unterminated string".to_string()),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or("unterminated escape")?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        'u' => out.push(self.unicode_escape()?),
                        other => out.push(other),
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, String> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or("invalid \\u escape")?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| "invalid \\u code point".to_string())
    }

    fn number(&mut self) -> Result<Value, String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'))
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos]
            .iter()
            .filter(|c| **c != '_')
            .collect();
        let text = text.strip_prefix('+').unwrap_or(&text);
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Number(int.into()));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("invalid number '{text}' at offset {start}"))
    }

    fn keyword(&mut self) -> Result<Value, String> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            _ => Err(format!("unknown name '{word}' at offset {start}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn single_quotes_and_keywords() {
        let value = parse_literal("{'city': 'Bangalore', 'open': True, 'closed': None}").unwrap();
        assert_eq!(value, json!({"city": "Bangalore", "open": true, "closed": null}));
    }

    #[test]
    fn tuples_and_trailing_commas() {
        let value = parse_literal("[(1, 2), (3, 4.5),]").unwrap();
        assert_eq!(value, json!([[1, 2], [3, 4.5]]));
    }

    #[test]
    fn numeric_keys_become_strings() {
        let value = parse_literal("{1: 'one', 2: 'two'}").unwrap();
        assert_eq!(value, json!({"1": "one", "2": "two"}));
    }

    #[test]
    fn escapes_inside_strings() {
        let value = parse_literal(r#"['it\'s', "tab\there", 'A']"#).unwrap();
        assert_eq!(value, json!(["it's", "tab\there", "A"]));
    }

    #[test]
    fn rejects_bare_identifiers() {
        assert!(parse_literal("{a: 1}").is_err());
        assert!(parse_literal("{a=1, b=2}").is_err());
    }

    #[test]
    fn nesting_is_bounded() {
        let err = parse_literal(&"[".repeat(10_000)).unwrap_err();
        assert!(err.contains("nesting too deep"), "{err}");

        let deep = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&deep).is_ok());
        let deeper = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert!(parse_literal(&deeper).is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_literal("[1, 2] extra").is_err());
        assert!(parse_literal("[1, 2").is_err());
    }
}
