//! Tolerant evaluation of default-value expressions.
//!
//! Default expressions are JavaScript, not JSON: keys are bare, strings use
//! single quotes, arrays end with a trailing comma. The evaluator rewrites
//! the common cases into JSON and gives up quietly on everything else.

use serde_json::{Number, Value};
use tracing::trace;

/// Outcome of evaluating a default expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The text was understood as a JSON-compatible value.
    Evaluated(Value),

    /// The text could not be understood and is kept verbatim.
    Unparsed(String),
}

impl Literal {
    /// Whether evaluation succeeded.
    pub fn is_evaluated(&self) -> bool {
        matches!(self, Literal::Evaluated(_))
    }

    /// The value to document. Unparsed text is documented as a string.
    pub fn into_value(self) -> Value {
        match self {
            Literal::Evaluated(value) => value,
            Literal::Unparsed(raw) => Value::String(raw),
        }
    }
}

/// Evaluate a raw default expression.
///
/// Never fails: anything that cannot be evaluated comes back as
/// [`Literal::Unparsed`] holding the (trimmed, trailing-comma-free) text.
pub fn evaluate_literal(raw: &str) -> Literal {
    let text = raw.trim();
    let text = text.strip_suffix(',').unwrap_or(text).trim_end();

    if let Some(inner) = unquote(text) {
        return Literal::Evaluated(Value::String(inner.to_string()));
    }

    if text.starts_with('[') || text.starts_with('{') {
        let normalized = normalize(text);
        return match serde_json::from_str::<Value>(&normalized) {
            Ok(value) => Literal::Evaluated(whole_numbers_as_integers(value)),
            Err(e) => {
                trace!(text, error = %e, "structured literal did not parse");
                Literal::Unparsed(text.to_string())
            }
        };
    }

    match text {
        "true" => return Literal::Evaluated(Value::Bool(true)),
        "false" => return Literal::Evaluated(Value::Bool(false)),
        _ => {}
    }

    parse_number(text)
        .map(Literal::Evaluated)
        .unwrap_or_else(|| Literal::Unparsed(text.to_string()))
}

/// Contents of a `'...'`, `"..."` or interpolation-free `` `...` `` literal.
fn unquote(text: &str) -> Option<&str> {
    let quote = text.chars().next()?;
    if !matches!(quote, '\'' | '"' | '`') || text.len() < 2 || !text.ends_with(quote) {
        return None;
    }

    let inner = &text[1..text.len() - 1];
    if inner.contains(quote) || (quote == '`' && inner.contains("${")) {
        return None;
    }
    Some(inner)
}

fn parse_number(text: &str) -> Option<Value> {
    let numeric = !text.is_empty()
        && text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
    if !numeric {
        return None;
    }

    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::Number(int.into()));
    }
    let float = text.parse::<f64>().ok()?;
    Number::from_f64(float).map(|n| whole_numbers_as_integers(Value::Number(n)))
}

/// Largest float whose integer value is still exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// `1.0` and `1e3` print as `1` and `1000`, the way JavaScript prints them.
fn whole_numbers_as_integers(value: Value) -> Value {
    match value {
        Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                Value::Number((f as i64).into())
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => {
            Value::Array(items.into_iter().map(whole_numbers_as_integers).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, whole_numbers_as_integers(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Rewrite JavaScript object/array literal syntax into JSON.
///
/// - bare keys are quoted: `{ a: 1 }` -> `{ "a": 1 }`
/// - single-quoted strings become double-quoted
/// - a trailing comma before `]` or `}` is dropped
///
/// The output is not guaranteed to be valid JSON.
fn normalize(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\'' | '"' => {
                i = copy_string(&chars, i, &mut out);
                continue;
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    out.push(',');
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                let next = chars[i..].iter().find(|c| !c.is_whitespace());
                if next == Some(&':') {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
                continue;
            }
            c => out.push(c),
        }
        i += 1;
    }

    out
}

/// Copy a quoted string starting at `start` as a JSON string; returns the
/// index after its closing quote (or the end of input when unterminated).
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    out.push('"');

    while i < chars.len() {
        let ch = chars[i];
        if ch == '\\' && i + 1 < chars.len() {
            let escaped = chars[i + 1];
            if escaped == '\'' {
                out.push('\'');
            } else {
                out.push('\\');
                out.push(escaped);
            }
            i += 2;
            continue;
        }
        if ch == quote {
            out.push('"');
            return i + 1;
        }
        if ch == '"' {
            out.push_str("\\\"");
        } else {
            out.push(ch);
        }
        i += 1;
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn evaluated(raw: &str) -> Value {
        match evaluate_literal(raw) {
            Literal::Evaluated(value) => value,
            Literal::Unparsed(text) => panic!("expected {raw:?} to evaluate, got {text:?}"),
        }
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(evaluated("'active'"), json!("active"));
        assert_eq!(evaluated("\"Welcome, friend\","), json!("Welcome, friend"));
        assert_eq!(evaluated("`plain`"), json!("plain"));
        assert_eq!(evaluated("''"), json!(""));
    }

    #[test]
    fn test_template_with_interpolation_is_unparsed() {
        assert_eq!(
            evaluate_literal("`Hello ${name}`"),
            Literal::Unparsed("`Hello ${name}`".to_string())
        );
    }

    #[test]
    fn test_booleans_and_numbers() {
        assert_eq!(evaluated("true"), json!(true));
        assert_eq!(evaluated("false,"), json!(false));
        assert_eq!(evaluated("42"), json!(42));
        assert_eq!(evaluated("-3"), json!(-3));
        assert_eq!(evaluated("0.5"), json!(0.5));
    }

    #[test]
    fn test_whole_floats_print_as_integers() {
        assert_eq!(evaluated("1.0").to_string(), "1");
        assert_eq!(evaluated("-2.0").to_string(), "-2");
        assert_eq!(evaluated("1e3").to_string(), "1000");
        assert_eq!(evaluated("1.25").to_string(), "1.25");
        assert_eq!(
            evaluated("{ ratio: 2.0, steps: [0.5, 3.0] }").to_string(),
            r#"{"ratio":2,"steps":[0.5,3]}"#
        );
    }

    #[test]
    fn test_not_numbers() {
        assert!(!evaluate_literal("NaN").is_evaluated());
        assert!(!evaluate_literal("inf").is_evaluated());
        assert!(!evaluate_literal("1_000").is_evaluated());
        assert!(!evaluate_literal("-").is_evaluated());
    }

    #[test]
    fn test_structured_literals() {
        assert_eq!(evaluated("[ 'new', 'hot', ]"), json!(["new", "hot"]));
        assert_eq!(
            evaluated("{ a: 1, b: [1, 2], label: 'x' }"),
            json!({ "a": 1, "b": [1, 2], "label": "x" })
        );
        assert_eq!(
            evaluated("[{ label: 'One', value: 1 }, { label: 'Two', value: 2, },]"),
            json!([{ "label": "One", "value": 1 }, { "label": "Two", "value": 2 }])
        );
        assert_eq!(evaluated("[]"), json!([]));
        assert_eq!(evaluated("{}"), json!({}));
    }

    #[test]
    fn test_quotes_inside_strings() {
        assert_eq!(evaluated(r#"['say "hi"']"#), json!([r#"say "hi""#]));
        assert_eq!(evaluated(r"['it\'s']"), json!(["it's"]));
        assert_eq!(evaluated(r#"{ "key": "a: b" }"#), json!({ "key": "a: b" }));
    }

    #[test]
    fn test_malformed_structured_literal_returns_raw_text() {
        let raw = "[ 'unbalanced, 1 ]";
        assert_eq!(evaluate_literal(raw), Literal::Unparsed(raw.to_string()));

        let raw = "{ a: someVariable }";
        assert_eq!(evaluate_literal(raw), Literal::Unparsed(raw.to_string()));
    }

    #[test]
    fn test_expressions_are_unparsed() {
        assert_eq!(
            evaluate_literal("() => {}"),
            Literal::Unparsed("() => {}".to_string())
        );
        assert_eq!(
            evaluate_literal("DEFAULT_ITEMS,"),
            Literal::Unparsed("DEFAULT_ITEMS".to_string())
        );
        assert_eq!(evaluate_literal("null").into_value(), json!("null"));
    }
}
