//! Type text to example value.
//!
//! The resolver turns the type annotation of a property into a stand-in
//! value. It recurses into interfaces declared in the same file and stops at
//! a fixed depth so that self- and mutually-referential interfaces terminate.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::trace;

use crate::ir::{ExampleField, ExampleValue, InterfaceTable, PropertySignature};
use crate::parser::interface::parse_property;

/// Default recursion cap for interface references.
pub const DEFAULT_MAX_DEPTH: usize = 2;

fn named_array() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_$][\w$]*)\[\]$").expect("valid array regex"))
}

/// Resolves type text against one file's [`InterfaceTable`].
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    table: &'a InterfaceTable,
    max_depth: usize,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver with the default depth cap.
    pub fn new(table: &'a InterfaceTable) -> Self {
        Self {
            table,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the recursion cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The recursion cap in effect.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Produce an example value for `type_text` at recursion `depth`.
    ///
    /// Rules are tried in order, first match wins:
    ///
    /// 1. past the depth cap: `"string"`
    /// 2. `Known[]`: one resolved `Known` object
    /// 3. `string[]` / `number[]`: `["string"]` / `[0]`
    /// 4. inline object array `{ ... }[]`: one object built from its fields
    /// 5. any other array: `[]`
    /// 6. `Known`: the resolved object
    /// 7. scalar by substring: `string`, `number`, `boolean`, else `{}`
    pub fn resolve(&self, type_text: &str, depth: usize) -> ExampleValue {
        if depth > self.max_depth {
            trace!(type_text, depth, "depth cap reached");
            return ExampleValue::placeholder();
        }

        let type_text = type_text.trim();

        if let Some(caps) = named_array().captures(type_text) {
            let element = &caps[1];
            if let Some(properties) = self.table.get(element) {
                return ExampleValue::Array(vec![self.resolve_object(properties, depth + 1)]);
            }
            match element {
                "string" => return ExampleValue::Array(vec![ExampleValue::placeholder()]),
                "number" => return ExampleValue::Array(vec![ExampleValue::Scalar(0.into())]),
                _ => {}
            }
        }

        if type_text.contains('{') && type_text.contains('}') && type_text.contains("[]") {
            return self.resolve_inline_array(type_text, depth);
        }

        if type_text.contains("[]") {
            return ExampleValue::empty_array();
        }

        if let Some(properties) = self.table.get(type_text) {
            return self.resolve_object(properties, depth + 1);
        }

        infer_scalar(type_text)
    }

    /// Build an object example from properties, each resolved at `depth`.
    pub fn resolve_object(&self, properties: &[PropertySignature], depth: usize) -> ExampleValue {
        ExampleValue::Object(
            properties
                .iter()
                .map(|p| ExampleField::new(&p.name, p.optional, self.resolve(&p.type_text, depth)))
                .collect(),
        )
    }

    /// `{ label: string; value?: number }[]`
    fn resolve_inline_array(&self, type_text: &str, depth: usize) -> ExampleValue {
        let (Some(open), Some(close)) = (type_text.find('{'), type_text.rfind('}')) else {
            return ExampleValue::empty_array();
        };
        if close <= open {
            return ExampleValue::empty_array();
        }

        let fields: Vec<PropertySignature> = type_text[open + 1..close]
            .split(|c: char| c == ';' || c == '\n')
            .filter_map(parse_property)
            .collect();

        if fields.is_empty() {
            return ExampleValue::empty_array();
        }
        ExampleValue::Array(vec![self.resolve_object(&fields, depth + 1)])
    }
}

/// Case-insensitive substring inference for anything not structural.
fn infer_scalar(type_text: &str) -> ExampleValue {
    let lower = type_text.to_lowercase();
    if lower.contains("string") {
        ExampleValue::placeholder()
    } else if lower.contains("number") {
        ExampleValue::Scalar(0.into())
    } else if lower.contains("boolean") {
        ExampleValue::Scalar(Value::Bool(false))
    } else {
        ExampleValue::empty_object()
    }
}
