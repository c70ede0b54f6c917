//! Per-file extraction: source text in, [`TemplateDescriptor`] out.

use regex::Regex;
use tracing::debug;

use crate::error::ExtractError;
use crate::ir::{ExampleField, ExampleValue, TemplateDescriptor};
use crate::literal::evaluate_literal;
use crate::parser::defaults::extract_defaults;
use crate::parser::interface::parse_all_interfaces;
use crate::resolver::{TypeResolver, DEFAULT_MAX_DEPTH};

/// Runs the scanners, the resolver and the literal evaluator over one
/// component file.
#[derive(Debug, Clone)]
pub struct TemplateExtractor {
    props_suffix: String,
    max_depth: usize,
}

impl Default for TemplateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateExtractor {
    /// Create an extractor looking for `<Component>Props` with the default
    /// depth cap.
    pub fn new() -> Self {
        Self {
            props_suffix: "Props".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the suffix appended to the component name to find its interface.
    pub fn with_props_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.props_suffix = suffix.into();
        self
    }

    /// Set the recursion cap for interface references.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Name of the props interface for `component`.
    pub fn props_interface(&self, component: &str) -> String {
        format!("{}{}", component, self.props_suffix)
    }

    /// Extract the template descriptor for `component` from `content`.
    ///
    /// A default value found in the destructuring block always wins over the
    /// example inferred from the declared type.
    pub fn extract(
        &self,
        component: &str,
        content: &str,
    ) -> Result<TemplateDescriptor, ExtractError> {
        let interface = self.props_interface(component);
        let table = parse_all_interfaces(content);

        let properties = table
            .get(&interface)
            .ok_or_else(|| ExtractError::props_not_found(&interface))?;
        if properties.is_empty() {
            return Err(ExtractError::no_properties(&interface));
        }

        let defaults = extract_defaults(content, component);
        let resolver = TypeResolver::new(&table).with_max_depth(self.max_depth);

        let fields = properties
            .iter()
            .map(|property| {
                let value = match defaults.get(&property.name) {
                    Some(raw) => {
                        let literal = evaluate_literal(raw);
                        if !literal.is_evaluated() {
                            debug!(property = %property.name, raw = %raw, "default kept as text");
                        }
                        ExampleValue::from(literal.into_value())
                    }
                    None => resolver.resolve(&property.type_text, 0),
                };
                ExampleField::new(&property.name, property.optional, value)
            })
            .collect();

        Ok(TemplateDescriptor {
            name: component.to_string(),
            description: find_description(content, component, &interface),
            properties: properties.to_vec(),
            example: ExampleValue::Object(fields),
        })
    }
}

/// First line of the JSDoc block right above the props interface, or else
/// above the component definition.
fn find_description(content: &str, component: &str, interface: &str) -> Option<String> {
    let anchors = [
        format!(r"(?:\bexport\s+)?\binterface\s+{}\s*\{{", regex::escape(interface)),
        format!(
            r"(?:\bexport\s+(?:default\s+)?)?\b(?:function|const)\s+{}\b",
            regex::escape(component)
        ),
    ];

    anchors.iter().find_map(|pattern| {
        let found = Regex::new(pattern).ok()?.find(content)?;
        doc_comment_before(&content[..found.start()])
    })
}

/// First meaningful line of a `/** ... */` block ending `preceding`.
fn doc_comment_before(preceding: &str) -> Option<String> {
    let preceding = preceding.trim_end();
    let body_end = preceding.strip_suffix("*/")?;
    let start = body_end.rfind("/**")?;

    body_end[start + 3..]
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .find(|line| !line.is_empty() && !line.starts_with('@'))
        .map(str::to_string)
}
