//! Intermediate representation shared by the scanners, the resolver and the
//! renderer.

use serde_json::Value;
use std::collections::HashMap;

/// One declared interface member: `name?: type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    /// Member name.
    pub name: String,

    /// Whether the member was declared with `?`.
    pub optional: bool,

    /// Everything after the first `:`, trimmed, minus one trailing `;`.
    pub type_text: String,
}

impl PropertySignature {
    /// Create a new property signature.
    pub fn new(name: impl Into<String>, optional: bool, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional,
            type_text: type_text.into(),
        }
    }
}

/// Interfaces declared in a single file, keyed by name.
///
/// Built once per file and never mutated afterwards. Names declared in other
/// files are simply absent.
#[derive(Debug, Clone, Default)]
pub struct InterfaceTable {
    interfaces: HashMap<String, Vec<PropertySignature>>,
}

impl InterfaceTable {
    /// Look up an interface's members in declaration order.
    pub fn get(&self, name: &str) -> Option<&[PropertySignature]> {
        self.interfaces.get(name).map(Vec::as_slice)
    }

    /// Whether `name` is a known interface.
    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name)
    }

    /// Number of interfaces.
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Interface names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<PropertySignature>)> for InterfaceTable {
    /// The first declaration of a name wins.
    fn from_iter<I: IntoIterator<Item = (String, Vec<PropertySignature>)>>(iter: I) -> Self {
        let mut interfaces = HashMap::new();
        for (name, properties) in iter {
            interfaces.entry(name).or_insert(properties);
        }
        Self { interfaces }
    }
}

/// Raw default-expression text per destructured parameter name.
pub type DefaultValueMap = HashMap<String, String>;

/// A synthesized, JSON-compatible stand-in value.
#[derive(Debug, Clone, PartialEq)]
pub enum ExampleValue {
    /// String, number, boolean or null.
    Scalar(Value),

    /// Ordered sequence. Elements carry no annotations.
    Array(Vec<ExampleValue>),

    /// Keyed structure with per-key optionality, in declaration order.
    Object(Vec<ExampleField>),
}

/// A key of an [`ExampleValue::Object`] together with its annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleField {
    pub name: String,
    pub optional: bool,
    pub value: ExampleValue,
}

impl ExampleField {
    /// Create a new field.
    pub fn new(name: impl Into<String>, optional: bool, value: ExampleValue) -> Self {
        Self {
            name: name.into(),
            optional,
            value,
        }
    }
}

impl ExampleValue {
    /// The `"string"` placeholder used for strings and past the depth cap.
    pub fn placeholder() -> Self {
        Self::Scalar(Value::String("string".to_string()))
    }

    /// Empty object, the catch-all for types nothing else recognizes.
    pub fn empty_object() -> Self {
        Self::Object(Vec::new())
    }

    /// Empty sequence.
    pub fn empty_array() -> Self {
        Self::Array(Vec::new())
    }

    /// Look up a field of an object value.
    pub fn field(&self, name: &str) -> Option<&ExampleField> {
        match self {
            Self::Object(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Drop annotations and convert to a plain JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|f| (f.name.clone(), f.value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for ExampleValue {
    /// Evaluated literals become examples with every key required.
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(name, value)| ExampleField::new(name, false, Self::from(value)))
                    .collect(),
            ),
            scalar => Self::Scalar(scalar),
        }
    }
}

/// Everything known about one template component.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDescriptor {
    /// Component name, taken from the file stem.
    pub name: String,

    /// First line of the JSDoc block above the props interface or component.
    pub description: Option<String>,

    /// Members of the props interface.
    pub properties: Vec<PropertySignature>,

    /// Example payload, defaults applied.
    pub example: ExampleValue,
}
