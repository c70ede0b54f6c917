//! Schema rendering.
//!
//! Example values render as JSON with one extension: a key whose property
//! was declared optional is written `"key"?:`. Downstream consumers rely on
//! that suffix as the only optionality signal.

use serde_json::Value;

use crate::ir::{ExampleValue, TemplateDescriptor};

/// Render an example value on a single line.
pub fn render(value: &ExampleValue) -> String {
    match value {
        ExampleValue::Scalar(scalar) => scalar.to_string(),
        ExampleValue::Array(items) => {
            let items: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", items.join(", "))
        }
        ExampleValue::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|field| {
                    format!(
                        "{}{}: {}",
                        Value::String(field.name.clone()),
                        if field.optional { "?" } else { "" },
                        render(&field.value)
                    )
                })
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

/// Options for [`render_template_block`].
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Info string of the fenced code block.
    pub fence_lang: String,

    /// Whether to emit the description line.
    pub include_descriptions: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            fence_lang: "json".to_string(),
            include_descriptions: true,
        }
    }
}

/// Render one template as a markdown section.
///
/// ~~~text
/// ### Name
/// Optional description.
///
/// ```json
/// {"title": "string"}
/// ```
/// ~~~
pub fn render_template_block(template: &TemplateDescriptor, options: &MarkdownOptions) -> String {
    let mut out = format!("### {}\n", template.name);

    if options.include_descriptions {
        if let Some(description) = &template.description {
            out.push_str(description);
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str("```");
    out.push_str(&options.fence_lang);
    out.push('\n');
    out.push_str(&render(&template.example));
    out.push_str("\n```\n");
    out
}
