//! Section generator for the target document.
//!
//! Runs the extractor over every scanned component and assembles the
//! marker-delimited section. Files whose props interface is missing or empty
//! are skipped and reported; they never fail the batch.

use crate::config::Config;
use crate::scanner::SourceFile;
use propdoc::render::render_template_block;
use propdoc::ExtractError;
use std::path::PathBuf;
use tracing::debug;

/// Generated section plus a report of what went into it.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Complete section, start marker through end marker.
    pub section: String,

    /// Templates rendered into the section, in output order.
    pub templates: Vec<GeneratedTemplate>,

    /// Files that produced no template.
    pub skipped: Vec<SkippedFile>,
}

/// A single rendered template.
#[derive(Debug, Clone)]
pub struct GeneratedTemplate {
    /// Component name.
    pub name: String,

    /// Source file.
    pub path: PathBuf,

    /// Number of top-level properties.
    pub property_count: usize,
}

/// A component file that was left out of the section.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Source file.
    pub path: PathBuf,

    /// Why it was skipped.
    pub reason: ExtractError,
}

/// Builds the generated section from scanned source files.
pub struct DocumentGenerator {
    config: Config,
}

impl DocumentGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Extract and render every file, in the order given.
    pub fn generate(&self, files: &[SourceFile]) -> GeneratedOutput {
        let extractor = self.config.extractor();
        let options = self.config.markdown_options();

        let mut blocks = Vec::new();
        let mut templates = Vec::new();
        let mut skipped = Vec::new();

        for file in files {
            match extractor.extract(&file.component, &file.content) {
                Ok(template) => {
                    debug!(
                        component = %template.name,
                        properties = template.properties.len(),
                        "extracted template"
                    );
                    blocks.push(render_template_block(&template, &options));
                    templates.push(GeneratedTemplate {
                        name: template.name,
                        path: file.path.clone(),
                        property_count: template.properties.len(),
                    });
                }
                Err(reason) => {
                    debug!(path = %file.path.display(), %reason, "skipping component");
                    skipped.push(SkippedFile {
                        path: file.path.clone(),
                        reason,
                    });
                }
            }
        }

        GeneratedOutput {
            section: self.assemble(&blocks),
            templates,
            skipped,
        }
    }

    /// Wrap rendered blocks in the markers and the count heading.
    fn assemble(&self, blocks: &[String]) -> String {
        let target = &self.config.target;

        let mut section = format!(
            "{}\n\n## {} ({})\n",
            target.start_marker,
            self.config.output.heading,
            blocks.len()
        );
        for block in blocks {
            section.push('\n');
            section.push_str(block);
        }
        section.push('\n');
        section.push_str(&target.end_marker);
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(component: &str, content: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(format!("{}.tsx", component)),
            relative_path: PathBuf::from(format!("{}.tsx", component)),
            component: component.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_generate_section() {
        let files = vec![
            source(
                "Card",
                "interface CardProps {\n  title: string;\n  badge?: string;\n  items: string[];\n}\n",
            ),
            source("Spacer", "interface SpacerProps {\n  size: number;\n}\n"),
        ];

        let output = DocumentGenerator::new(Config::default()).generate(&files);

        insta::assert_snapshot!(output.section, @r#"
        <!-- TEMPLATE_SCHEMAS:START -->

        ## Available Templates (2)

        ### Card

        ```json
        {"title": "string", "badge"?: "string", "items": ["string"]}
        ```

        ### Spacer

        ```json
        {"size": 0}
        ```

        <!-- TEMPLATE_SCHEMAS:END -->
        "#);
        assert_eq!(output.templates.len(), 2);
        assert_eq!(output.templates[0].property_count, 3);
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_skipped_files_are_reported() {
        let files = vec![
            source("Card", "interface CardProps {\n  title: string;\n}\n"),
            source("Broken", "export const Broken = () => null;\n"),
            source("Empty", "interface EmptyProps {}\n"),
        ];

        let output = DocumentGenerator::new(Config::default()).generate(&files);

        assert_eq!(output.templates.len(), 1);
        assert!(output.section.contains("## Available Templates (1)"));
        assert_eq!(output.skipped.len(), 2);
        assert_eq!(
            output.skipped[0].reason,
            ExtractError::props_not_found("BrokenProps")
        );
        assert_eq!(
            output.skipped[1].reason,
            ExtractError::no_properties("EmptyProps")
        );
    }

    #[derive(Clone, Default)]
    struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_skipped_files_are_quiet_at_default_level() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let files = vec![source("Broken", "export const Broken = () => null;\n")];
        let output = tracing::subscriber::with_default(subscriber, || {
            DocumentGenerator::new(Config::default()).generate(&files)
        });

        assert_eq!(output.skipped.len(), 1);
        assert!(buf.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_section() {
        let output = DocumentGenerator::new(Config::default()).generate(&[]);
        assert_eq!(
            output.section,
            "<!-- TEMPLATE_SCHEMAS:START -->\n\n## Available Templates (0)\n\n<!-- TEMPLATE_SCHEMAS:END -->"
        );
    }

    #[test]
    fn test_custom_heading_and_fence() {
        let mut config = Config::default();
        config.output.heading = "Templates".to_string();
        config.output.fence_lang = "jsonc".to_string();

        let files = vec![source("Card", "interface CardProps {\n  title: string;\n}\n")];
        let output = DocumentGenerator::new(config).generate(&files);

        assert!(output.section.contains("## Templates (1)\n"));
        assert!(output.section.contains("```jsonc\n"));
    }
}
