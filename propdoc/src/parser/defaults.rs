//! Default values from a component's destructured props parameter.
//!
//! Given
//!
//! ```text
//! export default function Card({
//!   title,
//!   status = 'active',
//!   tags = [
//!     'new',
//!     'hot',
//!   ],
//! }: CardProps) { ... }
//! ```
//!
//! the map holds `status -> 'active'` and `tags -> [ 'new', 'hot', ]`.
//! `title` has no default and is absent.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use super::braces::scan_to_close;
use crate::ir::DefaultValueMap;

fn default_export_definition() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bexport\s+default\s+function\s*(?:[A-Za-z_$][\w$]*)?\s*\(\s*\{")
            .expect("valid default export regex")
    })
}

/// `function Name({`, `const Name = ({` and `const Name: FC<P> = ({`.
fn component_definition() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:\bfunction\s+[A-Za-z_$][\w$]*\s*|\bconst\s+[A-Za-z_$][\w$]*\s*(?::[^=\n]+)?=\s*(?:async\s*)?)\(\s*\{",
        )
        .expect("valid component regex")
    })
}

/// `name = expression` or `name: alias = expression`.
fn default_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z_$][\w$]*)\s*(?::\s*[A-Za-z_$][\w$]*\s*)?=(.*)$")
            .expect("valid default regex")
    })
}

/// Extract raw default expressions from the definition of `component`.
///
/// Parameters without a default are absent from the map.
pub fn extract_defaults(content: &str, component: &str) -> DefaultValueMap {
    let mut defaults = DefaultValueMap::new();

    let Some(block) = destructuring_block(content, component) else {
        debug!("no destructured props parameter found");
        return defaults;
    };

    for entry in split_entries(block) {
        if let Some(caps) = default_assignment().captures(&entry) {
            let expression = caps[2].trim();
            if !expression.is_empty() {
                defaults.insert(caps[1].to_string(), expression.to_string());
            }
        } else {
            trace!(entry = %entry, "parameter without default");
        }
    }

    defaults
}

/// Text between the braces of the component's destructuring parameter.
///
/// The definition named `component` wins, then a default-exported function,
/// then the first function or arrow taking a destructured object.
fn destructuring_block<'a>(content: &'a str, component: &str) -> Option<&'a str> {
    let start = match named_definition(content, component) {
        Some(end) => end,
        None => default_export_definition()
            .find(content)
            .or_else(|| component_definition().find(content))?
            .end(),
    };
    let end = scan_to_close(content, start, '{', '}')?;
    Some(&content[start..end - 1])
}

/// End of `function <component>({` or `const <component> = ({`, if present.
fn named_definition(content: &str, component: &str) -> Option<usize> {
    let name = regex::escape(component);
    let pattern = format!(
        r"(?:\bfunction\s+{name}\s*|\bconst\s+{name}\s*(?::[^=\n]+)?=\s*(?:async\s*)?)\(\s*\{{"
    );
    Regex::new(&pattern).ok()?.find(content).map(|m| m.end())
}

/// Split a destructuring block into one entry per parameter.
///
/// An entry ends at a `,` outside any nested `{}`, `[]` or `()` and outside
/// string literals. A default spanning several lines is joined back into one
/// line, its pieces separated by a single space. Line comments are skipped.
fn split_entries(block: &str) -> Vec<String> {
    let mut scanner = EntryScanner::default();
    let mut chars = block.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(quote) = scanner.quote {
            scanner.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    scanner.push(escaped);
                }
            } else if ch == quote {
                scanner.quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' | '`' => {
                scanner.quote = Some(ch);
                scanner.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        scanner.line_break();
                        break;
                    }
                }
            }
            '{' | '[' | '(' => {
                scanner.depth += 1;
                scanner.push(ch);
            }
            '}' | ']' | ')' => {
                scanner.depth = scanner.depth.saturating_sub(1);
                scanner.push(ch);
            }
            ',' if scanner.depth == 0 => scanner.flush(),
            '\n' => scanner.line_break(),
            _ => scanner.push(ch),
        }
    }
    scanner.flush();

    scanner.entries
}

#[derive(Default)]
struct EntryScanner {
    entries: Vec<String>,
    current: String,
    depth: usize,
    quote: Option<char>,
    pending_space: bool,
}

impl EntryScanner {
    fn push(&mut self, ch: char) {
        if ch.is_whitespace() && (self.pending_space || self.current.is_empty()) {
            return;
        }
        if self.pending_space {
            self.pending_space = false;
            if !self.current.is_empty() {
                self.current.push(' ');
            }
        }
        self.current.push(ch);
    }

    /// Continuation lines are joined with one space and lose their indent.
    fn line_break(&mut self) {
        let trimmed = self.current.trim_end().len();
        self.current.truncate(trimmed);
        self.pending_space = true;
    }

    fn flush(&mut self) {
        let entry = self.current.trim();
        if !entry.is_empty() && !entry.starts_with("...") {
            self.entries.push(entry.to_string());
        }
        self.current.clear();
        self.pending_space = false;
    }
}
