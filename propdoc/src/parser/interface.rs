//! Interface declarations.
//!
//! Recognizes `interface <Name> { ... }` (optionally `export`ed) and splits
//! the body into member declarations. Only `name?: type` members are
//! understood; index signatures, method signatures, `extends` clauses and
//! generic parameters are outside the grammar and are skipped.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use super::braces::scan_to_close;
use crate::ir::{InterfaceTable, PropertySignature};

fn interface_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\binterface\s+([A-Za-z_$][\w$]*)\s*\{").expect("valid interface regex")
    })
}

fn property_signature() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^(?:readonly\s+)?([A-Za-z_$][\w$]*)\s*(\?)?\s*:(.*)$")
            .expect("valid property regex")
    })
}

/// Parse the members of the first `interface <name> {` declaration.
///
/// Returns `None` when no such declaration exists or its body never closes.
pub fn parse_interface(content: &str, name: &str) -> Option<Vec<PropertySignature>> {
    let pattern = format!(r"\binterface\s+{}\s*\{{", regex::escape(name));
    let decl = Regex::new(&pattern).ok()?.find(content)?;

    let body_start = decl.end();
    let Some(body_end) = scan_to_close(content, body_start, '{', '}') else {
        debug!(interface = name, "unterminated interface body");
        return None;
    };

    // body_end is just past the closing brace
    let body = &content[body_start..body_end - 1];
    Some(split_members(body).iter().filter_map(|m| parse_property(m)).collect())
}

/// Split an interface body into raw member declarations.
///
/// A member ends at `;` or a newline, but only outside nested `{}`, `[]` and
/// `()`, so object, tuple and function types stay in one piece. Blank chunks
/// and comment lines are dropped.
pub fn split_members(body: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in body.chars() {
        match ch {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }

        if depth == 0 && (ch == ';' || ch == '\n') {
            push_member(&mut members, &current);
            current.clear();
        } else {
            current.push(ch);
        }
    }
    push_member(&mut members, &current);

    members
}

fn push_member(members: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim();
    if chunk.is_empty() || is_comment(chunk) {
        return;
    }
    members.push(chunk.to_string());
}

fn is_comment(chunk: &str) -> bool {
    chunk.starts_with("//") || chunk.starts_with("/*") || chunk.starts_with('*')
}

/// Parse one member declaration into a [`PropertySignature`].
///
/// Anything that is not `identifier ?: type` yields `None`.
pub fn parse_property(chunk: &str) -> Option<PropertySignature> {
    let chunk = chunk.trim();
    let Some(caps) = property_signature().captures(chunk) else {
        trace!(chunk, "skipping unsupported member");
        return None;
    };

    let type_text = caps[3].trim();
    let type_text = type_text.strip_suffix(';').unwrap_or(type_text).trim();
    if type_text.is_empty() {
        return None;
    }

    Some(PropertySignature::new(
        &caps[1],
        caps.get(2).is_some(),
        type_text,
    ))
}

/// Build the table of every interface declared in `content`.
pub fn parse_all_interfaces(content: &str) -> InterfaceTable {
    interface_decl()
        .captures_iter(content)
        .filter_map(|caps| {
            let name = caps[1].to_string();
            match parse_interface(content, &name) {
                Some(properties) => Some((name, properties)),
                None => {
                    debug!(interface = %name, "skipping interface that failed to parse");
                    None
                }
            }
        })
        .collect()
}
