//! Splicing the generated section into the target document.
//!
//! The tool owns the region between two sentinel marker lines. On the first
//! run a document may not have markers yet; the hand-written legacy section
//! (its heading up to the next heading of the same or a higher level) is
//! then replaced, and the markers written with it take over from the second
//! run on. A document with neither is left untouched.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::TargetConfig;
use crate::error::SpliceError;

/// Where the generated section goes, as a byte range of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// From the start marker through the end of the end marker.
    Markers { start: usize, end: usize },

    /// From the legacy heading up to the next heading of equal or higher
    /// level (or the end of the document).
    LegacySection { start: usize, end: usize },
}

impl InsertionPoint {
    /// Byte range to replace.
    pub fn range(&self) -> std::ops::Range<usize> {
        match *self {
            Self::Markers { start, end } | Self::LegacySection { start, end } => start..end,
        }
    }

    /// Whether this point was found through the legacy heading.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::LegacySection { .. })
    }
}

/// Result of a successful splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// The full updated document.
    pub content: String,

    /// Where the section was placed.
    pub point: InsertionPoint,

    /// Whether the document differs from its input.
    pub changed: bool,
}

/// Locates the managed region of a document and replaces it.
#[derive(Debug, Clone)]
pub struct Splicer {
    start_marker: String,
    end_marker: String,
    legacy_heading: String,
    path: PathBuf,
}

impl Splicer {
    /// Create a splicer from the target configuration.
    pub fn new(target: &TargetConfig) -> Self {
        Self {
            start_marker: target.start_marker.clone(),
            end_marker: target.end_marker.clone(),
            legacy_heading: target.legacy_heading.clone(),
            path: target.file.clone(),
        }
    }

    /// Set the document path used in error messages.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// The start marker line.
    pub fn start_marker(&self) -> &str {
        &self.start_marker
    }

    /// The end marker line.
    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Find where the generated section belongs.
    pub fn locate(&self, document: &str) -> Result<InsertionPoint, SpliceError> {
        let start = document.find(&self.start_marker);
        let end = start
            .map(|s| s + self.start_marker.len())
            .and_then(|after| {
                document[after..]
                    .find(&self.end_marker)
                    .map(|offset| after + offset + self.end_marker.len())
            });

        match (start, end) {
            (Some(start), Some(end)) => {
                debug!(start, end, "found sentinel markers");
                return Ok(InsertionPoint::Markers { start, end });
            }
            (Some(_), None) => return Err(self.unbalanced(&self.start_marker, &self.end_marker)),
            (None, _) if document.contains(&self.end_marker) => {
                return Err(self.unbalanced(&self.end_marker, &self.start_marker));
            }
            (None, _) => {}
        }

        if let Some((start, end)) = find_legacy_section(document, &self.legacy_heading) {
            debug!(start, end, heading = %self.legacy_heading, "found legacy section");
            return Ok(InsertionPoint::LegacySection { start, end });
        }

        Err(SpliceError::NoInsertionPoint {
            path: self.path.clone(),
            start_marker: self.start_marker.clone(),
            end_marker: self.end_marker.clone(),
            legacy_heading: self.legacy_heading.clone(),
        })
    }

    /// Replace the managed region of `document` with `section`.
    ///
    /// `section` must begin with the start marker and end with the end
    /// marker, so that a second splice finds the same region again.
    pub fn splice(&self, document: &str, section: &str) -> Result<SpliceOutcome, SpliceError> {
        let point = self.locate(document)?;
        let range = point.range();

        let mut content = String::with_capacity(document.len() + section.len());
        content.push_str(&document[..range.start]);
        content.push_str(section);
        if point.is_legacy() {
            // the legacy span swallowed the blank lines before the next heading
            content.push_str(if range.end < document.len() { "\n\n" } else { "\n" });
        }
        content.push_str(&document[range.end..]);

        let changed = content != document;
        Ok(SpliceOutcome {
            content,
            point,
            changed,
        })
    }

    fn unbalanced(&self, found: &str, missing: &str) -> SpliceError {
        SpliceError::UnbalancedMarkers {
            path: self.path.clone(),
            found: found.to_string(),
            missing: missing.to_string(),
        }
    }

    /// Path used in error messages.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Byte range of the section under `heading`, heading line included.
///
/// The section ends at the next heading whose level is at most the legacy
/// heading's level. Lines inside fenced code blocks are never headings.
fn find_legacy_section(document: &str, heading: &str) -> Option<(usize, usize)> {
    let heading = heading.trim();
    let level = heading_level(heading)?;

    let mut offset = 0;
    let mut start = None;
    let mut in_fence = false;

    for line in document.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        } else if !in_fence {
            match start {
                None if trimmed.starts_with(heading) => start = Some(offset),
                Some(start) => {
                    if heading_level(trimmed).is_some_and(|l| l <= level) {
                        return Some((start, offset));
                    }
                }
                None => {}
            }
        }
        offset += line.len();
    }

    start.map(|start| (start, document.len()))
}

/// `## Title` has level 2; text that is not an ATX heading has none.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|&c| c == '#').count();
    let rest = &line[level..];
    (level > 0 && level <= 6 && (rest.is_empty() || rest.starts_with(' '))).then_some(level)
}
