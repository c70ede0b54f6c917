//! Error types for template extraction.
//!
//! Only per-file failures surface as errors. Anything smaller (a property
//! line that does not parse, a default that does not evaluate) is dropped
//! or degraded in place and never reaches the caller.

use thiserror::Error;

/// Reason a component file produced no template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The file has no `<Component>Props` interface.
    #[error("interface `{interface}` not found")]
    PropsNotFound { interface: String },

    /// The interface exists but none of its members could be parsed.
    #[error("interface `{interface}` has no parseable properties")]
    NoProperties { interface: String },
}

impl ExtractError {
    /// Create a props-not-found error.
    pub fn props_not_found(interface: impl Into<String>) -> Self {
        Self::PropsNotFound {
            interface: interface.into(),
        }
    }

    /// Create a no-properties error.
    pub fn no_properties(interface: impl Into<String>) -> Self {
        Self::NoProperties {
            interface: interface.into(),
        }
    }

    /// Name of the interface the error refers to.
    pub fn interface(&self) -> &str {
        match self {
            Self::PropsNotFound { interface } | Self::NoProperties { interface } => interface,
        }
    }
}
