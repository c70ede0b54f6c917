//! Restricted-grammar scanners over TypeScript source text.
//!
//! This module contains parsers for:
//! - Delimiter matching
//! - Interface declarations and their property signatures
//! - Destructured parameter defaults

pub mod braces;
pub mod defaults;
pub mod interface;
