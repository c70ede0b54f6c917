//! # propdoc
//!
//! Recovers the property contract of UI template components from their
//! TypeScript source and turns it into illustrative example payloads.
//!
//! No compiler is involved. The crate works over a deliberately restricted
//! grammar: `interface <Name> { ... }` declarations whose members look like
//! `name?: type`, and a component definition whose first parameter is a
//! destructuring block carrying default values.
//!
//! ## Pipeline
//!
//! ```text
//! source text
//!   -> parser::braces       (delimiter matching)
//!   -> parser::interface    (bodies, property signatures, interface table)
//!   -> parser::defaults     (destructured default expressions)
//!   -> literal              (tolerant almost-JSON evaluation)
//!   -> resolver             (type text -> example value, depth capped)
//!   -> render               (`"key"?: value` notation, markdown blocks)
//! ```
//!
//! [`extract::TemplateExtractor`] runs the whole pipeline for one file.
//!
//! ## Example
//!
//! ```rust
//! use propdoc::{render::render, TemplateExtractor};
//!
//! let source = r#"
//! interface CardProps { title: string; badge?: string; items: string[] }
//! "#;
//!
//! let template = TemplateExtractor::new().extract("Card", source).unwrap();
//! assert_eq!(
//!     render(&template.example),
//!     r#"{"title": "string", "badge"?: "string", "items": ["string"]}"#
//! );
//! ```

pub mod error;
pub mod extract;
pub mod ir;
pub mod literal;
pub mod parser;
pub mod render;
pub mod resolver;

pub use error::ExtractError;
pub use extract::TemplateExtractor;
pub use ir::{
    DefaultValueMap, ExampleField, ExampleValue, InterfaceTable, PropertySignature,
    TemplateDescriptor,
};
pub use literal::{evaluate_literal, Literal};
pub use resolver::{TypeResolver, DEFAULT_MAX_DEPTH};
