//! Property-based tests for propdoc and propdoc-cli.
//!
//! Properties tested:
//! - Brace matching on balanced input
//! - Termination of self-referential interfaces at the depth cap
//! - Literal evaluation never fails and keeps unparsed text verbatim
//! - Flat interfaces round-trip through parsing and rendering
//! - Splicing the same section twice is byte-identical
//! - CLI overrides win over configuration values

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

use propdoc::parser::braces::find_matching_close;
use propdoc::parser::interface::parse_interface;
use propdoc::render::render;
use propdoc::{evaluate_literal, ExampleValue, InterfaceTable, Literal, TemplateExtractor, TypeResolver};
use propdoc_cli::config::{CliArgs, Config, ConfigManager, TargetConfig};
use propdoc_cli::splice::{InsertionPoint, Splicer};
use serde_json::Value;

// =============================================================================
// Generators for property tests
// =============================================================================

/// Balanced `{}` text with some filler between the braces.
fn arb_balanced() -> impl Strategy<Value = String> {
    let leaf = "[a-z :;,]{0,6}";
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(|parts| {
            parts
                .into_iter()
                .map(|p| format!("{{{}}}", p))
                .collect::<Vec<_>>()
                .join(" ")
        })
    })
}

/// A TypeScript identifier that is not a reserved word we care about.
fn arb_identifier() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}"
}

/// Primitive property type and the example it resolves to.
fn arb_primitive() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("string", "\"string\"")),
        Just(("number", "0")),
        Just(("boolean", "false")),
        Just(("string[]", "[\"string\"]")),
        Just(("number[]", "[0]")),
    ]
}

/// Plain document text that contains no headings, fences or markers.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z .]{0,30}", 0..4).prop_map(|lines| {
        lines
            .into_iter()
            .map(|l| format!("{}\n", l))
            .collect::<String>()
    })
}

fn section(body: &str) -> String {
    let target = TargetConfig::default();
    format!("{}\n{}\n{}", target.start_marker, body, target.end_marker)
}

/// Nesting depth of `child` objects in an example.
fn object_depth(value: &ExampleValue) -> usize {
    match value {
        ExampleValue::Object(_) => {
            1 + value
                .field("child")
                .map(|f| object_depth(&f.value))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

// =============================================================================
// Parsing and resolution
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_brace_matching_finds_outer_close(body in arb_balanced()) {
        let content = format!("{{{}}} tail", body);
        let close = find_matching_close(&content, 1, '{', '}');
        prop_assert_eq!(close, body.len() + 2);
    }

    #[test]
    fn prop_unbalanced_input_reaches_end(body in arb_balanced()) {
        let content = format!("{{{{{}}}", body);
        prop_assert_eq!(find_matching_close(&content, 1, '{', '}'), content.len());
    }

    #[test]
    fn prop_self_reference_stops_at_cap(max_depth in 0usize..8) {
        let table: InterfaceTable = propdoc::parser::interface::parse_all_interfaces(
            "interface Node {\n  name: string;\n  child: Node;\n}\n",
        );
        let example = TypeResolver::new(&table)
            .with_max_depth(max_depth)
            .resolve("Node", 0);

        prop_assert_eq!(object_depth(&example), max_depth + 1);
    }

    #[test]
    fn prop_literal_evaluation_never_fails(raw in "\\PC{0,40}") {
        // must not panic; unparsed text always renders as a string
        if let Literal::Unparsed(text) = evaluate_literal(&raw) {
            prop_assert_eq!(
                evaluate_literal(&raw).into_value(),
                Value::String(text)
            );
        }
    }

    #[test]
    fn prop_expressions_stay_verbatim(name in arb_identifier(), arg in "[a-z0-9]{0,6}") {
        let raw = format!("{}({})", name, arg);
        prop_assert_eq!(
            evaluate_literal(&format!("  {}, ", raw)),
            Literal::Unparsed(raw)
        );
    }

    #[test]
    fn prop_flat_interface_round_trip(
        props in prop::collection::btree_map(arb_identifier(), (any::<bool>(), arb_primitive()), 1..8)
    ) {
        let props: BTreeMap<String, (bool, (&str, &str))> = props;
        let members: String = props
            .iter()
            .map(|(name, (optional, (ty, _)))| {
                format!("  {}{}: {};\n", name, if *optional { "?" } else { "" }, ty)
            })
            .collect();
        let content = format!("export interface GenProps {{\n{}}}\n", members);

        let parsed = parse_interface(&content, "GenProps").unwrap();
        prop_assert_eq!(parsed.len(), props.len());
        for (signature, (name, (optional, (ty, _)))) in parsed.iter().zip(props.iter()) {
            prop_assert_eq!(&signature.name, name);
            prop_assert_eq!(signature.optional, *optional);
            prop_assert_eq!(signature.type_text.as_str(), *ty);
        }

        let expected = props
            .iter()
            .map(|(name, (optional, (_, example)))| {
                format!("\"{}\"{}: {}", name, if *optional { "?" } else { "" }, example)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let template = TemplateExtractor::new().extract("Gen", &content).unwrap();
        prop_assert_eq!(render(&template.example), format!("{{{}}}", expected));
    }
}

// =============================================================================
// Splicing and configuration
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_splice_is_idempotent(
        before in arb_text(),
        legacy in arb_text(),
        after in arb_text(),
        body in "[a-z \n]{0,60}",
        trailing_section in any::<bool>(),
    ) {
        let mut document = format!("# Prompt\n{}## Available Templates\n{}", before, legacy);
        if trailing_section {
            document.push_str(&format!("## Rules\n{}", after));
        }

        let splicer = Splicer::new(&TargetConfig::default()).with_path("PROMPT.md");
        let section = section(&body);

        let first = splicer.splice(&document, &section).unwrap();
        prop_assert!(first.point.is_legacy());
        let prefix = format!("# Prompt\n{}", before);
        prop_assert!(first.content.starts_with(&prefix));

        let second = splicer.splice(&first.content, &section).unwrap();
        let is_markers = matches!(second.point, InsertionPoint::Markers { .. });
        prop_assert!(is_markers);
        prop_assert!(!second.changed);
        prop_assert_eq!(&second.content, &first.content);
    }

    #[test]
    fn prop_cli_args_override_config(
        dir in "[a-z]{1,10}",
        max_depth in proptest::option::of(0usize..10),
    ) {
        let args = CliArgs {
            input: Some(PathBuf::from(&dir)),
            max_depth,
            ..Default::default()
        };
        let merged = ConfigManager::merge_cli_args(Config::default(), &args);

        prop_assert_eq!(merged.source.dir, PathBuf::from(&dir));
        prop_assert_eq!(
            merged.resolver.max_depth,
            max_depth.unwrap_or(propdoc::DEFAULT_MAX_DEPTH)
        );
        prop_assert_eq!(merged.target.file, Config::default().target.file);
    }
}
