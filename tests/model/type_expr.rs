//! Integration tests for TypeExpr parsing

use semrel_model::{Primitive, TypeExpr, normalize_type_text};

#[test]
fn unions_are_flattened_and_deduplicated() {
    let nested = TypeExpr::parse("string | (number | string)").unwrap();
    let flat = TypeExpr::parse("number | string").unwrap();
    assert_eq!(nested, flat);
}

#[test]
fn single_member_union_collapses() {
    assert_eq!(
        TypeExpr::parse("string | string").unwrap(),
        TypeExpr::Primitive(Primitive::String)
    );
}

#[test]
fn display_roundtrips_through_parse() {
    for text in ["Promise<Array<string>>", "'a' | 'b' | null", "A & B", "number[][]"] {
        let parsed = TypeExpr::parse(text).unwrap();
        assert_eq!(TypeExpr::parse(&parsed.to_string()).unwrap(), parsed, "{text}");
    }
}

#[test]
fn whitespace_normalization() {
    assert_eq!(normalize_type_text("  Map< string,\n number >  "), "Map< string, number >");
}
