//! Integration tests for the change descriptor vocabulary

use semrel_foundation::{Action, Aspect, ChangeDescriptor, Impact, Target, tags};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn modified_requires_aspect() {
    assert!(ChangeDescriptor::try_new(Target::Property, Action::Modified, None).is_err());
    assert!(
        ChangeDescriptor::try_new(Target::Property, Action::Modified, Some(Aspect::Type)).is_ok()
    );
}

#[test]
fn aspect_only_for_modified() {
    assert!(
        ChangeDescriptor::try_new(Target::Export, Action::Removed, Some(Aspect::Type)).is_err()
    );
    let removed = ChangeDescriptor::try_new(Target::Export, Action::Removed, None).unwrap();
    assert_eq!(removed.aspect(), None);
}

#[test]
fn builders_accumulate_tags() {
    let descriptor = ChangeDescriptor::presence(Target::Parameter, Action::Added)
        .with_impact(Impact::Narrowing)
        .with_tag(tags::REQUIRED)
        .with_tags([tags::HAS_DEFAULT]);
    assert_eq!(descriptor.impact(), Some(Impact::Narrowing));
    assert!(descriptor.has_tag("required"));
    assert!(descriptor.has_tag("has-default"));
    assert_eq!(descriptor.tags().len(), 2);
}

#[test]
fn also_tags_name_the_aspect() {
    assert_eq!(tags::also(Aspect::Optionality), "also-optionality");
    assert_eq!(tags::also(Aspect::DefaultValue), "also-default-value");
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn vocabulary_parses_loosely() {
    assert_eq!("return type".parse::<Target>().unwrap(), Target::ReturnType);
    assert_eq!("enum-member".parse::<Target>().unwrap(), Target::EnumMember);
    assert_eq!("Narrowing".parse::<Impact>().unwrap(), Impact::Narrowing);
    assert!("sideways".parse::<Impact>().is_err());
}

// =============================================================================
// Impact algebra
// =============================================================================

#[test]
fn combine_impacts() {
    assert_eq!(Impact::combine([]), Impact::Equivalent);
    assert_eq!(
        Impact::combine([Impact::Widening, Impact::Equivalent, Impact::Widening]),
        Impact::Widening
    );
    assert_eq!(
        Impact::combine([Impact::Widening, Impact::Narrowing]),
        Impact::Unrelated
    );
    assert_eq!(
        Impact::combine([Impact::Narrowing, Impact::Undetermined]),
        Impact::Undetermined
    );
}

#[test]
fn inverse_swaps_direction() {
    assert_eq!(Impact::Widening.inverse(), Impact::Narrowing);
    assert_eq!(Impact::Unrelated.inverse(), Impact::Unrelated);
}
