//! Integration tests for ReleaseType

use semrel_foundation::ReleaseType;

#[test]
fn total_order() {
    let mut types = vec![
        ReleaseType::Major,
        ReleaseType::None,
        ReleaseType::Forbidden,
        ReleaseType::Patch,
        ReleaseType::Minor,
    ];
    types.sort();
    assert_eq!(
        types,
        vec![
            ReleaseType::None,
            ReleaseType::Patch,
            ReleaseType::Minor,
            ReleaseType::Major,
            ReleaseType::Forbidden,
        ]
    );
}

#[test]
fn only_forbidden_blocks() {
    assert!(ReleaseType::Forbidden.is_blocking());
    assert!(!ReleaseType::Major.is_blocking());
    assert!(!ReleaseType::None.is_blocking());
}

#[test]
fn max_of_empty_is_none() {
    assert_eq!(ReleaseType::max_of([]), ReleaseType::None);
    assert_eq!(
        ReleaseType::max_of([ReleaseType::Patch, ReleaseType::Major, ReleaseType::Minor]),
        ReleaseType::Major
    );
}

#[test]
fn parse_and_display() {
    for release in [
        ReleaseType::None,
        ReleaseType::Patch,
        ReleaseType::Minor,
        ReleaseType::Major,
        ReleaseType::Forbidden,
    ] {
        assert_eq!(release.to_string().parse::<ReleaseType>().unwrap(), release);
    }
    assert_eq!(" MAJOR ".parse::<ReleaseType>().unwrap(), ReleaseType::Major);
    assert!("huge".parse::<ReleaseType>().is_err());
}

#[test]
fn severity_words() {
    assert_eq!(ReleaseType::Major.severity_word(), "breaking");
    assert_eq!(ReleaseType::Forbidden.severity_word(), "breaking");
    assert_eq!(ReleaseType::Minor.severity_word(), "minor");
}
