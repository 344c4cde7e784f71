//! Domain normalization and input policy.

use hostblock::domain::{normalize, validate_input, www_variant};
use proptest::prelude::*;

#[test]
fn strips_case_www_and_trailing_tokens() {
    assert_eq!(normalize("WWW.Example.COM extra"), "example.com");
    assert_eq!(normalize("example.com\t# comment"), "example.com");
    assert_eq!(normalize("  Facebook.com  "), "facebook.com");
}

#[test]
fn www_only_stripped_as_prefix() {
    assert_eq!(normalize("mywww.example.com"), "mywww.example.com");
    assert_eq!(normalize("sub.www.example.com"), "sub.www.example.com");
    assert_eq!(normalize("www.www.example.com"), "example.com");
}

#[test]
fn empty_and_blank_input_yield_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" \t "), "");
}

#[test]
fn www_variant_prefixes() {
    assert_eq!(www_variant("a.co"), "www.a.co");
}

#[test]
fn input_shorter_than_four_rejected() {
    assert!(validate_input("a.c").is_err());
    assert!(validate_input("    ").is_err());
    validate_input("a.co").unwrap();
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in ".*") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_has_no_www_or_uppercase(raw in "[ a-zA-Z.w]{0,24}") {
        let n = normalize(&raw);
        prop_assert!(!n.starts_with("www."));
        prop_assert!(!n.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace()));
    }
}

#[test]
fn lowercases_non_ascii() {
    assert_eq!(normalize("ÄBC.Example"), "äbc.example");
}
