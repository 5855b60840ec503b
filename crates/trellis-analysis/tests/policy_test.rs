//! Tests for the directive parser.

use trellis_analysis::markers::{parse_directives, parse_policy, Order, ProviderPolicy, Scope};
use trellis_core::errors::{ErrorKind, PolicyError, TrellisErrorCode};

fn parse(directives: &str) -> ProviderPolicy {
    parse_policy(directives, "Service", "app").unwrap().policy
}

#[test]
fn test_empty_is_default() {
    let policy = parse("");
    assert_eq!(policy, ProviderPolicy::defaults_for("Service"));
    assert_eq!(policy.constructor, "NewService");
    assert_eq!(policy.scope, Scope::Singleton);
    assert!(!policy.primary);
    assert!(policy.order.is_unordered());
}

#[test]
fn test_primary_scope_order() {
    let policy = parse("primary,scope=prototype,order=7");
    assert!(policy.primary);
    assert_eq!(policy.scope, Scope::Prototype);
    assert_eq!(policy.order, Order(7));
    assert_eq!(policy.constructor, "NewService");
}

/// Tokens are trimmed and empty tokens skipped.
#[test]
fn test_whitespace_and_empty_tokens() {
    let policy = parse(" primary , ,constructor=BuildService, ");
    assert!(policy.primary);
    assert_eq!(policy.constructor, "BuildService");
}

/// Bare tokens override the constructor, the last one winning.
#[test]
fn test_legacy_constructor_tokens() {
    let parsed = parse_policy("MakeA,primary,MakeB", "Service", "app").unwrap();
    assert_eq!(parsed.policy.constructor, "MakeB");
    assert!(parsed.policy.primary);
    assert_eq!(parsed.fallback_tokens, vec!["MakeA", "MakeB"]);
    assert!(parsed.constructor_overridden);
}

/// Unknown keys fall back to constructor overrides rather than failing.
#[test]
fn test_unknown_key_is_constructor_fallback() {
    let parsed = parse_policy("mode=fast", "Service", "app").unwrap();
    assert_eq!(parsed.policy.constructor, "mode=fast");
    assert_eq!(parsed.fallback_tokens, vec!["mode=fast"]);
}

/// Explicit `constructor=` is not a fallback.
#[test]
fn test_explicit_constructor_not_fallback() {
    let parsed = parse_policy("constructor=Build", "Service", "app").unwrap();
    assert!(parsed.fallback_tokens.is_empty());
    assert!(parsed.constructor_overridden);
}

/// Directive keys are case-sensitive.
#[test]
fn test_case_sensitive() {
    let parsed = parse_policy("Primary", "Service", "app").unwrap();
    assert!(!parsed.policy.primary);
    assert_eq!(parsed.policy.constructor, "Primary");
}

#[test]
fn test_invalid_scope() {
    let err = parse_policy("scope=request", "Service", "app").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidScope);
    match err {
        PolicyError::InvalidScope {
            scope,
            component,
            package,
        } => {
            assert_eq!(scope, "request");
            assert_eq!(component, "Service");
            assert_eq!(package, "app");
        }
        other => panic!("expected InvalidScope, got {other:?}"),
    }
}

#[test]
fn test_invalid_order() {
    for bad in ["order=", "order=first", "order=1.5", "order=99999999999999999999"] {
        let err = parse_policy(bad, "Service", "app").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOrder, "{bad}");
    }
}

/// Signed orders are accepted and sort before zero.
#[test]
fn test_signed_order() {
    assert_eq!(parse("order=-3").order, Order(-3));
    assert_eq!(parse("order=+4").order, Order(4));
    assert!(Order(-3) < Order(0));
    assert!(Order(i64::MAX - 1) < Order::LAST);
}

/// Later directives override earlier ones.
#[test]
fn test_left_to_right() {
    let policy = parse("scope=prototype,scope=singleton,order=1,order=2");
    assert_eq!(policy.scope, Scope::Singleton);
    assert_eq!(policy.order, Order(2));
}

/// The first error stops parsing.
#[test]
fn test_error_stops_parse() {
    let err = parse_policy("order=x,scope=bad", "Service", "app").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOrder);
}

#[test]
fn test_custom_defaults() {
    let parsed = parse_directives(
        "primary",
        ProviderPolicy::with_constructor("Database"),
        "Beans.Database",
        "app",
    )
    .unwrap();
    assert_eq!(parsed.policy.constructor, "Database");
    assert!(parsed.policy.primary);
}
