//! Tests for provider return grammar and validation.

mod common;

use std::path::Path;

use common::*;
use trellis_analysis::declarations::{
    Declaration, DeclarationStore, ManifestStore, PackageBuilder, PackageId, Signature, Symbol,
    TypeIndex, TypePath, TypeRef,
};
use trellis_analysis::providers::{
    ProviderOutcome, ProviderSite, ProviderTarget, ProviderValidator, ResultShapeError,
};
use trellis_core::errors::{ErrorKind, ProviderError, TrellisErrorCode};

const DB: &str = "example.com/app/db";

fn declarations() -> Vec<Declaration> {
    let store = ManifestStore::new(manifest(vec![
        PackageBuilder::new(APP)
            .structure("Service", vec![component_marker(None)])
            .interface("Store", do_iface())
            .build(),
        PackageBuilder::new(DB)
            .name("database")
            .structure("Pool", vec![])
            .build(),
    ]));
    store.list_declarations(Path::new("/")).unwrap()
}

fn validate(
    decls: &[Declaration],
    output: Option<&str>,
    symbol: Option<Symbol>,
) -> Result<trellis_analysis::providers::ProviderSignature, ProviderError> {
    let index = TypeIndex::new(decls);
    let package = PackageId::from_path(APP);
    let path = TypePath::new(APP, "Service");
    ProviderValidator::new(&index, output).validate(
        ProviderSite {
            provider: "NewService",
            component: "Service",
            package: &package,
        },
        ProviderTarget::Component(&path),
        symbol.as_ref(),
    )
}

fn validate_sig(signature: Signature) -> Result<trellis_analysis::providers::ProviderSignature, ProviderError> {
    validate(&declarations(), None, Some(Symbol::Func(signature)))
}

fn service() -> TypeRef {
    named(APP, "Service")
}

#[test]
fn test_outcome_shapes() {
    let v = service();
    assert_eq!(ProviderOutcome::classify(&[v.clone()]), Ok(ProviderOutcome::Value));
    assert_eq!(
        ProviderOutcome::classify(&[v.clone(), TypeRef::Error]),
        Ok(ProviderOutcome::ValueWithError)
    );
    assert_eq!(
        ProviderOutcome::classify(&[v.clone(), TypeRef::cleanup()]),
        Ok(ProviderOutcome::ValueWithCleanup)
    );
    let both = ProviderOutcome::classify(&[v.clone(), TypeRef::cleanup(), TypeRef::Error]).unwrap();
    assert_eq!(both, ProviderOutcome::ValueWithCleanupAndError);
    assert!(both.has_cleanup() && both.has_error());
    assert!(!ProviderOutcome::Value.has_cleanup());
}

#[test]
fn test_outcome_rejections() {
    let v = service();
    assert_eq!(ProviderOutcome::classify(&[]), Err(ResultShapeError::Arity(0)));
    assert_eq!(
        ProviderOutcome::classify(&[v.clone(), TypeRef::cleanup(), TypeRef::Error, TypeRef::Error]),
        Err(ResultShapeError::Arity(4))
    );
    assert!(matches!(
        ProviderOutcome::classify(&[TypeRef::Error]),
        Err(ResultShapeError::FirstNotValue(_))
    ));
    assert!(matches!(
        ProviderOutcome::classify(&[TypeRef::cleanup(), TypeRef::Error]),
        Err(ResultShapeError::FirstNotValue(_))
    ));
    assert!(matches!(
        ProviderOutcome::classify(&[v.clone(), string()]),
        Err(ResultShapeError::SecondNotErrorOrCleanup(_))
    ));
    // a cleanup must take no parameters
    assert!(matches!(
        ProviderOutcome::classify(&[v.clone(), TypeRef::func(vec![string()], vec![])]),
        Err(ResultShapeError::SecondNotErrorOrCleanup(_))
    ));
    // 3 values: cleanup then error, in that order
    assert!(matches!(
        ProviderOutcome::classify(&[v.clone(), TypeRef::Error, TypeRef::cleanup()]),
        Err(ResultShapeError::SecondNotCleanup(_))
    ));
    assert!(matches!(
        ProviderOutcome::classify(&[v, TypeRef::cleanup(), string()]),
        Err(ResultShapeError::ThirdNotError(_))
    ));
}

#[test]
fn test_missing_provider() {
    let err = validate(&declarations(), None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProviderNotFound);
    assert!(err.to_string().contains("'NewService' not found"));
}

#[test]
fn test_provider_not_callable() {
    let err = validate(&declarations(), None, Some(Symbol::Var(ptr(APP, "Service")))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProviderFunc);
    assert!(matches!(err, ProviderError::NotCallable { ref found, .. } if found == "variable"));
}

#[test]
fn test_pointer_and_value_products() {
    let by_ptr = validate_sig(sig(vec![], vec![ptr(APP, "Service")])).unwrap();
    assert!(by_ptr.produces_pointer);
    assert_eq!(by_ptr.produced, service());

    let by_value = validate_sig(sig(vec![], vec![service(), TypeRef::Error])).unwrap();
    assert!(!by_value.produces_pointer);
    assert!(by_value.returns_error());
    assert!(!by_value.returns_cleanup());
}

/// Only one pointer level is stripped.
#[test]
fn test_double_pointer_rejected() {
    let err = validate_sig(sig(vec![], vec![TypeRef::pointer(ptr(APP, "Service"))])).unwrap_err();
    assert!(matches!(err, ProviderError::ReturnTypeMismatch { .. }));
}

#[test]
fn test_wrong_product() {
    let err = validate_sig(sig(vec![], vec![ptr(DB, "Pool")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProviderFunc);
    match err {
        ProviderError::ReturnTypeMismatch { returns, expected, .. } => {
            assert_eq!(returns, "*example.com/app/db.Pool");
            assert_eq!(expected, "Service");
        }
        other => panic!("expected ReturnTypeMismatch, got {other:?}"),
    }
}

/// `(error, error)` is rejected on its first result before identity checks.
#[test]
fn test_error_shaped_first_return() {
    let err = validate_sig(sig(vec![], vec![TypeRef::Error, TypeRef::Error])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProviderFunc);
    assert!(matches!(err, ProviderError::InvalidReturns { .. }));
}

#[test]
fn test_self_reference() {
    for param in [service(), ptr(APP, "Service")] {
        let err = validate_sig(sig(vec![param], vec![ptr(APP, "Service")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProviderFunc);
        assert!(matches!(err, ProviderError::SelfReference { .. }));
    }
    // a slice of the own type is not a self-reference
    assert!(validate_sig(sig(
        vec![TypeRef::slice(service())],
        vec![ptr(APP, "Service")]
    ))
    .is_ok());
}

#[test]
fn test_prototype_handle_with_params() {
    let handle = TypeRef::func(vec![string()], vec![ptr(DB, "Pool")]);
    let err = validate_sig(sig(vec![handle], vec![ptr(APP, "Service")])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidProviderFunc);
    assert!(matches!(err, ProviderError::InvalidPrototypeHandle { ref reason, .. } if reason.contains("must not have parameters")));
}

#[test]
fn test_prototype_handle_bad_results() {
    let handle = TypeRef::func(vec![], vec![ptr(DB, "Pool"), string()]);
    let err = validate_sig(sig(vec![handle], vec![ptr(APP, "Service")])).unwrap_err();
    assert!(matches!(err, ProviderError::InvalidPrototypeHandle { .. }));

    let ok = TypeRef::func(vec![], vec![ptr(DB, "Pool"), TypeRef::cleanup(), TypeRef::Error]);
    assert!(validate_sig(sig(vec![ok], vec![ptr(APP, "Service")])).is_ok());
}

/// Parameters are named positionally and spelled with package names.
#[test]
fn test_param_descriptors() {
    let signature = validate_sig(sig(
        vec![
            ptr(DB, "Pool"),
            named(APP, "Store"),
            TypeRef::map(string(), TypeRef::slice(named("io", "Writer"))),
        ],
        vec![ptr(APP, "Service")],
    ))
    .unwrap();

    let names: Vec<_> = signature.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["p0", "p1", "p2"]);

    // declared package name wins over the path segment
    assert_eq!(signature.params[0].type_name, "*database.Pool");
    assert_eq!(signature.params[0].imports, vec![DB.to_string()]);

    // the component's own package is qualified but not imported
    assert_eq!(signature.params[1].type_name, "app.Store");
    assert!(signature.params[1].imports.is_empty());

    // unknown packages fall back to the last path segment
    assert_eq!(signature.params[2].type_name, "map[string][]io.Writer");
    assert_eq!(signature.params[2].imports, vec!["io".to_string()]);
}

/// Types in the output package are unqualified and never imported.
#[test]
fn test_output_package_excluded() {
    let signature = validate(
        &declarations(),
        Some(DB),
        Some(Symbol::Func(sig(vec![ptr(DB, "Pool")], vec![ptr(APP, "Service")]))),
    )
    .unwrap();
    assert_eq!(signature.params[0].type_name, "*Pool");
    assert!(signature.params[0].imports.is_empty());
}
