//! Shared fixtures for trellis-analysis integration tests.

#![allow(dead_code)]

use std::path::Path;

use trellis_analysis::declarations::{
    DeclarationManifest, Field, InterfaceMethod, InterfaceType, ManifestPackage, ManifestStore,
    Method, PackageBuilder, Signature, TypeRef,
};
use trellis_analysis::{ResolvedGraph, Resolver};
use trellis_core::config::TrellisConfig;
use trellis_core::errors::ResolveError;
use trellis_core::events::EventDispatcher;

pub const TRELLIS: &str = "github.com/trellis-di/trellis";
pub const APP: &str = "example.com/app";

pub fn named(package: &str, name: &str) -> TypeRef {
    TypeRef::named(package, name)
}

pub fn ptr(package: &str, name: &str) -> TypeRef {
    TypeRef::pointer(TypeRef::named(package, name))
}

pub fn string() -> TypeRef {
    TypeRef::basic("string")
}

pub fn sig(params: Vec<TypeRef>, results: Vec<TypeRef>) -> Signature {
    Signature::new(params, results)
}

/// `func() *pkg.Name`
pub fn ctor(package: &str, name: &str) -> Signature {
    sig(vec![], vec![ptr(package, name)])
}

/// Embedded component marker with an optional raw tag.
pub fn component_marker(tag: Option<&str>) -> Field {
    let field = Field::embedded(named(TRELLIS, "Component"));
    match tag {
        Some(tag) => field.with_tag(tag),
        None => field,
    }
}

pub fn configuration_marker() -> Field {
    Field::embedded(named(TRELLIS, "Configuration"))
}

/// Struct `name` embedding the component marker.
pub fn component(builder: PackageBuilder, name: &str, tag: Option<&str>) -> PackageBuilder {
    builder.structure(name, vec![component_marker(tag)])
}

pub fn iface(methods: &[(&str, Signature)]) -> InterfaceType {
    InterfaceType::new(
        methods
            .iter()
            .map(|(name, sig)| InterfaceMethod::new(*name, sig.clone()))
            .collect(),
    )
}

/// `interface { Do() }`
pub fn do_iface() -> InterfaceType {
    iface(&[("Do", Signature::default())])
}

/// Attach `Do()` with a pointer receiver.
pub fn implements_do(builder: PackageBuilder, receiver: &str) -> PackageBuilder {
    builder.method(receiver, Method::new("Do", Signature::default()).with_pointer_receiver())
}

/// The marker package itself.
pub fn trellis_package() -> ManifestPackage {
    PackageBuilder::new(TRELLIS)
        .structure("Component", vec![])
        .structure("Configuration", vec![])
        .build()
}

pub fn manifest(packages: Vec<ManifestPackage>) -> DeclarationManifest {
    packages
        .into_iter()
        .fold(DeclarationManifest::new().with_package(trellis_package()), |m, p| {
            m.with_package(p)
        })
}

pub fn resolve(manifest: DeclarationManifest) -> Result<ResolvedGraph, ResolveError> {
    resolve_with(manifest, &TrellisConfig::default(), EventDispatcher::new())
}

pub fn resolve_with(
    manifest: DeclarationManifest,
    config: &TrellisConfig,
    events: EventDispatcher,
) -> Result<ResolvedGraph, ResolveError> {
    let store = ManifestStore::new(manifest);
    Resolver::new(&store, config)
        .with_events(events)
        .resolve(Path::new("/workspace/app"))
}

/// A single-package application exercising every provider shape:
///
/// ```text
/// type Greeter interface { Greet() string }
/// type Plugin interface { Execute() }
/// type Iface interface { Do() }
///
/// SimpleLogger         NewSimpleLogger() SimpleLogger
/// GermanGreeter        "constructor=BuildGermanGreeter,"  (*GermanGreeter).Greet
/// App                  NewApp(Greeter, SimpleLogger) *App
/// AuthPlugin           order=2, Execute
/// MetricsPlugin        order=1, Execute
/// AuditPlugin          unordered, Execute
/// PluginManager        NewPluginManager([]Plugin)
/// B                    "primary,scope=prototype,constructor=BuildB,order=1", Do
/// C                    "NewC", Do
/// Consumer             NewConsumer(Iface)
/// ProtoConsumer        NewProtoConsumer(func() Iface, func() *B)
/// WithErr / WithCleanup / WithBoth
/// JustANormalStruct    no marker
/// ```
pub fn happy_manifest() -> DeclarationManifest {
    let greet = sig(vec![], vec![string()]);
    let execute = Signature::default();

    let mut b = PackageBuilder::new(APP)
        .interface("Greeter", iface(&[("Greet", greet.clone())]))
        .interface("Plugin", iface(&[("Execute", execute.clone())]))
        .interface("Iface", do_iface());

    b = component(b, "SimpleLogger", None)
        .func("NewSimpleLogger", sig(vec![], vec![named(APP, "SimpleLogger")]));

    b = component(b, "GermanGreeter", Some(r#"trellis:"constructor=BuildGermanGreeter,""#))
        .func("BuildGermanGreeter", ctor(APP, "GermanGreeter"))
        .method(
            "GermanGreeter",
            Method::new("Greet", greet).with_pointer_receiver(),
        );

    b = component(b, "App", None).func(
        "NewApp",
        sig(
            vec![named(APP, "Greeter"), named(APP, "SimpleLogger")],
            vec![ptr(APP, "App")],
        ),
    );

    for (name, tag) in [
        ("AuthPlugin", Some(r#"trellis:"order=2""#)),
        ("MetricsPlugin", Some(r#"trellis:"order=1""#)),
        ("AuditPlugin", None),
    ] {
        b = component(b, name, tag)
            .func(format!("New{name}"), ctor(APP, name))
            .method(name, Method::new("Execute", execute.clone()).with_pointer_receiver());
    }

    b = component(b, "PluginManager", None).func(
        "NewPluginManager",
        sig(
            vec![TypeRef::slice(named(APP, "Plugin"))],
            vec![ptr(APP, "PluginManager")],
        ),
    );

    b = component(
        b,
        "B",
        Some(r#"trellis:"primary,scope=prototype,constructor=BuildB,order=1""#),
    )
    .func("BuildB", ctor(APP, "B"));
    b = implements_do(b, "B");

    b = component(b, "C", Some(r#"trellis:"NewC""#)).func("NewC", ctor(APP, "C"));
    b = implements_do(b, "C");

    b = component(b, "Consumer", None).func(
        "NewConsumer",
        sig(vec![named(APP, "Iface")], vec![ptr(APP, "Consumer")]),
    );

    b = component(b, "ProtoConsumer", None).func(
        "NewProtoConsumer",
        sig(
            vec![
                TypeRef::func(vec![], vec![named(APP, "Iface")]),
                TypeRef::func(vec![], vec![ptr(APP, "B")]),
            ],
            vec![ptr(APP, "ProtoConsumer")],
        ),
    );

    b = component(b, "WithErr", None).func(
        "NewWithErr",
        sig(vec![], vec![ptr(APP, "WithErr"), TypeRef::Error]),
    );
    b = component(b, "WithCleanup", None).func(
        "NewWithCleanup",
        sig(vec![], vec![ptr(APP, "WithCleanup"), TypeRef::cleanup()]),
    );
    b = component(b, "WithBoth", None).func(
        "NewWithBoth",
        sig(
            vec![],
            vec![ptr(APP, "WithBoth"), TypeRef::cleanup(), TypeRef::Error],
        ),
    );

    b = b.structure(
        "JustANormalStruct",
        vec![
            Field::new("SomeConfig", string()),
            Field::new("Value", TypeRef::basic("int")),
        ],
    );

    manifest(vec![b.build()])
}
