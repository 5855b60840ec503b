//! Property tests for resolution invariants.

mod common;

use common::*;
use proptest::prelude::*;
use trellis_analysis::declarations::{
    Declaration, DeclarationKind, Field, PackageBuilder, PackageId, TypeRef,
};
use trellis_analysis::markers::{classify, parse_policy, MarkerRegistry, Order};
use trellis_core::config::MarkerConfig;
use trellis_core::errors::PolicyError;

/// One `Plugin` interface, a `Manager` consuming `[]Plugin`, and one plugin
/// per entry with an optional order.
fn plugin_manifest(plugins: &[(String, Option<i64>)]) -> trellis_analysis::declarations::DeclarationManifest {
    let mut b = PackageBuilder::new(APP)
        .interface("Plugin", do_iface())
        .structure("Manager", vec![component_marker(None)])
        .func(
            "NewManager",
            sig(vec![TypeRef::slice(named(APP, "Plugin"))], vec![ptr(APP, "Manager")]),
        );
    for (name, order) in plugins {
        let tag = order.map(|o| format!("order={o}"));
        b = b
            .structure(name.clone(), vec![component_marker(tag.as_deref())])
            .func(format!("New{name}"), ctor(APP, name));
        b = implements_do(b, name);
    }
    manifest(vec![b.build()])
}

fn plugins_strategy() -> impl Strategy<Value = Vec<(String, Option<i64>)>> {
    prop::collection::btree_map("X[a-z]{1,6}", prop::option::of(-5i64..5), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn slice_members_ascending_and_stable(plugins in plugins_strategy()) {
        let graph = resolve(plugin_manifest(&plugins)).unwrap();
        prop_assert_eq!(graph.slice_bindings.len(), 1);

        let members = &graph.slice_bindings[0].members;
        prop_assert_eq!(members.len(), plugins.len());
        for pair in members.windows(2) {
            prop_assert!(pair[0].order <= pair[1].order);
            if pair[0].order == pair[1].order {
                // equal orders keep discovery order
                prop_assert!(pair[0].component < pair[1].component);
            }
        }
        for member in members {
            let name = &graph.components[member.component].id.name;
            let expected = plugins
                .iter()
                .find(|(n, _)| n == name)
                .and_then(|(_, o)| o.map(Order))
                .unwrap_or(Order::LAST);
            prop_assert_eq!(member.order, expected);
        }
    }

    #[test]
    fn resolution_is_repeatable(plugins in plugins_strategy()) {
        let first = resolve(plugin_manifest(&plugins)).unwrap();
        let second = resolve(plugin_manifest(&plugins)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn declaration_order_irrelevant(
        (plugins, shuffled) in plugins_strategy()
            .prop_flat_map(|p| (Just(p.clone()), Just(p).prop_shuffle()))
    ) {
        let a = resolve(plugin_manifest(&plugins)).unwrap();
        let b = resolve(plugin_manifest(&shuffled)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn policy_parse_total(directives in "[a-z=,0-9 \\-]{0,40}") {
        match parse_policy(&directives, "Service", "app") {
            Ok(parsed) => prop_assert!(parsed.fallback_tokens.iter().all(|t| !t.is_empty())),
            Err(PolicyError::InvalidScope { .. }) => prop_assert!(directives.contains("scope=")),
            Err(PolicyError::InvalidOrder { .. }) => prop_assert!(directives.contains("order=")),
        }
    }

    #[test]
    fn unmarked_structs_never_classified(
        fields in prop::collection::vec(("[A-Z][a-z]{0,6}", any::<bool>()), 0..6)
    ) {
        let registry = MarkerRegistry::from_config(&MarkerConfig::default());
        let fields = fields
            .into_iter()
            .map(|(name, embedded)| {
                let ty = named("example.com/other", &name);
                if embedded { Field::embedded(ty) } else { Field::new(name, ty) }
            })
            .collect();
        let decl = Declaration {
            package: PackageId::from_path(APP),
            name: "Plain".to_string(),
            kind: DeclarationKind::Struct { fields },
            methods: Vec::new(),
        };
        prop_assert!(classify(&registry, &decl).is_none());
    }
}
