//! The resolution pipeline.
//!
//! Declarations → classification → policy → provider validation →
//! requirements → bindings → graph. One linear pass; the first failure
//! aborts the run and no partial graph is returned.

use std::path::Path;
use std::time::Instant;

use trellis_core::config::TrellisConfig;
use trellis_core::errors::{MarkerError, ResolveError, ResultExt, TrellisErrorCode};
use trellis_core::events::types::{
    ComponentDiscoveredEvent, DirectiveFallbackEvent, ResolutionCompleteEvent,
    ResolutionErrorEvent, ResolutionStartedEvent,
};
use trellis_core::events::EventDispatcher;
use trellis_core::types::{BTreeSet, SmallVec};

use crate::binding::{pointer_method_set, BindingResolver, MethodSet};
use crate::declarations::{Declaration, DeclarationStore, Method, Symbol, TypeIndex, TypeRef};
use crate::graph::{assemble, ComponentId, ComponentRecord, ProviderOrigin, ResolvedGraph};
use crate::markers::tag;
use crate::markers::{
    classify, parse_directives, parse_policy, Classification, MarkerKind, MarkerRegistry,
    ParsedPolicy, ProviderPolicy,
};
use crate::providers::{ProviderSite, ProviderTarget, ProviderValidator};
use crate::requirements::RequirementSet;

/// Resolves a dependency graph from a declaration store.
///
/// All settings come from the `TrellisConfig` and the optional event
/// dispatcher; the resolver keeps no state between runs.
pub struct Resolver<'s, S: DeclarationStore + ?Sized> {
    store: &'s S,
    config: &'s TrellisConfig,
    registry: MarkerRegistry,
    events: EventDispatcher,
}

impl<'s, S: DeclarationStore + ?Sized> Resolver<'s, S> {
    pub fn new(store: &'s S, config: &'s TrellisConfig) -> Self {
        Self {
            store,
            config,
            registry: MarkerRegistry::from_config(&config.markers),
            events: EventDispatcher::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    /// Run the full pipeline over the declarations under `root`.
    pub fn resolve(&self, root: &Path) -> Result<ResolvedGraph, ResolveError> {
        let start = Instant::now();
        let result = self.run(root);
        match &result {
            Ok(graph) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                tracing::info!(
                    components = graph.components.len(),
                    slice_bindings = graph.slice_bindings.len(),
                    duration_ms,
                    "resolution complete"
                );
                self.events.emit_resolution_complete(&ResolutionCompleteEvent {
                    component_count: graph.components.len(),
                    slice_binding_count: graph.slice_bindings.len(),
                    duration_ms,
                });
            }
            Err(e) => {
                tracing::debug!(code = e.error_code(), error = %e, "resolution failed");
                self.events.emit_resolution_error(&ResolutionErrorEvent {
                    code: e.error_code(),
                    message: e.to_string(),
                });
            }
        }
        result
    }

    fn run(&self, root: &Path) -> Result<ResolvedGraph, ResolveError> {
        let mut declarations = self.store.list_declarations(root)?;
        // stores may list in any order; discovery order is (package, name)
        declarations.sort_by(|a, b| {
            (a.package.path.as_str(), a.name.as_str())
                .cmp(&(b.package.path.as_str(), b.name.as_str()))
        });
        let package_count = declarations
            .iter()
            .map(|d| d.package.path.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        tracing::info!(
            root = %root.display(),
            packages = package_count,
            declarations = declarations.len(),
            "resolution started"
        );
        self.events.emit_resolution_started(&ResolutionStartedEvent {
            root: root.to_path_buf(),
            package_count,
        });

        let index = TypeIndex::new(&declarations);
        let classified: Vec<Classification<'_>> = declarations
            .iter()
            .filter_map(|d| classify(&self.registry, d))
            .collect();
        tracing::debug!(count = classified.len(), "marked declarations found");

        let mut requirements = RequirementSet::new();
        let mut components = Vec::new();
        for classification in &classified {
            let records = self
                .process_declaration(&index, classification, &mut requirements)
                .with_context(|| {
                    format!(
                        "processing {} {}",
                        self.registry
                            .kind_of(&classification.marker)
                            .map_or("declaration".to_string(), |k| k.to_string()),
                        classification.declaration.path()
                    )
                })?;
            components.extend(records);
        }

        let capabilities: Vec<MethodSet> = components
            .iter()
            .map(|c| pointer_method_set(&index, &c.signature.produced))
            .collect();

        let binder = BindingResolver::new(&index, &self.events)
            .with_parallel(self.config.resolution.effective_parallel());

        tracing::debug!(
            interfaces = requirements.interfaces().len(),
            "resolving interface implementations"
        );
        binder.bind_interfaces(&mut components, &capabilities, requirements.interfaces())?;

        tracing::debug!(slices = requirements.slices().len(), "resolving slice bindings");
        let slice_bindings =
            binder.bind_slices(&components, &capabilities, requirements.slices())?;

        Ok(assemble(
            components,
            slice_bindings,
            self.config.resolution.output_package.clone(),
        ))
    }

    /// Turn one classified declaration into component records, registering
    /// the requirements its providers consume.
    pub fn process_declaration(
        &self,
        index: &TypeIndex<'_>,
        classification: &Classification<'_>,
        requirements: &mut RequirementSet,
    ) -> Result<Vec<ComponentRecord>, ResolveError> {
        let decl = classification.declaration;
        match self.registry.kind_of(&classification.marker) {
            Some(MarkerKind::Component) => {
                let record = self.process_component(index, classification, requirements)?;
                Ok(vec![record])
            }
            Some(MarkerKind::Configuration) => {
                self.process_configuration(index, classification, requirements)
            }
            None => Err(MarkerError::UnknownMarker {
                marker: classification.marker.clone(),
                declaration: decl.name.clone(),
                package: decl.package.name.clone(),
            }
            .into()),
        }
    }

    fn process_component(
        &self,
        index: &TypeIndex<'_>,
        classification: &Classification<'_>,
        requirements: &mut RequirementSet,
    ) -> Result<ComponentRecord, ResolveError> {
        let decl = classification.declaration;
        let directives = tag::directives(
            &classification.tag,
            self.config.markers.effective_tag_key(),
        );
        let parsed = parse_policy(&directives, &decl.name, &decl.package.name)?;
        self.report_fallbacks(&decl.path().to_string(), &parsed);
        let policy = parsed.policy;

        let symbol = self
            .store
            .lookup_function(&decl.package.path, &policy.constructor);
        let path = decl.path();
        let signature = self.validator(index).validate(
            ProviderSite {
                provider: &policy.constructor,
                component: &decl.name,
                package: &decl.package,
            },
            ProviderTarget::Component(&path),
            symbol.as_ref(),
        )?;
        requirements.collect(index, &signature);

        let record = ComponentRecord {
            id: ComponentId::new(decl.package.clone(), decl.name.clone()),
            origin: ProviderOrigin::Constructor {
                function: policy.constructor.clone(),
            },
            policy,
            signature,
            implements: SmallVec::new(),
        };
        self.report_component(&record);
        Ok(record)
    }

    fn process_configuration(
        &self,
        index: &TypeIndex<'_>,
        classification: &Classification<'_>,
        requirements: &mut RequirementSet,
    ) -> Result<Vec<ComponentRecord>, ResolveError> {
        let decl = classification.declaration;
        let mut methods: Vec<&Method> = decl.methods.iter().filter(|m| m.is_exported()).collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        if methods.is_empty() {
            tracing::warn!(configuration = %decl.path(), "configuration declares no exported methods");
        }

        let mut records = Vec::with_capacity(methods.len());
        for method in methods {
            let record = self
                .process_config_method(index, decl, method, requirements)
                .with_context(|| format!("provider method {}.{}", decl.name, method.name))?;
            records.push(record);
        }
        Ok(records)
    }

    fn process_config_method(
        &self,
        index: &TypeIndex<'_>,
        decl: &Declaration,
        method: &Method,
        requirements: &mut RequirementSet,
    ) -> Result<ComponentRecord, ResolveError> {
        let provider = format!("{}.{}", decl.name, method.name);
        let parsed = parse_directives(
            method.directive.as_deref().unwrap_or_default(),
            ProviderPolicy::with_constructor(method.name.clone()),
            &provider,
            &decl.package.name,
        )?;
        self.report_fallbacks(&format!("{}.{}", decl.path(), method.name), &parsed);

        let mut policy = parsed.policy;
        if parsed.constructor_overridden {
            tracing::warn!(
                provider = %provider,
                ignored = %policy.constructor,
                "constructor override has no effect on configuration methods"
            );
            policy.constructor = method.name.clone();
        }

        let symbol = Symbol::Func(method.signature.clone());
        let signature = self.validator(index).validate(
            ProviderSite {
                provider: &provider,
                component: &provider,
                package: &decl.package,
            },
            ProviderTarget::ConfigMethod,
            Some(&symbol),
        )?;
        requirements.collect(index, &signature);

        let id = match &signature.produced {
            TypeRef::Named(path) => ComponentId::new(index.package_id(&path.package), path.name.clone()),
            other => ComponentId::predeclared(other.to_string()),
        };

        let record = ComponentRecord {
            id,
            origin: ProviderOrigin::ConfigMethod {
                configuration: decl.path(),
                configuration_package: decl.package.clone(),
                method: method.name.clone(),
            },
            policy,
            signature,
            implements: SmallVec::new(),
        };
        self.report_component(&record);
        Ok(record)
    }

    fn validator<'i, 'a>(&'i self, index: &'i TypeIndex<'a>) -> ProviderValidator<'i, 'a> {
        ProviderValidator::new(index, self.config.resolution.output_package.as_deref())
    }

    fn report_fallbacks(&self, component: &str, parsed: &ParsedPolicy) {
        let warn = self.config.resolution.effective_warn_on_directive_fallback();
        for token in &parsed.fallback_tokens {
            if warn && token.contains('=') {
                tracing::warn!(
                    component,
                    token = %token,
                    "unrecognized directive taken as constructor name"
                );
            } else {
                tracing::debug!(component, token = %token, "directive taken as constructor name");
            }
            self.events.emit_directive_fallback(&DirectiveFallbackEvent {
                component: component.to_string(),
                token: token.clone(),
            });
        }
    }

    fn report_component(&self, record: &ComponentRecord) {
        tracing::debug!(
            component = %record.id,
            provider = %record.provider_name(),
            scope = %record.policy.scope,
            "component discovered"
        );
        self.events.emit_component_discovered(&ComponentDiscoveredEvent {
            component: record.id.to_string(),
            provider: record.provider_name(),
            scope: record.policy.scope.to_string(),
        });
    }
}
