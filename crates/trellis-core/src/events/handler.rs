//! ResolutionEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a resolution run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. The trait requires `Send + Sync`
/// so a dispatcher can be shared with parallel binding workers.
pub trait ResolutionEventHandler: Send + Sync {
    // ---- Run Lifecycle ----
    fn on_resolution_started(&self, _event: &ResolutionStartedEvent) {}
    fn on_resolution_complete(&self, _event: &ResolutionCompleteEvent) {}
    fn on_resolution_error(&self, _event: &ResolutionErrorEvent) {}

    // ---- Components ----
    fn on_component_discovered(&self, _event: &ComponentDiscoveredEvent) {}
    fn on_directive_fallback(&self, _event: &DirectiveFallbackEvent) {}

    // ---- Binding ----
    fn on_interface_bound(&self, _event: &InterfaceBoundEvent) {}
    fn on_slice_resolved(&self, _event: &SliceResolvedEvent) {}
}
