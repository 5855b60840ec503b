//! EventDispatcher, synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::ResolutionEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ResolutionEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ResolutionEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn ResolutionEventHandler)>(&self, f: F) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(handler = index, "event handler panicked; continuing");
            }
        }
    }

    // ---- Run Lifecycle ----
    pub fn emit_resolution_started(&self, event: &ResolutionStartedEvent) {
        self.emit(|h| h.on_resolution_started(event));
    }

    pub fn emit_resolution_complete(&self, event: &ResolutionCompleteEvent) {
        self.emit(|h| h.on_resolution_complete(event));
    }

    pub fn emit_resolution_error(&self, event: &ResolutionErrorEvent) {
        self.emit(|h| h.on_resolution_error(event));
    }

    // ---- Components ----
    pub fn emit_component_discovered(&self, event: &ComponentDiscoveredEvent) {
        self.emit(|h| h.on_component_discovered(event));
    }

    pub fn emit_directive_fallback(&self, event: &DirectiveFallbackEvent) {
        self.emit(|h| h.on_directive_fallback(event));
    }

    // ---- Binding ----
    pub fn emit_interface_bound(&self, event: &InterfaceBoundEvent) {
        self.emit(|h| h.on_interface_bound(event));
    }

    pub fn emit_slice_resolved(&self, event: &SliceResolvedEvent) {
        self.emit(|h| h.on_slice_resolved(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
