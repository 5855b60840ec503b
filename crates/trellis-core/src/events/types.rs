//! Event payload types for resolution events.

use std::path::PathBuf;

/// Payload for `on_resolution_started`.
#[derive(Debug, Clone)]
pub struct ResolutionStartedEvent {
    pub root: PathBuf,
    pub package_count: usize,
}

/// Payload for `on_resolution_complete`.
#[derive(Debug, Clone)]
pub struct ResolutionCompleteEvent {
    pub component_count: usize,
    pub slice_binding_count: usize,
    pub duration_ms: u64,
}

/// Payload for `on_resolution_error`.
#[derive(Debug, Clone)]
pub struct ResolutionErrorEvent {
    /// Stable error code, e.g. `INTERFACE_COLLISION`.
    pub code: &'static str,
    pub message: String,
}

/// Payload for `on_component_discovered`.
#[derive(Debug, Clone)]
pub struct ComponentDiscoveredEvent {
    /// `package.Name` for constructor-backed components,
    /// `package.Config.Method` for configuration providers.
    pub component: String,
    pub provider: String,
    pub scope: String,
}

/// Payload for `on_directive_fallback`.
///
/// An unrecognized directive token was taken as the constructor name.
#[derive(Debug, Clone)]
pub struct DirectiveFallbackEvent {
    pub component: String,
    pub token: String,
}

/// Payload for `on_interface_bound`.
#[derive(Debug, Clone)]
pub struct InterfaceBoundEvent {
    pub interface: String,
    pub component: String,
    /// Whether the binding was decided by the `primary` flag.
    pub by_primary: bool,
}

/// Payload for `on_slice_resolved`.
#[derive(Debug, Clone)]
pub struct SliceResolvedEvent {
    pub interface: String,
    pub member_count: usize,
}
