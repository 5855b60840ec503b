//! Tests for the resolution event dispatcher.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use trellis_core::events::types::*;
use trellis_core::events::{EventDispatcher, ResolutionEventHandler};

/// Counts every callback it receives.
#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    discovered: AtomicUsize,
    bound: AtomicUsize,
}

impl ResolutionEventHandler for CountingHandler {
    fn on_resolution_started(&self, _event: &ResolutionStartedEvent) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_component_discovered(&self, _event: &ComponentDiscoveredEvent) {
        self.discovered.fetch_add(1, Ordering::SeqCst);
    }

    fn on_interface_bound(&self, _event: &InterfaceBoundEvent) {
        self.bound.fetch_add(1, Ordering::SeqCst);
    }
}

struct PanickingHandler;

impl ResolutionEventHandler for PanickingHandler {
    fn on_resolution_started(&self, _event: &ResolutionStartedEvent) {
        panic!("handler failure");
    }
}

/// Records fallback tokens in arrival order.
#[derive(Default)]
struct FallbackRecorder {
    tokens: Mutex<Vec<String>>,
}

impl ResolutionEventHandler for FallbackRecorder {
    fn on_directive_fallback(&self, event: &DirectiveFallbackEvent) {
        self.tokens.lock().unwrap().push(event.token.clone());
    }
}

fn started() -> ResolutionStartedEvent {
    ResolutionStartedEvent {
        root: "/tmp/app".into(),
        package_count: 3,
    }
}

/// Emitting with no handlers is a no-op.
#[test]
fn test_empty_dispatcher() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_resolution_started(&started());
}

/// Each registered handler receives each event once.
#[test]
fn test_dispatch_to_all_handlers() {
    let a = Arc::new(CountingHandler::default());
    let b = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());

    dispatcher.emit_resolution_started(&started());
    dispatcher.emit_component_discovered(&ComponentDiscoveredEvent {
        component: "example.com/app/db.Pool".to_string(),
        provider: "NewPool".to_string(),
        scope: "singleton".to_string(),
    });
    dispatcher.emit_interface_bound(&InterfaceBoundEvent {
        interface: "example.com/app/db.Store".to_string(),
        component: "example.com/app/db.Pool".to_string(),
        by_primary: false,
    });
    // Events the handler does not override fall through to the defaults.
    dispatcher.emit_slice_resolved(&SliceResolvedEvent {
        interface: "example.com/app/http.Middleware".to_string(),
        member_count: 0,
    });

    for handler in [&a, &b] {
        assert_eq!(handler.started.load(Ordering::SeqCst), 1);
        assert_eq!(handler.discovered.load(Ordering::SeqCst), 1);
        assert_eq!(handler.bound.load(Ordering::SeqCst), 1);
    }
}

/// A panicking handler does not stop later handlers.
#[test]
fn test_panicking_handler_isolated() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_resolution_started(&started());
    assert_eq!(counter.started.load(Ordering::SeqCst), 1);
}

/// Cloned dispatchers share handlers.
#[test]
fn test_clone_shares_handlers() {
    let recorder = Arc::new(FallbackRecorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());
    let cloned = dispatcher.clone();

    dispatcher.emit_directive_fallback(&DirectiveFallbackEvent {
        component: "Service".to_string(),
        token: "BuildService".to_string(),
    });
    cloned.emit_directive_fallback(&DirectiveFallbackEvent {
        component: "Service".to_string(),
        token: "mode=fast".to_string(),
    });

    assert_eq!(
        *recorder.tokens.lock().unwrap(),
        vec!["BuildService".to_string(), "mode=fast".to_string()]
    );
}
