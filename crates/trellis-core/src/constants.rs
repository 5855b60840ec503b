//! Shared constants for the Trellis resolver.

/// Trellis version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Marker type embedded by injectable components.
pub const DEFAULT_COMPONENT_MARKER: &str = "github.com/trellis-di/trellis.Component";

/// Marker type embedded by configuration groups.
pub const DEFAULT_CONFIGURATION_MARKER: &str = "github.com/trellis-di/trellis.Configuration";

/// Struct-tag key that carries marker directives.
pub const DEFAULT_TAG_KEY: &str = "trellis";

/// Prefix prepended to a component name to form its default constructor.
pub const DEFAULT_CONSTRUCTOR_PREFIX: &str = "New";

/// Default log level when neither `TRELLIS_LOG` nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Project-level configuration file name, looked up in the scanned root.
pub const PROJECT_CONFIG_FILE: &str = "trellis.toml";

/// Default file name of a declaration manifest inside a scanned root.
pub const MANIFEST_FILE: &str = "trellis-declarations.json";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "TRELLIS_LOG";

/// Accepted log level names.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// ---- Marker directives ----

pub const DIRECTIVE_PRIMARY: &str = "primary";
pub const DIRECTIVE_CONSTRUCTOR: &str = "constructor=";
pub const DIRECTIVE_SCOPE: &str = "scope=";
pub const DIRECTIVE_ORDER: &str = "order=";

pub const SCOPE_SINGLETON: &str = "singleton";
pub const SCOPE_PROTOTYPE: &str = "prototype";
