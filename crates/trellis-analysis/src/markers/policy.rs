//! Provider policy and the directive parser.

use std::fmt;

use serde::{Deserialize, Serialize};
use trellis_core::constants::{
    DEFAULT_CONSTRUCTOR_PREFIX, DIRECTIVE_CONSTRUCTOR, DIRECTIVE_ORDER, DIRECTIVE_PRIMARY,
    DIRECTIVE_SCOPE, SCOPE_PROTOTYPE, SCOPE_SINGLETON,
};
use trellis_core::errors::PolicyError;

/// Component lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One shared instance.
    #[default]
    Singleton,
    /// A fresh instance per request, injected as a factory.
    Prototype,
}

impl Scope {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            SCOPE_SINGLETON => Some(Self::Singleton),
            SCOPE_PROTOTYPE => Some(Self::Prototype),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Singleton => SCOPE_SINGLETON,
            Self::Prototype => SCOPE_PROTOTYPE,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position within a slice binding. Lower sorts first; `Order::LAST` is the
/// "unordered" default and sorts after every explicit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(pub i64);

impl Order {
    pub const LAST: Order = Order(i64::MAX);

    pub fn is_unordered(self) -> bool {
        self == Self::LAST
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::LAST
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unordered() {
            f.write_str("unordered")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// How a component is constructed and bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPolicy {
    pub constructor: String,
    pub scope: Scope,
    pub primary: bool,
    pub order: Order,
}

impl ProviderPolicy {
    /// Defaults for a component: `New<Name>`, singleton, not primary, unordered.
    pub fn defaults_for(component: &str) -> Self {
        Self::with_constructor(format!("{DEFAULT_CONSTRUCTOR_PREFIX}{component}"))
    }

    pub fn with_constructor(constructor: impl Into<String>) -> Self {
        Self {
            constructor: constructor.into(),
            scope: Scope::Singleton,
            primary: false,
            order: Order::LAST,
        }
    }
}

/// Result of parsing a directive list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPolicy {
    pub policy: ProviderPolicy,
    /// Tokens that matched no directive and were taken as constructor names,
    /// in the order they appeared.
    pub fallback_tokens: Vec<String>,
    /// Whether any token (explicit or fallback) replaced the constructor.
    pub constructor_overridden: bool,
}

/// Parse a directive list against the default policy for `component`.
pub fn parse_policy(
    directives: &str,
    component: &str,
    package: &str,
) -> Result<ParsedPolicy, PolicyError> {
    parse_directives(directives, ProviderPolicy::defaults_for(component), component, package)
}

/// Parse a comma-separated directive list left to right on top of `defaults`.
///
/// Recognized: `primary`, `constructor=<name>`, `scope=<singleton|prototype>`,
/// `order=<integer>`. Any other non-empty token replaces the constructor name,
/// the last one winning.
pub fn parse_directives(
    directives: &str,
    defaults: ProviderPolicy,
    component: &str,
    package: &str,
) -> Result<ParsedPolicy, PolicyError> {
    let mut parsed = ParsedPolicy {
        policy: defaults,
        fallback_tokens: Vec::new(),
        constructor_overridden: false,
    };

    for token in directives.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }

        if token == DIRECTIVE_PRIMARY {
            parsed.policy.primary = true;
        } else if let Some(name) = token.strip_prefix(DIRECTIVE_CONSTRUCTOR) {
            parsed.policy.constructor = name.to_string();
            parsed.constructor_overridden = true;
        } else if let Some(value) = token.strip_prefix(DIRECTIVE_SCOPE) {
            parsed.policy.scope = Scope::parse(value).ok_or_else(|| PolicyError::InvalidScope {
                scope: value.to_string(),
                component: component.to_string(),
                package: package.to_string(),
            })?;
        } else if let Some(value) = token.strip_prefix(DIRECTIVE_ORDER) {
            let order = value.parse::<i64>().map_err(|_| PolicyError::InvalidOrder {
                order: value.to_string(),
                component: component.to_string(),
                package: package.to_string(),
            })?;
            parsed.policy.order = Order(order);
        } else {
            parsed.policy.constructor = token.to_string();
            parsed.constructor_overridden = true;
            parsed.fallback_tokens.push(token.to_string());
        }
    }

    Ok(parsed)
}
