//! Build configuration.

use serde::{Deserialize, Serialize};

/// How a build reacts to a tolerable irregularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Proceed silently.
    Allow,
    /// Proceed, recording a warning diagnostic.
    #[default]
    Warn,
    /// Fail the build.
    Deny,
}

/// Build configuration.
///
/// The defaults reproduce the permissive output of the builder while still
/// surfacing every irregularity as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Values whose type has no scalar mapping (declared as `String`).
    pub unmapped_types: Policy,
    /// An action name attached twice to one operation, or an alias attached
    /// twice to one compose operation. The later entry replaces the earlier.
    pub duplicate_actions: Policy,
    /// Two parameters of one request bound to the same token. The later
    /// value replaces the earlier in the variables map.
    pub token_collisions: Policy,
    /// Operation names, aliases and tokens outside the GraphQL name grammar.
    pub invalid_names: Policy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            unmapped_types: Policy::Warn,
            duplicate_actions: Policy::Warn,
            token_collisions: Policy::Warn,
            invalid_names: Policy::Allow,
        }
    }
}

impl BuildConfig {
    /// Creates the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerates everything without diagnostics.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            unmapped_types: Policy::Allow,
            duplicate_actions: Policy::Allow,
            token_collisions: Policy::Allow,
            invalid_names: Policy::Allow,
        }
    }

    /// Rejects every irregularity.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            unmapped_types: Policy::Deny,
            duplicate_actions: Policy::Deny,
            token_collisions: Policy::Deny,
            invalid_names: Policy::Deny,
        }
    }

    /// Sets the unmapped type policy.
    #[must_use]
    pub fn unmapped_types(mut self, policy: Policy) -> Self {
        self.unmapped_types = policy;
        self
    }

    /// Sets the duplicate action policy.
    #[must_use]
    pub fn duplicate_actions(mut self, policy: Policy) -> Self {
        self.duplicate_actions = policy;
        self
    }

    /// Sets the token collision policy.
    #[must_use]
    pub fn token_collisions(mut self, policy: Policy) -> Self {
        self.token_collisions = policy;
        self
    }

    /// Sets the invalid name policy.
    #[must_use]
    pub fn invalid_names(mut self, policy: Policy) -> Self {
        self.invalid_names = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_from_json() {
        let config: BuildConfig =
            serde_json::from_str(r#"{ "token_collisions": "deny" }"#).unwrap();
        assert_eq!(config.token_collisions, Policy::Deny);
        assert_eq!(config.unmapped_types, Policy::Warn);
        assert_eq!(config.invalid_names, Policy::Allow);
    }

    #[test]
    fn test_setters() {
        let config = BuildConfig::lenient().duplicate_actions(Policy::Deny);
        assert_eq!(config.duplicate_actions, Policy::Deny);
        assert_eq!(config.token_collisions, Policy::Allow);
        assert_eq!(BuildConfig::strict().invalid_names, Policy::Deny);
    }
}
