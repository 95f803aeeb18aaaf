//! Configuration for shape discovery

use serde::{Deserialize, Serialize};

/// Configuration for shape discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    /// Attempt the ordered string-coercion chain on textual values
    pub coerce_strings: bool,

    /// Include the permissive date/time parser in the coercion chain
    pub parse_dates: bool,

    /// Discover the empty string as the null kind
    pub empty_string_is_null: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            coerce_strings: true,
            parse_dates: true,
            empty_string_is_null: true,
        }
    }
}

impl DiscoveryConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder::default()
    }
}

/// Builder for DiscoveryConfig
#[derive(Debug, Default)]
pub struct DiscoveryConfigBuilder {
    config: DiscoveryConfig,
}

impl DiscoveryConfigBuilder {
    /// Enable or disable the string-coercion chain
    pub fn coerce_strings(mut self, coerce: bool) -> Self {
        self.config.coerce_strings = coerce;
        self
    }

    /// Enable or disable date/time parsing within the coercion chain
    pub fn parse_dates(mut self, parse: bool) -> Self {
        self.config.parse_dates = parse;
        self
    }

    /// Choose whether the empty string discovers as null
    pub fn empty_string_is_null(mut self, null: bool) -> Self {
        self.config.empty_string_is_null = null;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DiscoveryConfig {
        self.config
    }
}
