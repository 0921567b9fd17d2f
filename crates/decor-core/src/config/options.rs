//! Option types for the decorator and the restorer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DecorConfig {
    pub decorator: DecoratorOptions,
    pub restorer: RestorerOptions,
}

/// Decorator settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DecoratorOptions {
    /// Fail the pass on the first identifier the resolver rejects instead of
    /// logging it and leaving the identifier local
    pub strict_resolution: bool,
}

/// Restorer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RestorerOptions {
    /// Rewrite import blocks to match the remote identifiers in use
    pub manage_imports: bool,

    /// Guess names of packages the package resolver does not know
    pub guess_unknown_packages: bool,

    /// Forced local names, keyed by import path
    pub aliases: BTreeMap<String, String>,
}

impl Default for RestorerOptions {
    fn default() -> Self {
        Self {
            manage_imports: false,
            guess_unknown_packages: true,
            aliases: BTreeMap::new(),
        }
    }
}

impl RestorerOptions {
    pub fn with_manage_imports(mut self, manage_imports: bool) -> Self {
        self.manage_imports = manage_imports;
        self
    }

    pub fn with_alias(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.aliases.insert(path.into(), name.into());
        self
    }
}
