//! Durable attribute store backing a component's root node.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The root node of a component.
///
/// Attributes outlive the component object that wraps the node, so anything
/// that must survive a rebuild (such as the last free drag position) is
/// stored here as plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl Element {
    /// Create an element with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute. Removing a missing attribute is a no-op.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Iterate over all attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
