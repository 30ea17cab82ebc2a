//! Localization key references
//!
//! Templates declare text by key (e.g. `Pets_PetName_Kraken`). This module
//! only builds references to those keys; resolving a key to display text is
//! the job of whoever owns the locale tables.

use crate::hash::lang_id;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Field holding a template's player-facing name key
pub const DISPLAY_NAME_FIELD: &str = "m_displayName";

/// Field holding a template's description key
pub const DESCRIPTION_FIELD: &str = "m_description";

/// Field holding a unit's own name key (its display name is used as a title)
pub const UNIT_NAME_FIELD: &str = "m_unitName";

/// Opaque reference into the localization cache
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LangRef {
    /// Declared key, empty when the template has none
    pub key: String,
    /// Hashed key id, `None` when the key is absent
    pub id: Option<i64>,
}

impl LangRef {
    /// Reference for an explicit key; an empty key is treated as absent
    pub fn new(key: &str) -> Self {
        if key.is_empty() {
            return Self::absent();
        }
        Self {
            key: key.to_string(),
            id: Some(lang_id(key)),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    /// Build a reference from a string field of a node
    pub fn from_field(node: &Node, field: &str) -> Self {
        node.get(field)
            .and_then(Node::as_str)
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn display_name(node: &Node) -> Self {
        Self::from_field(node, DISPLAY_NAME_FIELD)
    }

    pub fn description(node: &Node) -> Self {
        Self::from_field(node, DESCRIPTION_FIELD)
    }

    pub fn unit_name(node: &Node) -> Self {
        Self::from_field(node, UNIT_NAME_FIELD)
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }

    /// Use `fallback` when this reference is absent
    pub fn or(self, fallback: LangRef) -> LangRef {
        if self.is_present() {
            self
        } else {
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_field() {
        let node = Node::from(json!({ "m_displayName": "Items_Cutlass" }));
        let name = LangRef::display_name(&node);
        assert_eq!(name.key, "Items_Cutlass");
        assert_eq!(name.id, Some(lang_id("Items_Cutlass")));
    }

    #[test]
    fn test_empty_and_missing_keys_are_absent() {
        let node = Node::from(json!({ "m_displayName": "" }));
        assert!(!LangRef::display_name(&node).is_present());
        assert!(!LangRef::description(&node).is_present());
    }

    #[test]
    fn test_or_fallback() {
        let title = LangRef::new("Units_Title");
        assert_eq!(LangRef::absent().or(title.clone()), title);
        let name = LangRef::new("Units_Name");
        assert_eq!(name.clone().or(title), name);
    }
}
