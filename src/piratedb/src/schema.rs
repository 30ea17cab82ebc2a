//! Required/optional field access on template nodes
//!
//! Fields the classifier guarantees, or that a matched behavior must carry,
//! are read through the `req_*` accessors: a miss is a precondition
//! violation and surfaces as [`Error::MissingField`]. Optional fields use
//! the `opt_*` accessors and are defaulted by the caller.

use crate::node::Node;
use crate::{Error, Result};

/// Field reader bound to one node and the template that owns it
#[derive(Clone, Copy)]
pub struct Fields<'a> {
    node: &'a Node,
    owner: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(node: &'a Node, owner: &'a str) -> Self {
        Self { node, owner }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Reader for a nested node, keeping the same owner label
    pub fn nested(&self, node: &'a Node) -> Fields<'a> {
        Fields::new(node, self.owner)
    }

    fn missing(&self, field: &'static str) -> Error {
        Error::MissingField {
            template: self.owner.to_string(),
            field,
        }
    }

    fn wrong_type(&self, field: &'static str, expected: &'static str) -> Error {
        Error::FieldType {
            template: self.owner.to_string(),
            field,
            expected,
        }
    }

    fn req<T>(
        &self,
        field: &'static str,
        expected: &'static str,
        convert: impl FnOnce(&'a Node) -> Option<T>,
    ) -> Result<T> {
        let value = self.node.get(field).ok_or_else(|| self.missing(field))?;
        convert(value).ok_or_else(|| self.wrong_type(field, expected))
    }

    pub fn req_node(&self, field: &'static str) -> Result<&'a Node> {
        self.node.get_some(field).ok_or_else(|| self.missing(field))
    }

    pub fn req_i64(&self, field: &'static str) -> Result<i64> {
        self.req(field, "integer", Node::as_i64)
    }

    pub fn req_u64(&self, field: &'static str) -> Result<u64> {
        self.req(field, "unsigned integer", Node::as_u64)
    }

    pub fn req_f64(&self, field: &'static str) -> Result<f64> {
        self.req(field, "number", Node::as_f64)
    }

    pub fn req_bool(&self, field: &'static str) -> Result<bool> {
        self.req(field, "boolean", Node::as_bool)
    }

    pub fn req_str(&self, field: &'static str) -> Result<&'a str> {
        self.req(field, "string", Node::as_str)
    }

    pub fn req_list(&self, field: &'static str) -> Result<&'a [Node]> {
        self.req(field, "list", Node::as_list)
    }

    pub fn opt_i64(&self, field: &str) -> Option<i64> {
        self.node.get(field).and_then(Node::as_i64)
    }

    pub fn opt_u64(&self, field: &str) -> Option<u64> {
        self.node.get(field).and_then(Node::as_u64)
    }

    pub fn opt_f64(&self, field: &str) -> Option<f64> {
        self.node.get(field).and_then(Node::as_f64)
    }

    pub fn opt_list(&self, field: &str) -> &'a [Node] {
        self.node.get(field).and_then(Node::as_list).unwrap_or(&[])
    }
}

/// Label used in errors for a template: its object name, else its id
pub fn owner_label(node: &Node) -> String {
    node.get("m_objectName")
        .and_then(Node::as_str)
        .map(str::to_string)
        .or_else(|| node.get("m_templateID").and_then(Node::as_i64).map(|id| id.to_string()))
        .unwrap_or_else(|| "<unnamed template>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields() {
        let node = Node::from(json!({
            "m_templateID": 12,
            "m_objectName": "Cutlass",
            "m_fAmount": 1.5,
            "m_ranks": [],
        }));
        let fields = Fields::new(&node, "Cutlass");
        assert_eq!(fields.req_u64("m_templateID").unwrap(), 12);
        assert_eq!(fields.req_str("m_objectName").unwrap(), "Cutlass");
        assert_eq!(fields.req_f64("m_fAmount").unwrap(), 1.5);
        assert!(fields.req_list("m_ranks").unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let node = Node::from(json!({ "m_objectName": "Cutlass" }));
        let fields = Fields::new(&node, "Cutlass");
        let err = fields.req_u64("m_templateID").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField { field: "m_templateID", .. }
        ));
        assert!(err.to_string().contains("Cutlass"));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let node = Node::from(json!({ "m_templateID": "twelve" }));
        let fields = Fields::new(&node, "x");
        assert!(matches!(
            fields.req_u64("m_templateID"),
            Err(Error::FieldType { expected: "unsigned integer", .. })
        ));
    }

    #[test]
    fn test_owner_label() {
        assert_eq!(owner_label(&Node::from(json!({ "m_objectName": "A" }))), "A");
        assert_eq!(owner_label(&Node::from(json!({ "m_templateID": 9 }))), "9");
        assert_eq!(owner_label(&Node::Null), "<unnamed template>");
    }
}
