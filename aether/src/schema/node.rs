//! Response schema builder
//!
//! A small typed description of the JSON shape a model must return,
//! serialized to the provider's OpenAPI-style schema format.

use serde_json::{Map, Value, json};

/// JSON type of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Boolean,
}

impl SchemaType {
    /// Type name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "OBJECT",
            SchemaType::Array => "ARRAY",
            SchemaType::String => "STRING",
            SchemaType::Integer => "INTEGER",
            SchemaType::Boolean => "BOOLEAN",
        }
    }
}

/// One node of a response schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    kind: SchemaType,
    description: Option<String>,
    properties: Vec<(String, SchemaNode)>,
    required: Vec<String>,
    items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    /// An object with the given properties, in declaration order
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::of(SchemaType::Object)
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// An array of strings, the most common leaf shape
    pub fn string_list() -> Self {
        Self::array(Self::string())
    }

    /// Mark every declared property as required
    pub fn all_required(mut self) -> Self {
        self.required = self.properties.iter().map(|(k, _)| k.clone()).collect();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> SchemaType {
        self.kind
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }

    /// Serialize to the provider's schema format
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), json!(self.kind.as_str()));

        if let Some(description) = &self.description {
            out.insert("description".to_string(), json!(description));
        }

        if self.kind == SchemaType::Object {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect();
            out.insert("properties".to_string(), Value::Object(properties));
            if !self.required.is_empty() {
                out.insert("required".to_string(), json!(self.required));
            }
        }

        if let Some(items) = &self.items {
            out.insert("items".to_string(), items.to_json());
        }

        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_nodes() {
        assert_eq!(SchemaNode::string().to_json(), json!({ "type": "STRING" }));
        assert_eq!(SchemaNode::integer().to_json(), json!({ "type": "INTEGER" }));
        assert_eq!(SchemaNode::boolean().to_json(), json!({ "type": "BOOLEAN" }));
    }

    #[test]
    fn test_object_with_required() {
        let node = SchemaNode::object([("name", SchemaNode::string()), ("age", SchemaNode::integer())])
            .all_required();

        let json = node.to_json();
        assert_eq!(json["type"], "OBJECT");
        assert_eq!(json["properties"]["name"]["type"], "STRING");
        assert_eq!(json["properties"]["age"]["type"], "INTEGER");
        assert_eq!(json["required"], json!(["name", "age"]));
    }

    #[test]
    fn test_all_required_keeps_declaration_order() {
        let node = SchemaNode::object([
            ("zeta", SchemaNode::string()),
            ("alpha", SchemaNode::string()),
        ])
        .all_required();

        assert_eq!(node.required_fields(), &["zeta".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn test_empty_object_has_properties_but_no_required() {
        let json = SchemaNode::object(Vec::<(String, SchemaNode)>::new()).to_json();
        assert_eq!(json, json!({ "type": "OBJECT", "properties": {} }));
    }

    #[test]
    fn test_array_and_description() {
        let json = SchemaNode::string_list().describe("Things to watch").to_json();
        assert_eq!(json["type"], "ARRAY");
        assert_eq!(json["items"]["type"], "STRING");
        assert_eq!(json["description"], "Things to watch");
    }
}
