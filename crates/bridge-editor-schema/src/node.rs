//! Read-only view over a schema node.

use serde_json::Value;

/// Primitive and structural types understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

impl SchemaType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "object" => Some(SchemaType::Object),
            "array" => Some(SchemaType::Array),
            "string" => Some(SchemaType::String),
            "number" | "integer" => Some(SchemaType::Number),
            "boolean" => Some(SchemaType::Boolean),
            _ => None,
        }
    }
}

/// Borrowed view of one schema node.
///
/// Accessors are lenient: a node that is not a JSON object simply has no
/// type, properties, or default.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
    value: &'a Value,
}

impl<'a> SchemaNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Underlying JSON value.
    pub fn as_value(&self) -> &'a Value {
        self.value
    }

    /// The `$ref` pointer, if present.
    pub fn reference(&self) -> Option<&'a str> {
        self.value.get("$ref").and_then(Value::as_str)
    }

    pub fn schema_type(&self) -> Option<SchemaType> {
        self.value
            .get("type")
            .and_then(Value::as_str)
            .and_then(SchemaType::parse)
    }

    /// Literal `default`; an explicit `null` default counts as declared.
    pub fn default_value(&self) -> Option<&'a Value> {
        self.value.get("default")
    }

    /// Declared properties in schema order.
    pub fn properties(&self) -> Vec<(&'a str, SchemaNode<'a>)> {
        match self.value.get("properties").and_then(Value::as_object) {
            Some(map) => map
                .iter()
                .map(|(key, value)| (key.as_str(), SchemaNode::new(value)))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<SchemaNode<'a>> {
        self.value
            .get("properties")
            .and_then(|props| props.get(name))
            .map(SchemaNode::new)
    }

    /// Names listed in `required`.
    pub fn required(&self) -> Vec<&'a str> {
        match self.value.get("required").and_then(Value::as_array) {
            Some(list) => list.iter().filter_map(Value::as_str).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required().contains(&name)
    }

    /// Element schema of an array node.
    pub fn items(&self) -> Option<SchemaNode<'a>> {
        self.value.get("items").map(SchemaNode::new)
    }
}
