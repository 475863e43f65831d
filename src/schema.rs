//! Declarative response schemas.
//!
//! Every exercise describes the JSON it expects back from the provider as an
//! [`AnalysisSchema`]. The same value is sent to the provider (as the
//! `responseSchema` of the request) and used to check the answer before it
//! is decoded, so a payload that drifts from the contract is rejected at the
//! gateway instead of surfacing as a missing field in the presenter.

use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

/// Expected shape of a JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisSchema {
    String,
    Number,
    Integer,
    Boolean,
    Array(Box<AnalysisSchema>),
    Object(ObjectSchema),
}

/// Ordered property list of an object schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    properties: Vec<(String, AnalysisSchema)>,
    required: Vec<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property that must be present
    pub fn required(mut self, name: impl Into<String>, schema: AnalysisSchema) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.push((name, schema));
        self
    }

    /// Add a property that may be omitted
    pub fn optional(mut self, name: impl Into<String>, schema: AnalysisSchema) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &AnalysisSchema)> {
        self.properties.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl From<ObjectSchema> for AnalysisSchema {
    fn from(object: ObjectSchema) -> Self {
        AnalysisSchema::Object(object)
    }
}

/// Why a value does not conform to a schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: missing required field '{field}'")]
    MissingField { path: String, field: String },
}

impl AnalysisSchema {
    pub fn array_of(items: impl Into<AnalysisSchema>) -> Self {
        AnalysisSchema::Array(Box::new(items.into()))
    }

    fn type_name(&self) -> &'static str {
        match self {
            AnalysisSchema::String => "STRING",
            AnalysisSchema::Number => "NUMBER",
            AnalysisSchema::Integer => "INTEGER",
            AnalysisSchema::Boolean => "BOOLEAN",
            AnalysisSchema::Array(_) => "ARRAY",
            AnalysisSchema::Object(_) => "OBJECT",
        }
    }

    /// Provider wire form (`responseSchema` of a generateContent request)
    pub fn to_wire(&self) -> Value {
        match self {
            AnalysisSchema::Array(items) => json!({
                "type": self.type_name(),
                "items": items.to_wire(),
            }),
            AnalysisSchema::Object(object) => {
                let mut properties = Map::new();
                let mut ordering = Vec::with_capacity(object.properties.len());
                for (name, schema) in &object.properties {
                    properties.insert(name.clone(), schema.to_wire());
                    ordering.push(Value::String(name.clone()));
                }
                let mut wire = json!({
                    "type": self.type_name(),
                    "properties": properties,
                    "propertyOrdering": ordering,
                });
                if !object.required.is_empty() {
                    wire["required"] = json!(object.required);
                }
                wire
            }
            scalar => json!({ "type": scalar.type_name() }),
        }
    }

    /// Check that `value` has this shape.
    ///
    /// Unknown object properties are tolerated; missing required ones and
    /// type mismatches are not. The first violation found is reported.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), SchemaViolation> {
        let conforms = match (self, value) {
            (AnalysisSchema::String, Value::String(_)) => true,
            (AnalysisSchema::Number, Value::Number(_)) => true,
            (AnalysisSchema::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || n.as_f64().map_or(false, |f| f.fract() == 0.0)
            }
            (AnalysisSchema::Boolean, Value::Bool(_)) => true,
            (AnalysisSchema::Array(items), Value::Array(values)) => {
                for (i, item) in values.iter().enumerate() {
                    items.validate_at(item, &format!("{}[{}]", path, i))?;
                }
                true
            }
            (AnalysisSchema::Object(object), Value::Object(map)) => {
                for field in &object.required {
                    if map.get(field).map_or(true, Value::is_null) {
                        return Err(SchemaViolation::MissingField {
                            path: path.to_string(),
                            field: field.clone(),
                        });
                    }
                }
                for (name, schema) in &object.properties {
                    match map.get(name) {
                        Some(Value::Null) | None => {}
                        Some(v) => schema.validate_at(v, &format!("{}.{}", path, name))?,
                    }
                }
                true
            }
            _ => false,
        };

        if conforms {
            Ok(())
        } else {
            Err(SchemaViolation::TypeMismatch {
                path: path.to_string(),
                expected: self.type_name(),
                found: json_type_name(value),
            })
        }
    }

    /// Dotted paths of every object property, `[]` marking array items
    /// (`tweets[].sentiment`). Scalars and the root itself contribute nothing.
    pub fn field_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, out: &mut BTreeSet<String>) {
        match self {
            AnalysisSchema::Array(items) => items.collect_paths(&format!("{}[]", prefix), out),
            AnalysisSchema::Object(object) => {
                for (name, schema) in &object.properties {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{}.{}", prefix, name)
                    };
                    out.insert(path.clone());
                    schema.collect_paths(&path, out);
                }
            }
            _ => {}
        }
    }
}

/// Same path convention as [`AnalysisSchema::field_paths`], for a concrete value
pub fn value_paths(value: &Value) -> BTreeSet<String> {
    fn walk(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
        match value {
            Value::Array(items) => {
                let prefix = format!("{}[]", prefix);
                for item in items {
                    walk(item, &prefix, out);
                }
            }
            Value::Object(map) => {
                for (name, v) in map {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{}.{}", prefix, name)
                    };
                    out.insert(path.clone());
                    walk(v, &path, out);
                }
            }
            _ => {}
        }
    }

    let mut paths = BTreeSet::new();
    walk(value, "", &mut paths);
    paths
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
