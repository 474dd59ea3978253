#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Root of a tag schema document.
///
/// The order of `tags` is the declared presentation order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TagSchema {
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: IndexMap<String, TagDefinition>,
}

/// Definition of a single tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TagDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Gate deciding whether the tag is asked at all.
    #[serde(
        default,
        rename = "req",
        alias = "condition",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ValueEntry>>,
    /// Value the caller stores when `condition` evaluates false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TagKind>,
}

/// A selectable value, optionally gated by its own condition.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ValueEntry {
    Conditioned {
        #[serde(default)]
        value: Value,
        #[serde(rename = "req", alias = "condition")]
        condition: String,
    },
    Literal(Value),
}

/// Declared value type of a tag. Only the caller coerces values with it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TagKind {
    Int,
    Float,
    Bool,
    Text,
    Other(String),
}

impl From<String> for TagKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "int" | "integer" => TagKind::Int,
            "float" | "number" => TagKind::Float,
            "bool" | "boolean" => TagKind::Bool,
            "str" | "string" | "text" => TagKind::Text,
            _ => TagKind::Other(raw),
        }
    }
}

impl From<TagKind> for String {
    fn from(kind: TagKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Int => write!(f, "int"),
            TagKind::Float => write!(f, "float"),
            TagKind::Bool => write!(f, "bool"),
            TagKind::Text => write!(f, "string"),
            TagKind::Other(raw) => write!(f, "{}", raw),
        }
    }
}

impl ValueEntry {
    pub fn literal(value: impl Into<Value>) -> Self {
        ValueEntry::Literal(value.into())
    }

    pub fn conditioned(value: impl Into<Value>, condition: impl Into<String>) -> Self {
        ValueEntry::Conditioned {
            value: value.into(),
            condition: condition.into(),
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            ValueEntry::Conditioned { value, .. } => value,
            ValueEntry::Literal(value) => value,
        }
    }

    pub fn condition(&self) -> Option<&str> {
        match self {
            ValueEntry::Conditioned { condition, .. } => Some(condition.as_str()),
            ValueEntry::Literal(_) => None,
        }
    }

    /// Display form of the value, without JSON quoting for strings.
    pub fn display_value(&self) -> String {
        match self.value() {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl TagDefinition {
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_values(mut self, values: Vec<ValueEntry>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Value entries that carry their own condition.
    pub fn conditioned_values(&self) -> impl Iterator<Item = &ValueEntry> {
        self.values
            .iter()
            .flatten()
            .filter(|entry| entry.condition().is_some())
    }
}

impl TagSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, name: impl Into<String>, definition: TagDefinition) -> Self {
        self.tags.insert(name.into(), definition);
        self
    }

    /// Load a schema document from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|err| {
            AppError::new(
                ErrorCategory::IoError,
                format!("failed to read {}: {}", path.display(), err),
            )
            .with_code("TAG-SCHEMA-001")
        })?;
        let schema = Self::from_yaml_str(&text)
            .map_err(|err| err.with_path(path))?;
        tracing::debug!(
            path = %path.display(),
            tags = schema.tags.len(),
            "loaded tag schema"
        );
        Ok(schema)
    }

    /// Parse a schema from YAML text. Empty documents produce an empty schema.
    pub fn from_yaml_str(text: &str) -> Result<Self, AppError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|err| {
            AppError::new(
                ErrorCategory::SchemaError,
                format!("failed to parse tag schema: {}", err),
            )
            .with_code("TAG-SCHEMA-002")
        })
    }

    /// Tag names in declared order.
    pub fn declared_order(&self) -> Vec<String> {
        self.tags.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

// `participants:` with no body is a valid unconditioned tag.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<IndexMap<String, TagDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<TagDefinition>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, definition)| (name, definition.unwrap_or_default()))
        .collect())
}
