//! Configurable app parameters declared in the manifest.

use serde_json::Value;

/// Parameter types an admin UI knows how to render.
pub const PARAMETER_TYPES: &[&str] = &[
    "text",
    "password",
    "checkbox",
    "url",
    "number",
    "multiline",
    "hidden",
];

/// Type assumed when a parameter omits `type`.
pub const DEFAULT_PARAMETER_TYPE: &str = "text";

/// One entry of the manifest's `parameters` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared name. `None` when absent or `null`.
    pub name: Option<String>,
    /// Declared type, or [`DEFAULT_PARAMETER_TYPE`].
    pub kind: String,
    /// Whether `required` holds a truthy value (anything but `null`/`false`).
    pub required: bool,
}

impl Parameter {
    /// Build a parameter from one array element. Non-object elements
    /// declare nothing and yield `None`.
    ///
    /// Non-string `name` and `type` values keep their JSON text, so a
    /// numeric type shows up as an invalid type instead of vanishing.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object.get("name").and_then(text_of);
        let kind = object
            .get("type")
            .and_then(text_of)
            .unwrap_or_else(|| DEFAULT_PARAMETER_TYPE.to_string());
        let required = object
            .get("required")
            .is_some_and(|v| !matches!(v, Value::Null | Value::Bool(false)));
        Some(Self {
            name,
            kind,
            required,
        })
    }

    /// The name, or `""` when the parameter has none.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn has_known_type(&self) -> bool {
        PARAMETER_TYPES.contains(&self.kind.as_str())
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == "hidden"
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
