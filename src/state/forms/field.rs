//! Form field value objects

use serde::{Deserialize, Deserializer, Serialize};

/// Widget kind declared by the server for a field
///
/// Unrecognized kinds are kept verbatim so the renderer can name them
/// when it skips the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    MultilineText,
    YesNo,
    Unknown(String),
}

impl FieldKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::MultilineText => "multiline-text",
            Self::YesNo => "yes-no",
            Self::Unknown(other) => other,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::MultilineText)
    }

    /// Whether the field accepts typed characters
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text | Self::MultilineText)
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "multiline-text" => Self::MultilineText,
            "yes-no" => Self::YesNo,
            _ => Self::Unknown(value),
        }
    }
}

/// A missing or null type is an unknown kind with an empty name
impl Default for FieldKind {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A single field of an onboarding step, as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: FieldKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
}

/// Treat an explicit `null` like an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FieldDefinition {
    /// Create a new field definition
    #[allow(dead_code)]
    pub fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
        }
    }
}

/// Type-safe recorded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Returns true if the value satisfies a required constraint.
    /// Only empty text fails; `Flag(false)` is a real answer.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(_) => true,
        }
    }

    /// Get the text value (returns empty string for flags)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (returns false for text)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }
}

/// A raw change coming from an input widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Full current text of a text-like input
    Text(String),
    /// Checked state of a toggle
    Checkbox { checked: bool },
}

impl From<FieldInput> for FieldValue {
    fn from(input: FieldInput) -> Self {
        match input {
            FieldInput::Checkbox { checked } => FieldValue::Flag(checked),
            FieldInput::Text(raw) => FieldValue::Text(raw),
        }
    }
}
