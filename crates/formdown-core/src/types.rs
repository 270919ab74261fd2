use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Form definition
// ---------------------------------------------------------------------------

/// Mapping from variable name to field, in declaration order.
///
/// Keys are unique: inserting a second field under an existing name is a hard
/// error upstream, never a silent overwrite. Iteration order is the order the
/// declaring lines appeared in the document.
pub type FormDefinition = IndexMap<String, Field>;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One recognized field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Exact label text before `=`, including a leading `_` marker if present.
    pub original_label: String,
    /// True iff the label carried a `*` suffix.
    pub required: bool,
    /// The matched field kind.
    pub specific: SpecificField,
}

impl Field {
    /// True if the label is supposed to be hidden (starts with `_`).
    pub fn is_label_hidden(&self) -> bool {
        self.original_label.starts_with('_')
    }

    /// The display label, with the leading `_` marker stripped when hidden.
    pub fn label(&self) -> &str {
        if self.is_label_hidden() {
            &self.original_label[1..]
        } else {
            &self.original_label
        }
    }
}

// ---------------------------------------------------------------------------
// Specific field kinds
// ---------------------------------------------------------------------------

/// One choice of a select field: stored value and displayed label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectChoice {
    pub value: String,
    pub label: String,
}

impl SelectChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectChoice {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The closed set of field kinds the grammar recognizes.
///
/// Variant order matches the grammar's dispatch order (see `fields::GRAMMAR`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecificField {
    /// Single-line text input: `___[length]`.
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<u32>,
    },
    /// Integer input: `###[min:max:step]`.
    Integer {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<i64>,
    },
    /// Decimal input with rounding precision: `#.#[min:max:step:places]`.
    Decimal {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
        places: u32,
    },
    /// Float input, no rounding: `#.#f[min:max:step]`.
    Float {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    /// Multi-line text input: `AAA[length]`.
    TextArea {
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<u32>,
    },
    /// Date input, fixed format: `d/m/y`.
    Date,
    /// Time input, fixed format: `hh:mm`.
    Time,
    /// String input with email semantics: `@`.
    Email,
    /// Mutually exclusive choices: `(x) A () B`.
    Radio {
        choices: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    /// Non-exclusive choices: `[x] A [] B`.
    Checkbox {
        choices: Vec<String>,
        default: Vec<String>,
    },
    /// Dropdown: `{(A), B -> Bee, C[c]}`.
    ///
    /// `collapse_on` designates this field as the controller of a collapsible
    /// region: the value shown as-is for `[c]` (showing it hides the region),
    /// prefixed with `~` for `[o]` (showing it reveals the region).
    Select {
        choices: Vec<SelectChoice>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        collapse_on: Option<String>,
    },
    /// File upload: `...[ext,ext;description]`.
    File {
        #[serde(skip_serializing_if = "Option::is_none")]
        allowed: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_label() {
        let field = Field {
            original_label: "_age".to_string(),
            required: false,
            specific: SpecificField::String { length: None },
        };
        assert!(field.is_label_hidden());
        assert_eq!(field.label(), "age");
    }

    #[test]
    fn visible_label() {
        let field = Field {
            original_label: "name".to_string(),
            required: true,
            specific: SpecificField::Email,
        };
        assert!(!field.is_label_hidden());
        assert_eq!(field.label(), "name");
    }
}
