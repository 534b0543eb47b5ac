//! Field-level validation of JSON request bodies.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Upper bound for recipe titles and ingredient names, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const NOT_NULL: &str = "This field may not be null.";
pub(crate) const NOT_BLANK: &str = "This field may not be blank.";
pub(crate) const NOT_A_STRING: &str = "Not a valid string.";
pub(crate) const NO_NULL_CHARACTERS: &str = "Null characters are not allowed.";

/// Validation messages keyed by field path, e.g. `title` or
/// `ingredients[1].name`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` if nothing was recorded, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextRules {
    pub required: bool,
    pub allow_blank: bool,
    pub max_length: Option<usize>,
}

impl TextRules {
    /// Short identifying text: title, ingredient name.
    pub fn name(required: bool) -> Self {
        TextRules {
            required,
            allow_blank: false,
            max_length: Some(MAX_NAME_LENGTH),
        }
    }

    pub fn free_text() -> Self {
        TextRules {
            required: false,
            allow_blank: true,
            max_length: None,
        }
    }
}

/// Type name used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Validates one text field. Surrounding whitespace is trimmed.
///
/// Returns `None` when the field is absent or invalid; problems are recorded
/// in `errors` under `path`.
pub(crate) fn read_text(
    value: Option<&Value>,
    path: &str,
    rules: TextRules,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = match value {
        None => {
            if rules.required {
                errors.add(path, REQUIRED);
            }
            return None;
        }
        Some(Value::Null) => {
            errors.add(path, NOT_NULL);
            return None;
        }
        Some(Value::String(s)) => s.trim(),
        Some(_) => {
            errors.add(path, NOT_A_STRING);
            return None;
        }
    };

    // Postgres text columns cannot store NUL
    if value.contains('\0') {
        errors.add(path, NO_NULL_CHARACTERS);
        return None;
    }

    if value.is_empty() && !rules.allow_blank {
        errors.add(path, NOT_BLANK);
        return None;
    }

    if let Some(max) = rules.max_length {
        if value.chars().count() > max {
            errors.add(
                path,
                format!("Ensure this field has no more than {} characters.", max),
            );
            return None;
        }
    }

    Some(value.to_string())
}
