//! Field validation for submitted items: required-ness and length bounds.

use crate::error::AppError;
use crate::model::{ItemChanges, NewItem};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

pub const NAME_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Description];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    Required,
    TooLong { max: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Required => write!(f, "This field is required."),
            Violation::TooLong { max } => write!(f, "Field cannot be longer than {} characters.", max),
        }
    }
}

/// Field-level violations in the order they were found. Serializes as `{field: [message, ..]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    violations: Vec<(Field, Violation)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: Field, violation: Violation) {
        self.violations.push((field, violation));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has(&self, field: Field, pred: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(|(f, v)| *f == field && pred(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, Violation)> {
        self.violations.iter()
    }

    pub fn messages(&self, field: Field) -> Vec<String> {
        self.violations
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, v)| v.to_string())
            .collect()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| self.violations.iter().any(|(g, _)| g == f))
            .collect();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            map.serialize_entry(field.as_str(), &self.messages(field))?;
        }
        map.end()
    }
}

/// Bounds applied to one entry point.
#[derive(Clone, Copy, Debug)]
pub struct FieldRules {
    pub name_max: usize,
    pub description_max: usize,
    pub description_required: bool,
}

impl FieldRules {
    /// `POST /items`: description may be omitted.
    pub const CREATE: FieldRules = FieldRules {
        name_max: NAME_MAX_LEN,
        description_max: DESCRIPTION_MAX_LEN,
        description_required: false,
    };

    /// `POST /submit`: both fields required.
    pub const SUBMIT: FieldRules = FieldRules {
        name_max: NAME_MAX_LEN,
        description_max: DESCRIPTION_MAX_LEN,
        description_required: true,
    };
}

/// Raw submitted values, before validation.
#[derive(Clone, Debug, Default)]
pub struct ItemForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        ItemForm {
            name: fields.get(Field::Name.as_str()).cloned(),
            description: fields.get(Field::Description.as_str()).cloned(),
        }
    }

    pub fn validate(&self, rules: &FieldRules) -> Result<NewItem, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.as_deref().unwrap_or("");
        if is_blank(name) {
            errors.push(Field::Name, Violation::Required);
        } else if too_long(name, rules.name_max) {
            errors.push(Field::Name, Violation::TooLong { max: rules.name_max });
        }

        let description = self.description.as_deref().unwrap_or("");
        if is_blank(description) {
            if rules.description_required {
                errors.push(Field::Description, Violation::Required);
            }
        } else if too_long(description, rules.description_max) {
            errors.push(Field::Description, Violation::TooLong {
                max: rules.description_max,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewItem {
            name: name.to_string(),
            description: if is_blank(description) {
                String::new()
            } else {
                description.to_string()
            },
        })
    }
}

/// Build a partial update from a JSON object. Absent, null and blank values leave the
/// stored field untouched; non-string values are rejected.
pub fn changes_from_json(body: &Map<String, Value>, rules: &FieldRules) -> Result<ItemChanges, AppError> {
    let mut supplied = [None, None];
    for (slot, field) in supplied.iter_mut().zip(Field::ALL) {
        *slot = match body.get(field.as_str()) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if is_blank(s) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(AppError::InvalidType(field.as_str().to_string())),
        };
    }
    let [name, description] = supplied;

    let mut errors = FieldErrors::default();
    if let Some(n) = &name {
        if too_long(n, rules.name_max) {
            errors.push(Field::Name, Violation::TooLong { max: rules.name_max });
        }
    }
    if let Some(d) = &description {
        if too_long(d, rules.description_max) {
            errors.push(Field::Description, Violation::TooLong {
                max: rules.description_max,
            });
        }
    }
    if !errors.is_empty() {
        return Err(AppError::InvalidForm(errors));
    }
    Ok(ItemChanges { name, description })
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn too_long(s: &str, max: usize) -> bool {
    s.chars().count() > max
}
