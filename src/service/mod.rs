//! ItemService: CRUD over the items table, plus submitted-field validation.

mod items;
mod validation;
pub use items::ItemService;
pub use validation::{
    changes_from_json, Field, FieldErrors, FieldRules, ItemForm, Violation, DESCRIPTION_MAX_LEN,
    NAME_MAX_LEN,
};
