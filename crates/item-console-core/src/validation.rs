//! Form Validation
//!
//! Client-side mirror of the server's item constraints. Pure and cheap
//! enough to run on every keystroke.

use std::collections::BTreeMap;

use crate::models::{Group, ItemFormData};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

/// Validated form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Group,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Group];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Group => "group",
        }
    }
}

/// At most one message per field; empty means the form is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    fn set(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }
}

/// Validate a form. The first failing rule per field wins.
pub fn validate(form: &ItemFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if let Some(msg) = name_error(&form.name) {
        errors.set(Field::Name, msg);
    }
    if let Some(msg) = group_error(&form.group) {
        errors.set(Field::Group, msg);
    }

    errors
}

fn name_error(name: &str) -> Option<&'static str> {
    let chars = name.trim().chars().count();
    if chars == 0 {
        Some("Name is required")
    } else if chars < NAME_MIN_CHARS {
        Some("Name must be at least 2 characters")
    } else if chars > NAME_MAX_CHARS {
        Some("Name must be 100 characters or less")
    } else {
        None
    }
}

fn group_error(group: &str) -> Option<&'static str> {
    if group.is_empty() {
        Some("Group is required")
    } else if Group::parse(group).is_none() {
        Some("Group must be either Primary or Secondary")
    } else {
        None
    }
}
