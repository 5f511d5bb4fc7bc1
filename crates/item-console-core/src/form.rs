//! Item Form Controller
//!
//! Field values, touched tracking and derived validity for one form session.

use std::collections::BTreeSet;

use crate::models::ItemFormData;
use crate::validation::{self, Field, ValidationErrors, NAME_MAX_CHARS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFormState {
    data: ItemFormData,
    touched: BTreeSet<Field>,
}

impl ItemFormState {
    /// Fresh form, optionally seeded from an existing item
    pub fn new(initial: Option<ItemFormData>) -> Self {
        Self {
            data: initial.unwrap_or_default(),
            touched: BTreeSet::new(),
        }
    }

    pub fn data(&self) -> &ItemFormData {
        &self.data
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.data.name,
            Field::Group => &self.data.group,
        }
    }

    pub fn set_value(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.data.name = value,
            Field::Group => self.data.group = value,
        }
    }

    /// Field lost focus
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn any_touched(&self) -> bool {
        !self.touched.is_empty()
    }

    pub fn errors(&self) -> ValidationErrors {
        validation::validate(&self.data)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Error for display; hidden until the field has been touched
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if self.is_touched(field) {
            self.errors().get(field)
        } else {
            None
        }
    }

    /// Messages for the summary box, shown once anything has been touched
    pub fn summary(&self) -> Vec<&'static str> {
        if !self.any_touched() {
            return Vec::new();
        }
        self.errors().iter().map(|(_, msg)| msg).collect()
    }

    /// Raw (untrimmed) name length, as the counter shows it
    pub fn name_char_count(&self) -> usize {
        self.data.name.chars().count()
    }

    pub fn name_too_long(&self) -> bool {
        self.name_char_count() > NAME_MAX_CHARS
    }

    /// Attempt to submit. Touches every field; on success returns the
    /// payload with the name trimmed.
    pub fn submit(&mut self) -> Result<ItemFormData, ValidationErrors> {
        self.touched.extend(Field::ALL);
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ItemFormData {
            name: self.data.name.trim().to_string(),
            group: self.data.group.clone(),
        })
    }
}

/// Body of the duplicate-name modal
pub fn duplicate_message(data: &ItemFormData) -> String {
    format!(
        "An item named \"{}\" already exists in the {} group.",
        data.name.trim(),
        data.group
    )
}
