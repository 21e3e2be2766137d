//! Transient text input owned by the presentation layer: the add dialog's
//! fields and the draft of an inline edit.

use crate::store::{Item, ItemId, DEFAULT_QUANTITY};

/// Which text field has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Quantity,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            FormField::Name => FormField::Quantity,
            FormField::Quantity => FormField::Name,
        }
    }
}

/// A pair of name/quantity text fields with one focused
pub trait TextForm {
    fn focus(&self) -> FormField;

    fn set_focus(&mut self, focus: FormField);

    fn field(&self, field: FormField) -> &str;

    fn field_mut(&mut self, field: FormField) -> &mut String;

    fn focused_text(&self) -> &str {
        self.field(self.focus())
    }

    fn push_char(&mut self, c: char) {
        let focus = self.focus();
        self.field_mut(focus).push(c);
    }

    fn pop_char(&mut self) {
        let focus = self.focus();
        self.field_mut(focus).pop();
    }

    fn toggle_focus(&mut self) {
        self.set_focus(self.focus().toggle());
    }
}

/// Input of the "Add Shopping Item" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    pub name: String,
    pub quantity: String,
    pub focus: FormField,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
            focus: FormField::Name,
        }
    }
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to an empty name and the default quantity
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl TextForm for AddForm {
    fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, focus: FormField) {
        self.focus = focus;
    }

    fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Quantity => &self.quantity,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Quantity => &mut self.quantity,
        }
    }
}

/// Unsaved changes to the item currently in edit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: ItemId,
    pub name: String,
    pub quantity: String,
    pub focus: FormField,
}

impl EditDraft {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity.to_string(),
            focus: FormField::Name,
        }
    }
}

impl TextForm for EditDraft {
    fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, focus: FormField) {
        self.focus = focus;
    }

    fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Quantity => &self.quantity,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Quantity => &mut self.quantity,
        }
    }
}
