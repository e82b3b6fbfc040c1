//! Typed fields and their type-erased handle
//!
//! An [`Item<T>`] holds an optional value of one declared type, optionally
//! restricted to a closed list of choices. Containers store items behind the
//! [`Field`] trait so that generic code can walk a tree without knowing each
//! field's type, while typed code gets its `Item<T>` back through a checked
//! downcast.

use std::any::{type_name, Any};
use std::fmt;

use crate::error::{ModelError, Result};

/// Bounds every item value type must satisfy
pub trait FieldValue: Clone + PartialEq + fmt::Debug + 'static {}

impl<T> FieldValue for T where T: Clone + PartialEq + fmt::Debug + 'static {}

/// Text form of a value: strings and chars as-is, anything else through `Debug`
pub(crate) fn format_value<T: FieldValue>(value: &T) -> String {
    let any = value as &dyn Any;
    if let Some(s) = any.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = any.downcast_ref::<&'static str>() {
        s.to_string()
    } else if let Some(c) = any.downcast_ref::<char>() {
        c.to_string()
    } else {
        format!("{:?}", value)
    }
}

/// A typed field with an optional value and an optional closed choice set
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    value: Option<T>,
    choices: Vec<T>,
    required: bool,
}

impl<T: FieldValue> Default for Item<T> {
    fn default() -> Self {
        Self {
            value: None,
            choices: Vec::new(),
            required: false,
        }
    }
}

impl<T: FieldValue> Item<T> {
    /// Unconstrained, unset and optional
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconstrained with `value` already set
    pub fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Restricted to `choices`
    ///
    /// The first choice becomes the value and the item is marked required.
    /// An empty list is rejected.
    pub fn with_choices(choices: Vec<T>) -> Result<Self> {
        let first = choices.first().cloned().ok_or(ModelError::ChoicesEmpty)?;
        Ok(Self {
            value: Some(first),
            choices,
            required: true,
        })
    }

    /// Mark the item required, builder style
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Store a new value
    ///
    /// On a choice-constrained item the value must be one of the choices;
    /// otherwise the stored value is left as it was.
    pub fn set(&mut self, value: T) -> Result<()> {
        if self.is_choice_constrained() && !self.choices.contains(&value) {
            return Err(ModelError::value_not_allowed(format_value(&value)));
        }
        self.value = Some(value);
        Ok(())
    }

    /// Current value, if any
    pub fn data(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Allowed values of a choice-constrained item
    pub fn choices(&self) -> Result<&[T]> {
        if self.is_choice_constrained() {
            Ok(&self.choices)
        } else {
            Err(ModelError::ChoicesMissing)
        }
    }

    pub fn is_choice_constrained(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Mark the item required. There is no way back to optional.
    pub fn set_required(&mut self) {
        self.required = true;
    }
}

/// Type-erased view of an [`Item<T>`]
pub trait Field: Any + fmt::Debug + 'static {
    fn is_required(&self) -> bool;

    fn set_required(&mut self);

    fn is_choice_constrained(&self) -> bool;

    fn is_set(&self) -> bool;

    /// The value as text; strings verbatim, other types through `Debug`
    fn display_value(&self) -> Option<String>;

    /// The allowed values as text, empty when unconstrained
    fn display_choices(&self) -> Vec<String>;

    /// Name of the declared value type
    fn type_name(&self) -> &'static str;

    /// Independent copy with the same declared type
    fn clone_field(&self) -> Box<dyn Field>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: FieldValue> Field for Item<T> {
    fn is_required(&self) -> bool {
        Item::is_required(self)
    }

    fn set_required(&mut self) {
        Item::set_required(self)
    }

    fn is_choice_constrained(&self) -> bool {
        Item::is_choice_constrained(self)
    }

    fn is_set(&self) -> bool {
        Item::is_set(self)
    }

    fn display_value(&self) -> Option<String> {
        self.value.as_ref().map(format_value)
    }

    fn display_choices(&self) -> Vec<String> {
        self.choices.iter().map(format_value).collect()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn clone_field(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn Field {
    /// Checked downcast to the concrete item type
    pub fn downcast_ref<T: FieldValue>(&self) -> Option<&Item<T>> {
        self.as_any().downcast_ref::<Item<T>>()
    }

    /// Checked mutable downcast to the concrete item type
    pub fn downcast_mut<T: FieldValue>(&mut self) -> Option<&mut Item<T>> {
        self.as_any_mut().downcast_mut::<Item<T>>()
    }

    pub fn is<T: FieldValue>(&self) -> bool {
        self.as_any().is::<Item<T>>()
    }
}

impl Clone for Box<dyn Field> {
    fn clone(&self) -> Self {
        self.clone_field()
    }
}
