//! Insertion-ordered storage of type-erased items

use std::any::type_name;

use hashlink::linked_hash_map::Entry;
use hashlink::LinkedHashMap;

use crate::error::{ModelError, Result};
use crate::item::{Field, FieldValue, Item};

/// Ordered mapping from keys to items of any declared type
///
/// Keys are unique and iterate in insertion order. Cloning a container is
/// deep: every item is copied through [`Field::clone_field`].
#[derive(Debug, Clone, Default)]
pub struct Container {
    items: LinkedHashMap<String, Box<dyn Field>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a typed item under `key`
    ///
    /// Fails without touching the container if `key` is already taken.
    pub fn add<T: FieldValue>(
        &mut self,
        key: impl Into<String>,
        item: Item<T>,
    ) -> Result<&mut Item<T>> {
        let key = key.into();
        let field = self.insert(key.clone(), Box::new(item))?;
        field
            .downcast_mut::<T>()
            .ok_or_else(|| ModelError::type_mismatch(key, type_name::<T>()))
    }

    /// Insert an unset, unconstrained item
    pub fn add_empty<T: FieldValue>(&mut self, key: impl Into<String>) -> Result<&mut Item<T>> {
        self.add(key, Item::new())
    }

    /// Insert an unconstrained item holding `value`
    pub fn add_value<T: FieldValue>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<&mut Item<T>> {
        self.add(key, Item::with_value(value))
    }

    /// Insert an item restricted to `choices`
    pub fn add_choices<T: FieldValue>(
        &mut self,
        key: impl Into<String>,
        choices: Vec<T>,
    ) -> Result<&mut Item<T>> {
        let item = Item::with_choices(choices)?;
        self.add(key, item)
    }

    /// Insert a pre-built handle
    pub fn insert(&mut self, key: impl Into<String>, field: Box<dyn Field>) -> Result<&mut dyn Field> {
        match self.items.entry(key.into()) {
            Entry::Occupied(entry) => Err(ModelError::key_already_exists(entry.key().as_str())),
            Entry::Vacant(entry) => Ok(&mut **entry.insert(field)),
        }
    }

    /// Type-erased lookup
    pub fn get(&self, key: &str) -> Result<&dyn Field> {
        self.items
            .get(key)
            .map(|field| &**field)
            .ok_or_else(|| ModelError::key_not_found(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut dyn Field> {
        self.items
            .get_mut(key)
            .map(|field| &mut **field)
            .ok_or_else(|| ModelError::key_not_found(key))
    }

    /// Typed lookup
    ///
    /// Returns `None` both for a missing key and for an item of another type.
    pub fn get_as<T: FieldValue>(&self, key: &str) -> Option<&Item<T>> {
        self.items.get(key).and_then(|field| field.downcast_ref::<T>())
    }

    pub fn get_as_mut<T: FieldValue>(&mut self, key: &str) -> Option<&mut Item<T>> {
        self.items
            .get_mut(key)
            .and_then(|field| field.downcast_mut::<T>())
    }

    /// Set the value of the item under `key`
    pub fn set<T: FieldValue>(&mut self, key: &str, value: T) -> Result<()> {
        self.get_mut(key)?
            .downcast_mut::<T>()
            .ok_or_else(|| ModelError::type_mismatch(key, type_name::<T>()))?
            .set(value)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|k| k.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Field)> {
        self.items.iter().map(|(k, field)| (k.as_str(), &**field))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Remove `key`, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.items.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
