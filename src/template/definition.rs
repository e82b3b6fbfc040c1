//! Template definition and instantiation

use std::rc::Rc;

use log::debug;

use crate::error::{ModelError, Result};
use crate::group::{Group, GroupRef};

/// A named collection of prototype groups
#[derive(Debug, Default)]
pub struct Template {
    name: String,
    groups: Vec<GroupRef>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a prototype group
    ///
    /// Prototype names are not checked for uniqueness; lookups by name use
    /// the first match.
    pub fn add(&mut self, group: GroupRef) {
        self.groups.push(group);
    }

    /// Wrap `group` in a new handle and append it as a prototype
    pub fn add_group(&mut self, group: Group) -> GroupRef {
        let group = group.into_ref();
        self.add(Rc::clone(&group));
        group
    }

    /// Prototype groups in insertion order
    pub fn groups(&self) -> &[GroupRef] {
        &self.groups
    }

    /// First prototype named `name`
    ///
    /// Prototypes that are mutably borrowed at the time are skipped.
    pub fn group(&self, name: &str) -> Option<&GroupRef> {
        self.groups
            .iter()
            .find(|g| g.try_borrow().map_or(false, |g| g.name() == name))
    }

    /// Build a root group named after the template whose children are
    /// independent copies of every prototype
    pub fn instantiate(&self) -> Result<Group> {
        debug!(
            "instantiating template '{}' ({} prototype groups)",
            self.name,
            self.groups.len()
        );
        let mut root = Group::new(self.name.clone());
        for prototype in &self.groups {
            let prototype = prototype
                .try_borrow()
                .map_err(|_| ModelError::group_borrowed(&self.name))?;
            root.add_group(prototype.deep_clone()?);
        }
        Ok(root)
    }

    /// Independent copy of the first prototype named `name`
    ///
    /// A mutably borrowed prototype cannot be ruled out as the match, so when
    /// no readable prototype matches and one was busy the error is
    /// [`ModelError::GroupBorrowed`] rather than [`ModelError::GroupNotFound`].
    pub fn instantiate_group(&self, name: &str) -> Result<Group> {
        debug!("instantiating group '{}' of template '{}'", name, self.name);
        let mut busy = false;
        for prototype in &self.groups {
            match prototype.try_borrow() {
                Ok(prototype) if prototype.name() == name => return prototype.deep_clone(),
                Ok(_) => {}
                Err(_) => busy = true,
            }
        }
        if busy {
            Err(ModelError::group_borrowed(&self.name))
        } else {
            Err(ModelError::group_not_found(name))
        }
    }
}
