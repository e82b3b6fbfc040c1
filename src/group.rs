//! Named tree nodes

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::container::Container;
use crate::error::{ModelError, Result};

/// Shared handle to a group
///
/// Children and template prototypes are held through this handle, so a
/// subtree stays valid after it is detached from its parent. Nothing stops a
/// caller from building a cycle; [`Group::deep_clone`] reports one instead of
/// recursing forever.
pub type GroupRef = Rc<RefCell<Group>>;

/// A named node owning one container and an ordered list of children
///
/// `Group` is deliberately not `Clone`: copying the child handles would alias
/// the subtree. Use [`Group::deep_clone`] for an independent copy.
#[derive(Debug, Default)]
pub struct Group {
    name: String,
    items: Container,
    children: Vec<GroupRef>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Container::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &Container {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Container {
        &mut self.items
    }

    pub fn children(&self) -> &[GroupRef] {
        &self.children
    }

    /// Append a child unless this exact handle is already a child
    pub fn add(&mut self, child: GroupRef) {
        if !self.children.iter().any(|c| Rc::ptr_eq(c, &child)) {
            self.children.push(child);
        }
    }

    /// Wrap `child` in a new handle and append it
    pub fn add_group(&mut self, child: Group) -> GroupRef {
        let child = child.into_ref();
        self.add(Rc::clone(&child));
        child
    }

    /// Remove every occurrence of this exact handle
    pub fn remove(&mut self, child: &GroupRef) {
        self.children.retain(|c| !Rc::ptr_eq(c, child));
    }

    /// First direct child named `name`
    ///
    /// Children that are mutably borrowed at the time are skipped.
    pub fn find_child(&self, name: &str) -> Option<GroupRef> {
        self.children
            .iter()
            .find(|c| c.try_borrow().map_or(false, |c| c.name == name))
            .cloned()
    }

    pub fn into_ref(self) -> GroupRef {
        Rc::new(RefCell::new(self))
    }

    /// Independent copy of the whole subtree
    ///
    /// Every group, container and item is copied; the result shares no state
    /// with `self`. Fails with [`ModelError::CircularGroup`] when a group is
    /// reachable from itself and with [`ModelError::GroupBorrowed`] when a
    /// descendant is mutably borrowed.
    pub fn deep_clone(&self) -> Result<Group> {
        self.clone_subtree(None)
    }

    fn clone_subtree<'a>(&'a self, parent: Option<&'a Ancestry<'a>>) -> Result<Group> {
        trace!("cloning group '{}'", self.name);
        let here = Ancestry::new(self, parent);

        let mut copy = Group::new(self.name.clone());
        copy.items = self.items.clone();

        for child in &self.children {
            let child = child
                .try_borrow()
                .map_err(|_| ModelError::group_borrowed(&self.name))?;
            if let Some(chain) = here.cycle_through(&child) {
                return Err(ModelError::circular(chain));
            }
            let child_copy = child.clone_subtree(Some(&here))?;
            copy.children.push(child_copy.into_ref());
        }

        Ok(copy)
    }
}

/// Groups on the way from the start of a walk down to the current one
pub(crate) struct Ancestry<'a> {
    group: &'a Group,
    parent: Option<&'a Ancestry<'a>>,
}

impl<'a> Ancestry<'a> {
    pub(crate) fn new(group: &'a Group, parent: Option<&'a Ancestry<'a>>) -> Self {
        Self { group, parent }
    }

    /// Names along the loop that stepping into `group` would close
    ///
    /// Starts and ends with `group`'s name; `None` when `group` is not on the
    /// path.
    pub(crate) fn cycle_through(&self, group: &Group) -> Option<Vec<String>> {
        let mut path = Vec::new();
        let mut node = Some(self);
        while let Some(ancestry) = node {
            path.push(ancestry.group);
            node = ancestry.parent;
        }
        path.reverse();

        let start = path.iter().position(|g| std::ptr::eq(*g, group))?;
        let mut chain: Vec<String> = path[start..].iter().map(|g| g.name.clone()).collect();
        chain.push(group.name.clone());
        Some(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str) -> Group {
        let mut group = Group::new("ELEMENT");
        group
            .items_mut()
            .add_value("NAME", name.to_string())
            .unwrap()
            .set_required();
        group
    }

    #[test]
    fn test_add_same_child_twice() {
        let mut parent = Group::new("DID");
        let child = element("a").into_ref();
        parent.add(Rc::clone(&child));
        parent.add(Rc::clone(&child));
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn test_add_group_by_value() {
        let mut parent = Group::new("DID");
        parent.add_group(element("a"));
        parent.add_group(element("a"));
        assert_eq!(parent.children().len(), 2);
    }

    #[test]
    fn test_remove_child() {
        let mut parent = Group::new("DID");
        let a = parent.add_group(element("a"));
        let b = parent.add_group(element("b"));
        parent.remove(&a);
        assert_eq!(parent.children().len(), 1);
        assert!(Rc::ptr_eq(&parent.children()[0], &b));

        // absent handle is a no-op
        parent.remove(&a);
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn test_find_child() {
        let mut parent = Group::new("DID");
        parent.add_group(Group::new("HEADER"));
        let first = parent.add_group(element("a"));
        parent.add_group(element("b"));
        let found = parent.find_child("ELEMENT").unwrap();
        assert!(Rc::ptr_eq(&found, &first));
        assert!(parent.find_child("MISSING").is_none());
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let mut parent = Group::new("DID");
        parent.items_mut().add_empty::<String>("ID").unwrap();
        let child = parent.add_group(element("a"));

        let copy = parent.deep_clone().unwrap();
        assert_eq!(copy.name(), "DID");
        assert_eq!(copy.children().len(), 1);
        assert!(!Rc::ptr_eq(&copy.children()[0], &child));

        copy.children()[0]
            .borrow_mut()
            .items_mut()
            .set("NAME", "b".to_string())
            .unwrap();
        let original_name = child.borrow().items().get_as::<String>("NAME").unwrap().data().cloned();
        assert_eq!(original_name.as_deref(), Some("a"));
        assert!(copy.children()[0]
            .borrow()
            .items()
            .get("NAME")
            .unwrap()
            .is_required());
    }

    #[test]
    fn test_deep_clone_detects_cycle() {
        let root = Group::new("A").into_ref();
        let b = root.borrow_mut().add_group(Group::new("B"));
        b.borrow_mut().add(Rc::clone(&root));

        let err = root.borrow().deep_clone().unwrap_err();
        assert_eq!(
            err,
            ModelError::circular(vec!["A".to_string(), "B".to_string(), "A".to_string()])
        );

        // break the cycle so the handles can be freed
        b.borrow_mut().remove(&root);
    }

    #[test]
    fn test_deep_clone_detects_self_loop() {
        let root = Group::new("A").into_ref();
        root.borrow_mut().add(Rc::clone(&root));

        let err = root.borrow().deep_clone().unwrap_err();
        assert_eq!(
            err,
            ModelError::circular(vec!["A".to_string(), "A".to_string()])
        );

        root.borrow_mut().remove(&root);
    }

    #[test]
    fn test_same_child_twice_in_subtree_is_not_a_cycle() {
        let mut parent = Group::new("DID");
        let shared = element("a").into_ref();
        let header = parent.add_group(Group::new("HEADER"));
        header.borrow_mut().add(Rc::clone(&shared));
        parent.add(Rc::clone(&shared));

        let copy = parent.deep_clone().unwrap();
        assert_eq!(copy.children().len(), 2);
        assert_eq!(copy.children()[0].borrow().children().len(), 1);
    }

    #[test]
    fn test_deep_clone_with_mutably_borrowed_child() {
        let mut parent = Group::new("DID");
        let child = parent.add_group(element("a"));

        let guard = child.borrow_mut();
        let err = parent.deep_clone().unwrap_err();
        assert_eq!(err, ModelError::group_borrowed("DID"));
        assert!(parent.find_child("ELEMENT").is_none());
        drop(guard);

        assert!(parent.deep_clone().is_ok());
        assert!(parent.find_child("ELEMENT").is_some());
    }
}
