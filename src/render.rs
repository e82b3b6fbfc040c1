//! Plain-text tree rendering
//!
//! Walks a group tree through its read accessors only (name, items,
//! children) and draws it with ASCII branch glyphs. The glyphs and labels come
//! from a [`TreeStyle`], which can be loaded from TOML:
//!
//! ```toml
//! root_label = "* "
//! show_choices = true
//! ```
//!
//! Keys left out of the file keep their default values.

use std::path::Path;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::group::{Ancestry, Group};
use crate::item::Field;

/// Errors that can occur when loading a tree style
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Failed to read tree style file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse tree style TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Glyphs and labels used by [`render_tree`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeStyle {
    /// Prefix for an entry with more siblings after it
    pub branch: String,
    /// Prefix for the last entry of a group
    pub last_branch: String,
    /// Continuation of a branch that has more siblings below
    pub pipe: String,
    /// Indentation under a finished branch
    pub blank: String,
    pub root_label: String,
    pub child_label: String,
    pub required_marker: String,
    pub optional_marker: String,
    /// Append the allowed values of choice-constrained items
    pub show_choices: bool,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            branch: "|-- ".to_string(),
            last_branch: "+-- ".to_string(),
            pipe: "|   ".to_string(),
            blank: "    ".to_string(),
            root_label: "ROOT: ".to_string(),
            child_label: "CHILD: ".to_string(),
            required_marker: " (Required)".to_string(),
            optional_marker: " (Optional)".to_string(),
            show_choices: false,
        }
    }
}

impl TreeStyle {
    /// Create a new style with default glyphs
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a style from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StyleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a style from a TOML string
    pub fn from_str(content: &str) -> Result<Self, StyleError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the labels printed before the root and child group names
    pub fn with_labels(mut self, root: impl Into<String>, child: impl Into<String>) -> Self {
        self.root_label = root.into();
        self.child_label = child.into();
        self
    }

    /// Enable or disable listing the allowed values of constrained items
    pub fn with_choices(mut self, show: bool) -> Self {
        self.show_choices = show;
        self
    }
}

/// Render `root` and everything below it
pub fn render_tree(root: &Group, style: &TreeStyle) -> String {
    let mut renderer = Renderer {
        style,
        out: String::new(),
    };
    renderer.group(root, None, true, "");
    renderer.out
}

struct Renderer<'a> {
    style: &'a TreeStyle,
    out: String,
}

impl Renderer<'_> {
    fn line(&mut self, line: &str) {
        self.out.push_str(line.trim_end());
        self.out.push('\n');
    }

    fn group<'g>(
        &mut self,
        group: &'g Group,
        parent: Option<&'g Ancestry<'g>>,
        last: bool,
        parent_indent: &str,
    ) {
        let style = self.style;
        let mut indent = parent_indent.to_string();
        let label = if parent.is_none() {
            &style.root_label
        } else {
            self.line(&format!("{}{}", indent, style.pipe));
            indent.push_str(self.glyph(last));
            &style.child_label
        };
        self.line(&format!("{}{}{}", indent, label, group.name()));

        let next_indent = format!(
            "{}{}",
            parent_indent,
            if last { &style.blank } else { &style.pipe }
        );
        let child_count = group.children().len();
        let item_count = group.items().len();

        for (i, (key, field)) in group.items().iter().enumerate() {
            let last_entry = i + 1 == item_count && child_count == 0;
            let line = format!(
                "{}{}{}",
                next_indent,
                self.glyph(last_entry),
                self.field(key, field)
            );
            self.line(&line);
        }

        let here = Ancestry::new(group, parent);
        for (i, child) in group.children().iter().enumerate() {
            let last_child = i + 1 == child_count;
            let child = match child.try_borrow() {
                Ok(child) => child,
                Err(err) => {
                    warn!("skipping a child of '{}': {}", group.name(), err);
                    self.placeholder(&next_indent, last_child, "<unavailable>");
                    continue;
                }
            };
            if let Some(chain) = here.cycle_through(&child) {
                warn!("not descending into a cycle: {}", chain.join(" -> "));
                self.placeholder(&next_indent, last_child, "<cycle>");
                continue;
            }
            self.group(&child, Some(&here), last_child, &next_indent);
        }
    }

    fn placeholder(&mut self, indent: &str, last: bool, text: &str) {
        self.line(&format!("{}{}", indent, self.style.pipe));
        let line = format!("{}{}{}", indent, self.glyph(last), text);
        self.line(&line);
    }

    fn glyph(&self, last: bool) -> &str {
        if last {
            &self.style.last_branch
        } else {
            &self.style.branch
        }
    }

    fn field(&self, key: &str, field: &dyn Field) -> String {
        let value = field.display_value().unwrap_or_else(|| "none".to_string());
        let marker = if field.is_required() {
            &self.style.required_marker
        } else {
            &self.style.optional_marker
        };
        let mut text = format!("{} ==> Value: {}{}", key, value, marker);
        if self.style.show_choices && field.is_choice_constrained() {
            text.push_str(&format!(" [{}]", field.display_choices().join(", ")));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn did() -> Group {
        let mut group = Group::new("DID");
        group.items_mut().add_empty::<String>("ID").unwrap();
        group
            .items_mut()
            .add_choices("TYPE", vec!["NORMAL".to_string(), "EXTENDED".to_string()])
            .unwrap();
        group
    }

    #[test]
    fn test_default_style() {
        let style = TreeStyle::default();
        assert_eq!(style.branch, "|-- ");
        assert_eq!(style.last_branch, "+-- ");
        assert!(!style.show_choices);
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let style = TreeStyle::from_str(
            r#"
root_label = "* "
show_choices = true
"#,
        )
        .expect("Should parse");
        assert_eq!(style.root_label, "* ");
        assert!(style.show_choices);
        assert_eq!(style.child_label, "CHILD: ");
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = TreeStyle::from_str("show_choices = {{{{");
        assert!(matches!(result, Err(StyleError::ParseError(_))));
    }

    #[test]
    fn test_render_leaf_group() {
        let out = render_tree(&did(), &TreeStyle::default());
        assert_eq!(
            out,
            "ROOT: DID\n    |-- ID ==> Value: none (Optional)\n    +-- TYPE ==> Value: NORMAL (Required)\n"
        );
    }

    #[test]
    fn test_render_with_choices() {
        let style = TreeStyle::new().with_choices(true).with_labels("", "");
        let out = render_tree(&did(), &style);
        assert!(out.starts_with("DID\n"));
        assert!(out.contains("TYPE ==> Value: NORMAL (Required) [NORMAL, EXTENDED]"));
    }

    #[test]
    fn test_render_cycle_does_not_loop() {
        let root = did().into_ref();
        let child = root.borrow_mut().add_group(Group::new("ELEMENT"));
        child.borrow_mut().add(std::rc::Rc::clone(&root));

        let out = render_tree(&root.borrow(), &TreeStyle::default());
        assert_eq!(
            out,
            "ROOT: DID\n    |-- ID ==> Value: none (Optional)\n    |-- TYPE ==> Value: NORMAL (Required)\n    |\n    +-- CHILD: ELEMENT\n        |\n        +-- <cycle>\n"
        );

        child.borrow_mut().remove(&root);
    }

    #[test]
    fn test_render_mutably_borrowed_child() {
        let mut root = Group::new("DID");
        let busy = root.add_group(Group::new("ELEMENT"));
        root.add_group(Group::new("HEADER"));

        let guard = busy.borrow_mut();
        let out = render_tree(&root, &TreeStyle::default());
        drop(guard);
        assert_eq!(
            out,
            "ROOT: DID\n    |\n    |-- <unavailable>\n    |\n    +-- CHILD: HEADER\n"
        );
    }

    #[test]
    fn test_render_shared_child_is_not_a_cycle() {
        let mut root = Group::new("DID");
        let shared = Group::new("ELEMENT").into_ref();
        root.add(std::rc::Rc::clone(&shared));
        root.add_group(Group::new("HEADER"))
            .borrow_mut()
            .add(std::rc::Rc::clone(&shared));

        let out = render_tree(&root, &TreeStyle::default());
        assert!(!out.contains("<cycle>"));
        assert_eq!(out.matches("CHILD: ELEMENT").count(), 2);
    }
}
