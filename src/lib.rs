//! TreeCode - typed hierarchical data modelling
//!
//! Define reusable templates of named, typed, optionally constrained fields,
//! organise them into groups, nest groups into trees, and instantiate
//! templates into independent trees whose fields can be set, validated and
//! queried.
//!
//! # Example
//!
//! ```rust
//! use treecode::{Group, Template};
//!
//! let mut element = Group::new("ELEMENT");
//! element.items_mut().add_empty::<String>("NAME").unwrap().set_required();
//! element
//!     .items_mut()
//!     .add_choices("TYPE", vec!["uint8".to_string(), "uint16".to_string()])
//!     .unwrap();
//!
//! let mut template = Template::new("Did");
//! template.add_group(element);
//!
//! let first = template.instantiate().unwrap();
//! let second = template.instantiate().unwrap();
//!
//! first.children()[0]
//!     .borrow_mut()
//!     .items_mut()
//!     .set("NAME", "Interface1".to_string())
//!     .unwrap();
//!
//! let untouched = second.children()[0].borrow();
//! assert_eq!(untouched.items().get_as::<String>("NAME").unwrap().data(), None);
//! ```

pub mod container;
pub mod error;
pub mod group;
pub mod item;
pub mod render;
pub mod template;

pub use container::Container;
pub use error::{ErrorKind, ModelError, Result};
pub use group::{Group, GroupRef};
pub use item::{Field, FieldValue, Item};
pub use render::{render_tree, StyleError, TreeStyle};
pub use template::{Template, TemplateRegistry};
