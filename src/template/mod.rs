//! Templates and the registry that holds them
//!
//! A [`Template`] is a named set of prototype groups. Instantiating it
//! deep-clones the prototypes, so every instance can be filled in without
//! touching the template or any other instance.
//!
//! # Example
//!
//! ```rust
//! use treecode::{Group, Template};
//!
//! let mut did = Group::new("DID");
//! did.items_mut().add_empty::<String>("ID").unwrap();
//! did.items_mut()
//!     .add_choices("TYPE", vec!["NORMAL".to_string(), "EXTENDED".to_string()])
//!     .unwrap();
//!
//! let mut template = Template::new("Did");
//! template.add_group(did);
//!
//! let mut instance = template.instantiate_group("DID").unwrap();
//! instance.items_mut().set("ID", "FD01".to_string()).unwrap();
//! assert!(instance.items_mut().set("TYPE", "uint8".to_string()).is_err());
//! ```

mod definition;
mod registry;

pub use definition::Template;
pub use registry::TemplateRegistry;
