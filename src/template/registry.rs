//! Registry for storing templates by name

use hashlink::LinkedHashMap;
use log::debug;

use crate::error::{ModelError, Result};
use crate::group::Group;

use super::definition::Template;

/// Named templates in registration order
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: LinkedHashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its own name
    ///
    /// Empty names and names already in the registry are rejected.
    pub fn register(&mut self, template: Template) -> Result<()> {
        let name = template.name().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.templates.contains_key(&name) {
            return Err(ModelError::DuplicateTemplate { name });
        }

        debug!(
            "registering template '{}' with {} groups",
            name,
            template.groups().len()
        );
        self.templates.insert(name, template);
        Ok(())
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Get a mutable reference to a template
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Template> {
        self.templates.get_mut(name)
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    /// Take a template out of the registry
    pub fn remove(&mut self, name: &str) -> Option<Template> {
        self.templates.remove(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Instantiate the template registered as `name`
    pub fn instantiate(&self, name: &str) -> Result<Group> {
        self.get(name)
            .ok_or_else(|| ModelError::template_not_found(name))?
            .instantiate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str) -> Template {
        let mut template = Template::new(name);
        let mut group = Group::new("DID");
        group.items_mut().add_empty::<String>("ID").unwrap();
        template.add_group(group);
        template
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = TemplateRegistry::new();
        registry.register(template("Did")).expect("Should register");
        assert!(registry.contains("Did"));
        assert!(registry.get("Did").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_duplicate_error() {
        let mut registry = TemplateRegistry::new();
        registry
            .register(template("Did"))
            .expect("First register should succeed");
        let result = registry.register(template("Did"));
        assert!(matches!(result, Err(ModelError::DuplicateTemplate { .. })));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_empty_name() {
        let mut registry = TemplateRegistry::new();
        assert_eq!(
            registry.register(template("")).unwrap_err(),
            ModelError::EmptyName
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_names_in_order() {
        let mut registry = TemplateRegistry::new();
        registry.register(template("Did")).unwrap();
        registry.register(template("Element")).unwrap();
        registry.register(template("Alpha")).unwrap();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["Did", "Element", "Alpha"]
        );

        assert!(registry.remove("Element").is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Did", "Alpha"]);
    }

    #[test]
    fn test_registry_instantiate() {
        let mut registry = TemplateRegistry::new();
        registry.register(template("Did")).unwrap();

        let root = registry.instantiate("Did").unwrap();
        assert_eq!(root.name(), "Did");
        assert_eq!(root.children().len(), 1);

        let err = registry.instantiate("Missing").unwrap_err();
        assert_eq!(err, ModelError::template_not_found("Missing"));
    }
}
