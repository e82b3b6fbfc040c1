//! Error types for the data model

use thiserror::Error;

/// Broad category of a [`ModelError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the operation cannot accept
    InvalidArgument,
    /// A key lookup went past what the container holds
    OutOfRange,
    /// A named template or group does not exist
    NotFound,
}

/// Errors raised by items, containers, groups and templates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("\"{key}\" - the key already exists in the container")]
    KeyAlreadyExists { key: String },

    #[error("\"{key}\" - the key was not found in the container")]
    KeyNotFound { key: String },

    /// A keyed item exists but holds a different value type
    #[error("\"{key}\" - the item does not hold values of type {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("\"{value}\" - the value is not in the allowed values list")]
    ValueNotAllowed { value: String },

    #[error("the allowed values list is empty")]
    ChoicesEmpty,

    /// Choices were requested from an unconstrained item
    #[error("allowed values are only available on choice-constrained items")]
    ChoicesMissing,

    #[error("\"{name}\" - the group was not found in the template")]
    GroupNotFound { name: String },

    /// A group is reachable from itself
    #[error("circular group reference detected: {}", chain.join(" -> "))]
    CircularGroup { chain: Vec<String> },

    /// A group that has to be read is mutably borrowed elsewhere
    #[error("\"{name}\" - a group under it is mutably borrowed and cannot be read")]
    GroupBorrowed { name: String },

    #[error("template names cannot be empty")]
    EmptyName,

    #[error("\"{name}\" - duplicate template definition")]
    DuplicateTemplate { name: String },

    #[error("\"{name}\" - the template was not found in the registry")]
    TemplateNotFound { name: String },
}

impl ModelError {
    pub fn key_already_exists(key: impl Into<String>) -> Self {
        Self::KeyAlreadyExists { key: key.into() }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn type_mismatch(key: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
        }
    }

    pub fn value_not_allowed(value: impl ToString) -> Self {
        Self::ValueNotAllowed {
            value: value.to_string(),
        }
    }

    pub fn group_not_found(name: impl Into<String>) -> Self {
        Self::GroupNotFound { name: name.into() }
    }

    pub fn circular(chain: Vec<String>) -> Self {
        Self::CircularGroup { chain }
    }

    pub fn group_borrowed(name: impl Into<String>) -> Self {
        Self::GroupBorrowed { name: name.into() }
    }

    pub fn template_not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Category of the failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotFound { .. } => ErrorKind::OutOfRange,
            Self::GroupNotFound { .. } | Self::TemplateNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ModelError>;
