//! Error types for schema-core

use crate::attribute::AttributeType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Element '{local_name}' is already registered in model '{model}'")]
    DuplicateElement { model: String, local_name: String },

    #[error("Attribute '{local_name}' is declared twice on element '{element}'")]
    DuplicateAttribute { element: String, local_name: String },

    #[error("Default value '{value}' of attribute '{attribute}' is not a valid {expected}")]
    InvalidDefault {
        attribute: String,
        expected: AttributeType,
        value: String,
    },

    #[error("Choice attribute '{attribute}' declares no choices")]
    MissingChoices { attribute: String },

    #[error("Attribute '{attribute}' of type {attribute_type} cannot declare choices")]
    UnexpectedChoices {
        attribute: String,
        attribute_type: AttributeType,
    },

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("Role '{role}' is declared twice")]
    DuplicateRole { role: String },

    #[error("Role '{role}' declares child role '{child}' more than once")]
    DuplicateChildRole { role: String, child: String },

    #[error("Element '{element}' specializes '{parent}' as '{child}', which is not a subtype of it")]
    InvalidSpecialization {
        element: String,
        parent: String,
        child: String,
    },

    #[error("Attribute '{attribute}' of element '{element}' references unknown group '{group}'")]
    UnknownAttributeGroup {
        element: String,
        attribute: String,
        group: String,
    },

    #[error("Element '{element}' marks more than one index attribute: {}", attributes.join(", "))]
    AmbiguousIndex {
        element: String,
        attributes: Vec<String>,
    },

    #[error("Invalid schema settings: {message}")]
    InvalidSettings { message: String },

    #[error("Invalid index policy: {policy}")]
    InvalidIndexPolicy { policy: String },
}

impl Error {
    /// Whether this error describes an inconsistent schema definition,
    /// as opposed to a settings problem.
    pub fn is_definition_error(&self) -> bool {
        !matches!(
            self,
            Error::InvalidSettings { .. } | Error::InvalidIndexPolicy { .. }
        )
    }
}
