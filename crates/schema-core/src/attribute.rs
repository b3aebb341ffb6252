//! Attribute nodes - one configurable attribute of an element
//!
//! An [`AttributeNode`] is assembled through [`AttributeBuilder`]. The builder
//! checks that the default value is representable as the declared type, so an
//! assembled attribute never carries a default its editor could not display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wire::is_false;

/// Declared value type of an attribute.
///
/// Serialized names are the ones the configuration console renders forms from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    /// Free-form text
    #[serde(rename = "String")]
    Text,
    /// `true` or `false`
    Boolean,
    /// Signed 64-bit integer
    Integer,
    /// Finite floating point number
    Decimal,
    /// One value out of a declared list of choices
    Choice,
}

impl AttributeType {
    /// Check whether `value` is representable as this type.
    ///
    /// `choices` is only consulted for [`AttributeType::Choice`].
    pub fn accepts(&self, value: &str, choices: &[String]) -> bool {
        match self {
            AttributeType::Text => true,
            AttributeType::Boolean => matches!(value, "true" | "false"),
            AttributeType::Integer => value.parse::<i64>().is_ok(),
            AttributeType::Decimal => value.parse::<f64>().is_ok_and(f64::is_finite),
            AttributeType::Choice => choices.iter().any(|choice| choice == value),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Text => write!(f, "text"),
            AttributeType::Boolean => write!(f, "boolean"),
            AttributeType::Integer => write!(f, "integer"),
            AttributeType::Decimal => write!(f, "decimal"),
            AttributeType::Choice => write!(f, "choice"),
        }
    }
}

/// Description of one configurable attribute.
///
/// Deserialized attributes pass through [`AttributeBuilder::build`], so they
/// hold the same guarantees as built ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAttributeNode")]
pub struct AttributeNode {
    name: String,
    local_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    choices: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    index: bool,
    #[serde(skip_serializing_if = "is_false")]
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

/// Wire form of [`AttributeNode`] before it is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttributeNode {
    name: String,
    local_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    #[serde(default)]
    default_value: Option<String>,
    #[serde(default)]
    choices: Vec<String>,
    #[serde(default)]
    index: bool,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    group: Option<String>,
}

impl TryFrom<RawAttributeNode> for AttributeNode {
    type Error = Error;

    fn try_from(raw: RawAttributeNode) -> Result<Self> {
        AttributeBuilder {
            node: AttributeNode {
                name: raw.name,
                local_name: raw.local_name,
                description: raw.description,
                attribute_type: raw.attribute_type,
                default_value: raw.default_value,
                choices: raw.choices,
                index: raw.index,
                required: raw.required,
                group: raw.group,
            },
        }
        .build()
    }
}

impl AttributeNode {
    /// Start building an attribute with its required fields.
    pub fn builder(
        name: impl Into<String>,
        local_name: impl Into<String>,
        attribute_type: AttributeType,
    ) -> AttributeBuilder {
        AttributeBuilder {
            node: AttributeNode {
                name: name.into(),
                local_name: local_name.into(),
                description: None,
                attribute_type,
                default_value: None,
                choices: Vec::new(),
                index: false,
                required: false,
                group: None,
            },
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the attribute as it appears in a configuration document
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Help text shown next to the attribute
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared value type
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    /// Value used when a document omits the attribute
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Legal values of a choice attribute, in display order
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Whether this attribute is the natural unique key of its element
    pub fn is_index(&self) -> bool {
        self.index
    }

    /// Whether a document must set the attribute
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Attribute group this attribute is displayed in, if any
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// Consuming builder for [`AttributeNode`].
#[derive(Debug)]
#[must_use]
pub struct AttributeBuilder {
    node: AttributeNode,
}

impl AttributeBuilder {
    /// Set the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.node.description = Some(description.into());
        self
    }

    /// Set the default value. It is checked against the declared type by
    /// [`build`](Self::build).
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.node.default_value = Some(value.into());
        self
    }

    /// Mark the attribute as the natural unique key of its element.
    pub fn make_index(mut self) -> Self {
        self.node.index = true;
        self
    }

    /// Require documents to set the attribute.
    pub fn required(mut self) -> Self {
        self.node.required = true;
        self
    }

    /// Place the attribute in an attribute group declared on the element.
    pub fn group(mut self, id: impl Into<String>) -> Self {
        self.node.group = Some(id.into());
        self
    }

    /// Append one legal value for a choice attribute.
    pub fn choice(mut self, value: impl Into<String>) -> Self {
        self.node.choices.push(value.into());
        self
    }

    /// Append several legal values for a choice attribute.
    pub fn choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node.choices.extend(values.into_iter().map(Into::into));
        self
    }

    /// Finish the attribute.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingChoices`] for a choice attribute without choices
    /// - [`Error::UnexpectedChoices`] for choices on any other type
    /// - [`Error::InvalidDefault`] if the default is not representable as the type
    pub fn build(self) -> Result<AttributeNode> {
        let node = self.node;

        match (node.attribute_type, node.choices.is_empty()) {
            (AttributeType::Choice, true) => {
                return Err(Error::MissingChoices {
                    attribute: node.local_name,
                });
            }
            (AttributeType::Choice, false) | (_, true) => {}
            (attribute_type, false) => {
                return Err(Error::UnexpectedChoices {
                    attribute: node.local_name,
                    attribute_type,
                });
            }
        }

        if let Some(value) = &node.default_value
            && !node.attribute_type.accepts(value, &node.choices)
        {
            return Err(Error::InvalidDefault {
                attribute: node.local_name.clone(),
                expected: node.attribute_type,
                value: value.clone(),
            });
        }

        Ok(node)
    }
}
