//! Element nodes - one configurable element of a configuration document
//!
//! An [`ElementNode`] is assembled through [`ElementBuilder`], which is
//! consumed by every step. Once `build()` returns, the node cannot be reached
//! through the builder again.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attribute::AttributeNode;
use crate::error::{Error, Result};
use crate::role::{Role, RoleKey};
use crate::wire::{is_false, ordered};

/// Description of one configurable element.
///
/// Deserialized elements are replayed through [`ElementBuilder`], so they
/// hold the same guarantees as built ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawElementNode")]
pub struct ElementNode {
    name: String,
    local_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    role: RoleKey,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<AttributeNode>,
    /// Parent role -> required subtype, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "ordered::serialize")]
    specializes: Vec<(RoleKey, RoleKey)>,
    /// Group id -> display title, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "ordered::serialize")]
    attribute_groups: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    on_delete_warning: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    deprecated: bool,
}

/// Wire form of [`ElementNode`] before it is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElementNode {
    name: String,
    local_name: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
    role: RoleKey,
    #[serde(default)]
    attributes: Vec<AttributeNode>,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    specializes: Vec<(RoleKey, RoleKey)>,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    attribute_groups: Vec<(String, String)>,
    #[serde(default)]
    on_delete_warning: Option<String>,
    #[serde(default)]
    deprecated: bool,
}

/// Subtypes are not checked here: without the taxonomy that is left to
/// [`ConfigurationModel::add_element`](crate::ConfigurationModel::add_element).
impl TryFrom<RawElementNode> for ElementNode {
    type Error = Error;

    fn try_from(raw: RawElementNode) -> Result<Self> {
        let mut builder = ElementBuilder {
            node: ElementNode {
                name: raw.name,
                local_name: raw.local_name,
                icon: raw.icon,
                description: raw.description,
                namespace: raw.namespace,
                role: raw.role,
                attributes: raw.attributes,
                specializes: Vec::new(),
                attribute_groups: Vec::new(),
                on_delete_warning: raw.on_delete_warning,
                deprecated: raw.deprecated,
            },
            pending: None,
        };
        for (parent, child) in raw.specializes {
            builder.set_specialization(parent, child);
        }
        for (id, title) in raw.attribute_groups {
            builder = builder.attribute_group(id, title);
        }
        builder.build()
    }
}

impl ElementNode {
    /// Start building an element.
    pub fn builder(
        name: impl Into<String>,
        local_name: impl Into<String>,
        icon: impl Into<String>,
        role: &Role,
    ) -> ElementBuilder {
        ElementBuilder {
            node: ElementNode {
                name: name.into(),
                local_name: local_name.into(),
                icon: icon.into(),
                description: None,
                namespace: None,
                role: role.key().clone(),
                attributes: Vec::new(),
                specializes: Vec::new(),
                attribute_groups: Vec::new(),
                on_delete_warning: None,
                deprecated: false,
            },
            pending: None,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name of the element in a configuration document
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Icon shown for the element in the editor
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Help text shown for the element
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// XML namespace the element belongs to
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Role that decides where the element may nest
    pub fn role(&self) -> &RoleKey {
        &self.role
    }

    /// Attributes in display order
    pub fn attributes(&self) -> &[AttributeNode] {
        &self.attributes
    }

    /// Attribute with the given local name
    pub fn attribute(&self, local_name: &str) -> Option<&AttributeNode> {
        self.attributes
            .iter()
            .find(|attribute| attribute.local_name() == local_name)
    }

    /// Specializations as (parent role, required subtype) pairs
    pub fn specializes(&self) -> &[(RoleKey, RoleKey)] {
        &self.specializes
    }

    /// Subtype that children in the `parent` slot must have beneath this element.
    pub fn specialization_for(&self, parent: &str) -> Option<&RoleKey> {
        self.specializes
            .iter()
            .find(|(key, _)| key == parent)
            .map(|(_, subtype)| subtype)
    }

    /// Attribute groups as (id, title) pairs in display order
    pub fn attribute_groups(&self) -> &[(String, String)] {
        &self.attribute_groups
    }

    /// Display title of the attribute group `id`
    pub fn attribute_group_title(&self, id: &str) -> Option<&str> {
        self.attribute_groups
            .iter()
            .find(|(group, _)| group == id)
            .map(|(_, title)| title.as_str())
    }

    /// Attributes placed in the group `id`, in display order.
    pub fn attributes_in_group<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a AttributeNode> + 'a {
        self.attributes
            .iter()
            .filter(move |attribute| attribute.group() == Some(id))
    }

    /// Message shown before the element is deleted in the editor
    pub fn on_delete_warning(&self) -> Option<&str> {
        self.on_delete_warning.as_deref()
    }

    /// Whether the element is kept only for existing documents
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Local name of the first attribute flagged as index, in declaration order.
    pub fn index_attribute(&self) -> Option<&str> {
        self.index_attributes().next()
    }

    /// Local names of every attribute flagged as index.
    pub fn index_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|attribute| attribute.is_index())
            .map(AttributeNode::local_name)
    }
}

/// Consuming builder for [`ElementNode`].
#[derive(Debug)]
#[must_use]
pub struct ElementBuilder {
    node: ElementNode,
    pending: Option<Error>,
}

impl ElementBuilder {
    /// Set the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.node.description = Some(description.into());
        self
    }

    /// Set the XML namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.node.namespace = Some(namespace.into());
        self
    }

    /// Append an attribute. Call order is display order.
    pub fn attribute(mut self, attribute: AttributeNode) -> Self {
        self.node.attributes.push(attribute);
        self
    }

    /// Require children filling `parent` beneath this element to be `child`.
    ///
    /// `child` must be a declared subtype of `parent`. Declaring the same
    /// parent again replaces the earlier subtype.
    pub fn specializes(mut self, parent: &Role, child: &Role) -> Self {
        if !parent.has_subtype(child.key().as_str()) {
            self.pending.get_or_insert_with(|| Error::InvalidSpecialization {
                element: self.node.local_name.clone(),
                parent: parent.key().to_string(),
                child: child.key().to_string(),
            });
            return self;
        }

        self.set_specialization(parent.key().clone(), child.key().clone());
        self
    }

    fn set_specialization(&mut self, parent: RoleKey, child: RoleKey) {
        match self
            .node
            .specializes
            .iter_mut()
            .find(|(key, _)| *key == parent)
        {
            Some((_, existing)) => *existing = child,
            None => self.node.specializes.push((parent, child)),
        }
    }

    /// Declare an attribute group. Declaring the same id again replaces its title.
    pub fn attribute_group(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        let (id, title) = (id.into(), title.into());
        match self
            .node
            .attribute_groups
            .iter_mut()
            .find(|(group, _)| *group == id)
        {
            Some((_, existing)) => *existing = title,
            None => self.node.attribute_groups.push((id, title)),
        }
        self
    }

    /// Show `warning` before the element is deleted in the editor.
    pub fn warn_on_delete(mut self, warning: impl Into<String>) -> Self {
        self.node.on_delete_warning = Some(warning.into());
        self
    }

    /// Mark the element as deprecated.
    pub fn make_deprecated(mut self) -> Self {
        self.node.deprecated = true;
        self
    }

    /// Finish the element.
    ///
    /// More than one index attribute is logged as a warning; the first one in
    /// declaration order is the element's index.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSpecialization`] if a specialization named a non-subtype
    /// - [`Error::DuplicateAttribute`] if two attributes share a local name
    /// - [`Error::UnknownAttributeGroup`] if an attribute names an undeclared group
    pub fn build(self) -> Result<ElementNode> {
        if let Some(err) = self.pending {
            return Err(err);
        }
        let node = self.node;

        for (i, attribute) in node.attributes.iter().enumerate() {
            if node.attributes[..i]
                .iter()
                .any(|earlier| earlier.local_name() == attribute.local_name())
            {
                return Err(Error::DuplicateAttribute {
                    element: node.local_name.clone(),
                    local_name: attribute.local_name().to_string(),
                });
            }

            if let Some(group) = attribute.group()
                && node.attribute_group_title(group).is_none()
            {
                return Err(Error::UnknownAttributeGroup {
                    element: node.local_name.clone(),
                    attribute: attribute.local_name().to_string(),
                    group: group.to_string(),
                });
            }
        }

        let indexes: Vec<&str> = node.index_attributes().collect();
        if indexes.len() > 1 {
            warn!(
                element = %node.local_name,
                attributes = ?indexes,
                "multiple index attributes, using the first"
            );
        }

        Ok(node)
    }
}
