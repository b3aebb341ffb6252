//! Configuration model - the registry a domain definition populates
//!
//! A [`ConfigurationModel`] holds the top-level elements of one configuration
//! domain in registration order. Every registration is checked against the
//! model's role taxonomy before anything is stored, so a model is never
//! observable in a partially invalid state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use crate::config::{IndexPolicy, SchemaSettings};
use crate::element::ElementNode;
use crate::error::{Error, Result};
use crate::role::RoleTaxonomy;

/// Named, ordered registry of top-level elements.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use schema_core::{ConfigurationModel, ElementNode, Role, RoleTaxonomy};
///
/// let container = Role::builder("search-providers", "Search Providers").build().unwrap();
/// let roles = Arc::new(RoleTaxonomy::builder().role(container.clone()).build().unwrap());
///
/// let mut model = ConfigurationModel::new("search-providers", roles);
/// let element = ElementNode::builder("Search Providers", "search-providers", "search", &container)
///     .build()
///     .unwrap();
/// model.add_element(element.clone()).unwrap();
///
/// assert!(model.add_element(element).is_err());
/// assert_eq!(model.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigurationModel {
    name: String,
    roles: Arc<RoleTaxonomy>,
    index_policy: IndexPolicy,
    elements: Vec<ElementNode>,
    positions: HashMap<String, usize>,
}

impl ConfigurationModel {
    /// Create an empty model with default settings.
    pub fn new(name: impl Into<String>, roles: Arc<RoleTaxonomy>) -> Self {
        Self::with_settings(name, roles, &SchemaSettings::default())
    }

    /// Create an empty model that applies `settings` to every registration.
    pub fn with_settings(
        name: impl Into<String>,
        roles: Arc<RoleTaxonomy>,
        settings: &SchemaSettings,
    ) -> Self {
        Self {
            name: name.into(),
            roles,
            index_policy: settings.index_policy,
            elements: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Register a top-level element.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateElement`] if the local name is already registered
    /// - [`Error::UnknownRole`] if the element's role or a specialization names
    ///   a role missing from the taxonomy
    /// - [`Error::InvalidSpecialization`] if a specialization names a non-subtype
    /// - [`Error::AmbiguousIndex`] under [`IndexPolicy::Reject`]
    ///
    /// The model is unchanged when an error is returned.
    pub fn add_element(&mut self, element: ElementNode) -> Result<()> {
        self.check(&element)?;
        debug!(
            model = %self.name,
            element = %element.local_name(),
            role = %element.role(),
            "registered element"
        );
        self.push(element);
        Ok(())
    }

    /// Register every element of `other`, in its order.
    ///
    /// Either all elements are registered or, on error, none are.
    pub fn include(&mut self, other: ConfigurationModel) -> Result<()> {
        for element in &other.elements {
            self.check(element)?;
        }
        debug!(
            model = %self.name,
            included = %other.name,
            count = other.elements.len(),
            "included model"
        );
        for element in other.elements {
            self.push(element);
        }
        Ok(())
    }

    fn push(&mut self, element: ElementNode) {
        self.positions
            .insert(element.local_name().to_string(), self.elements.len());
        self.elements.push(element);
    }

    fn check(&self, element: &ElementNode) -> Result<()> {
        if self.positions.contains_key(element.local_name()) {
            return Err(Error::DuplicateElement {
                model: self.name.clone(),
                local_name: element.local_name().to_string(),
            });
        }

        self.roles.role(element.role().as_str())?;

        for (parent, child) in element.specializes() {
            let parent_role = self.roles.role(parent.as_str())?;
            self.roles.role(child.as_str())?;
            if !parent_role.has_subtype(child.as_str()) {
                return Err(Error::InvalidSpecialization {
                    element: element.local_name().to_string(),
                    parent: parent.to_string(),
                    child: child.to_string(),
                });
            }
        }

        if self.index_policy == IndexPolicy::Reject {
            let indexes: Vec<String> = element.index_attributes().map(str::to_string).collect();
            if indexes.len() > 1 {
                return Err(Error::AmbiguousIndex {
                    element: element.local_name().to_string(),
                    attributes: indexes,
                });
            }
        }

        Ok(())
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role taxonomy the model's elements are checked against
    pub fn roles(&self) -> &RoleTaxonomy {
        &self.roles
    }

    /// Shared handle to the role taxonomy
    pub fn roles_handle(&self) -> Arc<RoleTaxonomy> {
        Arc::clone(&self.roles)
    }

    /// Policy applied to elements with several index attributes
    pub fn index_policy(&self) -> IndexPolicy {
        self.index_policy
    }

    /// Registered elements in registration order
    pub fn elements(&self) -> &[ElementNode] {
        &self.elements
    }

    /// Resolve a tag to its element. `None` means the element is unknown.
    pub fn get(&self, local_name: &str) -> Option<&ElementNode> {
        self.positions.get(local_name).map(|&i| &self.elements[i])
    }

    /// Whether an element with the given local name is registered.
    pub fn contains(&self, local_name: &str) -> bool {
        self.positions.contains_key(local_name)
    }

    /// Elements registered with `role`, in registration order.
    pub fn elements_with_role<'a>(
        &'a self,
        role: &'a str,
    ) -> impl Iterator<Item = &'a ElementNode> + 'a {
        self.elements
            .iter()
            .filter(move |element| element.role() == role)
    }

    /// Number of registered elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no elements are registered
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Serialize for ConfigurationModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConfigurationModel", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("roles", self.roles.as_ref())?;
        state.serialize_field("elements", &self.elements)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeNode, AttributeType};
    use crate::role::{Occurrence, Role};
    use pretty_assertions::assert_eq;

    fn roles() -> Arc<RoleTaxonomy> {
        Arc::new(
            RoleTaxonomy::builder()
                .role(
                    Role::builder("search-providers", "Search Providers")
                        .child("search-provider", Occurrence::Many)
                        .build()
                        .unwrap(),
                )
                .role(
                    Role::builder("search-provider", "Search Provider")
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
    }

    fn element(local_name: &str, role: &str) -> ElementNode {
        let role = Role::builder(role, role).build().unwrap();
        ElementNode::builder(local_name, local_name, "search", &role)
            .build()
            .unwrap()
    }

    fn double_index(local_name: &str) -> ElementNode {
        let role = Role::builder("search-provider", "Search Provider")
            .build()
            .unwrap();
        ElementNode::builder(local_name, local_name, "search", &role)
            .attribute(
                AttributeNode::builder("Id", "id", AttributeType::Text)
                    .make_index()
                    .build()
                    .unwrap(),
            )
            .attribute(
                AttributeNode::builder("Token", "token", AttributeType::Text)
                    .make_index()
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_model_is_empty() {
        let model = ConfigurationModel::new("search-providers", roles());
        assert!(model.is_empty());
        assert_eq!(model.len(), 0);
        assert_eq!(model.name(), "search-providers");
        assert_eq!(model.index_policy(), IndexPolicy::FirstMatch);
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut model = ConfigurationModel::new("search-providers", roles());
        model.add_element(element("search-providers", "search-providers")).unwrap();
        model.add_element(element("solr-search-provider", "search-provider")).unwrap();
        model.add_element(element("elastic-search-provider", "search-provider")).unwrap();

        let names: Vec<&str> = model.elements().iter().map(|e| e.local_name()).collect();
        assert_eq!(
            names,
            vec!["search-providers", "solr-search-provider", "elastic-search-provider"]
        );
        assert!(model.contains("elastic-search-provider"));
        assert_eq!(
            model.get("solr-search-provider").map(|e| e.local_name()),
            Some("solr-search-provider")
        );
        assert!(model.get("lucene-search-provider").is_none());
    }

    #[test]
    fn test_duplicate_element_leaves_model_unchanged() {
        let mut model = ConfigurationModel::new("search-providers", roles());
        model.add_element(element("solr-search-provider", "search-provider")).unwrap();

        let err = model
            .add_element(element("solr-search-provider", "search-provider"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateElement {
                model: "search-providers".into(),
                local_name: "solr-search-provider".into(),
            }
        );
        assert!(err.is_definition_error());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let mut model = ConfigurationModel::new("search-providers", roles());
        let err = model
            .add_element(element("solr-search-provider", "search-engine"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownRole {
                role: "search-engine".into()
            }
        );
        assert!(model.is_empty());
    }

    #[test]
    fn test_specialization_checked_against_taxonomy() {
        let strategy = Role::builder("index-strategy", "Index Strategy")
            .subtype("full-text-strategy")
            .build()
            .unwrap();
        let full_text = Role::builder("full-text-strategy", "Full Text").build().unwrap();
        let provider = Role::builder("search-provider", "Search Provider")
            .build()
            .unwrap();
        let specialized = ElementNode::builder("Solr", "solr-search-provider", "search", &provider)
            .specializes(&strategy, &full_text)
            .build()
            .unwrap();

        // The model's taxonomy knows nothing about index strategies.
        let mut model = ConfigurationModel::new("search-providers", roles());
        let err = model.add_element(specialized.clone()).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownRole {
                role: "index-strategy".into()
            }
        );

        let full = Arc::new(
            RoleTaxonomy::builder()
                .role(provider)
                .role(strategy)
                .role(full_text)
                .build()
                .unwrap(),
        );
        let mut model = ConfigurationModel::new("search-providers", full);
        model.add_element(specialized).unwrap();
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_specialization_subtype_checked_against_model_taxonomy() {
        // Same keys, but this taxonomy does not declare the subtype.
        let loose = Role::builder("index-strategy", "Index Strategy")
            .subtype("full-text-strategy")
            .build()
            .unwrap();
        let full_text = Role::builder("full-text-strategy", "Full Text").build().unwrap();
        let provider = Role::builder("search-provider", "Search Provider")
            .build()
            .unwrap();
        let specialized = ElementNode::builder("Solr", "solr-search-provider", "search", &provider)
            .specializes(&loose, &full_text)
            .build()
            .unwrap();

        let strict = Arc::new(
            RoleTaxonomy::builder()
                .role(provider)
                .role(Role::builder("index-strategy", "Index Strategy").build().unwrap())
                .role(full_text)
                .build()
                .unwrap(),
        );
        let mut model = ConfigurationModel::new("search-providers", strict);
        let err = model.add_element(specialized).unwrap_err();
        assert!(matches!(err, Error::InvalidSpecialization { .. }));
    }

    #[test]
    fn test_ambiguous_index_allowed_by_default() {
        let mut model = ConfigurationModel::new("search-providers", roles());
        model.add_element(double_index("solr-search-provider")).unwrap();
        assert_eq!(
            model.get("solr-search-provider").unwrap().index_attribute(),
            Some("id")
        );
    }

    #[test]
    fn test_ambiguous_index_rejected_by_policy() {
        let settings = SchemaSettings {
            index_policy: IndexPolicy::Reject,
        };
        let mut model = ConfigurationModel::with_settings("search-providers", roles(), &settings);
        let err = model
            .add_element(double_index("solr-search-provider"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::AmbiguousIndex {
                element: "solr-search-provider".into(),
                attributes: vec!["id".into(), "token".into()],
            }
        );
        assert!(model.is_empty());
    }

    #[test]
    fn test_include_is_atomic() {
        let mut tenant = ConfigurationModel::new("tenant", roles());
        tenant.add_element(element("solr-search-provider", "search-provider")).unwrap();

        let mut search = ConfigurationModel::new("search-providers", roles());
        search.add_element(element("search-providers", "search-providers")).unwrap();
        search.add_element(element("solr-search-provider", "search-provider")).unwrap();

        let err = tenant.include(search).unwrap_err();
        assert!(matches!(err, Error::DuplicateElement { .. }));
        assert_eq!(tenant.len(), 1);
        assert!(!tenant.contains("search-providers"));
    }

    #[test]
    fn test_include_appends_in_order() {
        let mut tenant = ConfigurationModel::new("tenant", roles());
        let mut search = ConfigurationModel::new("search-providers", roles());
        search.add_element(element("search-providers", "search-providers")).unwrap();
        search.add_element(element("solr-search-provider", "search-provider")).unwrap();

        tenant.include(search).unwrap();
        let names: Vec<&str> = tenant.elements().iter().map(|e| e.local_name()).collect();
        assert_eq!(names, vec!["search-providers", "solr-search-provider"]);
        assert_eq!(tenant.get("solr-search-provider").unwrap().name(), "solr-search-provider");
    }

    #[test]
    fn test_elements_with_role() {
        let mut model = ConfigurationModel::new("search-providers", roles());
        model.add_element(element("search-providers", "search-providers")).unwrap();
        model.add_element(element("solr-search-provider", "search-provider")).unwrap();
        model.add_element(element("elastic-search-provider", "search-provider")).unwrap();

        let providers: Vec<&str> = model
            .elements_with_role("search-provider")
            .map(|e| e.local_name())
            .collect();
        assert_eq!(providers, vec!["solr-search-provider", "elastic-search-provider"]);
    }

    #[test]
    fn test_model_serializes_name_roles_and_elements() {
        let mut model = ConfigurationModel::new("search-providers", roles());
        model.add_element(element("search-providers", "search-providers")).unwrap();

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["name"], "search-providers");
        assert_eq!(value["roles"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["elements"][0]["localName"], "search-providers");
    }

    #[test]
    fn test_assembled_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigurationModel>();
        assert_send_sync::<ElementNode>();
        assert_send_sync::<RoleTaxonomy>();
    }
}
