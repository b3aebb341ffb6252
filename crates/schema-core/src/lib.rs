//! Schema description engine for tenant configuration.
//!
//! This crate describes which configuration elements and attributes a
//! tenant may declare, independent of any concrete document:
//!
//! - [`AttributeNode`] - one configurable attribute (type, default, flags)
//! - [`ElementNode`] - one configurable element and its attributes
//! - [`RoleTaxonomy`] - roles governing legal nesting and specialization
//! - [`ConfigurationModel`] - the ordered registry a domain definition populates
//!
//! Nodes are assembled once through consuming builders and are immutable
//! afterwards, so an assembled model can be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use schema_core::{AttributeNode, AttributeType, ConfigurationModel, ElementNode, Role, RoleTaxonomy};
//!
//! let provider = Role::builder("search-provider", "Search Provider").build().unwrap();
//! let roles = Arc::new(RoleTaxonomy::builder().role(provider.clone()).build().unwrap());
//!
//! let element = ElementNode::builder("Solr Search Provider", "solr-search-provider", "search", &provider)
//!     .attribute(
//!         AttributeNode::builder("Id", "id", AttributeType::Text)
//!             .default_value("solr")
//!             .make_index()
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut model = ConfigurationModel::new("search-providers", roles);
//! model.add_element(element).unwrap();
//! assert_eq!(model.get("solr-search-provider").unwrap().index_attribute(), Some("id"));
//! ```

pub mod attribute;
pub mod config;
pub mod element;
pub mod error;
pub mod model;
pub mod role;

mod wire;

pub use attribute::{AttributeBuilder, AttributeNode, AttributeType};
pub use config::{IndexPolicy, SchemaSettings};
pub use element::{ElementBuilder, ElementNode};
pub use error::{Error, Result};
pub use model::ConfigurationModel;
pub use role::{ChildRule, Occurrence, Role, RoleBuilder, RoleKey, RoleTaxonomy, RoleTaxonomyBuilder};
