//! Catalog of built-in configuration models
//!
//! The catalog assembles every built-in model once, against a single shared
//! role taxonomy, and hands out read-only references afterwards.

use std::sync::Arc;

use schema_core::{ConfigurationModel, ElementNode, Result, RoleTaxonomy, SchemaSettings};
use tracing::debug;

use crate::assets::asset_management_model;
use crate::roles::{self, tenant_roles};
use crate::search::search_providers_model;

/// Name of the tenant-wide composite model
pub const TENANT_MODEL: &str = "tenant";

/// Local name of the tenant configuration root element
pub const TENANT_ROOT: &str = "tenant-configuration";

/// Assembled built-in models sharing one role taxonomy.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    roles: Arc<RoleTaxonomy>,
    models: Vec<ConfigurationModel>,
}

impl ModelCatalog {
    /// Assemble every built-in model with `settings`.
    ///
    /// Models are listed per domain first, followed by the tenant composite.
    pub fn with_builtins(settings: &SchemaSettings) -> Result<Self> {
        let taxonomy = Arc::new(tenant_roles()?);

        let search = search_providers_model(Arc::clone(&taxonomy), settings)?;
        let assets = asset_management_model(Arc::clone(&taxonomy), settings)?;
        let tenant = tenant_model(&taxonomy, settings, [search.clone(), assets.clone()])?;

        let models = vec![search, assets, tenant];
        debug!(
            models = models.len(),
            roles = taxonomy.len(),
            "assembled model catalog"
        );
        Ok(Self {
            roles: taxonomy,
            models,
        })
    }

    /// Shared role taxonomy
    pub fn roles(&self) -> &RoleTaxonomy {
        &self.roles
    }

    pub fn models(&self) -> &[ConfigurationModel] {
        &self.models
    }

    pub fn get(&self, name: &str) -> Option<&ConfigurationModel> {
        self.models.iter().find(|model| model.name() == name)
    }

    /// Model names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(ConfigurationModel::name).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Compose the tenant-wide model: the root element followed by every
/// element of each domain model, in order.
pub fn tenant_model(
    taxonomy: &Arc<RoleTaxonomy>,
    settings: &SchemaSettings,
    domains: impl IntoIterator<Item = ConfigurationModel>,
) -> Result<ConfigurationModel> {
    let mut model = ConfigurationModel::with_settings(TENANT_MODEL, Arc::clone(taxonomy), settings);
    model.add_element(tenant_root(taxonomy)?)?;
    for domain in domains {
        model.include(domain)?;
    }
    Ok(model)
}

fn tenant_root(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "Tenant Configuration",
        TENANT_ROOT,
        "cogs",
        taxonomy.role(roles::TENANT_CONFIGURATION)?,
    )
    .description("Root of the configuration for a single tenant.")
    .namespace("http://sitewhere.io/schema/sitewhere/tenant")
    .build()
}
