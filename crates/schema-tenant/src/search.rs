//! Configuration model for search provider elements.

use std::sync::Arc;

use schema_core::{
    AttributeNode, AttributeType, ConfigurationModel, ElementNode, Result, RoleTaxonomy,
    SchemaSettings,
};

use crate::roles;

/// Model name
pub const MODEL_NAME: &str = "search-providers";

/// Element local names
pub mod elements {
    pub const SEARCH_PROVIDERS: &str = "search-providers";
    pub const SOLR_SEARCH_PROVIDER: &str = "solr-search-provider";
}

/// Assemble the search providers model.
pub fn search_providers_model(
    taxonomy: Arc<RoleTaxonomy>,
    settings: &SchemaSettings,
) -> Result<ConfigurationModel> {
    let mut model = ConfigurationModel::with_settings(MODEL_NAME, Arc::clone(&taxonomy), settings);
    model.add_element(search_providers(&taxonomy)?)?;
    model.add_element(solr_search_provider(&taxonomy)?)?;
    Ok(model)
}

/// Container for search provider configuration.
fn search_providers(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "Search Providers",
        elements::SEARCH_PROVIDERS,
        "search",
        taxonomy.role(roles::SEARCH_PROVIDERS)?,
    )
    .description("Configure search providers.")
    .build()
}

/// Provider that delegates search to a linked Solr instance.
fn solr_search_provider(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "Solr Search Provider",
        elements::SOLR_SEARCH_PROVIDER,
        "search",
        taxonomy.role(roles::SEARCH_PROVIDER)?,
    )
    .description("Provider that delegates search tasks to a linked Solr instance.")
    .attribute(
        AttributeNode::builder("Id", "id", AttributeType::Text)
            .description("Unique id for search provider.")
            .default_value("solr")
            .make_index()
            .build()?,
    )
    .attribute(
        AttributeNode::builder("Name", "name", AttributeType::Text)
            .description("Name shown for search provider.")
            .default_value(" Apache Solr")
            .build()?,
    )
    .build()
}
