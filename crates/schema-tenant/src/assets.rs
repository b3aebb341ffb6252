//! Configuration model for asset management elements.
//!
//! An asset source reads asset records from a file and hands them to exactly
//! one parser. The parser slot is narrowed to a concrete parser type by each
//! source element.

use std::sync::Arc;

use schema_core::{
    AttributeNode, AttributeType, ConfigurationModel, ElementNode, Result, RoleTaxonomy,
    SchemaSettings,
};

use crate::roles;

/// Model name
pub const MODEL_NAME: &str = "asset-management";

/// Element local names
pub mod elements {
    pub const ASSET_MANAGEMENT: &str = "asset-management";
    pub const FILESYSTEM_ASSET_SOURCE: &str = "filesystem-asset-source";
    pub const XML_ASSET_PARSER: &str = "xml-asset-parser";
    pub const JSON_ASSET_PARSER: &str = "json-asset-parser";
}

/// Asset categories a source may provide
pub const ASSET_TYPES: [&str; 4] = ["device", "hardware", "person", "location"];

/// Assemble the asset management model.
pub fn asset_management_model(
    taxonomy: Arc<RoleTaxonomy>,
    settings: &SchemaSettings,
) -> Result<ConfigurationModel> {
    let mut model = ConfigurationModel::with_settings(MODEL_NAME, Arc::clone(&taxonomy), settings);
    model.add_element(asset_management(&taxonomy)?)?;
    model.add_element(filesystem_asset_source(&taxonomy)?)?;
    model.add_element(xml_asset_parser(&taxonomy)?)?;
    model.add_element(json_asset_parser(&taxonomy)?)?;
    Ok(model)
}

fn asset_management(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "Asset Management",
        elements::ASSET_MANAGEMENT,
        "cubes",
        taxonomy.role(roles::ASSET_MANAGEMENT)?,
    )
    .description("Configure asset management.")
    .build()
}

fn filesystem_asset_source(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "Filesystem Asset Source",
        elements::FILESYSTEM_ASSET_SOURCE,
        "folder-open",
        taxonomy.role(roles::ASSET_SOURCE)?,
    )
    .description("Loads assets from a file on the local filesystem.")
    .warn_on_delete("Assets provided by this source will no longer be resolvable.")
    .attribute_group("source", "Source")
    .attribute_group("cache", "Caching")
    .specializes(
        taxonomy.role(roles::ASSET_PARSER)?,
        taxonomy.role(roles::XML_ASSET_PARSER)?,
    )
    .attribute(
        AttributeNode::builder("Id", "id", AttributeType::Text)
            .description("Unique id for the asset source.")
            .make_index()
            .required()
            .group("source")
            .build()?,
    )
    .attribute(
        AttributeNode::builder("Filename", "filename", AttributeType::Text)
            .description("Path of the file assets are loaded from.")
            .required()
            .group("source")
            .build()?,
    )
    .attribute(
        AttributeNode::builder("Asset type", "asset-type", AttributeType::Choice)
            .description("Category of assets provided by the file.")
            .choices(ASSET_TYPES)
            .default_value("device")
            .group("source")
            .build()?,
    )
    .attribute(
        AttributeNode::builder("Refresh interval", "refresh-seconds", AttributeType::Integer)
            .description("Seconds between reloads of the file. Zero disables reloading.")
            .default_value("300")
            .group("cache")
            .build()?,
    )
    .build()
}

fn xml_asset_parser(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "XML Asset Parser",
        elements::XML_ASSET_PARSER,
        "code",
        taxonomy.role(roles::XML_ASSET_PARSER)?,
    )
    .description("Parses assets from an XML document.")
    .attribute(
        AttributeNode::builder("Root element", "root-element", AttributeType::Text)
            .description("Element that wraps the asset entries.")
            .default_value("assets")
            .build()?,
    )
    .attribute(
        AttributeNode::builder("Strict", "strict", AttributeType::Boolean)
            .description("Reject entries with unknown attributes.")
            .default_value("false")
            .build()?,
    )
    .build()
}

fn json_asset_parser(taxonomy: &RoleTaxonomy) -> Result<ElementNode> {
    ElementNode::builder(
        "JSON Asset Parser",
        elements::JSON_ASSET_PARSER,
        "code",
        taxonomy.role(roles::JSON_ASSET_PARSER)?,
    )
    .description("Parses assets from a JSON document.")
    .make_deprecated()
    .attribute(
        AttributeNode::builder("Records path", "records-path", AttributeType::Text)
            .description("Path of the array holding asset entries.")
            .default_value("$.assets")
            .build()?,
    )
    .build()
}
