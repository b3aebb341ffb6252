//! Tenant role taxonomy
//!
//! ```text
//! tenant-configuration
//! ├── search-providers
//! │   └── search-provider*
//! └── asset-management
//!     └── asset-source*
//!         └── asset-parser (specialized: xml-asset-parser | json-asset-parser)
//! ```

use schema_core::{Occurrence, Result, Role, RoleTaxonomy};

pub const TENANT_CONFIGURATION: &str = "tenant-configuration";
pub const SEARCH_PROVIDERS: &str = "search-providers";
pub const SEARCH_PROVIDER: &str = "search-provider";
pub const ASSET_MANAGEMENT: &str = "asset-management";
pub const ASSET_SOURCE: &str = "asset-source";
pub const ASSET_PARSER: &str = "asset-parser";
pub const XML_ASSET_PARSER: &str = "xml-asset-parser";
pub const JSON_ASSET_PARSER: &str = "json-asset-parser";

/// Build the role taxonomy shared by every tenant model.
pub fn tenant_roles() -> Result<RoleTaxonomy> {
    RoleTaxonomy::builder()
        .role(
            Role::builder(TENANT_CONFIGURATION, "Tenant Configuration")
                .description("Root of a tenant configuration document.")
                .permanent()
                .child(SEARCH_PROVIDERS, Occurrence::ZeroOrOne)
                .child(ASSET_MANAGEMENT, Occurrence::ZeroOrOne)
                .build()?,
        )
        .role(
            Role::builder(SEARCH_PROVIDERS, "Search Providers")
                .permanent()
                .child(SEARCH_PROVIDER, Occurrence::Many)
                .build()?,
        )
        .role(
            Role::builder(SEARCH_PROVIDER, "Search Provider")
                .reorderable()
                .build()?,
        )
        .role(
            Role::builder(ASSET_MANAGEMENT, "Asset Management")
                .permanent()
                .child(ASSET_SOURCE, Occurrence::Many)
                .build()?,
        )
        .role(
            Role::builder(ASSET_SOURCE, "Asset Source")
                .reorderable()
                .specialized_child(ASSET_PARSER, Occurrence::ExactlyOne)
                .build()?,
        )
        .role(
            Role::builder(ASSET_PARSER, "Asset Parser")
                .description("Turns raw asset data into asset records.")
                .subtype(XML_ASSET_PARSER)
                .subtype(JSON_ASSET_PARSER)
                .build()?,
        )
        .role(Role::builder(XML_ASSET_PARSER, "XML Asset Parser").build()?)
        .role(Role::builder(JSON_ASSET_PARSER, "JSON Asset Parser").build()?)
        .build()
}
