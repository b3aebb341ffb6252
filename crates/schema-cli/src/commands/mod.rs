//! Command implementations for schema-cli

pub mod check;
pub mod lookup;
pub mod models;
pub mod roles;
pub mod show;

pub use check::run_check;
pub use lookup::run_lookup;
pub use models::run_models;
pub use roles::run_roles;
pub use show::run_show;

use schema_core::ConfigurationModel;
use schema_tenant::ModelCatalog;

use crate::error::{CliError, Result};

/// Resolve a model by name, listing the available ones when it is missing.
fn find_model<'a>(catalog: &'a ModelCatalog, name: &str) -> Result<&'a ConfigurationModel> {
    catalog.get(name).ok_or_else(|| {
        CliError::user(format!(
            "Unknown model '{}'. Valid: {}",
            name,
            catalog.names().join(", ")
        ))
    })
}
