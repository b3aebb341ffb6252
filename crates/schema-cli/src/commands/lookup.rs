//! Resolve an element tag within a model

use schema_tenant::ModelCatalog;

use super::find_model;
use super::show::print_element;
use crate::config::CliConfig;
use crate::error::{CliError, Result};

/// Run the lookup command
pub fn run_lookup(
    catalog: &ModelCatalog,
    config: &CliConfig,
    model: &str,
    local_name: &str,
    json: bool,
) -> Result<()> {
    let model = find_model(catalog, model)?;
    let element = model.get(local_name).ok_or_else(|| {
        CliError::user(format!(
            "Unknown element '{}' in model '{}'",
            local_name,
            model.name()
        ))
    })?;

    if json {
        println!("{}", config.to_json(element)?);
    } else {
        print_element(element);
        let legal: Vec<&str> = model
            .roles()
            .legal_children(element.role().as_str())
            .map(|rule| rule.role().as_str())
            .collect();
        if !legal.is_empty() {
            println!("    children: {}", legal.join(", "));
        }
    }

    Ok(())
}
