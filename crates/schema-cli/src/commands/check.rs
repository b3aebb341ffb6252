//! Check the built-in models for consistency

use colored::Colorize;
use schema_core::{ConfigurationModel, RoleKey};
use schema_tenant::ModelCatalog;

use crate::error::{CliError, Result};

/// Run the check command
///
/// The catalog is already assembled, so every registration-time check has
/// passed. This adds the checks the engine leaves to domain definitions.
pub fn run_check(catalog: &ModelCatalog) -> Result<()> {
    if let Some(cycle) = catalog.roles().find_cycle() {
        let path: Vec<&str> = cycle.iter().map(RoleKey::as_str).collect();
        return Err(CliError::user(format!(
            "Role nesting cycle: {}",
            path.join(" -> ")
        )));
    }
    println!("{} role taxonomy is acyclic", "ok".green().bold());

    let mut open_slots = 0;
    for model in catalog.models() {
        let open = open_specialized_slots(model);
        for (element, slot) in &open {
            println!(
                "{} {}: element {} leaves {} unspecialized",
                "warning".yellow().bold(),
                model.name(),
                element,
                slot
            );
        }
        open_slots += open.len();
        println!(
            "{} {} ({} elements)",
            "ok".green().bold(),
            model.name(),
            model.len()
        );
    }

    if open_slots > 0 {
        tracing::warn!(open_slots, "elements leave specialized slots open");
    }
    Ok(())
}

/// Elements whose role hosts a child slot requiring specialization that the
/// element does not narrow.
fn open_specialized_slots(model: &ConfigurationModel) -> Vec<(String, String)> {
    let mut open = Vec::new();
    for element in model.elements() {
        for rule in model.roles().legal_children(element.role().as_str()) {
            if rule.requires_specialization()
                && element.specialization_for(rule.role().as_str()).is_none()
            {
                open.push((element.local_name().to_string(), rule.role().to_string()));
            }
        }
    }
    open
}
