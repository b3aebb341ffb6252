//! Show the role taxonomy

use colored::Colorize;
use schema_core::{Occurrence, Role};
use schema_tenant::ModelCatalog;

use crate::config::CliConfig;
use crate::error::Result;

/// Run the roles command
pub fn run_roles(catalog: &ModelCatalog, config: &CliConfig, json: bool) -> Result<()> {
    let roles = catalog.roles();

    if json {
        println!("{}", config.to_json(roles)?);
        return Ok(());
    }

    println!("{}", "Roles".bold());
    println!();
    for role in roles.roles() {
        print_role(role);
    }

    Ok(())
}

fn print_role(role: &Role) {
    let mut flags = Vec::new();
    if role.is_permanent() {
        flags.push("permanent");
    }
    if role.is_reorderable() {
        flags.push("reorderable");
    }

    if flags.is_empty() {
        println!("  {} ({})", role.key().as_str().green(), role.name());
    } else {
        println!(
            "  {} ({}) {}",
            role.key().as_str().green(),
            role.name(),
            flags.join(", ").dimmed()
        );
    }

    for rule in role.children() {
        let specialized = if rule.requires_specialization() {
            " specialized"
        } else {
            ""
        };
        println!(
            "    {} {}{}",
            occurrence_label(rule.occurrence()),
            rule.role(),
            specialized.yellow()
        );
    }
    if !role.subtypes().is_empty() {
        let subtypes: Vec<&str> = role.subtypes().iter().map(|key| key.as_str()).collect();
        println!("    {} {}", "subtypes:".dimmed(), subtypes.join(", "));
    }
}

fn occurrence_label(occurrence: Occurrence) -> &'static str {
    match occurrence {
        Occurrence::Forbidden => "0  ",
        Occurrence::ExactlyOne => "1  ",
        Occurrence::ZeroOrOne => "0..1",
        Occurrence::Many => "0..*",
    }
}
