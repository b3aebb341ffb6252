//! List built-in models

use colored::Colorize;
use schema_tenant::ModelCatalog;

use crate::error::Result;

/// Run the models command
pub fn run_models(catalog: &ModelCatalog) -> Result<()> {
    println!("{}", "Configuration Models".bold());
    println!();

    for model in catalog.models() {
        println!(
            "  {:<18} {} elements",
            model.name().green(),
            model.len()
        );
    }

    println!();
    println!(
        "{} {} models available. Use {} to inspect one.",
        "Total:".dimmed(),
        catalog.len(),
        "schema show <model>".cyan()
    );

    Ok(())
}
