//! Show a model and its elements

use colored::Colorize;
use schema_core::{AttributeNode, ElementNode};
use schema_tenant::ModelCatalog;

use super::find_model;
use crate::config::CliConfig;
use crate::error::Result;

/// Run the show command
pub fn run_show(catalog: &ModelCatalog, config: &CliConfig, model: &str, json: bool) -> Result<()> {
    let model = find_model(catalog, model)?;

    if json {
        println!("{}", config.to_json(model)?);
        return Ok(());
    }

    println!(
        "{} ({} elements, index policy: {})",
        model.name().bold(),
        model.len(),
        model.index_policy()
    );
    println!();

    for element in model.elements() {
        print_element(element);
        println!();
    }

    Ok(())
}

/// Print one element with its attributes, grouped when groups are declared.
pub(crate) fn print_element(element: &ElementNode) {
    let mut header = format!(
        "{} <{}> [{}]",
        element.name().bold(),
        element.local_name().green(),
        element.role().as_str().cyan()
    );
    if element.is_deprecated() {
        header.push_str(&format!(" {}", "deprecated".yellow()));
    }
    println!("  {}", header);

    if let Some(description) = element.description() {
        println!("    {}", description.dimmed());
    }
    if let Some(warning) = element.on_delete_warning() {
        println!("    {} {}", "on delete:".yellow(), warning);
    }
    for (parent, subtype) in element.specializes() {
        println!("    {} {} -> {}", "specializes:".dimmed(), parent, subtype);
    }

    if element.attribute_groups().is_empty() {
        for attribute in element.attributes() {
            print_attribute(attribute, "    ");
        }
        return;
    }

    for (id, title) in element.attribute_groups() {
        println!("    {}:", title.bold());
        for attribute in element.attributes_in_group(id) {
            print_attribute(attribute, "      ");
        }
    }
    for attribute in element.attributes().iter().filter(|a| a.group().is_none()) {
        print_attribute(attribute, "    ");
    }
}

fn print_attribute(attribute: &AttributeNode, indent: &str) {
    let mut line = format!(
        "{}{} ({})",
        indent,
        attribute.local_name(),
        attribute.attribute_type()
    );
    if let Some(default) = attribute.default_value() {
        line.push_str(&format!(" = {:?}", default));
    }
    if !attribute.choices().is_empty() {
        line.push_str(&format!(" [{}]", attribute.choices().join("|")));
    }
    if attribute.is_index() {
        line.push_str(&format!(" {}", "index".magenta()));
    }
    if attribute.is_required() {
        line.push_str(&format!(" {}", "required".red()));
    }
    println!("{}", line);
}
