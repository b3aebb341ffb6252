//! End-to-end integration tests for the schema engine and its consumers
//!
//! A small document checker stands in for the configuration parser: it
//! resolves every tag against the tenant model and applies the role
//! constraints the model declares. The engine itself enforces none of this.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use schema_core::{ConfigurationModel, ElementNode, SchemaSettings};
use schema_tenant::ModelCatalog;
use schema_tenant::catalog::TENANT_MODEL;

/// Parsed configuration document node
struct Doc {
    tag: &'static str,
    attrs: Vec<(&'static str, &'static str)>,
    children: Vec<Doc>,
}

fn doc(tag: &'static str, attrs: &[(&'static str, &'static str)], children: Vec<Doc>) -> Doc {
    Doc {
        tag,
        attrs: attrs.to_vec(),
        children,
    }
}

#[derive(Debug, PartialEq)]
enum Violation {
    UnknownElement(String),
    UnknownAttribute { element: String, attribute: String },
    InvalidValue { element: String, attribute: String },
    MissingRequired { element: String, attribute: String },
    IllegalChild { parent: String, child: String },
    Occurrence { parent: String, role: String, count: usize },
    NotSpecialized { parent: String, child: String },
    DuplicateKey { element: String, key: String },
}

fn check(model: &ConfigurationModel, node: &Doc) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_node(model, node, &mut violations);
    violations
}

fn check_node(model: &ConfigurationModel, node: &Doc, out: &mut Vec<Violation>) {
    let Some(element) = model.get(node.tag) else {
        out.push(Violation::UnknownElement(node.tag.to_string()));
        return;
    };

    check_attributes(element, node, out);

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut keys: HashMap<(&str, &str), usize> = HashMap::new();
    for child in &node.children {
        let Some(child_element) = model.get(child.tag) else {
            out.push(Violation::UnknownElement(child.tag.to_string()));
            continue;
        };

        match slot_for(model, element, child_element) {
            Some(slot) => *counts.entry(slot).or_default() += 1,
            None => out.push(Violation::IllegalChild {
                parent: node.tag.to_string(),
                child: child.tag.to_string(),
            }),
        }

        if let Some(index) = child_element.index_attribute()
            && let Some((_, value)) = child.attrs.iter().find(|(name, _)| *name == index)
        {
            let seen = keys.entry((child.tag, *value)).or_default();
            *seen += 1;
            if *seen == 2 {
                out.push(Violation::DuplicateKey {
                    element: child.tag.to_string(),
                    key: value.to_string(),
                });
            }
        }

        if let Some(rule) = model
            .roles()
            .legal_children(element.role().as_str())
            .find(|rule| model.roles().is_subtype(rule.role().as_str(), child_element.role().as_str()))
            && rule.requires_specialization()
            && element.specialization_for(rule.role().as_str()) != Some(child_element.role())
        {
            out.push(Violation::NotSpecialized {
                parent: node.tag.to_string(),
                child: child.tag.to_string(),
            });
        }

        check_node(model, child, out);
    }

    for rule in model.roles().legal_children(element.role().as_str()) {
        let count = counts.get(rule.role().as_str()).copied().unwrap_or(0);
        if !rule.occurrence().permits(count) {
            out.push(Violation::Occurrence {
                parent: node.tag.to_string(),
                role: rule.role().to_string(),
                count,
            });
        }
    }
}

/// Child slot of `parent` filled by `child`: its own role, or the generic
/// role it is a subtype of.
fn slot_for(model: &ConfigurationModel, parent: &ElementNode, child: &ElementNode) -> Option<String> {
    let roles = model.roles();
    roles
        .legal_children(parent.role().as_str())
        .find(|rule| {
            rule.role() == child.role() || roles.is_subtype(rule.role().as_str(), child.role().as_str())
        })
        .map(|rule| rule.role().to_string())
}

fn check_attributes(element: &ElementNode, node: &Doc, out: &mut Vec<Violation>) {
    for (name, value) in &node.attrs {
        match element.attribute(name) {
            None => out.push(Violation::UnknownAttribute {
                element: node.tag.to_string(),
                attribute: name.to_string(),
            }),
            Some(attribute) if !attribute.attribute_type().accepts(value, attribute.choices()) => {
                out.push(Violation::InvalidValue {
                    element: node.tag.to_string(),
                    attribute: name.to_string(),
                })
            }
            Some(_) => {}
        }
    }
    for attribute in element.attributes().iter().filter(|a| a.is_required()) {
        if !node.attrs.iter().any(|(name, _)| *name == attribute.local_name()) {
            out.push(Violation::MissingRequired {
                element: node.tag.to_string(),
                attribute: attribute.local_name().to_string(),
            });
        }
    }
}

fn tenant() -> ConfigurationModel {
    ModelCatalog::with_builtins(&SchemaSettings::default())
        .unwrap()
        .get(TENANT_MODEL)
        .unwrap()
        .clone()
}

fn filesystem_source(id: &'static str, parser: Doc) -> Doc {
    doc(
        "filesystem-asset-source",
        &[("id", id), ("filename", "assets.xml")],
        vec![parser],
    )
}

fn valid_document() -> Doc {
    doc(
        "tenant-configuration",
        &[],
        vec![
            doc(
                "search-providers",
                &[],
                vec![doc("solr-search-provider", &[("id", "solr")], vec![])],
            ),
            doc(
                "asset-management",
                &[],
                vec![filesystem_source(
                    "fs",
                    doc("xml-asset-parser", &[("strict", "true")], vec![]),
                )],
            ),
        ],
    )
}

#[test]
fn test_valid_document_conforms() {
    assert_eq!(check(&tenant(), &valid_document()), vec![]);
}

#[test]
fn test_unknown_element_is_reported_by_parser() {
    let document = doc(
        "search-providers",
        &[],
        vec![doc("lucene-search-provider", &[], vec![])],
    );
    assert_eq!(
        check(&tenant(), &document),
        vec![Violation::UnknownElement("lucene-search-provider".into())]
    );
}

#[test]
fn test_wrong_parser_subtype_is_not_specialized() {
    let document = doc(
        "asset-management",
        &[],
        vec![filesystem_source(
            "fs",
            doc("json-asset-parser", &[], vec![]),
        )],
    );
    assert_eq!(
        check(&tenant(), &document),
        vec![Violation::NotSpecialized {
            parent: "filesystem-asset-source".into(),
            child: "json-asset-parser".into(),
        }]
    );
}

#[test]
fn test_missing_parser_violates_occurrence() {
    let document = doc(
        "filesystem-asset-source",
        &[("id", "fs"), ("filename", "assets.xml")],
        vec![],
    );
    assert_eq!(
        check(&tenant(), &document),
        vec![Violation::Occurrence {
            parent: "filesystem-asset-source".into(),
            role: "asset-parser".into(),
            count: 0,
        }]
    );
}

#[test]
fn test_duplicate_index_values_among_siblings() {
    let document = doc(
        "search-providers",
        &[],
        vec![
            doc("solr-search-provider", &[("id", "solr")], vec![]),
            doc("solr-search-provider", &[("id", "solr")], vec![]),
        ],
    );
    assert_eq!(
        check(&tenant(), &document),
        vec![Violation::DuplicateKey {
            element: "solr-search-provider".into(),
            key: "solr".into(),
        }]
    );
}

#[test]
fn test_attribute_values_checked_against_declared_types() {
    let document = doc(
        "filesystem-asset-source",
        &[
            ("id", "fs"),
            ("refresh-seconds", "soon"),
            ("asset-type", "vehicle"),
            ("colour", "blue"),
        ],
        vec![doc("xml-asset-parser", &[], vec![])],
    );
    assert_eq!(
        check(&tenant(), &document),
        vec![
            Violation::InvalidValue {
                element: "filesystem-asset-source".into(),
                attribute: "refresh-seconds".into(),
            },
            Violation::InvalidValue {
                element: "filesystem-asset-source".into(),
                attribute: "asset-type".into(),
            },
            Violation::UnknownAttribute {
                element: "filesystem-asset-source".into(),
                attribute: "colour".into(),
            },
            Violation::MissingRequired {
                element: "filesystem-asset-source".into(),
                attribute: "filename".into(),
            },
        ]
    );
}

#[test]
fn test_illegal_nesting_is_reported() {
    let document = doc(
        "search-providers",
        &[],
        vec![doc("xml-asset-parser", &[], vec![])],
    );
    assert_eq!(
        check(&tenant(), &document),
        vec![Violation::IllegalChild {
            parent: "search-providers".into(),
            child: "xml-asset-parser".into(),
        }]
    );
}

#[test]
fn test_tenant_elements_round_trip_through_json() {
    let model = tenant();
    for element in model.elements() {
        let json = serde_json::to_string(element).unwrap();
        let parsed: ElementNode = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, element);
    }
}
