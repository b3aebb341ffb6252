//! Role taxonomy - the named slots that govern legal nesting
//!
//! Every element carries a role. A role declares which child roles may appear
//! beneath elements of that role, how often ([`Occurrence`]), and whether the
//! child must first be narrowed to one of its concrete subtypes.
//!
//! The taxonomy is declarative data only. Consumers use it to populate "add
//! child" menus and to reject documents whose nesting is illegal; nothing in
//! this module enforces the rules against a document.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wire::is_false;

/// Name of a role in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleKey(String);

impl RoleKey {
    /// Wrap a role name.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for RoleKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl PartialEq<str> for RoleKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoleKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How many children of a given role an element may host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occurrence {
    /// The child role may not appear at all
    Forbidden,
    /// Exactly one child is required
    ExactlyOne,
    /// At most one child
    ZeroOrOne,
    /// Any number of children
    Many,
}

impl Occurrence {
    /// Minimum number of children
    pub fn min(&self) -> usize {
        match self {
            Occurrence::ExactlyOne => 1,
            Occurrence::Forbidden | Occurrence::ZeroOrOne | Occurrence::Many => 0,
        }
    }

    /// Maximum number of children, `None` when unbounded
    pub fn max(&self) -> Option<usize> {
        match self {
            Occurrence::Forbidden => Some(0),
            Occurrence::ExactlyOne | Occurrence::ZeroOrOne => Some(1),
            Occurrence::Many => None,
        }
    }

    /// Whether `count` children satisfy this occurrence.
    pub fn permits(&self, count: usize) -> bool {
        count >= self.min() && self.max().is_none_or(|max| count <= max)
    }

    /// Whether at least one child is permitted.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Occurrence::Forbidden)
    }
}

/// Constraint a role places on one child role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRule {
    role: RoleKey,
    occurrence: Occurrence,
    #[serde(default, skip_serializing_if = "is_false")]
    requires_specialization: bool,
}

impl ChildRule {
    /// Child role the rule applies to
    pub fn role(&self) -> &RoleKey {
        &self.role
    }

    /// How many children of the role are permitted
    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// Whether a child in this slot must be narrowed to a concrete subtype
    /// by the parent element's specializations.
    pub fn requires_specialization(&self) -> bool {
        self.requires_specialization
    }
}

/// A named slot in the nesting taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRole")]
pub struct Role {
    key: RoleKey,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ChildRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subtypes: Vec<RoleKey>,
    #[serde(skip_serializing_if = "is_false")]
    permanent: bool,
    #[serde(skip_serializing_if = "is_false")]
    reorderable: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRole {
    key: RoleKey,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    children: Vec<ChildRule>,
    #[serde(default)]
    subtypes: Vec<RoleKey>,
    #[serde(default)]
    permanent: bool,
    #[serde(default)]
    reorderable: bool,
}

impl TryFrom<RawRole> for Role {
    type Error = Error;

    fn try_from(raw: RawRole) -> Result<Self> {
        let mut builder = Role::builder(raw.key, raw.name);
        builder.role.description = raw.description;
        builder.role.permanent = raw.permanent;
        builder.role.reorderable = raw.reorderable;
        for rule in raw.children {
            builder = builder.push_child(rule.role, rule.occurrence, rule.requires_specialization);
        }
        for subtype in raw.subtypes {
            builder = builder.subtype(subtype);
        }
        builder.build()
    }
}

impl Role {
    /// Start building a role.
    pub fn builder(key: impl Into<RoleKey>, name: impl Into<String>) -> RoleBuilder {
        RoleBuilder {
            role: Role {
                key: key.into(),
                name: name.into(),
                description: None,
                children: Vec::new(),
                subtypes: Vec::new(),
                permanent: false,
                reorderable: false,
            },
        }
    }

    /// Key elements and child rules refer to this role by
    pub fn key(&self) -> &RoleKey {
        &self.key
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text shown for the role
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Child rules in declaration order
    pub fn children(&self) -> &[ChildRule] {
        &self.children
    }

    /// Concrete roles that may narrow this one
    pub fn subtypes(&self) -> &[RoleKey] {
        &self.subtypes
    }

    /// Elements of a permanent role may not be deleted in the editor.
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    /// Siblings of a reorderable role may be reordered in the editor.
    pub fn is_reorderable(&self) -> bool {
        self.reorderable
    }

    /// Rule this role declares for `child`, if any
    pub fn child_rule(&self, child: &str) -> Option<&ChildRule> {
        self.children.iter().find(|rule| rule.role == *child)
    }

    /// Whether `child` is one of this role's subtypes
    pub fn has_subtype(&self, child: &str) -> bool {
        self.subtypes.iter().any(|subtype| subtype == child)
    }
}

/// Consuming builder for [`Role`].
#[derive(Debug)]
#[must_use]
pub struct RoleBuilder {
    role: Role,
}

impl RoleBuilder {
    /// Set the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.role.description = Some(description.into());
        self
    }

    /// Declare a child role.
    pub fn child(self, role: impl Into<RoleKey>, occurrence: Occurrence) -> Self {
        self.push_child(role.into(), occurrence, false)
    }

    /// Declare a child role that must be narrowed to a subtype before use.
    pub fn specialized_child(self, role: impl Into<RoleKey>, occurrence: Occurrence) -> Self {
        self.push_child(role.into(), occurrence, true)
    }

    fn push_child(mut self, role: RoleKey, occurrence: Occurrence, requires_specialization: bool) -> Self {
        self.role.children.push(ChildRule {
            role,
            occurrence,
            requires_specialization,
        });
        self
    }

    /// Declare a concrete subtype of this role. Repeated subtypes are ignored.
    pub fn subtype(mut self, role: impl Into<RoleKey>) -> Self {
        let role = role.into();
        if !self.role.subtypes.contains(&role) {
            self.role.subtypes.push(role);
        }
        self
    }

    /// Forbid deleting elements of this role in the editor.
    pub fn permanent(mut self) -> Self {
        self.role.permanent = true;
        self
    }

    /// Allow reordering siblings of this role in the editor.
    pub fn reorderable(mut self) -> Self {
        self.role.reorderable = true;
        self
    }

    /// Finish the role.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateChildRole`] if a child role is declared twice.
    pub fn build(self) -> Result<Role> {
        let role = self.role;
        for (i, rule) in role.children.iter().enumerate() {
            if role.children[..i].iter().any(|earlier| earlier.role == rule.role) {
                return Err(Error::DuplicateChildRole {
                    role: role.key.to_string(),
                    child: rule.role.to_string(),
                });
            }
        }
        Ok(role)
    }
}

/// Ordered collection of roles keyed by [`RoleKey`].
///
/// Every child and subtype reference is checked against the declared roles
/// when the taxonomy is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Role>", try_from = "Vec<Role>")]
pub struct RoleTaxonomy {
    roles: Vec<Role>,
    positions: HashMap<RoleKey, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

impl RoleTaxonomy {
    /// Start collecting roles.
    pub fn builder() -> RoleTaxonomyBuilder {
        RoleTaxonomyBuilder { roles: Vec::new() }
    }

    /// Role with the given key, if declared.
    pub fn get(&self, key: &str) -> Option<&Role> {
        self.positions.get(key).map(|&i| &self.roles[i])
    }

    /// Look up a role, failing with [`Error::UnknownRole`] when it is missing.
    pub fn role(&self, key: &str) -> Result<&Role> {
        self.get(key).ok_or_else(|| Error::UnknownRole {
            role: key.to_string(),
        })
    }

    /// Whether a role with the given key is declared.
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// All roles in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Number of declared roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether no roles are declared
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Constraint `parent` places on `child`, if it declares one.
    pub fn child_rule(&self, parent: &str, child: &str) -> Option<&ChildRule> {
        self.get(parent).and_then(|role| role.child_rule(child))
    }

    /// Child rules that permit at least one child, in declaration order.
    ///
    /// Yields nothing for an unknown parent.
    pub fn legal_children<'a>(
        &'a self,
        parent: &str,
    ) -> impl Iterator<Item = &'a ChildRule> + use<'a> {
        self.get(parent)
            .map(|role| role.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|rule| rule.occurrence.is_allowed())
    }

    /// Whether `child` is a declared subtype of `parent`.
    pub fn is_subtype(&self, parent: &str, child: &str) -> bool {
        self.get(parent).is_some_and(|role| role.has_subtype(child))
    }

    /// Find a nesting cycle, following allowed child rules and subtypes.
    ///
    /// Returns the roles along the cycle with the first role repeated at the
    /// end, or `None` when the nesting graph is acyclic.
    pub fn find_cycle(&self) -> Option<Vec<RoleKey>> {
        let mut marks = vec![Mark::Unvisited; self.roles.len()];
        let mut path = Vec::new();
        (0..self.roles.len()).find_map(|start| {
            if marks[start] == Mark::Unvisited {
                self.visit(start, &mut marks, &mut path)
            } else {
                None
            }
        })
    }

    fn visit(&self, idx: usize, marks: &mut [Mark], path: &mut Vec<usize>) -> Option<Vec<RoleKey>> {
        marks[idx] = Mark::Active;
        path.push(idx);

        let role = &self.roles[idx];
        let edges = role
            .children
            .iter()
            .filter(|rule| rule.occurrence.is_allowed())
            .map(|rule| &rule.role)
            .chain(role.subtypes.iter());

        for key in edges {
            let Some(&next) = self.positions.get(key) else {
                continue;
            };
            match marks[next] {
                Mark::Active => {
                    let start = path.iter().position(|&p| p == next).unwrap_or(0);
                    let mut cycle: Vec<RoleKey> = path[start..]
                        .iter()
                        .map(|&i| self.roles[i].key.clone())
                        .collect();
                    cycle.push(self.roles[next].key.clone());
                    return Some(cycle);
                }
                Mark::Unvisited => {
                    if let Some(cycle) = self.visit(next, marks, path) {
                        return Some(cycle);
                    }
                }
                Mark::Done => {}
            }
        }

        path.pop();
        marks[idx] = Mark::Done;
        None
    }
}

impl From<RoleTaxonomy> for Vec<Role> {
    fn from(taxonomy: RoleTaxonomy) -> Self {
        taxonomy.roles
    }
}

impl TryFrom<Vec<Role>> for RoleTaxonomy {
    type Error = Error;

    fn try_from(roles: Vec<Role>) -> Result<Self> {
        RoleTaxonomyBuilder { roles }.build()
    }
}

/// Builder collecting roles before their references are checked.
#[derive(Debug, Default)]
#[must_use]
pub struct RoleTaxonomyBuilder {
    roles: Vec<Role>,
}

impl RoleTaxonomyBuilder {
    /// Add one role.
    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Add several roles in order.
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Finish the taxonomy.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateRole`] if two roles share a key
    /// - [`Error::UnknownRole`] if a child rule or subtype names an undeclared role
    pub fn build(self) -> Result<RoleTaxonomy> {
        let mut positions = HashMap::with_capacity(self.roles.len());
        for (i, role) in self.roles.iter().enumerate() {
            if positions.insert(role.key.clone(), i).is_some() {
                return Err(Error::DuplicateRole {
                    role: role.key.to_string(),
                });
            }
        }

        for role in &self.roles {
            let references = role
                .children
                .iter()
                .map(|rule| &rule.role)
                .chain(role.subtypes.iter());
            for key in references {
                if !positions.contains_key(key) {
                    return Err(Error::UnknownRole {
                        role: key.to_string(),
                    });
                }
            }
        }

        Ok(RoleTaxonomy {
            roles: self.roles,
            positions,
        })
    }
}
