//! Serde helpers shared by the node types

pub(crate) mod ordered;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
