//! Built-in tenant configuration models.
//!
//! Each configuration domain contributes one [`ConfigurationModel`]:
//!
//! - [`search`] - search providers
//! - [`assets`] - asset management and asset sources
//!
//! The [`catalog`] assembles all of them, plus a tenant-wide composite, against
//! the shared role taxonomy in [`roles`].
//!
//! [`ConfigurationModel`]: schema_core::ConfigurationModel

pub mod assets;
pub mod catalog;
pub mod roles;
pub mod search;

pub use catalog::ModelCatalog;
pub use roles::tenant_roles;
