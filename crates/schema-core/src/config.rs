//! Settings that tune how strictly models are assembled
//!
//! Settings are normally read from the `[schema]` table of a TOML file:
//!
//! ```toml
//! [schema]
//! index_policy = "reject"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How an element with more than one index attribute is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexPolicy {
    /// Log a warning and use the first index attribute in declaration order.
    #[default]
    FirstMatch,
    /// Refuse to register the element.
    Reject,
}

impl FromStr for IndexPolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-match" | "first" | "warn" => Ok(IndexPolicy::FirstMatch),
            "reject" | "strict" => Ok(IndexPolicy::Reject),
            _ => Err(Error::InvalidIndexPolicy {
                policy: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexPolicy::FirstMatch => write!(f, "first-match"),
            IndexPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Engine settings applied when a model is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaSettings {
    /// Policy for elements that mark several index attributes
    #[serde(default)]
    pub index_policy: IndexPolicy,
}

impl SchemaSettings {
    /// Parse settings from a TOML document holding the settings table itself.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidSettings {
            message: e.to_string(),
        })
    }
}
