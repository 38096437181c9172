use std::collections::{HashMap, HashSet};

use crate::{http::Dialect, http::Standard, utils::FlexMap};

/// How a bucket name is matched against the keys of a response's referenced entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierResolution {
    Strict,
    /// Fall back to a case and punctuation insensitive match when there is no exact match, as
    /// long as that match is unambiguous.
    #[default]
    Flexible,
}

impl IdentifierResolution {
    pub fn lookup<'b, T>(&self, map: &'b HashMap<String, T>, identifier: &str) -> Option<&'b T> {
        match self {
            IdentifierResolution::Strict => map.get(identifier),
            IdentifierResolution::Flexible => map.flex_get(identifier),
        }
    }
}

pub struct Options {
    pub dialect: Box<dyn Dialect>,
    pub identifier_resolution: IdentifierResolution,
    /// Resources which accept `entityName`/`entityId` addressing. When `None`, sub-entity
    /// conditions are forwarded without being checked.
    pub sub_entity_resources: Option<HashSet<String>>,
}

impl Options {
    pub fn supports_sub_entity(&self, resource: &str) -> bool {
        match &self.sub_entity_resources {
            Some(resources) => resources.contains(resource),
            None => true,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            dialect: Box::new(Standard()),
            identifier_resolution: IdentifierResolution::default(),
            sub_entity_resources: None,
        }
    }
}
