use serde::{Deserialize, Serialize};

use crate::tokens::FOREIGN_KEY_SUFFIX;

/// A single-valued ("belongs-to") association to hydrate from a response's referenced entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSpec {
    pub name: String,
    pub foreign_key: String,
    #[serde(default)]
    pub target: RelationTarget,
    /// Name of the `referencedEntities` bucket to read, bypassing the resolution policy.
    #[serde(default)]
    pub bucket: Option<String>,
}

impl RelationSpec {
    /// A relation whose foreign key is the relation name followed by `Id`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            foreign_key: format!("{name}{FOREIGN_KEY_SUFFIX}"),
            name,
            target: RelationTarget::Raw,
            bucket: None,
        }
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = foreign_key.into();
        self
    }

    pub fn hydrate_as(mut self, kind: impl Into<String>) -> Self {
        self.target = RelationTarget::Record(kind.into());
        self
    }

    pub fn from_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationTarget {
    /// Expose the referenced entity as its raw JSON mapping.
    #[default]
    Raw,
    /// Hydrate the referenced entity into a record of the given kind.
    Record(String),
}
