use std::collections::HashMap;

use querywire_model::{tokens::FOREIGN_KEY_SUFFIX, RelationSpec};
use tracing::trace;

/// Foreign keys whose bucket is not named after the key. Customers and suppliers are both
/// grouped with the other parties of a document.
const DEFAULT_BUCKETS: &[(&str, &str)] = &[
    ("customerId", "party"),
    ("supplierId", "party"),
    ("partnerId", "party"),
    ("createdById", "user"),
    ("modifiedById", "user"),
];

fn default_bucket(foreign_key: &str) -> Option<&'static str> {
    DEFAULT_BUCKETS
        .iter()
        .find(|(key, _)| *key == foreign_key)
        .map(|(_, bucket)| *bucket)
}

/// `unitId` lives in the `unit` bucket. A key without the suffix is used as is.
fn strip_foreign_key_suffix(foreign_key: &str) -> &str {
    match foreign_key.strip_suffix(FOREIGN_KEY_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => foreign_key,
    }
}

/// Decides which bucket of referenced entities a relation reads from, for one model.
///
/// In order of precedence:
/// 1. the relation's own bucket, then this policy's overrides, matched on the exact foreign key
/// 2. the built-in table of irregular foreign keys
/// 3. the foreign key without its `Id` suffix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketPolicy {
    overrides: HashMap<String, String>,
}

impl BucketPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(
        mut self,
        foreign_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        self.overrides.insert(foreign_key.into(), bucket.into());
        self
    }

    pub fn bucket_for<'a>(&'a self, spec: &'a RelationSpec) -> &'a str {
        let foreign_key = spec.foreign_key.as_str();
        if let Some(bucket) = &spec.bucket {
            trace!(foreign_key, %bucket, "bucket declared by relation");
            return bucket;
        }
        if let Some(bucket) = self.overrides.get(foreign_key) {
            trace!(foreign_key, %bucket, "bucket overridden by policy");
            return bucket;
        }
        if let Some(bucket) = default_bucket(foreign_key) {
            return bucket;
        }
        strip_foreign_key_suffix(foreign_key)
    }
}
