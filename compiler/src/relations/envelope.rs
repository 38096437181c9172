use std::collections::HashMap;

use serde::Deserialize;

use super::record::{RawRecord, Record};

/// Related records returned alongside a list, grouped into buckets by name.
pub type ReferencedEntities = HashMap<String, Vec<RawRecord>>;

/// The body of a list response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub data: Vec<RawRecord>,
    #[serde(default)]
    pub referenced_entities: Option<ReferencedEntities>,
}

impl ResponseEnvelope {
    /// Split the response into records of `kind` and the referenced entities which go with them.
    /// A response without referenced entities yields an empty map.
    pub fn into_parts(self, kind: &str) -> (Vec<Record>, ReferencedEntities) {
        let records = self
            .data
            .into_iter()
            .map(|attributes| Record::new(kind, attributes))
            .collect();
        (records, self.referenced_entities.unwrap_or_default())
    }
}
