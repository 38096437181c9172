use std::collections::BTreeMap;

use querywire_model::{tokens::COLUMN_ID, Map, Value};
use serde::Serialize;

/// A record exactly as the API returns it.
pub type RawRecord = Map<String, Value>;

/// The target of a single-valued relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Related {
    Raw(RawRecord),
    Record(Box<Record>),
}

/// What is known about one relation of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelationState<'a> {
    /// Nothing has been attached. The related record may still exist and need fetching.
    Unset,
    /// The record has no related record.
    Null,
    Loaded(&'a Related),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip)]
    pub kind: String,
    #[serde(flatten)]
    pub attributes: RawRecord,
    #[serde(flatten)]
    relations: BTreeMap<String, Option<Related>>,
}

impl Record {
    pub fn new(kind: impl Into<String>, attributes: RawRecord) -> Self {
        Self {
            kind: kind.into(),
            attributes,
            relations: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    pub fn id(&self) -> Option<&Value> {
        self.get(COLUMN_ID)
    }

    pub fn relation(&self, name: &str) -> RelationState<'_> {
        match self.relations.get(name) {
            None => RelationState::Unset,
            Some(None) => RelationState::Null,
            Some(Some(related)) => RelationState::Loaded(related),
        }
    }

    pub fn relations(&self) -> &BTreeMap<String, Option<Related>> {
        &self.relations
    }

    /// Attach a relation, replacing whatever was attached under the same name.
    pub fn set_relation(&mut self, name: impl Into<String>, related: Option<Related>) {
        self.relations.insert(name.into(), related);
    }

    pub fn unset_relation(&mut self, name: &str) {
        self.relations.remove(name);
    }
}
