use super::record::{RawRecord, Record};

/// Turns a referenced entity into a record of a declared kind. Casting attributes to their
/// declared types belongs here.
pub trait Hydrate {
    fn hydrate(&self, kind: &str, raw: &RawRecord) -> Record;
}

/// Keeps attributes as the API returned them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHydrator;

impl Hydrate for DefaultHydrator {
    fn hydrate(&self, kind: &str, raw: &RawRecord) -> Record {
        Record::new(kind, raw.clone())
    }
}
