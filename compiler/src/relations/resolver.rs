use std::collections::HashMap;

use querywire_model::{tokens::COLUMN_ID, RelationSpec, RelationTarget, Value};
use tracing::{debug, trace};

use crate::options::IdentifierResolution;

use super::{
    envelope::ReferencedEntities,
    hydrate::{DefaultHydrator, Hydrate},
    policy::BucketPolicy,
    record::{RawRecord, Record, Related},
};

/// Integral floats within this bound convert to `i64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The form in which record ids and foreign keys are compared, so that `7`, `7.0` and `"7"` all
/// match.
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => {
                Some((f as i64).to_string())
            }
            _ => Some(n.to_string()),
        },
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A missing foreign key, or one holding `null`, `false`, `0` or `""`, means there is no related
/// record.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Records of one bucket by id. When ids repeat, the last record wins.
struct BucketIndex<'r> {
    records: HashMap<String, &'r RawRecord>,
}

impl<'r> BucketIndex<'r> {
    fn build(bucket: &str, rows: &'r [RawRecord]) -> Self {
        let mut records = HashMap::with_capacity(rows.len());
        for row in rows {
            let Some(id) = row.get(COLUMN_ID).and_then(id_key) else {
                continue;
            };
            if records.insert(id, row).is_some() {
                trace!(bucket, "duplicate id in referenced entities, keeping the last");
            }
        }
        Self { records }
    }

    fn get(&self, foreign_key_value: &Value) -> Option<&'r RawRecord> {
        id_key(foreign_key_value).and_then(|id| self.records.get(&id).copied())
    }
}

/// Attaches single-valued relations to records using the referenced entities which came back
/// with them. It never fetches anything: a relation that cannot be resolved from the response is
/// left unset for the caller to deal with.
pub struct RelationResolver {
    policy: BucketPolicy,
    identifier_resolution: IdentifierResolution,
    hydrator: Box<dyn Hydrate>,
}

impl RelationResolver {
    pub fn new(policy: BucketPolicy) -> Self {
        Self {
            policy,
            identifier_resolution: IdentifierResolution::default(),
            hydrator: Box::new(DefaultHydrator),
        }
    }

    pub fn with_identifier_resolution(
        mut self,
        identifier_resolution: IdentifierResolution,
    ) -> Self {
        self.identifier_resolution = identifier_resolution;
        self
    }

    pub fn with_hydrator(mut self, hydrator: impl Hydrate + 'static) -> Self {
        self.hydrator = Box::new(hydrator);
        self
    }

    pub fn resolve(
        &self,
        records: &mut [Record],
        referenced: &ReferencedEntities,
        specs: &[RelationSpec],
    ) {
        if referenced.is_empty() || specs.is_empty() {
            return;
        }

        // Several relations may share a bucket, so each bucket is indexed once
        let mut indexes: HashMap<&str, Option<BucketIndex>> = HashMap::new();
        let resolved_specs: Vec<(&RelationSpec, &str)> = specs
            .iter()
            .map(|spec| {
                let bucket = self.policy.bucket_for(spec);
                indexes.entry(bucket).or_insert_with(|| {
                    self.identifier_resolution
                        .lookup(referenced, bucket)
                        .map(|rows| BucketIndex::build(bucket, rows))
                });
                (spec, bucket)
            })
            .collect();

        let mut attached: usize = 0;
        let mut unmatched: usize = 0;
        for record in records.iter_mut() {
            for (spec, bucket) in &resolved_specs {
                let foreign_key_value = record.get(&spec.foreign_key);
                if is_falsy(foreign_key_value) {
                    record.set_relation(spec.name.clone(), None);
                    continue;
                }
                let found = match (foreign_key_value, indexes.get(bucket)) {
                    (Some(value), Some(Some(index))) => index.get(value),
                    _ => None,
                };
                match found {
                    Some(raw) => {
                        let related = self.relate(&spec.target, raw);
                        record.set_relation(spec.name.clone(), Some(related));
                        attached += 1;
                    }
                    None => unmatched += 1,
                }
            }
        }
        debug!(
            records = records.len(),
            relations = specs.len(),
            attached,
            unmatched,
            "resolved referenced entities"
        );
    }

    fn relate(&self, target: &RelationTarget, raw: &RawRecord) -> Related {
        match target {
            RelationTarget::Raw => Related::Raw(raw.clone()),
            RelationTarget::Record(kind) => {
                Related::Record(Box::new(self.hydrator.hydrate(kind, raw)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::RelationState;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn product(unit_id: Value) -> Record {
        Record::new("product", raw(json!({ "id": 1, "unitId": unit_id })))
    }

    fn referenced(value: Value) -> ReferencedEntities {
        serde_json::from_value(value).unwrap()
    }

    fn units() -> ReferencedEntities {
        referenced(json!({ "unit": [{ "id": 7, "name": "pcs" }, { "id": 8, "name": "kg" }] }))
    }

    fn resolve(records: &mut [Record], referenced: &ReferencedEntities, specs: &[RelationSpec]) {
        RelationResolver::new(BucketPolicy::new()).resolve(records, referenced, specs);
    }

    #[test]
    fn test_attaches_raw_record() {
        let mut records = [product(json!(7))];
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert_eq!(
            records[0].relation("unit"),
            RelationState::Loaded(&Related::Raw(raw(json!({ "id": 7, "name": "pcs" }))))
        );
    }

    #[test]
    fn test_null_foreign_key_attaches_null() {
        for value in [json!(null), json!(0), json!(""), json!(false)] {
            let mut records = [product(value)];
            resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
            assert_eq!(records[0].relation("unit"), RelationState::Null);
        }
        let mut records = [Record::new("product", raw(json!({ "id": 1 })))];
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert_eq!(records[0].relation("unit"), RelationState::Null);
    }

    #[test]
    fn test_unmatched_foreign_key_stays_unset() {
        let mut records = [product(json!(9))];
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert_eq!(records[0].relation("unit"), RelationState::Unset);

        // A missing bucket is not an error either
        let mut records = [product(json!(7))];
        let other = referenced(json!({ "vatRate": [{ "id": 7 }] }));
        resolve(&mut records, &other, &[RelationSpec::new("unit")]);
        assert_eq!(records[0].relation("unit"), RelationState::Unset);
    }

    #[test]
    fn test_unmatched_does_not_overwrite() {
        let mut records = [product(json!(9))];
        let previous = Related::Raw(raw(json!({ "id": 9, "name": "box" })));
        records[0].set_relation("unit", Some(previous.clone()));
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert_eq!(records[0].relation("unit"), RelationState::Loaded(&previous));
    }

    #[test]
    fn test_noop_without_input() {
        let mut records = [product(json!(7))];
        resolve(&mut records, &ReferencedEntities::new(), &[RelationSpec::new("unit")]);
        assert_eq!(records[0].relation("unit"), RelationState::Unset);
        resolve(&mut records, &units(), &[]);
        assert!(records[0].relations().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let specs = [RelationSpec::new("unit"), RelationSpec::new("vatRate")];
        let mut once = [product(json!(7)), product(json!(9)), product(json!(null))];
        resolve(&mut once, &units(), &specs);
        let mut twice = once.clone();
        resolve(&mut twice, &units(), &specs);
        assert_eq!(once, twice);
        assert_eq!(twice[0].relations().len(), 2);
    }

    #[test]
    fn test_string_and_number_ids_match() {
        let mut records = [product(json!("7"))];
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert!(matches!(records[0].relation("unit"), RelationState::Loaded(_)));
    }

    #[test]
    fn test_integral_float_ids_match() {
        let mut records = [product(json!(7.0))];
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert_eq!(
            records[0].relation("unit"),
            RelationState::Loaded(&Related::Raw(raw(json!({ "id": 7, "name": "pcs" }))))
        );

        let mut records = [product(json!(8))];
        let float_ids = referenced(json!({ "unit": [{ "id": 8.0, "name": "kg" }] }));
        resolve(&mut records, &float_ids, &[RelationSpec::new("unit")]);
        assert!(matches!(records[0].relation("unit"), RelationState::Loaded(_)));

        let mut records = [product(json!(7.5))];
        resolve(&mut records, &units(), &[RelationSpec::new("unit")]);
        assert_eq!(records[0].relation("unit"), RelationState::Unset);
    }

    #[test]
    fn test_duplicate_ids_keep_last() {
        let mut records = [product(json!(7))];
        let duplicated = referenced(json!({
            "unit": [{ "id": 7, "name": "first" }, { "id": 7, "name": "last" }]
        }));
        resolve(&mut records, &duplicated, &[RelationSpec::new("unit")]);
        assert_eq!(
            records[0].relation("unit"),
            RelationState::Loaded(&Related::Raw(raw(json!({ "id": 7, "name": "last" }))))
        );
    }

    #[test]
    fn test_bucket_precedence() {
        let referenced = referenced(json!({
            "customer": [{ "id": 1, "from": "fallback" }],
            "party": [{ "id": 1, "from": "default" }],
            "company": [{ "id": 1, "from": "override" }]
        }));
        let spec = RelationSpec::new("customer");
        let from = |policy: BucketPolicy| {
            let mut records = [Record::new("invoice", raw(json!({ "customerId": 1 })))];
            RelationResolver::new(policy).resolve(&mut records, &referenced, &[spec.clone()]);
            match records[0].relation("customer") {
                RelationState::Loaded(Related::Raw(raw)) => raw["from"].clone(),
                other => panic!("unexpected {other:?}"),
            }
        };
        assert_eq!(from(BucketPolicy::new()), json!("default"));
        assert_eq!(
            from(BucketPolicy::new().with_override("customerId", "company")),
            json!("override")
        );
        assert_eq!(
            from(BucketPolicy::new().with_override("customerId", "customer")),
            json!("fallback")
        );
    }

    #[test]
    fn test_hydrates_records() {
        let mut records = [product(json!(8))];
        let spec = RelationSpec::new("unit").hydrate_as("measureUnit");
        resolve(&mut records, &units(), &[spec]);
        let RelationState::Loaded(Related::Record(unit)) = records[0].relation("unit") else {
            panic!("expected a hydrated record");
        };
        assert_eq!(unit.kind, "measureUnit");
        assert_eq!(unit.get("name"), Some(&json!("kg")));
    }

    #[test]
    fn test_custom_hydrator() {
        struct Upper;
        impl Hydrate for Upper {
            fn hydrate(&self, kind: &str, raw: &RawRecord) -> Record {
                Record::new(kind.to_uppercase(), raw.clone())
            }
        }
        let mut records = [product(json!(7))];
        RelationResolver::new(BucketPolicy::new())
            .with_hydrator(Upper)
            .resolve(
                &mut records,
                &units(),
                &[RelationSpec::new("unit").hydrate_as("unit")],
            );
        let RelationState::Loaded(Related::Record(unit)) = records[0].relation("unit") else {
            panic!("expected a hydrated record");
        };
        assert_eq!(unit.kind, "UNIT");
    }

    #[test]
    fn test_identifier_resolution() {
        let referenced = referenced(json!({ "vat_rate": [{ "id": 2, "rate": 21 }] }));
        let spec = RelationSpec::new("vatRate");

        let mut records = [Record::new("product", raw(json!({ "vatRateId": 2 })))];
        RelationResolver::new(BucketPolicy::new()).resolve(
            &mut records,
            &referenced,
            &[spec.clone()],
        );
        assert!(matches!(records[0].relation("vatRate"), RelationState::Loaded(_)));

        let mut records = [Record::new("product", raw(json!({ "vatRateId": 2 })))];
        RelationResolver::new(BucketPolicy::new())
            .with_identifier_resolution(IdentifierResolution::Strict)
            .resolve(&mut records, &referenced, &[spec]);
        assert_eq!(records[0].relation("vatRate"), RelationState::Unset);
    }
}
