mod envelope;
mod hydrate;
mod policy;
mod record;
mod resolver;

pub use envelope::{ReferencedEntities, ResponseEnvelope};
pub use hydrate::{DefaultHydrator, Hydrate};
pub use policy::BucketPolicy;
pub use record::{RawRecord, Record, Related, RelationState};
pub use resolver::RelationResolver;
