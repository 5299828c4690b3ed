pub mod record;

pub use record::{EnrichedRecord, RawRecord};
