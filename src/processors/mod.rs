pub mod deduplicator;
pub mod observation_validator;

pub use deduplicator::{DeduplicationStats, Deduplicator};
pub use observation_validator::ObservationValidator;
