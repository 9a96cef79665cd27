use crate::models::{Observation, ObservationSet};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeduplicationStats {
    pub input_records: usize,
    pub duplicates_removed: usize,
}

impl DeduplicationStats {
    pub fn output_records(&self) -> usize {
        self.input_records - self.duplicates_removed
    }
}

/// Removes repeated timestamps, keeping the last reading for each instant.
pub struct Deduplicator;

impl Deduplicator {
    pub fn new() -> Self {
        Self
    }

    pub fn deduplicate(&self, observations: ObservationSet) -> ObservationSet {
        self.deduplicate_with_stats(observations).0
    }

    /// Survivors keep their original relative order.
    pub fn deduplicate_with_stats(
        &self,
        observations: ObservationSet,
    ) -> (ObservationSet, DeduplicationStats) {
        let observations = observations.into_inner();
        let input_records = observations.len();

        let mut last_seen: HashMap<NaiveDateTime, usize> = HashMap::with_capacity(input_records);
        for (i, observation) in observations.iter().enumerate() {
            last_seen.insert(observation.timestamp, i);
        }

        let kept: Vec<Observation> = observations
            .into_iter()
            .enumerate()
            .filter(|(i, observation)| last_seen.get(&observation.timestamp) == Some(i))
            .map(|(_, observation)| observation)
            .collect();

        let stats = DeduplicationStats {
            input_records,
            duplicates_removed: input_records - kept.len(),
        };

        if stats.duplicates_removed > 0 {
            debug!(
                "Removed {} duplicate timestamps from {} observations",
                stats.duplicates_removed, input_records
            );
        }

        (ObservationSet::new(kept), stats)
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}
