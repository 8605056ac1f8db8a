//! Dataset Builder - in-memory record population and lookup sample
//!
//! The record population and the sample-index sequence are both built once
//! per run and owned by the caller; every lookup phase replays the same
//! sample so cold/warm/per-key-type timings share an identical access
//! pattern.

use crate::error::BenchError;
use crate::generator::IkGenerator;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::FromRow;
use uuid::Uuid;

/// One logical test subject. All four fields are populated together at
/// creation and the record is immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Record {
    pub uuid_v1: Uuid,
    pub uuid_v4: Uuid,
    pub snowflake_id: i64,
    pub ctime: DateTime<Utc>,
}

impl Record {
    /// CSV rendering for debug dumps of the generated population.
    pub fn to_csv(&self) -> String {
        format!(
            "\"{}\",\"{}\",{},{}",
            self.uuid_v1,
            self.uuid_v4,
            self.snowflake_id,
            self.ctime.timestamp()
        )
    }
}

/// Materialize `num_records` records in generation order. Field order per
/// record is fixed: time-ordered UUID, random UUID, snowflake id, timestamp.
pub fn build_records(
    generator: &mut IkGenerator,
    num_records: usize,
) -> Result<Vec<Record>, BenchError> {
    tracing::info!("Generating {} records...", num_records);

    let mut records = Vec::with_capacity(num_records);
    for _ in 0..num_records {
        records.push(Record {
            uuid_v1: generator.uuid_v1(),
            uuid_v4: generator.uuid_v4(),
            snowflake_id: generator.snowflake_id()?,
            ctime: Utc::now(),
        });
    }
    Ok(records)
}

/// Draw `sample_size` row indices uniformly at random, with replacement,
/// from `[0, population_size)`. Seeded from wall-clock time once per run.
pub fn sample_indices(population_size: usize, sample_size: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(Utc::now().timestamp() as u64);

    let mut sample = Vec::with_capacity(sample_size);
    for _ in 0..sample_size {
        sample.push(rng.gen_range(0..population_size));
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_build_records_count_and_uniqueness() {
        let mut generator = IkGenerator::new().unwrap();
        let records = build_records(&mut generator, 1000).unwrap();
        assert_eq!(records.len(), 1000);

        let v1s: HashSet<_> = records.iter().map(|r| r.uuid_v1).collect();
        let v4s: HashSet<_> = records.iter().map(|r| r.uuid_v4).collect();
        let flakes: HashSet<_> = records.iter().map(|r| r.snowflake_id).collect();
        assert_eq!(v1s.len(), 1000);
        assert_eq!(v4s.len(), 1000);
        assert_eq!(flakes.len(), 1000);
    }

    #[test]
    fn test_build_records_snowflakes_follow_generation_order() {
        let mut generator = IkGenerator::new().unwrap();
        let records = build_records(&mut generator, 500).unwrap();
        for pair in records.windows(2) {
            assert!(pair[0].snowflake_id < pair[1].snowflake_id);
        }
    }

    #[test]
    fn test_sample_indices_size_and_bounds() {
        let sample = sample_indices(1000, 100);
        assert_eq!(sample.len(), 100);
        assert!(sample.iter().all(|&idx| idx < 1000));
    }

    #[test]
    fn test_sample_indices_single_row_population() {
        let sample = sample_indices(1, 10);
        assert_eq!(sample, vec![0; 10]);
    }

    #[test]
    fn test_record_to_csv() {
        let record = Record {
            uuid_v1: Uuid::nil(),
            uuid_v4: Uuid::nil(),
            snowflake_id: 42,
            ctime: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };
        assert_eq!(
            record.to_csv(),
            "\"00000000-0000-0000-0000-000000000000\",\"00000000-0000-0000-0000-000000000000\",42,1700000000"
        );
    }
}
