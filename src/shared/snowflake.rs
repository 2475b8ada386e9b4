//! Snowflake ID Generator
//!
//! Time-ordered unique i64 identifiers. Because the timestamp occupies the
//! high bits, `ORDER BY id DESC` is newest-first ordering, which the listing
//! endpoints rely on.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Service epoch (2020-01-01T00:00:00.000Z)
const SERVICE_EPOCH: u64 = 1577836800000;

/// Per-generator state guarded by a single lock so concurrent callers
/// cannot observe the same (timestamp, sequence) pair.
struct GeneratorState {
    last_timestamp: u64,
    sequence: u64,
}

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    worker_id: u64,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a new generator. Only the low 10 bits of `worker_id` are used.
    pub fn new(worker_id: u64) -> Self {
        Self {
            worker_id: worker_id & 0x3FF,
            state: Mutex::new(GeneratorState {
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();

        // Never move backwards, even if the clock does.
        let mut timestamp = Self::current_timestamp().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & 0xFFF;
            if state.sequence == 0 {
                // 4096 IDs already issued this millisecond; borrow the next.
                timestamp += 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        let id = ((timestamp - SERVICE_EPOCH) << 22) | (self.worker_id << 12) | state.sequence;

        id as i64
    }

    /// Get current timestamp in milliseconds
    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

/// Extract the creation timestamp (milliseconds since Unix epoch) from an ID.
pub fn extract_timestamp(snowflake: i64) -> u64 {
    ((snowflake as u64) >> 22) + SERVICE_EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique() {
        let gen = SnowflakeGenerator::new(1);
        let id1 = gen.generate();
        let id2 = gen.generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let gen = SnowflakeGenerator::new(1);
        let ids: Vec<i64> = (0..100).map(|_| gen.generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_concurrent_generation_yields_unique_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let gen = Arc::new(SnowflakeGenerator::new(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = gen.clone();
                std::thread::spawn(move || (0..2000).map(|_| gen.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
    }

    #[test]
    fn test_extract_timestamp() {
        let gen = SnowflakeGenerator::new(1);
        let id = gen.generate();
        let ts = extract_timestamp(id);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        assert!(ts <= now);
        assert!(ts > now - 1000); // Within 1 second
    }
}
