use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

// 2020-01-01T00:00:00Z
const EPOCH_MS: u64 = 1_577_836_800_000;
const WORKER_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const WORKER_MAX: u64 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Snowflake-style id generator: 41 bits of milliseconds since the custom
/// epoch, 10 bits of worker id, 12 bits of per-millisecond sequence.
/// Ids are assigned by the application before insert, never by the database.
#[derive(Debug)]
pub struct Snowflake {
    worker_id: u64,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    last_ms: u64,
    sequence: u64,
}

impl Snowflake {
    pub fn new(worker_id: u64) -> Self {
        Self {
            worker_id: worker_id & WORKER_MAX,
            state: Mutex::new(State {
                last_ms: 0,
                sequence: 0,
            }),
        }
    }

    pub fn next_id(&self) -> i64 {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut now = current_ms();
        if now < state.last_ms {
            // Clock went backwards; wait it out rather than risk duplicates.
            now = state.last_ms;
        }
        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                while now <= state.last_ms {
                    now = current_ms();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_ms = now;

        let id = ((now - EPOCH_MS) << (WORKER_BITS + SEQUENCE_BITS))
            | (self.worker_id << SEQUENCE_BITS)
            | state.sequence;
        id as i64
    }
}

impl Default for Snowflake {
    fn default() -> Self {
        Self::new(1)
    }
}

fn current_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_positive_and_unique() {
        let generator = Snowflake::new(3);
        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            let id = generator.next_id();
            assert!(id > 0);
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn ids_increase_monotonically() {
        let generator = Snowflake::default();
        let mut last = 0;
        for _ in 0..1_000 {
            let id = generator.next_id();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn worker_id_is_masked_into_range() {
        let generator = Snowflake::new(WORKER_MAX + 5);
        let id = generator.next_id() as u64;
        let worker = (id >> SEQUENCE_BITS) & WORKER_MAX;
        assert_eq!(worker, 4);
    }
}
