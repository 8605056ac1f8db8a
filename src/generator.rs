//! Identifier Generation
//!
//! Produces the three key variants under test:
//!
//! - time-ordered UUID (RFC 4122 v1: timestamp + node + clock sequence)
//! - random UUID (v4: 122 bits of entropy)
//! - snowflake sequence id (41-bit ms timestamp | 10-bit node | 12-bit seq)
//!
//! The UUID paths are stateless apart from the v1 clock-sequence context;
//! all sequencing state lives in [`SnowflakeNode`].

use crate::error::BenchError;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::{Context, Timestamp, Uuid};

// ============================================================
// Snowflake layout
// ============================================================

/// Custom epoch: 2020-01-01T00:00:00Z. IDs encode milliseconds since here,
/// which keeps 41 timestamp bits good for ~69 years.
const SNOWFLAKE_EPOCH_MS: u64 = 1_577_836_800_000;

const NODE_ID_BITS: u8 = 10;
const SEQUENCE_BITS: u8 = 12;

const MAX_NODE_ID: u16 = (1 << NODE_ID_BITS) - 1;
const SEQUENCE_MASK: u16 = (1 << SEQUENCE_BITS) - 1;

/// Single-node snowflake id source.
///
/// Monotonic within a run: the sequence counter advances within one
/// millisecond and spins to the next millisecond when exhausted. A backward
/// clock step is fatal rather than risking a duplicate or regressing id.
pub struct SnowflakeNode {
    node_id: u16,
    last_ts_ms: u64,
    sequence: u16,
}

impl SnowflakeNode {
    pub fn new(node_id: u16) -> Result<Self, BenchError> {
        if node_id > MAX_NODE_ID {
            return Err(BenchError::InvalidNodeId(node_id));
        }
        Ok(Self {
            node_id,
            last_ts_ms: 0,
            sequence: 0,
        })
    }

    /// Issue the next id. Never repeats and never goes backward within a run.
    pub fn generate(&mut self) -> Result<i64, BenchError> {
        let mut now = current_millis();
        if now < SNOWFLAKE_EPOCH_MS {
            return Err(BenchError::ClockDrift(SNOWFLAKE_EPOCH_MS - now));
        }
        if now < self.last_ts_ms {
            return Err(BenchError::ClockDrift(self.last_ts_ms - now));
        }

        if now == self.last_ts_ms {
            self.sequence = (self.sequence + 1) & SEQUENCE_MASK;
            if self.sequence == 0 {
                // Sequence exhausted for this millisecond, spin to the next one
                while now <= self.last_ts_ms {
                    now = current_millis();
                }
            }
        } else {
            self.sequence = 0;
        }
        self.last_ts_ms = now;

        let id = ((now - SNOWFLAKE_EPOCH_MS) << (NODE_ID_BITS + SEQUENCE_BITS))
            | ((self.node_id as u64) << SEQUENCE_BITS)
            | self.sequence as u64;
        Ok(id as i64)
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================================
// Generator facade
// ============================================================

/// One generator per process: a fixed v1 node identity plus one snowflake
/// node. Failing to construct it aborts the run before any database work.
pub struct IkGenerator {
    v1_node_id: [u8; 6],
    v1_context: Context,
    snowflake: SnowflakeNode,
}

impl IkGenerator {
    pub fn new() -> Result<Self, BenchError> {
        let mut v1_node_id = [0u8; 6];
        rand::thread_rng().fill(&mut v1_node_id[..]);
        // Multicast bit marks the node id as non-MAC per RFC 4122 §4.5
        v1_node_id[0] |= 0x01;

        Ok(Self {
            v1_node_id,
            v1_context: Context::new(rand::random()),
            snowflake: SnowflakeNode::new(1)?,
        })
    }

    /// New time-ordered UUID (version 1).
    pub fn uuid_v1(&self) -> Uuid {
        Uuid::new_v1(Timestamp::now(&self.v1_context), &self.v1_node_id)
    }

    /// New random UUID (version 4).
    pub fn uuid_v4(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// New monotonically increasing snowflake id.
    pub fn snowflake_id(&mut self) -> Result<i64, BenchError> {
        self.snowflake.generate()
    }
}
