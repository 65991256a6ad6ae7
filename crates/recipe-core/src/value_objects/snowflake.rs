//! Time-ordered 64-bit identifiers for users, recipes, ratings and comments.
//!
//! An ID packs three fields, high bits first:
//!
//! | bits  | field                                  |
//! |-------|----------------------------------------|
//! | 63-22 | milliseconds since [`Snowflake::EPOCH`] |
//! | 21-12 | worker id                              |
//! | 11-0  | per-millisecond sequence               |
//!
//! IDs minted by one worker sort in creation order, which is what the
//! `newest` listing sort and the comment thread ordering rely on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const TIMESTAMP_SHIFT: u32 = WORKER_BITS + SEQUENCE_BITS;
const MAX_WORKER: u16 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2024-01-01T00:00:00Z in Unix milliseconds
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Unix milliseconds at which the ID was minted
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER)) as u16
    }

    pub fn sequence(&self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp()).unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }

    fn compose(millis: i64, worker_id: u16, sequence: i64) -> Self {
        Self(
            ((millis - Self::EPOCH) << TIMESTAMP_SHIFT)
                | (i64::from(worker_id) << SEQUENCE_BITS)
                | sequence,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// JSON numbers lose precision past 2^53, so IDs go out as strings
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Accepted input forms: `"123"` or `123`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSnowflake {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSnowflake::deserialize(deserializer)?;
        match raw {
            RawSnowflake::Number(n) => Ok(Self(n)),
            RawSnowflake::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Last issued (millisecond, sequence) pair
#[derive(Debug, Default)]
struct Clock {
    millis: i64,
    sequence: i64,
}

/// Mints unique, monotonically increasing IDs for one worker.
///
/// Up to 4096 IDs per millisecond; past that the generator borrows the
/// next millisecond instead of blocking. A wall clock that steps backwards
/// is ignored in the same way, so IDs never repeat or go down.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    clock: Mutex<Clock>,
}

impl SnowflakeGenerator {
    /// # Panics
    /// If `worker_id` does not fit in ten bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER, "Worker ID must be < 1024");
        Self {
            worker_id,
            clock: Mutex::new(Clock::default()),
        }
    }

    pub fn generate(&self) -> Snowflake {
        let now = Utc::now().timestamp_millis().max(Snowflake::EPOCH);

        let mut clock = self.clock.lock();
        if now > clock.millis {
            clock.millis = now;
            clock.sequence = 0;
        } else if clock.sequence == SEQUENCE_MASK {
            clock.millis += 1;
            clock.sequence = 0;
        } else {
            clock.sequence += 1;
        }

        Snowflake::compose(clock.millis, self.worker_id, clock.sequence)
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
