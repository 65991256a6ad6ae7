//! Value objects - immutable types that represent domain concepts

mod rating_stats;
mod score;
mod snowflake;

pub use rating_stats::{RatingChange, RatingStats};
pub use score::Score;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
