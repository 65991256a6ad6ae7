//! Incremental maintenance of a recipe's denormalized rating statistics
//!
//! A recipe stores `average_rating` and `number_of_ratings` instead of
//! re-aggregating every rating on read. Each rating mutation is expressed as a
//! [`RatingChange`] and folded into the stored [`RatingStats`] in O(1):
//!
//! | change               | count       | average                           |
//! |----------------------|-------------|-----------------------------------|
//! | `Added(v)`           | `n + 1`     | `(avg * n + v) / (n + 1)`         |
//! | `Replaced{old, new}` | `n`         | `(avg * n - old + new) / n`       |
//! | `Removed(v)`         | `n - 1`     | `(avg * n - v) / (n - 1)`, or `0` |
//!
//! As long as every mutation goes through [`RatingStats::apply`], the stored
//! average equals the arithmetic mean of the live scores (and `0` when none).

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Score;

/// Derived statistics stored on a recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingStats {
    pub average: f64,
    pub count: i64,
}

/// A single mutation of a recipe's rating set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingChange {
    /// A new rating was recorded
    Added(Score),
    /// An existing rating changed its score
    Replaced { old: Score, new: Score },
    /// A rating was removed
    Removed(Score),
}

impl RatingChange {
    /// The change that undoes this one
    pub fn inverse(self) -> Self {
        match self {
            Self::Added(v) => Self::Removed(v),
            Self::Replaced { old, new } => Self::Replaced { old: new, new: old },
            Self::Removed(v) => Self::Added(v),
        }
    }

    /// True when applying the change leaves the statistics untouched
    pub fn is_noop(self) -> bool {
        matches!(self, Self::Replaced { old, new } if old == new)
    }
}

impl RatingStats {
    /// Statistics of a recipe nobody has rated yet
    pub const EMPTY: Self = Self {
        average: 0.0,
        count: 0,
    };

    pub fn new(average: f64, count: i64) -> Self {
        Self { average, count }
    }

    /// Exact statistics of a set of scores
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = Score>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0_i64, 0_i64), |(sum, count), s| (sum + i64::from(s.value()), count + 1));

        if count == 0 {
            Self::EMPTY
        } else {
            Self {
                average: sum as f64 / count as f64,
                count,
            }
        }
    }

    /// Fold one rating mutation into the statistics.
    ///
    /// Updating or removing against a zero count means the stored aggregate no
    /// longer matches the rating set; that is reported as
    /// [`DomainError::DataConsistencyFault`] instead of dividing by zero.
    pub fn apply(self, change: RatingChange) -> Result<Self, DomainError> {
        if self.count < 0 {
            return Err(DomainError::DataConsistencyFault(format!(
                "negative rating count {}",
                self.count
            )));
        }

        let n = self.count as f64;

        match change {
            RatingChange::Added(v) => {
                let count = self.count + 1;
                Ok(Self {
                    average: (self.average * n + v.as_f64()) / count as f64,
                    count,
                })
            }
            RatingChange::Replaced { old, new } => {
                if self.count == 0 {
                    return Err(DomainError::DataConsistencyFault(
                        "cannot update a rating on a recipe with no ratings".to_string(),
                    ));
                }
                if old == new {
                    return Ok(self);
                }
                Ok(Self {
                    average: (self.average * n - old.as_f64() + new.as_f64()) / n,
                    count: self.count,
                })
            }
            RatingChange::Removed(v) => {
                if self.count == 0 {
                    return Err(DomainError::DataConsistencyFault(
                        "cannot remove a rating from a recipe with no ratings".to_string(),
                    ));
                }
                let count = self.count - 1;
                let average = if count == 0 {
                    0.0
                } else {
                    (self.average * n - v.as_f64()) / count as f64
                };
                Ok(Self { average, count })
            }
        }
    }
}
