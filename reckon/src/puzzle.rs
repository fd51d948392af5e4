//! Puzzle records and the deterministic daily puzzle generator

use crate::{ReckonError, ReckonResult};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// The starting numbers and the value to reach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub numbers: Vec<i64>,
    pub target: i64,
}

impl Puzzle {
    pub fn new(numbers: Vec<i64>, target: i64) -> Self {
        Self { numbers, target }
    }

    pub fn validate(&self) -> ReckonResult<()> {
        if self.numbers.is_empty() {
            return Err(ReckonError::InvalidPuzzle(
                "a puzzle needs at least one number".to_string(),
            ));
        }
        Ok(())
    }

    /// The puzzle of the day. Every caller gets the same puzzle for the same
    /// date and configuration.
    pub fn daily(date: NaiveDate, config: &PuzzleConfig) -> ReckonResult<Self> {
        Self::generate(day_number(date), config)
    }

    /// Generate a puzzle from a seed.
    ///
    /// Each draw (how many large numbers, which large numbers, which small
    /// numbers, the target) uses a fresh generator seeded with `seed`.
    pub fn generate(seed: u64, config: &PuzzleConfig) -> ReckonResult<Self> {
        config.validate()?;

        let large_count = StdRng::seed_from_u64(seed).gen_range(0..=config.max_large);
        let small_count = config.number_count - large_count;

        let mut large = config.large_numbers.clone();
        large.shuffle(&mut StdRng::seed_from_u64(seed));
        let mut small = config.small_numbers.clone();
        small.shuffle(&mut StdRng::seed_from_u64(seed));

        let numbers: Vec<i64> = large
            .into_iter()
            .take(large_count)
            .chain(small.into_iter().take(small_count))
            .collect();
        let target =
            StdRng::seed_from_u64(seed).gen_range(config.target_min..=config.target_max);

        Ok(Self { numbers, target })
    }
}

/// Days since the start of the common era, with 0001-01-01 as day 1
pub fn day_number(date: NaiveDate) -> u64 {
    u64::try_from(date.num_days_from_ce()).unwrap_or(0)
}

/// Parameters of the daily puzzle generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Candidates for the large numbers, each used at most once
    pub large_numbers: Vec<i64>,

    /// Candidates for the small numbers
    /// Default: 1 to 10, each twice
    pub small_numbers: Vec<i64>,

    /// Numbers per puzzle
    pub number_count: usize,

    /// Upper bound on the large numbers in one puzzle
    pub max_large: usize,

    pub target_min: i64,
    pub target_max: i64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        let small_numbers: Vec<i64> = (1..=10).chain(1..=10).collect();
        Self {
            large_numbers: vec![25, 50, 75, 100],
            small_numbers,
            number_count: 6,
            max_large: 4,
            target_min: 100,
            target_max: 999,
        }
    }
}

impl PuzzleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> ReckonResult<()> {
        if self.number_count == 0 {
            return Err(invalid("number_count must be at least 1"));
        }
        if self.max_large > self.large_numbers.len() {
            return Err(invalid(format!(
                "max_large is {} but only {} large numbers are configured",
                self.max_large,
                self.large_numbers.len()
            )));
        }
        if self.max_large > self.number_count {
            return Err(invalid(format!(
                "max_large ({}) exceeds number_count ({})",
                self.max_large, self.number_count
            )));
        }
        if self.number_count > self.small_numbers.len() {
            return Err(invalid(format!(
                "a puzzle without large numbers needs {} small numbers, {} are configured",
                self.number_count,
                self.small_numbers.len()
            )));
        }
        if self.target_min > self.target_max {
            return Err(invalid(format!(
                "target range {}..={} is empty",
                self.target_min, self.target_max
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ReckonError {
    ReckonError::InvalidPuzzle(message.into())
}
