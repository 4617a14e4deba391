//! Navigation targets: wraparound, random picks, search normalization

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PokedexError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Step from `current` in `direction`, wrapping circularly over `1..=catalog_size`.
pub fn step(current: u32, direction: Direction, catalog_size: u32) -> u32 {
    let size = i64::from(catalog_size.max(1));
    let next = i64::from(current) + direction.delta();
    let wrapped = (next - 1).rem_euclid(size) + 1;
    wrapped as u32
}

/// Uniform id in `1..=catalog_size`.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R, catalog_size: u32) -> u32 {
    rng.gen_range(1..=catalog_size.max(1))
}

/// Trim and lowercase raw search text into a lookup key.
pub fn normalize_query(raw: &str) -> Result<String, PokedexError> {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return Err(PokedexError::EmptyInput);
    }
    Ok(key)
}

/// Characters the search field accepts from the keypad.
pub fn is_search_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-'
}
