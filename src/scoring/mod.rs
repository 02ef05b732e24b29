//! Guess estimation and decomposition search.

mod guesses;
mod optimizer;

pub use guesses::{
    bruteforce_cardinality, estimate_guesses, l33t_variations, n_ck, uppercase_variations,
};
pub use optimizer::{most_guessable_match_sequence, Decomposition};

/// Year that date and year matches are measured against.
pub const REFERENCE_YEAR: i32 = 2020;
