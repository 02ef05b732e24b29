//! Password guessability estimation library
//!
//! This library estimates how many guesses an attacker needs to find a
//! password. The password is split into candidate patterns (dictionary words,
//! keyboard walks, sequences, repeats, dates), each pattern gets a guess
//! estimate, and the cheapest full decomposition decides the total. The total
//! maps to a 0-4 score and to crack times under several attack speeds. A
//! static composition policy is checked alongside.
//!
//! # Features
//!
//! - `async` (default): Enables async evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `pwd-guess` binary
//!
//! # Environment Variables
//!
//! - `PWD_DICTIONARY_DIR`: Directory of `*.txt` ranked word lists used
//!   instead of the built-in ones
//! - `PWD_MAX_LENGTH`: Maximum accepted password length (default: 256)
//! - `PWD_MIN_SCORE`: Minimum score for a valid password (default: 3)
//! - `PWD_MIN_LENGTH`: Minimum length required by the policy (default: 8)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_guess::Evaluator;
//! use secrecy::SecretString;
//!
//! // Load reference data (call once at startup)
//! let evaluator = Evaluator::from_env().expect("Failed to load dictionaries");
//!
//! // Evaluate a password
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = evaluator.evaluate(&password).expect("Evaluation failed");
//!
//! println!("Guesses: 10^{:.1}", result.guesses_log10);
//! println!("Strength: {}", result.strength());
//! for issue in &result.policy_issues {
//!     println!("Issue: {}", issue);
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod hashing;
pub mod matching;
pub mod policy;
pub mod reference;
pub mod report;
pub mod scoring;

mod evaluator;

// Public API
pub use classify::{AttackScenario, CrackTime, Score, ScoreThresholds, Strength};
pub use config::{EvaluatorConfig, PolicyConfig};
pub use error::{DictionaryLoadError, EvaluationError, HashingError};
pub use evaluator::{EvaluationResult, Evaluator};
pub use hashing::HashingService;
pub use matching::{Match, Pattern, PatternKind};
pub use policy::PolicyIssue;
pub use reference::{RankedDictionary, ReferenceData};
pub use scoring::Decomposition;

#[cfg(feature = "async")]
pub use evaluator::evaluate_tx;
