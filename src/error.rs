//! Error types for evaluation, reference data loading and hashing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a single password evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Invalid password input: {0}")]
    InvalidInput(String),
    #[error("Password is too long: {length} characters (max {max})")]
    InputTooLong { length: usize, max: usize },
    #[error("Evaluation cancelled")]
    Cancelled,
}

/// Errors raised while loading dictionaries at startup.
///
/// These are fatal: an evaluator is never built over partial reference data.
#[derive(Error, Debug)]
pub enum DictionaryLoadError {
    #[error("Dictionary file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read dictionary file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Dictionary file is empty: {0}")]
    EmptyFile(PathBuf),
    #[error("Malformed dictionary {path}, line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("No dictionaries found in {0}")]
    NoDictionaries(PathBuf),
}

/// Errors raised by the hashing collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashingError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Failed to verify password hash: {0}")]
    Verify(String),
}
