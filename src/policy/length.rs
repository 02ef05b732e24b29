//! Length rule - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyIssue, RuleResult};
use crate::config::PolicyConfig;

/// Reports [`PolicyIssue::TooShort`] when the password has fewer characters
/// than `config.min_length`.
pub fn length_rule(password: &SecretString, config: &PolicyConfig) -> RuleResult {
    if password.expose_secret().chars().count() < config.min_length {
        return vec![PolicyIssue::TooShort {
            min_length: config.min_length,
        }];
    }
    Vec::new()
}
