//! Static composition rules, independent of guessability.
//!
//! Each rule inspects one aspect of the password and reports the issues it
//! finds. Issues come back in a fixed order: length, character classes,
//! repetition.

mod length;
mod repetition;
mod variety;

use std::fmt;

use secrecy::SecretString;

use crate::config::PolicyConfig;

pub use length::length_rule;
pub use repetition::repetition_rule;
pub use variety::character_variety_rule;

/// A violated composition rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyIssue {
    TooShort { min_length: usize },
    MissingDigit,
    MissingUppercase,
    MissingLowercase,
    MissingSpecial,
    RepeatedCharacters,
}

impl fmt::Display for PolicyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyIssue::TooShort { min_length } => write!(f, "Length < {}", min_length),
            PolicyIssue::MissingDigit => f.write_str("Missing digit"),
            PolicyIssue::MissingUppercase => f.write_str("Missing uppercase letter"),
            PolicyIssue::MissingLowercase => f.write_str("Missing lowercase letter"),
            PolicyIssue::MissingSpecial => f.write_str("Missing special character"),
            PolicyIssue::RepeatedCharacters => f.write_str("Repeated character pattern"),
        }
    }
}

/// Issues found by a single rule, in reporting order.
pub type RuleResult = Vec<PolicyIssue>;

type Rule = fn(&SecretString, &PolicyConfig) -> RuleResult;

/// Runs every rule and collects the issues in order. An empty list means the
/// password complies.
pub fn validate(password: &SecretString, config: &PolicyConfig) -> Vec<PolicyIssue> {
    let rules: [(&str, Rule); 3] = [
        ("length", length_rule),
        ("variety", character_variety_rule),
        ("repetition", repetition_rule),
    ];

    let mut issues = Vec::new();
    for (_rule_name, rule) in rules {
        let found = rule(password, config);
        #[cfg(feature = "tracing")]
        if !found.is_empty() {
            tracing::debug!(rule = _rule_name, issues = found.len(), "policy rule failed");
        }
        issues.extend(found);
    }
    issues
}
