//! Character variety rule - digits, uppercase, lowercase and special chars.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyIssue, RuleResult};
use crate::config::PolicyConfig;

/// Anything but a letter, digit, underscore or whitespace.
fn is_special(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_' || c.is_whitespace())
}

/// Reports each missing character class, in the order digit, uppercase,
/// lowercase, special.
pub fn character_variety_rule(password: &SecretString, _config: &PolicyConfig) -> RuleResult {
    let pwd = password.expose_secret();
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());
    let has_upper = pwd.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = pwd.chars().any(|c| c.is_ascii_lowercase());
    let has_special = pwd.chars().any(is_special);

    [
        (has_digit, PolicyIssue::MissingDigit),
        (has_upper, PolicyIssue::MissingUppercase),
        (has_lower, PolicyIssue::MissingLowercase),
        (has_special, PolicyIssue::MissingSpecial),
    ]
    .into_iter()
    .filter(|(present, _)| !present)
    .map(|(_, issue)| issue)
    .collect()
}
