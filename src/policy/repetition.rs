//! Repetition rule - the same character three times in a row.

use secrecy::{ExposeSecret, SecretString};

use super::{PolicyIssue, RuleResult};
use crate::config::PolicyConfig;

const MAX_RUN: usize = 2;

pub fn repetition_rule(password: &SecretString, _config: &PolicyConfig) -> RuleResult {
    let chars: Vec<char> = password.expose_secret().chars().collect();
    let repeated = chars
        .windows(MAX_RUN + 1)
        .any(|window| window.iter().all(|&c| c == window[0]));
    if repeated {
        return vec![PolicyIssue::RepeatedCharacters];
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(password: &str) -> RuleResult {
        let pwd = SecretString::new(password.to_string().into());
        repetition_rule(&pwd, &PolicyConfig::default())
    }

    #[test]
    fn test_repetition_rule_detects_triple() {
        assert_eq!(check("abcaaad"), vec![PolicyIssue::RepeatedCharacters]);
        assert_eq!(check("111"), vec![PolicyIssue::RepeatedCharacters]);
    }

    #[test]
    fn test_repetition_rule_allows_pairs() {
        assert!(check("aabbcc11").is_empty());
        assert!(check("abab").is_empty());
    }

    #[test]
    fn test_repetition_rule_too_short() {
        assert!(check("").is_empty());
        assert!(check("aa").is_empty());
    }
}
