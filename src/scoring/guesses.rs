//! Per-match guess estimates.
//!
//! Estimates are computed in log10 space so that long tokens never overflow;
//! the plain value stored on the match is clamped to `f64::MAX`.

use crate::matching::{
    lower_char, DateMatch, DictionaryMatch, Match, Pattern, RepeatMatch, SequenceMatch,
    SpatialMatch,
};

use super::REFERENCE_YEAR;

const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;

/// Smallest year distance considered, so recent years are not free.
const MIN_YEAR_SPACE: i32 = 20;
const DAYS_PER_YEAR: f64 = 365.0;
const SEPARATOR_FACTOR: f64 = 4.0;

const LOWER_CARDINALITY: u32 = 26;
const UPPER_CARDINALITY: u32 = 26;
const DIGIT_CARDINALITY: u32 = 10;
const SYMBOL_CARDINALITY: u32 = 33;
const OTHER_CARDINALITY: u32 = 100;

const SEQUENCE_EDGES: [char; 7] = ['a', 'z', 'A', 'Z', '0', '1', '9'];

/// Fills in `guesses` and `guesses_log10` for a freshly matched candidate.
/// Matches that already carry an estimate are left untouched.
pub fn estimate_guesses(m: &mut Match, password_len: usize) {
    if m.guesses >= 1.0 {
        return;
    }
    let raw = pattern_guesses_log10(m);
    m.guesses_log10 = raw.max(min_guesses_log10(m.len(), password_len));
    m.guesses = from_log10(m.guesses_log10);
}

/// Floor for a match of `len` characters; a match spanning the whole
/// password may cost a single guess.
pub(crate) fn min_guesses_log10(len: usize, password_len: usize) -> f64 {
    if len >= password_len {
        0.0
    } else if len == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR.log10()
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR.log10()
    }
}

pub(crate) fn from_log10(log10: f64) -> f64 {
    10f64.powf(log10).min(f64::MAX)
}

fn pattern_guesses_log10(m: &Match) -> f64 {
    match &m.pattern {
        Pattern::Dictionary(d) => dictionary_guesses_log10(d, &m.token),
        Pattern::Sequence(s) => sequence_guesses_log10(s, &m.token),
        Pattern::Spatial(s) => spatial_guesses_log10(s, &m.token),
        Pattern::Repeat(r) => repeat_guesses_log10(r),
        Pattern::Date(d) => date_guesses_log10(d),
        Pattern::Bruteforce => {
            let token: Vec<char> = m.token.chars().collect();
            bruteforce_guesses_log10(&token)
        }
    }
}

fn dictionary_guesses_log10(d: &DictionaryMatch, token: &str) -> f64 {
    let reversed = if d.reversed { 2f64.log10() } else { 0.0 };
    (d.rank.max(1) as f64).log10()
        + uppercase_variations(token).log10()
        + l33t_variations(d, token).log10()
        + reversed
}

/// Ways the letter case of `token` could have been chosen.
pub fn uppercase_variations(token: &str) -> f64 {
    let chars: Vec<char> = token.chars().collect();
    let upper = chars.iter().filter(|c| c.is_uppercase()).count();
    let lower = chars.iter().filter(|c| c.is_lowercase()).count();
    if upper == 0 || lower == 0 {
        return 1.0;
    }
    if upper == 1 {
        let first_upper = chars.first().is_some_and(|c| c.is_uppercase());
        let last_upper = chars.last().is_some_and(|c| c.is_uppercase());
        if first_upper || last_upper {
            return 2.0;
        }
    }
    (1..=upper.min(lower)).map(|i| n_ck(upper + lower, i)).sum()
}

/// Ways the substitutions in `token` could have been chosen.
pub fn l33t_variations(d: &DictionaryMatch, token: &str) -> f64 {
    let lowered: Vec<char> = token.chars().map(lower_char).collect();
    d.substitutions
        .iter()
        .map(|&(sub, letter)| {
            let substituted = lowered.iter().filter(|&&c| c == sub).count();
            let unsubstituted = lowered.iter().filter(|&&c| c == letter).count();
            if substituted == 0 || unsubstituted == 0 {
                2.0
            } else {
                (1..=substituted.min(unsubstituted))
                    .map(|i| n_ck(substituted + unsubstituted, i))
                    .sum()
            }
        })
        .product()
}

fn sequence_guesses_log10(s: &SequenceMatch, token: &str) -> f64 {
    let len = token.chars().count() as f64;
    let mut guesses = f64::from(s.alphabet.size()) * len * 2.0;
    if !s.ascending() {
        guesses *= 2.0;
    }
    if !token.chars().next().is_some_and(|c| SEQUENCE_EDGES.contains(&c)) {
        guesses *= 2.0;
    }
    guesses.log10()
}

fn spatial_guesses_log10(s: &SpatialMatch, token: &str) -> f64 {
    let len = token.chars().count();
    let starts = (s.starting_positions.max(1) as f64).log10();
    let degree = s.average_degree.max(1.0).log10();

    let mut total = f64::NEG_INFINITY;
    for i in 2..=len {
        for j in 1..=s.turns.min(i - 1) {
            let term = n_ck(i - 1, j - 1).log10() + starts + degree * j as f64;
            total = log10_add(total, term);
        }
    }
    if !total.is_finite() {
        total = 0.0;
    }

    if s.shifted_count > 0 {
        let shifted = s.shifted_count.min(len);
        let unshifted = len - shifted;
        let variations = if shifted == 0 || unshifted == 0 {
            2.0
        } else {
            (1..=shifted.min(unshifted))
                .map(|i| n_ck(shifted + unshifted, i))
                .sum()
        };
        total += f64::log10(variations);
    }
    total
}

fn repeat_guesses_log10(r: &RepeatMatch) -> f64 {
    r.base_guesses_log10 + (r.repeat_count.max(1) as f64).log10()
}

fn date_guesses_log10(d: &DateMatch) -> f64 {
    let year_space = f64::from((d.year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE));
    if d.month.is_none() {
        return year_space.log10();
    }
    let mut guesses = year_space * DAYS_PER_YEAR;
    if d.separator.is_some() {
        guesses *= SEPARATOR_FACTOR;
    }
    guesses.log10()
}

/// Size of the character space spanned by the classes present in `token`.
pub fn bruteforce_cardinality(token: &[char]) -> u32 {
    let (mut lower, mut upper, mut digit, mut symbol, mut other) = (false, false, false, false, false);
    for &c in token {
        match c {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => digit = true,
            c if c == ' ' || c.is_ascii_punctuation() => symbol = true,
            _ => other = true,
        }
    }
    [
        (lower, LOWER_CARDINALITY),
        (upper, UPPER_CARDINALITY),
        (digit, DIGIT_CARDINALITY),
        (symbol, SYMBOL_CARDINALITY),
        (other, OTHER_CARDINALITY),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, size)| size)
    .sum()
}

pub(crate) fn bruteforce_guesses_log10(token: &[char]) -> f64 {
    if token.is_empty() {
        return 0.0;
    }
    token.len() as f64 * f64::from(bruteforce_cardinality(token)).log10()
}

/// Binomial coefficient as a float.
pub fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (1..=k).fold(1.0, |acc, i| acc * (n + 1 - i) as f64 / i as f64)
}

/// `log10(10^a + 10^b)` without leaving log space.
fn log10_add(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (1.0 + 10f64.powf(lo - hi)).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::SequenceAlphabet;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn estimate(token: &str, password_len: usize, pattern: Pattern) -> Match {
        let mut m = Match::candidate(&chars(token), 0, token.chars().count(), pattern);
        estimate_guesses(&mut m, password_len);
        m
    }

    fn dictionary(rank: usize, reversed: bool, substitutions: Vec<(char, char)>) -> Pattern {
        Pattern::Dictionary(DictionaryMatch {
            dictionary: "test".to_string(),
            matched_word: "password".to_string(),
            rank,
            reversed,
            substitutions,
        })
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= expected * 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_n_ck() {
        assert_eq!(n_ck(5, 0), 1.0);
        assert_eq!(n_ck(5, 2), 10.0);
        assert_eq!(n_ck(8, 8), 1.0);
        assert_eq!(n_ck(3, 4), 0.0);
    }

    #[test]
    fn test_uppercase_variations() {
        assert_eq!(uppercase_variations("password"), 1.0);
        assert_eq!(uppercase_variations("PASSWORD"), 1.0);
        assert_eq!(uppercase_variations("Password"), 2.0);
        assert_eq!(uppercase_variations("passworD"), 2.0);
        // two of eight letters uppercase: C(8,1) + C(8,2)
        assert_eq!(uppercase_variations("PassWord"), 36.0);
        assert_eq!(uppercase_variations("1234"), 1.0);
    }

    #[test]
    fn test_dictionary_guesses() {
        let plain = estimate("password", 8, dictionary(7, false, vec![]));
        assert_close(plain.guesses, 7.0);

        let capitalised = estimate("Password", 8, dictionary(7, false, vec![]));
        assert_close(capitalised.guesses, 14.0);

        let reversed = estimate("drowssap", 8, dictionary(7, true, vec![]));
        assert_close(reversed.guesses, 14.0);

        // '@' replaces every 'a': factor 2
        let l33t = estimate("p@ssword", 8, dictionary(7, false, vec![('@', 'a')]));
        assert_close(l33t.guesses, 14.0);
    }

    #[test]
    fn test_submatch_minimum() {
        let whole = estimate("password", 8, dictionary(1, false, vec![]));
        assert_close(whole.guesses, 1.0);
        let part = estimate("password", 12, dictionary(1, false, vec![]));
        assert_close(part.guesses, 50.0);
        let single = estimate("a", 12, dictionary(1, false, vec![]));
        assert_close(single.guesses, 10.0);
    }

    #[test]
    fn test_sequence_guesses() {
        let sequence = |token: &str, alphabet, step| {
            estimate(token, token.len(), Pattern::Sequence(SequenceMatch { alphabet, step }))
        };
        assert_close(sequence("abc", SequenceAlphabet::Lower, 1).guesses, 156.0);
        assert_close(sequence("123456", SequenceAlphabet::Digits, 1).guesses, 120.0);
        // descending and not starting at an edge
        assert_close(sequence("cba", SequenceAlphabet::Lower, -1).guesses, 624.0);
    }

    #[test]
    fn test_spatial_guesses() {
        let pattern = |turns, shifted_count| {
            Pattern::Spatial(SpatialMatch {
                graph: "qwerty",
                turns,
                shifted_count,
                starting_positions: 94,
                average_degree: 4.5,
            })
        };
        // one turn over six keys: five terms of S * D
        let straight = estimate("qwerty", 6, pattern(1, 0));
        assert_close(straight.guesses, 5.0 * 94.0 * 4.5);

        let shifted = estimate("QWErty", 6, pattern(1, 3));
        // three of six shifted: C(6,1) + C(6,2) + C(6,3)
        assert_close(shifted.guesses, 5.0 * 94.0 * 4.5 * 41.0);

        let zigzag = estimate("qwerty", 6, pattern(3, 0));
        assert!(zigzag.guesses > straight.guesses);
    }

    #[test]
    fn test_repeat_guesses() {
        let m = estimate(
            "abcabc",
            6,
            Pattern::Repeat(RepeatMatch {
                base_token: "abc".to_string(),
                base_guesses_log10: 156f64.log10(),
                base_sequence: Vec::new(),
                repeat_count: 2,
            }),
        );
        assert_close(m.guesses, 312.0);
    }

    #[test]
    fn test_date_guesses() {
        let date = |year, month: Option<u8>, separator| {
            Pattern::Date(DateMatch {
                year,
                month,
                day: month,
                separator,
            })
        };
        assert_close(estimate("1/1/1991", 8, date(1991, Some(1), Some('/'))).guesses, 29.0 * 365.0 * 4.0);
        assert_close(estimate("112015", 6, date(2015, Some(1), None)).guesses, 20.0 * 365.0);
        assert_close(estimate("1950", 4, date(1950, None, None)).guesses, 70.0);
        // bare recent years are floored as submatches
        assert_close(estimate("2019", 10, date(2019, None, None)).guesses, 50.0);
    }

    #[test]
    fn test_bruteforce() {
        assert_eq!(bruteforce_cardinality(&chars("abc")), 26);
        assert_eq!(bruteforce_cardinality(&chars("aB1!")), 95);
        assert_eq!(bruteforce_cardinality(&chars("a b")), 59);
        assert_eq!(bruteforce_cardinality(&chars("é")), 100);
        assert_eq!(bruteforce_cardinality(&[]), 0);

        let m = estimate("abc", 3, Pattern::Bruteforce);
        assert_close(m.guesses, 17576.0);
    }

    #[test]
    fn test_huge_estimates_clamp() {
        let token = "a".repeat(300);
        let m = estimate(&token, 300, Pattern::Bruteforce);
        assert_eq!(m.guesses, f64::MAX);
        assert_close(m.guesses_log10, 300.0 * 26f64.log10());
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let mut m = estimate("abc", 3, Pattern::Bruteforce);
        let before = m.clone();
        estimate_guesses(&mut m, 10);
        assert_eq!(m, before);
    }
}
