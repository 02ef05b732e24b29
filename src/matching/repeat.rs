//! Repeat matching: a unit repeated back to back ("aaa", "abcabc").
//!
//! The unit is estimated by running the full matcher set and the optimizer
//! over it. The unit is always strictly shorter than the repeated run, which
//! bounds the recursion.

use super::{omnimatch, Match, MatchContext, Pattern, RepeatMatch};
use crate::scoring::most_guessable_match_sequence;

pub(super) fn match_all(ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut start = 0;
    while start < password.len() {
        let Some((unit_len, count)) = longest_repeat_at(password, start) else {
            start += 1;
            continue;
        };

        let end = start + unit_len * count;
        let base: Vec<char> = password[start..start + unit_len].to_vec();
        let base_matches = omnimatch(ctx, &base);
        let base_analysis = most_guessable_match_sequence(&base, &base_matches);

        matches.push(Match::candidate(
            password,
            start,
            end,
            Pattern::Repeat(RepeatMatch {
                base_token: base.iter().collect(),
                base_guesses_log10: base_analysis.guesses_log10,
                base_sequence: base_analysis.sequence,
                repeat_count: count,
            }),
        ));
        start = end;
    }
    matches
}

/// Unit length and repeat count of the longest repeat starting at `start`.
///
/// A single character must appear at least three times; longer units at
/// least twice. On equal coverage the shorter unit wins.
fn longest_repeat_at(password: &[char], start: usize) -> Option<(usize, usize)> {
    let remaining = password.len() - start;
    let mut best: Option<(usize, usize)> = None;

    for unit_len in 1..=remaining / 2 {
        let unit = &password[start..start + unit_len];
        let count = 1 + password[start + unit_len..]
            .chunks_exact(unit_len)
            .take_while(|chunk| *chunk == unit)
            .count();

        let min_count = if unit_len == 1 { 3 } else { 2 };
        if count < min_count {
            continue;
        }
        let covered = unit_len * count;
        if best.is_none_or(|(len, n)| covered > len * n) {
            best = Some((unit_len, count));
        }
    }
    best
}
