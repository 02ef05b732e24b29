//! Minimum-guesses decomposition of a password.
//!
//! The total for a decomposition of `k` matches is
//! `k! * prod(guesses(m) * (1 + 0.05 * m.start))`. The per-match factors are
//! additive in log space, so the search keeps one best partial tiling per
//! `(end, k)` and the factorial is added once, after the last position.
//! Brute force is available for every sub-range, which keeps the search
//! well defined when no pattern matched at all.

use crate::matching::{Match, Pattern};

use super::guesses::{
    bruteforce_guesses_log10, estimate_guesses, from_log10, min_guesses_log10,
};

/// Log-space differences below this are ties.
const EPSILON: f64 = 1e-9;

/// Extra cost per position a match starts after the beginning.
const POSITION_FACTOR: f64 = 0.05;

/// The cheapest tiling of a password, with its total estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Adjacent matches covering the password from the first character to
    /// the last.
    pub sequence: Vec<Match>,
    pub guesses: f64,
    pub guesses_log10: f64,
}

#[derive(Debug, Clone, Copy)]
enum Piece {
    Pattern(usize),
    Bruteforce,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    log10: f64,
    start: usize,
    piece: Piece,
}

/// Finds the decomposition of `password` with the fewest total guesses.
///
/// `matches` may come straight from the matchers; estimates are filled in
/// where missing and matches outside the password are ignored. On ties the
/// decomposition with fewer matches wins, then the one whose match starts
/// are lexicographically earliest.
pub fn most_guessable_match_sequence(password: &[char], matches: &[Match]) -> Decomposition {
    let n = password.len();
    if n == 0 {
        return Decomposition {
            sequence: Vec::new(),
            guesses: 1.0,
            guesses_log10: 0.0,
        };
    }

    let mut scored: Vec<Match> = Vec::with_capacity(matches.len());
    let mut by_end: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for m in matches {
        if m.start >= m.end || m.end > n {
            continue;
        }
        let mut m = m.clone();
        estimate_guesses(&mut m, n);
        by_end[m.end].push(scored.len());
        scored.push(m);
    }

    // best[end][k]: cheapest tiling of password[..end] with k matches,
    // without the factorial
    let mut best: Vec<Vec<Option<Step>>> = vec![vec![None; n + 1]; n + 1];
    best[0][0] = Some(Step {
        log10: 0.0,
        start: 0,
        piece: Piece::Bruteforce,
    });

    for end in 1..=n {
        let patterns = by_end[end]
            .iter()
            .map(|&i| (scored[i].start, scored[i].guesses_log10, Piece::Pattern(i)));
        let bruteforce = (0..end).map(|start| {
            let log10 = bruteforce_guesses_log10(&password[start..end])
                .max(min_guesses_log10(end - start, n));
            (start, log10, Piece::Bruteforce)
        });

        for (start, log10, piece) in patterns.chain(bruteforce) {
            let cost = log10 + position_log10(start);
            for k in 0..=start {
                let Some(prev) = best[start][k] else {
                    continue;
                };
                let candidate = Step {
                    log10: prev.log10 + cost,
                    start,
                    piece,
                };
                if improves(&best, end, k + 1, &candidate) {
                    best[end][k + 1] = Some(candidate);
                }
            }
        }
    }

    let mut chosen: Option<(usize, f64)> = None;
    for (k, step) in best[n].iter().enumerate() {
        let Some(step) = step else {
            continue;
        };
        let total = step.log10 + log10_factorial(k);
        if chosen.is_none_or(|(_, best_total)| total < best_total - EPSILON) {
            chosen = Some((k, total));
        }
    }

    let Some((count, guesses_log10)) = chosen else {
        // unreachable with brute force available for every range
        return Decomposition {
            sequence: Vec::new(),
            guesses: 1.0,
            guesses_log10: 0.0,
        };
    };

    let mut sequence = Vec::with_capacity(count);
    let (mut end, mut k) = (n, count);
    while k > 0 {
        let Some(step) = best[end][k] else {
            break;
        };
        sequence.push(match step.piece {
            Piece::Pattern(i) => scored[i].clone(),
            Piece::Bruteforce => {
                let mut m = Match::candidate(password, step.start, end, Pattern::Bruteforce);
                estimate_guesses(&mut m, n);
                m
            }
        });
        end = step.start;
        k -= 1;
    }
    sequence.reverse();

    Decomposition {
        sequence,
        guesses: from_log10(guesses_log10),
        guesses_log10,
    }
}

fn position_log10(start: usize) -> f64 {
    (1.0 + POSITION_FACTOR * start as f64).log10()
}

fn log10_factorial(k: usize) -> f64 {
    (2..=k).map(|i| (i as f64).log10()).sum()
}

fn improves(best: &[Vec<Option<Step>>], end: usize, k: usize, candidate: &Step) -> bool {
    let Some(current) = best[end][k] else {
        return true;
    };
    if candidate.log10 < current.log10 - EPSILON {
        return true;
    }
    if candidate.log10 > current.log10 + EPSILON {
        return false;
    }
    let mut candidate_starts = starts(best, candidate.start, k - 1);
    candidate_starts.push(candidate.start);
    candidate_starts < starts(best, end, k)
}

/// Start positions of the tiling stored at `best[end][k]`, in order.
fn starts(best: &[Vec<Option<Step>>], mut end: usize, mut k: usize) -> Vec<usize> {
    let mut starts = Vec::with_capacity(k);
    while k > 0 {
        let Some(step) = best[end][k] else {
            break;
        };
        starts.push(step.start);
        end = step.start;
        k -= 1;
    }
    starts.reverse();
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{PatternKind, SequenceAlphabet, SequenceMatch};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn fixed(password: &[char], start: usize, end: usize, guesses: f64) -> Match {
        let mut m = Match::candidate(
            password,
            start,
            end,
            Pattern::Sequence(SequenceMatch {
                alphabet: SequenceAlphabet::Lower,
                step: 1,
            }),
        );
        m.guesses = guesses;
        m.guesses_log10 = guesses.log10();
        m
    }

    fn assert_tiles(password: &[char], decomposition: &Decomposition) {
        let mut position = 0;
        for m in &decomposition.sequence {
            assert_eq!(m.start, position);
            assert!(m.end > m.start);
            position = m.end;
        }
        assert_eq!(position, password.len());
    }

    #[test]
    fn test_empty_password() {
        let result = most_guessable_match_sequence(&[], &[]);
        assert!(result.sequence.is_empty());
        assert_eq!(result.guesses, 1.0);
        assert_eq!(result.guesses_log10, 0.0);
    }

    #[test]
    fn test_bruteforce_only() {
        let password = chars("abc");
        let result = most_guessable_match_sequence(&password, &[]);
        assert_eq!(result.sequence.len(), 1);
        assert_eq!(result.sequence[0].kind(), PatternKind::Bruteforce);
        assert!((result.guesses - 17576.0).abs() < 1e-6);
    }

    #[test]
    fn test_mixed_classes_split() {
        // 26^4 * 10^4 * 2! * 1.2 beats 36^8
        let password = chars("abcd1234");
        let result = most_guessable_match_sequence(&password, &[]);
        assert_tiles(&password, &result);
        assert_eq!(result.sequence.len(), 2);
        assert_eq!(result.sequence[1].token, "1234");
    }

    #[test]
    fn test_pattern_beats_bruteforce() {
        let password = chars("abc");
        let matches = vec![fixed(&password, 0, 3, 156.0)];
        let result = most_guessable_match_sequence(&password, &matches);
        assert_eq!(result.sequence.len(), 1);
        assert_eq!(result.sequence[0].kind(), PatternKind::Sequence);
        assert!((result.guesses - 156.0).abs() < 1e-6);
    }

    #[test]
    fn test_factorial_and_position_applied() {
        let password = chars("abcdef");
        let matches = vec![fixed(&password, 0, 3, 60.0), fixed(&password, 3, 6, 60.0)];
        let result = most_guessable_match_sequence(&password, &matches);
        assert_eq!(result.sequence.len(), 2);
        // 2! * 60 * 60 * (1 + 0.05 * 3)
        let expected = 2.0 * 60.0 * 60.0 * 1.15;
        assert!((result.guesses - expected).abs() < 1e-6);
    }

    #[test]
    fn test_prefers_fewer_matches_on_tie() {
        let password = chars("abcdef");
        // the two halves cost exactly as much as the whole match
        let halves = 2.0 * 60.0 * 60.0 * 1.15;
        let matches = vec![
            fixed(&password, 0, 3, 60.0),
            fixed(&password, 3, 6, 60.0),
            fixed(&password, 0, 6, halves),
        ];
        let result = most_guessable_match_sequence(&password, &matches);
        assert_eq!(result.sequence.len(), 1);
        assert_eq!((result.sequence[0].start, result.sequence[0].end), (0, 6));
    }

    #[test]
    fn test_prefers_earliest_starts_on_tie() {
        let password = chars("abcdef");
        let matches = vec![
            fixed(&password, 0, 2, 100.0),
            fixed(&password, 2, 6, 100.0),
            // 100 * x * 1.2 == 100 * 100 * 1.1
            fixed(&password, 0, 4, 100.0),
            fixed(&password, 4, 6, 100.0 * 1.1 / 1.2),
        ];
        let result = most_guessable_match_sequence(&password, &matches);
        let starts: Vec<usize> = result.sequence.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 2]);
    }

    #[test]
    fn test_ignores_out_of_range_matches() {
        let password = chars("ab");
        let matches = vec![fixed(&chars("abcdef"), 1, 5, 1.0)];
        let result = most_guessable_match_sequence(&password, &matches);
        assert_tiles(&password, &result);
        assert!(result.sequence.iter().all(|m| m.kind() == PatternKind::Bruteforce));
    }

    #[test]
    fn test_long_password_stays_finite_in_log_space() {
        let password: Vec<char> = "x7#Q".repeat(50).chars().collect();
        let result = most_guessable_match_sequence(&password, &[]);
        assert_tiles(&password, &result);
        assert!(result.guesses_log10.is_finite());
        assert!(result.guesses_log10 > 308.0);
        assert_eq!(result.guesses, f64::MAX);
    }
}
