//! Sequence matching: runs with a constant code point step ("abc", "9753").

use super::{Match, Pattern, SequenceAlphabet, SequenceMatch};

/// Largest step still considered a sequence.
const MAX_STEP: i32 = 5;
const MIN_SEQUENCE_LEN: usize = 3;

pub(super) fn match_all(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    if password.len() < MIN_SEQUENCE_LEN {
        return matches;
    }

    // Runs share their boundary character: "abcba" yields "abc" and "cba".
    let mut start = 0;
    let mut last_step = step(password[0], password[1]);
    for k in 2..password.len() {
        let current = step(password[k - 1], password[k]);
        if current == last_step {
            continue;
        }
        push_run(password, start, k, last_step, &mut matches);
        start = k - 1;
        last_step = current;
    }
    push_run(password, start, password.len(), last_step, &mut matches);
    matches
}

fn step(a: char, b: char) -> i32 {
    b as i32 - a as i32
}

fn push_run(password: &[char], start: usize, end: usize, step: i32, matches: &mut Vec<Match>) {
    if end - start < MIN_SEQUENCE_LEN || step == 0 || step.abs() > MAX_STEP {
        return;
    }
    let run = &password[start..end];
    matches.push(Match::candidate(
        password,
        start,
        end,
        Pattern::Sequence(SequenceMatch {
            alphabet: alphabet_of(run),
            step,
        }),
    ));
}

fn alphabet_of(run: &[char]) -> SequenceAlphabet {
    if run.iter().all(char::is_ascii_lowercase) {
        SequenceAlphabet::Lower
    } else if run.iter().all(char::is_ascii_uppercase) {
        SequenceAlphabet::Upper
    } else if run.iter().all(char::is_ascii_digit) {
        SequenceAlphabet::Digits
    } else {
        SequenceAlphabet::Unicode
    }
}
