//! Dictionary matching: plain, reversed and leet-substituted words.

use std::collections::{BTreeMap, HashSet};

use super::{DictionaryMatch, Match, MatchContext, Pattern};

/// Letters and the characters commonly typed in their place.
const L33T_TABLE: [(char, &[char]); 12] = [
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!', '|']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

pub(super) fn match_all(ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
    let mut matches = plain_matches(ctx, password);
    matches.extend(reversed_matches(ctx, password));
    matches.extend(l33t_matches(ctx, password));
    matches
}

pub(crate) fn lower_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Every substring whose lowercase form is a dictionary entry.
///
/// `lowered` must be the lowercased `password`, possibly with substitutions
/// applied; tokens are always taken from `password`.
fn lookup(ctx: &MatchContext<'_>, password: &[char], lowered: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    for dictionary in ctx.dictionaries() {
        let max_len = dictionary.max_word_len();
        for start in 0..lowered.len() {
            let limit = lowered.len().min(start + max_len);
            let mut word = String::new();
            for end in start + 1..=limit {
                word.push(lowered[end - 1]);
                if let Some(rank) = dictionary.rank(&word) {
                    matches.push(Match::candidate(
                        password,
                        start,
                        end,
                        Pattern::Dictionary(DictionaryMatch {
                            dictionary: dictionary.name().to_string(),
                            matched_word: word.clone(),
                            rank,
                            reversed: false,
                            substitutions: Vec::new(),
                        }),
                    ));
                }
            }
        }
    }
    matches
}

fn plain_matches(ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
    let lowered: Vec<char> = password.iter().map(|&c| lower_char(c)).collect();
    lookup(ctx, password, &lowered)
}

fn reversed_matches(ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
    let n = password.len();
    let reversed: Vec<char> = password.iter().rev().copied().collect();
    let lowered: Vec<char> = reversed.iter().map(|&c| lower_char(c)).collect();

    lookup(ctx, &reversed, &lowered)
        .into_iter()
        .filter(|m| m.len() > 1)
        .filter_map(|m| {
            let Pattern::Dictionary(mut dict) = m.pattern else {
                return None;
            };
            // palindromes are already covered by the plain match
            let forward: String = dict.matched_word.chars().rev().collect();
            if forward == dict.matched_word {
                return None;
            }
            dict.reversed = true;
            Some(Match::candidate(
                password,
                n - m.end,
                n - m.start,
                Pattern::Dictionary(dict),
            ))
        })
        .collect()
}

fn l33t_matches(ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
    let lowered: Vec<char> = password.iter().map(|&c| lower_char(c)).collect();
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for substitution in enumerate_substitutions(&lowered) {
        let translated: Vec<char> = lowered
            .iter()
            .map(|c| substitution.get(c).copied().unwrap_or(*c))
            .collect();

        for m in lookup(ctx, password, &translated) {
            if m.len() <= 1 {
                continue;
            }
            let Pattern::Dictionary(mut dict) = m.pattern else {
                continue;
            };
            let token_lower = &lowered[m.start..m.end];
            if token_lower.iter().copied().eq(dict.matched_word.chars()) {
                continue;
            }

            let mut used: Vec<(char, char)> = substitution
                .iter()
                .filter(|(sub, _)| token_lower.contains(sub))
                .map(|(&sub, &letter)| (sub, letter))
                .collect();
            used.sort_unstable();
            if used.is_empty() {
                continue;
            }

            let key = (m.start, m.end, dict.dictionary.clone(), dict.matched_word.clone());
            if !seen.insert(key) {
                continue;
            }
            dict.substitutions = used;
            matches.push(Match::candidate(password, m.start, m.end, Pattern::Dictionary(dict)));
        }
    }
    matches
}

/// All consistent substitution maps (substitute -> letter) for the leet
/// characters present in `lowered`. A character that can stand for several
/// letters yields one map per choice.
fn enumerate_substitutions(lowered: &[char]) -> Vec<BTreeMap<char, char>> {
    let mut candidates: Vec<(char, Vec<char>)> = Vec::new();
    for &(letter, subs) in &L33T_TABLE {
        for &sub in subs {
            if !lowered.contains(&sub) {
                continue;
            }
            match candidates.iter_mut().find(|(c, _)| *c == sub) {
                Some((_, letters)) => letters.push(letter),
                None => candidates.push((sub, vec![letter])),
            }
        }
    }

    let mut maps = vec![BTreeMap::new()];
    for (sub, letters) in candidates {
        maps = maps
            .into_iter()
            .flat_map(|map| {
                letters.iter().map(move |&letter| {
                    let mut next = map.clone();
                    next.insert(sub, letter);
                    next
                })
            })
            .collect();
    }
    maps.retain(|map| !map.is_empty());
    maps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{RankedDictionary, ReferenceData};

    fn reference(words: &[&str]) -> ReferenceData {
        ReferenceData::new(vec![RankedDictionary::from_words("test", words.iter())])
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn dict(m: &Match) -> &DictionaryMatch {
        match &m.pattern {
            Pattern::Dictionary(d) => d,
            other => panic!("expected dictionary match, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_matches_all_substrings() {
        let reference = reference(&["mother", "moth", "her", "other"]);
        let ctx = MatchContext::new(&reference);
        let matches = plain_matches(&ctx, &chars("motherboard"));

        let mut found: Vec<(usize, usize, &str)> = matches
            .iter()
            .map(|m| (m.start, m.end, dict(m).matched_word.as_str()))
            .collect();
        found.sort_unstable();
        assert_eq!(
            found,
            vec![(0, 4, "moth"), (0, 6, "mother"), (1, 6, "other"), (3, 6, "her")]
        );
    }

    #[test]
    fn test_plain_match_keeps_original_case() {
        let reference = reference(&["password"]);
        let ctx = MatchContext::new(&reference);
        let matches = plain_matches(&ctx, &chars("PassWord"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].token, "PassWord");
        assert_eq!(dict(&matches[0]).rank, 1);
    }

    #[test]
    fn test_reversed_match() {
        let reference = reference(&["password", "abba"]);
        let ctx = MatchContext::new(&reference);
        let matches = reversed_matches(&ctx, &chars("123drowssap"));
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (3, 11));
        assert_eq!(matches[0].token, "drowssap");
        assert!(dict(&matches[0]).reversed);

        assert!(reversed_matches(&ctx, &chars("abba")).is_empty());
    }

    #[test]
    fn test_l33t_match() {
        let reference = reference(&["password"]);
        let ctx = MatchContext::new(&reference);
        let matches = l33t_matches(&ctx, &chars("p@$$w0rd"));
        assert_eq!(matches.len(), 1);
        let d = dict(&matches[0]);
        assert_eq!(d.matched_word, "password");
        assert_eq!(d.substitutions, vec![('$', 's'), ('0', 'o'), ('@', 'a')]);
        assert!(d.is_l33t());
    }

    #[test]
    fn test_l33t_ambiguous_substitutions() {
        let reference = reference(&["lil", "ill"]);
        let ctx = MatchContext::new(&reference);
        let matches = l33t_matches(&ctx, &chars("1i1"));
        assert_eq!(matches.len(), 1);
        assert_eq!(dict(&matches[0]).substitutions, vec![('1', 'l')]);
    }

    #[test]
    fn test_l33t_ignores_plain_and_single_chars() {
        let reference = reference(&["a", "password"]);
        let ctx = MatchContext::new(&reference);
        assert!(l33t_matches(&ctx, &chars("@")).is_empty());
        assert!(l33t_matches(&ctx, &chars("password4")).is_empty());
    }

    #[test]
    fn test_enumerate_substitutions() {
        assert!(enumerate_substitutions(&chars("plain")).is_empty());
        let maps = enumerate_substitutions(&chars("|7"));
        // '|' -> i or l, '7' -> l or t
        assert_eq!(maps.len(), 4);
    }
}
