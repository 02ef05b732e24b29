//! Date matching: day/month/year tokens with or without separators, plus
//! bare years.

use super::{DateMatch, Match, Pattern};
use crate::scoring::REFERENCE_YEAR;

const DATE_MIN_YEAR: u32 = 1000;
const DATE_MAX_YEAR: u32 = 2050;
const RECENT_YEAR_MIN: u32 = 1900;

const SEPARATORS: [char; 6] = [' ', '/', '\\', '_', '.', '-'];

/// Split points for digit-only tokens of each length (4 to 8).
fn date_splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dmy {
    day: u8,
    month: u8,
    year: i32,
}

pub(super) fn match_all(password: &[char]) -> Vec<Match> {
    let mut dates = Vec::new();

    // without separator: "1191" up to "11111991"
    for start in 0..password.len() {
        for len in 4..=8 {
            let end = start + len;
            if end > password.len() {
                break;
            }
            let token = &password[start..end];
            if !token.iter().all(char::is_ascii_digit) {
                continue;
            }
            let candidates = date_splits(len).iter().filter_map(|&(k, l)| {
                map_ints_to_dmy([
                    parse_digits(&token[..k]),
                    parse_digits(&token[k..l]),
                    parse_digits(&token[l..]),
                ])
            });
            // among several readings, the year closest to the reference is
            // the cheapest to guess
            let best = candidates.min_by_key(|dmy| (dmy.year - REFERENCE_YEAR).abs());
            if let Some(dmy) = best {
                dates.push(date_match(password, start, end, dmy, None));
            }
        }
    }

    // with separator: "1/1/91" up to "11/11/1991"
    for start in 0..password.len() {
        for len in 6..=10 {
            let end = start + len;
            if end > password.len() {
                break;
            }
            if let Some((ints, separator)) = parse_separated(&password[start..end]) {
                if let Some(dmy) = map_ints_to_dmy(ints) {
                    dates.push(date_match(password, start, end, dmy, Some(separator)));
                }
            }
        }
    }

    // drop dates contained in a larger date: "2015_06_04" also parses as
    // "15_06_04" and "5_06_04"
    let mut matches: Vec<Match> = dates
        .iter()
        .enumerate()
        .filter(|(index, m)| {
            !dates.iter().enumerate().any(|(other_index, other)| {
                other_index != *index
                    && other.start <= m.start
                    && other.end >= m.end
                    && (other.start, other.end) != (m.start, m.end)
            })
        })
        .map(|(_, m)| m.clone())
        .collect();

    matches.extend(year_matches(password));
    matches.sort_by_key(|m| (m.start, m.end));
    matches
}

fn year_matches(password: &[char]) -> Vec<Match> {
    let mut matches = Vec::new();
    for start in 0..password.len().saturating_sub(3) {
        let token = &password[start..start + 4];
        if !token.iter().all(char::is_ascii_digit) {
            continue;
        }
        let year = parse_digits(token);
        if (RECENT_YEAR_MIN..=DATE_MAX_YEAR).contains(&year) {
            matches.push(Match::candidate(
                password,
                start,
                start + 4,
                Pattern::Date(DateMatch {
                    year: year as i32,
                    month: None,
                    day: None,
                    separator: None,
                }),
            ));
        }
    }
    matches
}

fn date_match(password: &[char], start: usize, end: usize, dmy: Dmy, separator: Option<char>) -> Match {
    Match::candidate(
        password,
        start,
        end,
        Pattern::Date(DateMatch {
            year: dmy.year,
            month: Some(dmy.month),
            day: Some(dmy.day),
            separator,
        }),
    )
}

fn parse_digits(digits: &[char]) -> u32 {
    digits
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |acc, d| acc * 10 + d)
}

/// Reads `d{1,4} sep d{1,2} sep d{1,4}` with the same separator twice.
fn parse_separated(token: &[char]) -> Option<([u32; 3], char)> {
    let first_len = token.iter().take_while(|c| c.is_ascii_digit()).count();
    if !(1..=4).contains(&first_len) {
        return None;
    }
    let separator = *token.get(first_len)?;
    if !SEPARATORS.contains(&separator) {
        return None;
    }

    let rest = &token[first_len + 1..];
    let second_len = rest.iter().take_while(|c| c.is_ascii_digit()).count();
    if !(1..=2).contains(&second_len) || rest.get(second_len) != Some(&separator) {
        return None;
    }

    let last = &rest[second_len + 1..];
    if !(1..=4).contains(&last.len()) || !last.iter().all(char::is_ascii_digit) {
        return None;
    }

    Some((
        [
            parse_digits(&token[..first_len]),
            parse_digits(&rest[..second_len]),
            parse_digits(last),
        ],
        separator,
    ))
}

/// Interprets three integers as a date in any plausible order, or `None`.
fn map_ints_to_dmy(ints: [u32; 3]) -> Option<Dmy> {
    // years never sit in the middle
    if ints[1] > 31 || ints[1] == 0 {
        return None;
    }

    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut zeros = 0;
    for &int in &ints {
        if (99 < int && int < DATE_MIN_YEAR) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int == 0 {
            zeros += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || zeros >= 2 {
        return None;
    }

    let splits = [(ints[2], [ints[0], ints[1]]), (ints[0], [ints[1], ints[2]])];

    // a four digit year must be followed or preceded by a valid day-month
    for &(year, rest) in &splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            let (day, month) = map_ints_to_dm(rest)?;
            return Some(Dmy {
                day,
                month,
                year: year as i32,
            });
        }
    }

    for &(year, rest) in &splits {
        if let Some((day, month)) = map_ints_to_dm(rest) {
            return Some(Dmy {
                day,
                month,
                year: two_to_four_digit_year(year),
            });
        }
    }
    None
}

fn map_ints_to_dm(ints: [u32; 2]) -> Option<(u8, u8)> {
    [(ints[0], ints[1]), (ints[1], ints[0])]
        .into_iter()
        .find(|&(day, month)| (1..=31).contains(&day) && (1..=12).contains(&month))
        .map(|(day, month)| (day as u8, month as u8))
}

fn two_to_four_digit_year(year: u32) -> i32 {
    let year = year as i32;
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}
