//! Pattern matchers.
//!
//! Each matcher scans the password and emits candidate matches over
//! character ranges `[start, end)`. Matchers are independent and total: any
//! input, including the empty string, yields a (possibly empty) list.

mod date;
mod dictionary;
mod repeat;
mod sequence;
mod spatial;

pub(crate) use dictionary::lower_char;

use std::fmt;

use crate::reference::{RankedDictionary, ReferenceData};
use crate::scoring;

/// One candidate explanation of `password[start..end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub token: String,
    /// Estimated guesses, clamped to `f64::MAX`.
    pub guesses: f64,
    /// Exact `log10(guesses)`, also for estimates beyond `f64` range.
    pub guesses_log10: f64,
    pub pattern: Pattern,
}

impl Match {
    /// Builds a candidate whose guesses have not been estimated yet.
    pub(crate) fn candidate(password: &[char], start: usize, end: usize, pattern: Pattern) -> Self {
        Self {
            start,
            end,
            token: password[start..end].iter().collect(),
            guesses: 0.0,
            guesses_log10: 0.0,
            pattern,
        }
    }

    pub fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Dictionary(DictionaryMatch),
    Sequence(SequenceMatch),
    Spatial(SpatialMatch),
    Repeat(RepeatMatch),
    Date(DateMatch),
    Bruteforce,
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Dictionary(_) => PatternKind::Dictionary,
            Pattern::Sequence(_) => PatternKind::Sequence,
            Pattern::Spatial(_) => PatternKind::Spatial,
            Pattern::Repeat(_) => PatternKind::Repeat,
            Pattern::Date(_) => PatternKind::Date,
            Pattern::Bruteforce => PatternKind::Bruteforce,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Dictionary,
    Sequence,
    Spatial,
    Repeat,
    Date,
    Bruteforce,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternKind::Dictionary => "dictionary",
            PatternKind::Sequence => "sequence",
            PatternKind::Spatial => "spatial",
            PatternKind::Repeat => "repeat",
            PatternKind::Date => "date",
            PatternKind::Bruteforce => "bruteforce",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryMatch {
    pub dictionary: String,
    pub matched_word: String,
    pub rank: usize,
    pub reversed: bool,
    /// `(substitute, letter)` pairs used, e.g. `('@', 'a')`. Empty unless
    /// the token contains leet substitutions.
    pub substitutions: Vec<(char, char)>,
}

impl DictionaryMatch {
    pub fn is_l33t(&self) -> bool {
        !self.substitutions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAlphabet {
    Lower,
    Upper,
    Digits,
    Unicode,
}

impl SequenceAlphabet {
    pub fn size(self) -> u32 {
        match self {
            SequenceAlphabet::Digits => 10,
            _ => 26,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceMatch {
    pub alphabet: SequenceAlphabet,
    /// Code point difference between neighbors, never zero.
    pub step: i32,
}

impl SequenceMatch {
    pub fn ascending(&self) -> bool {
        self.step > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialMatch {
    pub graph: &'static str,
    pub turns: usize,
    pub shifted_count: usize,
    pub starting_positions: usize,
    pub average_degree: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatMatch {
    pub base_token: String,
    pub base_guesses_log10: f64,
    pub base_sequence: Vec<Match>,
    pub repeat_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    pub year: i32,
    /// `None` for a bare year.
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub separator: Option<char>,
}

/// Per-call matching inputs: shared reference data plus optional words
/// supplied with this password (user name, e-mail, ...).
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub reference: &'a ReferenceData,
    pub user_inputs: Option<&'a RankedDictionary>,
}

impl<'a> MatchContext<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            user_inputs: None,
        }
    }

    pub fn with_user_inputs(mut self, user_inputs: &'a RankedDictionary) -> Self {
        self.user_inputs = Some(user_inputs);
        self
    }

    pub(crate) fn dictionaries(&self) -> impl Iterator<Item = &'a RankedDictionary> + '_ {
        self.reference.dictionaries().iter().chain(self.user_inputs)
    }
}

/// The closed set of pattern detectors. Bruteforce is implicit in the
/// optimizer and has no matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Dictionary,
    Sequence,
    Spatial,
    Repeat,
    Date,
}

impl Matcher {
    pub const ALL: [Matcher; 5] = [
        Matcher::Dictionary,
        Matcher::Sequence,
        Matcher::Spatial,
        Matcher::Repeat,
        Matcher::Date,
    ];

    /// Raw candidates; guesses are not estimated yet.
    pub fn match_all(self, ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
        match self {
            Matcher::Dictionary => dictionary::match_all(ctx, password),
            Matcher::Sequence => sequence::match_all(password),
            Matcher::Spatial => spatial::match_all(ctx.reference.keyboards(), password),
            Matcher::Repeat => repeat::match_all(ctx, password),
            Matcher::Date => date::match_all(password),
        }
    }
}

/// Runs every matcher and estimates guesses for each candidate.
///
/// Results are sorted by `(start, end)`.
pub fn omnimatch(ctx: &MatchContext<'_>, password: &[char]) -> Vec<Match> {
    omnimatch_until(ctx, password, || true).unwrap_or_default()
}

/// Like [`omnimatch`], but asks `keep_going` before each matcher and returns
/// `None` as soon as it answers false.
pub fn omnimatch_until(
    ctx: &MatchContext<'_>,
    password: &[char],
    mut keep_going: impl FnMut() -> bool,
) -> Option<Vec<Match>> {
    let mut matches = Vec::new();
    for matcher in Matcher::ALL {
        if !keep_going() {
            return None;
        }
        matches.extend(matcher.match_all(ctx, password));
    }

    for m in &mut matches {
        scoring::estimate_guesses(m, password.len());
    }
    matches.sort_by_key(|m| (m.start, m.end));
    Some(matches)
}
