//! Score classification and crack-time estimation.

use std::collections::BTreeMap;
use std::fmt;

/// Discrete strength score in `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const ONE: Score = Score(1);
    pub const TWO: Score = Score(2);
    pub const THREE: Score = Score(3);
    pub const FOUR: Score = Score(4);

    /// Returns `None` for values above 4.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 4).then_some(Score(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Score on a 0-100 scale, in steps of 25.
    pub fn normalized(self) -> u8 {
        self.0 * 25
    }

    pub fn strength(self) -> Strength {
        match self.normalized() {
            80.. => Strength::VeryStrong,
            60.. => Strength::Strong,
            40.. => Strength::Medium,
            _ => Strength::Weak,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human label derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => "WEAK",
            Strength::Medium => "MEDIUM",
            Strength::Strong => "STRONG",
            Strength::VeryStrong => "VERY STRONG",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exclusive upper guess bounds for scores 0 through 3; anything above the
/// last bound scores 4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreThresholds(pub [f64; 4]);

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self([1e3, 1e6, 1e8, 1e10])
    }
}

impl ScoreThresholds {
    pub fn score(&self, guesses: f64) -> Score {
        let below = self.0.iter().position(|&bound| guesses < bound);
        Score(below.unwrap_or(self.0.len()) as u8)
    }
}

/// Attacker models used for crack-time estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttackScenario {
    OnlineThrottled,
    OnlineUnthrottled,
    OfflineSlowHash,
    OfflineFastHash,
}

impl AttackScenario {
    pub const ALL: [AttackScenario; 4] = [
        AttackScenario::OnlineThrottled,
        AttackScenario::OnlineUnthrottled,
        AttackScenario::OfflineSlowHash,
        AttackScenario::OfflineFastHash,
    ];

    pub fn guesses_per_second(self) -> f64 {
        match self {
            AttackScenario::OnlineThrottled => 100.0 / 3600.0,
            AttackScenario::OnlineUnthrottled => 10.0,
            AttackScenario::OfflineSlowHash => 1e4,
            AttackScenario::OfflineFastHash => 1e10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttackScenario::OnlineThrottled => "online_throttling_100_per_hour",
            AttackScenario::OnlineUnthrottled => "online_no_throttling_10_per_second",
            AttackScenario::OfflineSlowHash => "offline_slow_hashing_1e4_per_second",
            AttackScenario::OfflineFastHash => "offline_fast_hashing_1e10_per_second",
        }
    }
}

impl fmt::Display for AttackScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DurationBucket {
    Instant,
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
    Centuries,
}

impl DurationBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            DurationBucket::Instant => "instant",
            DurationBucket::Seconds => "seconds",
            DurationBucket::Minutes => "minutes",
            DurationBucket::Hours => "hours",
            DurationBucket::Days => "days",
            DurationBucket::Months => "months",
            DurationBucket::Years => "years",
            DurationBucket::Centuries => "centuries",
        }
    }
}

const MINUTE: f64 = 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const MONTH: f64 = DAY * 31.0;
const YEAR: f64 = MONTH * 12.0;
const CENTURY: f64 = YEAR * 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CrackTime {
    pub seconds: f64,
    pub bucket: DurationBucket,
    pub display: String,
}

impl CrackTime {
    pub fn from_seconds(seconds: f64) -> Self {
        let (bucket, unit, name) = if seconds < 1.0 {
            (DurationBucket::Instant, 1.0, "")
        } else if seconds < MINUTE {
            (DurationBucket::Seconds, 1.0, "second")
        } else if seconds < HOUR {
            (DurationBucket::Minutes, MINUTE, "minute")
        } else if seconds < DAY {
            (DurationBucket::Hours, HOUR, "hour")
        } else if seconds < MONTH {
            (DurationBucket::Days, DAY, "day")
        } else if seconds < YEAR {
            (DurationBucket::Months, MONTH, "month")
        } else if seconds < CENTURY {
            (DurationBucket::Years, YEAR, "year")
        } else {
            (DurationBucket::Centuries, CENTURY, "")
        };

        let display = match bucket {
            DurationBucket::Instant | DurationBucket::Centuries => bucket.as_str().to_string(),
            _ => {
                let count = (seconds / unit).round() as u64;
                if count == 1 {
                    format!("1 {}", name)
                } else {
                    format!("{} {}s", count, name)
                }
            }
        };

        Self {
            seconds,
            bucket,
            display,
        }
    }
}

pub type CrackTimes = BTreeMap<AttackScenario, CrackTime>;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub score: Score,
    pub crack_times: CrackTimes,
}

/// Maps a total guess estimate to a score and per-scenario crack times.
///
/// An average attacker finds the password halfway through the search, so
/// each scenario's time is `guesses / (2 * rate)`.
pub fn classify(guesses: f64, thresholds: &ScoreThresholds) -> Classification {
    let crack_times = AttackScenario::ALL
        .iter()
        .map(|&scenario| {
            let seconds = guesses / (2.0 * scenario.guesses_per_second());
            (scenario, CrackTime::from_seconds(seconds))
        })
        .collect();

    Classification {
        score: thresholds.score(guesses),
        crack_times,
    }
}
