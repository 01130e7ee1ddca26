//! Segment index selection.
//!
//! A selection pattern is an arithmetic progression `multiplier * n + constant`
//! written as `D*V+D` or `D*V-D` once whitespace is removed, where `D` is a
//! single digit optionally followed by `.` and one more digit and `V` is any
//! single letter. Values are kept in tenths internally so that enumeration is exact.

use crate::error::{AudioError, AudioResult};
use std::fmt;
use std::str::FromStr;

/// A parsed `multiplier * n + constant` progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPattern {
    multiplier_tenths: i64,
    constant_tenths: i64,
}

impl SelectionPattern {
    /// Parse a pattern such as `"2*n+0"` or `"1.5 * k - 0.5"`
    pub fn parse(pattern: &str) -> AudioResult<Self> {
        let stripped: String = pattern.chars().filter(|c| !c.is_whitespace()).collect();
        let reject = || AudioError::PatternFormat {
            pattern: stripped.clone(),
        };

        let mut cursor = Cursor::new(&stripped);
        let multiplier_tenths = cursor.numeral().ok_or_else(reject)?;
        cursor.expect('*').ok_or_else(reject)?;
        cursor.letter().ok_or_else(reject)?;
        let sign = match cursor.next() {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Err(reject()),
        };
        let constant_tenths = cursor.numeral().ok_or_else(reject)? * sign;
        if !cursor.is_done() {
            return Err(reject());
        }

        Ok(SelectionPattern {
            multiplier_tenths,
            constant_tenths,
        })
    }

    /// Slope of the progression
    pub fn multiplier(&self) -> f64 {
        self.multiplier_tenths as f64 / 10.0
    }

    /// Offset of the progression
    pub fn constant(&self) -> f64 {
        self.constant_tenths as f64 / 10.0
    }

    /// `(multiplier, constant)` pair
    pub fn coefficients(&self) -> (f64, f64) {
        (self.multiplier(), self.constant())
    }

    /// Indices in `0..total` hit by the progression, in increasing `n`.
    ///
    /// Enumeration stops the first time `multiplier * n + constant >= total`.
    /// Values that are negative or fall between integers are skipped.
    /// A zero multiplier evaluates the constant once.
    pub fn select(&self, total: usize) -> Vec<usize> {
        let limit = total as i64 * 10;
        let mut indices = Vec::new();

        for n in 0i64.. {
            let value = self.multiplier_tenths * n + self.constant_tenths;
            if value >= limit {
                break;
            }
            if value >= 0 && value % 10 == 0 {
                indices.push((value / 10) as usize);
            }
            if self.multiplier_tenths == 0 {
                break;
            }
        }

        indices
    }
}

impl FromStr for SelectionPattern {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.constant_tenths < 0 { '-' } else { '+' };
        write!(
            f,
            "{}*n{}{}",
            self.multiplier(),
            sign,
            self.constant().abs()
        )
    }
}

/// Parse a pattern into its `(multiplier, constant)` pair
pub fn parse(pattern: &str) -> AudioResult<(f64, f64)> {
    SelectionPattern::parse(pattern).map(|p| p.coefficients())
}

/// Indices in `0..total_segments` selected by `pattern`
pub fn select(total_segments: usize, pattern: &str) -> AudioResult<Vec<usize>> {
    Ok(SelectionPattern::parse(pattern)?.select(total_segments))
}

/// Which segments a manipulation applies to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// Indices produced by an arithmetic progression
    Pattern(SelectionPattern),
    /// Every even index: 0, 2, 4, ...
    #[default]
    Parity,
    /// An explicit list of indices, each checked against the sequence length
    Indices(Vec<usize>),
}

impl Selector {
    /// Selector from a pattern string
    pub fn pattern(pattern: &str) -> AudioResult<Self> {
        SelectionPattern::parse(pattern).map(Selector::Pattern)
    }

    /// Resolve the selected indices for a sequence of `total` segments.
    ///
    /// The result is sorted and free of duplicates.
    pub fn indices(&self, total: usize) -> AudioResult<Vec<usize>> {
        match self {
            Selector::Pattern(pattern) => Ok(pattern.select(total)),
            Selector::Parity => Ok((0..total).step_by(2).collect()),
            Selector::Indices(indices) => {
                if let Some(&index) = indices.iter().find(|&&i| i >= total) {
                    return Err(AudioError::IndexOutOfRange { index, len: total });
                }
                let mut sorted = indices.clone();
                sorted.sort_unstable();
                sorted.dedup();
                Ok(sorted)
            }
        }
    }
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            chars: input.chars().peekable(),
        }
    }

    fn next(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn is_done(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn expect(&mut self, want: char) -> Option<()> {
        (self.chars.next()? == want).then_some(())
    }

    fn letter(&mut self) -> Option<char> {
        self.chars.next().filter(|c| c.is_ascii_alphabetic())
    }

    fn digit(&mut self) -> Option<i64> {
        self.chars.next()?.to_digit(10).map(i64::from)
    }

    /// `\d` or `\d.\d`, returned in tenths
    fn numeral(&mut self) -> Option<i64> {
        let whole = self.digit()?;
        if self.chars.peek() == Some(&'.') {
            self.chars.next();
            let tenth = self.digit()?;
            Some(whole * 10 + tenth)
        } else {
            Some(whole * 10)
        }
    }
}
