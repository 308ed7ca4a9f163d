//! Rank assignments. A tipster's five [Mark]s are assigned to distinct entrants, forming [Marks].
//! The assignment is conventionally keyed in as a five-digit code, e.g., `32547`, where the n-th
//! digit is the entrant carrying the n-th mark.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

pub const MIN_ENTRANT: u8 = 1;
pub const MAX_ENTRANT: u8 = 9;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Primary,
    Secondary,
    Tertiary,
    Quaternary,
    Outsider,
}
impl Mark {
    /// The conventional symbol printed against the mark in a form guide.
    pub fn symbol(&self) -> char {
        match self {
            Mark::Primary => '◎',
            Mark::Secondary => '○',
            Mark::Tertiary => '▲',
            Mark::Quaternary => '△',
            Mark::Outsider => '☓',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marks {
    pub primary: u8,
    pub secondary: u8,
    pub tertiary: u8,
    pub quaternary: u8,
    pub outsider: u8,
}
impl Marks {
    pub fn entrant(&self, mark: Mark) -> u8 {
        match mark {
            Mark::Primary => self.primary,
            Mark::Secondary => self.secondary,
            Mark::Tertiary => self.tertiary,
            Mark::Quaternary => self.quaternary,
            Mark::Outsider => self.outsider,
        }
    }

    /// Entrants in mark order.
    pub fn entrants(&self) -> [u8; Mark::COUNT] {
        [
            self.primary,
            self.secondary,
            self.tertiary,
            self.quaternary,
            self.outsider,
        ]
    }
}

impl Display for Marks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entrant in self.entrants() {
            write!(f, "{entrant}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMarks {
    #[error("marks must be a code of exactly {} digits, got '{}'", Mark::COUNT, .0)]
    Format(String),

    #[error("entrant numbers must be in {}..={}, got {}", MIN_ENTRANT, MAX_ENTRANT, .0)]
    Range(u8),

    #[error("the same entrant cannot carry more than one mark, got '{0}'")]
    Duplicate(String),
}

impl InvalidMarks {
    pub fn kind(&self) -> InvalidMarksKind {
        match self {
            InvalidMarks::Format(_) => InvalidMarksKind::Format,
            InvalidMarks::Range(_) => InvalidMarksKind::Range,
            InvalidMarks::Duplicate(_) => InvalidMarksKind::Duplicate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InvalidMarksKind {
    Format,
    Range,
    Duplicate,
}

impl FromStr for Marks {
    type Err = InvalidMarks;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.chars().count() != Mark::COUNT {
            return Err(InvalidMarks::Format(code.into()));
        }
        let mut entrants = [0u8; Mark::COUNT];
        for (index, ch) in code.chars().enumerate() {
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| InvalidMarks::Format(code.into()))?;
            entrants[index] = digit as u8;
        }
        if let Some(&out_of_range) = entrants
            .iter()
            .find(|&&entrant| !(MIN_ENTRANT..=MAX_ENTRANT).contains(&entrant))
        {
            return Err(InvalidMarks::Range(out_of_range));
        }
        for (index, entrant) in entrants.iter().enumerate() {
            if entrants[index + 1..].contains(entrant) {
                return Err(InvalidMarks::Duplicate(code.into()));
            }
        }

        let [primary, secondary, tertiary, quaternary, outsider] = entrants;
        Ok(Self {
            primary,
            secondary,
            tertiary,
            quaternary,
            outsider,
        })
    }
}
