//! A [Ticket] is an unordered combination of three distinct entrants, held in canonical (ascending)
//! order. Its string form is the concatenation of the three entrant numbers, e.g., `235`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TICKET_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticket([u8; TICKET_SIZE]);

impl Ticket {
    /// Canonicalises the given entrants into a ticket, sorting them in ascending order. Returns
    /// [None] if the entrants are not pairwise distinct.
    pub fn canonical(a: u8, b: u8, c: u8) -> Option<Self> {
        let mut entrants = [a, b, c];
        entrants.sort_unstable();
        if entrants[0] == entrants[1] || entrants[1] == entrants[2] {
            None
        } else {
            Some(Self(entrants))
        }
    }

    pub fn entrants(&self) -> &[u8; TICKET_SIZE] {
        &self.0
    }
}

impl Display for Ticket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid ticket '{0}': expected three distinct ascending digits in 1..=9")]
pub struct InvalidTicket(pub String);

impl FromStr for Ticket {
    type Err = InvalidTicket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTicket(s.to_owned());
        let digits = s
            .chars()
            .map(|ch| ch.to_digit(10).filter(|&digit| digit >= 1).map(|digit| digit as u8))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        let [a, b, c]: [u8; TICKET_SIZE] = digits.try_into().map_err(|_| invalid())?;
        if a < b && b < c {
            Ok(Self([a, b, c]))
        } else {
            Err(invalid())
        }
    }
}

impl TryFrom<String> for Ticket {
    type Error = InvalidTicket;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

impl From<Ticket> for String {
    fn from(ticket: Ticket) -> Self {
        ticket.to_string()
    }
}
