//! Generation of the four priority-ordered [Candidate] trio sets from a set of [Marks].
//!
//! Every candidate shares the fixed ◎-○-▲ ticket. The second ticket pairs ◎-○ with either △ or ☓,
//! and the third pairs ◎-▲ with either △ or ☓, giving four combinations ranked by how strongly the
//! substituted entrants were marked.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

use crate::marks::{Mark, Marks};
use crate::ticket::{Ticket, TICKET_SIZE};

pub const REQUIRED_TICKETS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, Display, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: Label,
    pub tickets: [Ticket; TICKET_SIZE],
}

impl Display for Candidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [first, second, third] = &self.tickets;
        write!(f, "{}: {first} + {second} + {third}", self.label)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("marks {marks} yield a degenerate ticket {}-{}-{}", .legs[0], .legs[1], .legs[2])]
pub struct CandidateConstructionError {
    pub marks: Marks,
    pub legs: [Mark; TICKET_SIZE],
}

/// The five distinct tickets from which all candidates are assembled.
struct Tickets {
    fixed: Ticket,
    second_quaternary: Ticket,
    second_outsider: Ticket,
    third_quaternary: Ticket,
    third_outsider: Ticket,
}
impl Tickets {
    fn derive(marks: &Marks) -> Result<Self, CandidateConstructionError> {
        let ticket = |legs: [Mark; TICKET_SIZE]| {
            let [a, b, c] = legs.map(|mark| marks.entrant(mark));
            Ticket::canonical(a, b, c).ok_or(CandidateConstructionError {
                marks: *marks,
                legs,
            })
        };
        Ok(Self {
            fixed: ticket([Mark::Primary, Mark::Secondary, Mark::Tertiary])?,
            second_quaternary: ticket([Mark::Primary, Mark::Secondary, Mark::Quaternary])?,
            second_outsider: ticket([Mark::Primary, Mark::Secondary, Mark::Outsider])?,
            third_quaternary: ticket([Mark::Primary, Mark::Tertiary, Mark::Quaternary])?,
            third_outsider: ticket([Mark::Primary, Mark::Tertiary, Mark::Outsider])?,
        })
    }
}

/// Builds the candidates in priority order A, B, C, D.
pub fn build(marks: &Marks) -> Result<[Candidate; Label::COUNT], CandidateConstructionError> {
    let Tickets {
        fixed,
        second_quaternary,
        second_outsider,
        third_quaternary,
        third_outsider,
    } = Tickets::derive(marks)?;
    Ok([
        Candidate {
            label: Label::A,
            tickets: [fixed, second_quaternary, third_quaternary],
        },
        Candidate {
            label: Label::B,
            tickets: [fixed, second_quaternary, third_outsider],
        },
        Candidate {
            label: Label::C,
            tickets: [fixed, second_outsider, third_quaternary],
        },
        Candidate {
            label: Label::D,
            tickets: [fixed, second_outsider, third_outsider],
        },
    ])
}

/// The minimal set of tickets that must be priced to evaluate every candidate. Ordered as the
/// fixed ticket, then ◎-○-△, ◎-○-☓, ◎-▲-△ and ◎-▲-☓.
pub fn required_tickets(marks: &Marks) -> Result<[Ticket; REQUIRED_TICKETS], CandidateConstructionError> {
    let tickets = Tickets::derive(marks)?;
    Ok([
        tickets.fixed,
        tickets.second_quaternary,
        tickets.second_outsider,
        tickets.third_quaternary,
        tickets.third_outsider,
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    fn ids(tickets: &[Ticket]) -> Vec<String> {
        tickets.iter().map(Ticket::to_string).collect()
    }

    #[test]
    fn build_in_priority_order() {
        let marks = Marks::from_str("32547").unwrap();
        let candidates = build(&marks).unwrap();
        let labels: Vec<_> = candidates.iter().map(|candidate| candidate.label).collect();
        assert_eq!(Label::iter().collect::<Vec<_>>(), labels);

        assert_eq!(vec!["235", "234", "345"], ids(&candidates[0].tickets));
        assert_eq!(vec!["235", "234", "357"], ids(&candidates[1].tickets));
        assert_eq!(vec!["235", "237", "345"], ids(&candidates[2].tickets));
        assert_eq!(vec!["235", "237", "357"], ids(&candidates[3].tickets));
    }

    #[test]
    fn fixed_ticket_shared() {
        let marks = Marks::from_str("91827").unwrap();
        let candidates = build(&marks).unwrap();
        let fixed = Ticket::canonical(9, 1, 8).unwrap();
        for candidate in &candidates {
            assert_eq!(fixed, candidate.tickets[0]);
            let distinct: HashSet<_> = candidate.tickets.iter().collect();
            assert_eq!(TICKET_SIZE, distinct.len(), "for {candidate}");
        }
    }

    #[test]
    fn required_covers_all_candidates() {
        let marks = Marks::from_str("32547").unwrap();
        let required = required_tickets(&marks).unwrap();
        assert_eq!(vec!["235", "234", "237", "345", "357"], ids(&required));

        let distinct: HashSet<_> = required.iter().collect();
        assert_eq!(REQUIRED_TICKETS, distinct.len());

        let candidates = build(&marks).unwrap();
        let used: HashSet<_> = candidates
            .iter()
            .flat_map(|candidate| candidate.tickets.iter())
            .collect();
        assert_eq!(distinct, used);
    }

    #[test]
    fn degenerate_marks() {
        let marks = Marks {
            primary: 1,
            secondary: 2,
            tertiary: 3,
            quaternary: 2,
            outsider: 5,
        };
        let err = build(&marks).unwrap_err();
        assert_eq!([Mark::Primary, Mark::Secondary, Mark::Quaternary], err.legs);
        assert_eq!(
            "marks 12325 yield a degenerate ticket Primary-Secondary-Quaternary",
            err.to_string()
        );
        assert!(required_tickets(&marks).is_err());
    }

    #[test]
    fn candidate_display() {
        let marks = Marks::from_str("32547").unwrap();
        assert_eq!("A: 235 + 234 + 345", build(&marks).unwrap()[0].to_string());
    }
}
