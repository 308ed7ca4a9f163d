//! The decision engine. Candidates are evaluated strictly in priority order and the first one
//! that is both fully priced and affordable is purchased. Candidates passed over on the way are
//! recorded in a trail of [Rejection]s; those after the purchased candidate are never evaluated.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumCount;
use tracing::debug;

use crate::candidate::{self, Candidate, CandidateConstructionError, Label};
use crate::marks::{InvalidMarksKind, Marks};
use crate::odds::{Odds, OddsTable};
use crate::stake::{self, Budget};
use crate::ticket::{Ticket, TICKET_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Decision {
    #[serde(rename = "OK")]
    Purchase(Purchase),

    #[serde(rename = "SKIP")]
    Skip { trail: Vec<Rejection>, marks: Marks },

    #[serde(rename = "ERR")]
    Invalid {
        reason: InvalidMarksKind,
        message: String,
    },
}
impl Decision {
    pub fn status(&self) -> &'static str {
        match self {
            Decision::Purchase(_) => "OK",
            Decision::Skip { .. } => "SKIP",
            Decision::Invalid { .. } => "ERR",
        }
    }

    pub fn trail(&self) -> &[Rejection] {
        match self {
            Decision::Purchase(purchase) => &purchase.trail,
            Decision::Skip { trail, .. } => trail,
            Decision::Invalid { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub label: Label,
    pub tickets: [Ticket; TICKET_SIZE],
    pub odds: [Odds; TICKET_SIZE],
    pub stakes: [u64; TICKET_SIZE],
    pub returns: [f64; TICKET_SIZE],
    pub total_stake: u64,
    pub min_return: f64,
    pub trail: Vec<Rejection>,
    pub marks: Marks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub label: Label,
    pub tickets: [Ticket; TICKET_SIZE],
    #[serde(flatten)]
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum RejectReason {
    /// One or more tickets are not priced.
    #[serde(rename = "NO_ODDS")]
    NoOdds { missing: Vec<Ticket> },

    /// The minimum stakes exceed the budget.
    #[serde(rename = "NG")]
    Unaffordable {
        needs: [u64; TICKET_SIZE],
        needs_sum: u64,
    },
}

/// Parses the marks `code` and evaluates its candidates. An invalid code is an ordinary
/// [Decision::Invalid] outcome; the error case is reserved for internal faults.
pub fn decide(code: &str, odds: &OddsTable, budget: &Budget) -> Result<Decision, CandidateConstructionError> {
    match Marks::from_str(code) {
        Ok(marks) => evaluate(&marks, odds, budget),
        Err(err) => {
            debug!("rejecting marks code: {err}");
            Ok(Decision::Invalid {
                reason: err.kind(),
                message: err.to_string(),
            })
        }
    }
}

pub fn evaluate(marks: &Marks, odds: &OddsTable, budget: &Budget) -> Result<Decision, CandidateConstructionError> {
    let candidates = candidate::build(marks)?;
    Ok(select(marks, candidates, odds, budget))
}

/// Selects from `candidates` already built for `marks`, which must be in priority order.
pub fn select(
    marks: &Marks,
    candidates: [Candidate; Label::COUNT],
    odds: &OddsTable,
    budget: &Budget,
) -> Decision {
    let mut trail = Vec::with_capacity(candidates.len());
    for Candidate { label, tickets } in candidates {
        let [Some(first), Some(second), Some(third)] = tickets.map(|ticket| odds.get(&ticket)) else {
            let missing: Vec<_> = tickets
                .into_iter()
                .filter(|ticket| !odds.contains(ticket))
                .collect();
            debug!("candidate {label}: missing odds for {missing:?}");
            trail.push(Rejection {
                label,
                tickets,
                reason: RejectReason::NoOdds { missing },
            });
            continue;
        };
        let quoted = [first, second, third];
        match stake::allocate(&quoted, budget) {
            Ok(allocation) => {
                debug!("candidate {label}: purchasing with stakes {:?}", allocation.stakes);
                return Decision::Purchase(Purchase {
                    label,
                    tickets,
                    odds: quoted,
                    total_stake: allocation.total_stake(),
                    min_return: allocation.min_return(),
                    stakes: allocation.stakes,
                    returns: allocation.returns,
                    trail,
                    marks: *marks,
                });
            }
            Err(shortfall) => {
                debug!("candidate {label}: {shortfall}");
                trail.push(Rejection {
                    label,
                    tickets,
                    reason: RejectReason::Unaffordable {
                        needs: shortfall.needs,
                        needs_sum: shortfall.needs_sum,
                    },
                });
            }
        }
    }
    Decision::Skip {
        trail,
        marks: *marks,
    }
}
