//! Mark-priority box trio selection for a single keirin race. Given a tipster's five marks, the
//! odds of the relevant trio tickets, and a budget, picks the first of four candidate three-ticket
//! sets that can guarantee a target return on every ticket, and spreads any surplus budget to lift
//! the worst-case return.

pub mod candidate;
pub mod decision;
pub mod display;
pub mod file;
pub mod marks;
pub mod odds;
pub mod payload;
pub mod print;
pub mod stake;
pub mod ticket;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
