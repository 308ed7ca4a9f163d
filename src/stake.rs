//! Stake sizing. Each ticket is first staked to the smallest whole number of purchase units that
//! returns the target; any budget left over is then handed out one unit at a time to whichever
//! ticket currently has the lowest return, lifting the worst case.

use std::array;

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::odds::{Odds, Payout};
use crate::ticket::TICKET_SIZE;

/// Validated staking parameters. Every field is positive, which is enforced on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Budget {
    total: u64,
    unit: u64,
    target_return: u64,
}
impl Budget {
    pub const DEFAULT_TOTAL: u64 = 1_000;
    pub const DEFAULT_UNIT: u64 = 100;
    pub const DEFAULT_TARGET_RETURN: u64 = 2_500;

    pub fn new(total: u64, unit: u64, target_return: u64) -> Result<Self, InvalidBudget> {
        if total == 0 {
            return Err(InvalidBudget::ZeroTotal);
        }
        if unit == 0 {
            return Err(InvalidBudget::ZeroUnit);
        }
        if target_return == 0 {
            return Err(InvalidBudget::ZeroTargetReturn);
        }
        Ok(Self {
            total,
            unit,
            target_return,
        })
    }

    /// The most that may be staked across all tickets.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The smallest purchasable increment; every stake is a multiple of it.
    pub fn unit(&self) -> u64 {
        self.unit
    }

    /// The return that every ticket must meet or exceed.
    pub fn target_return(&self) -> u64 {
        self.target_return
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            total: Self::DEFAULT_TOTAL,
            unit: Self::DEFAULT_UNIT,
            target_return: Self::DEFAULT_TARGET_RETURN,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidBudget {
    #[error("total budget must be positive")]
    ZeroTotal,

    #[error("purchase unit must be positive")]
    ZeroUnit,

    #[error("target return must be positive")]
    ZeroTargetReturn,
}

/// The smallest multiple of `unit` (but at least one `unit`) that, staked at `odds`, returns no
/// less than `target_return`. The comparison is made against the exact value of `odds`, so the
/// stake is never short of the target. `None` if no such stake fits in a `u64`.
pub fn min_stake(odds: Odds, target_return: u64, unit: u64) -> Option<u64> {
    let target = Payout::from(target_return);
    let covers = |units: u64| units.checked_mul(unit).map(|stake| odds.payout(stake) >= target);

    // the floating-point estimate is within a unit or two; saturates on overflow
    let estimate = (target_return as f64 / (odds.decimal() * unit as f64)).ceil();
    let mut units = (estimate as u64).max(1);
    while !covers(units)? {
        units = units.checked_add(1)?;
    }
    while units > 1 && covers(units - 1)? {
        units -= 1;
    }
    units.checked_mul(unit)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub stakes: [u64; TICKET_SIZE],
    pub returns: [f64; TICKET_SIZE],
}
impl Allocation {
    pub fn total_stake(&self) -> u64 {
        self.stakes.iter().sum()
    }

    pub fn min_return(&self) -> f64 {
        self.returns.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// The minimum stakes of an unaffordable allocation. A stake too large to represent is reported
/// as `u64::MAX`, as is a sum that overflows.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("minimum stakes {needs:?} sum to {needs_sum}, exceeding the budget of {total}")]
pub struct Shortfall {
    pub needs: [u64; TICKET_SIZE],
    pub needs_sum: u64,
    pub total: u64,
}

pub fn allocate(odds: &[Odds; TICKET_SIZE], budget: &Budget) -> Result<Allocation, Shortfall> {
    let mut stakes = odds.map(|odds| min_stake(odds, budget.target_return, budget.unit).unwrap_or(u64::MAX));
    let needs_sum = stakes
        .iter()
        .try_fold(0u64, |sum, &stake| sum.checked_add(stake));
    let needs_sum = match needs_sum {
        Some(needs_sum) if needs_sum <= budget.total => needs_sum,
        _ => {
            return Err(Shortfall {
                needs: stakes,
                needs_sum: needs_sum.unwrap_or(u64::MAX),
                total: budget.total,
            })
        }
    };

    let mut payouts: [Payout; TICKET_SIZE] = array::from_fn(|index| odds[index].payout(stakes[index]));
    let mut remaining = budget.total - needs_sum;
    while remaining >= budget.unit {
        let weakest = weakest(&payouts);
        stakes[weakest] += budget.unit;
        payouts[weakest] = odds[weakest].payout(stakes[weakest]);
        remaining -= budget.unit;
        trace!("topped up ticket {weakest}: stakes: {stakes:?}, remaining: {remaining}");
    }

    Ok(Allocation {
        stakes,
        returns: array::from_fn(|index| odds[index].payout_f64(stakes[index])),
    })
}

/// Index of the smallest payout; ties go to the earliest ticket.
fn weakest(payouts: &[Payout; TICKET_SIZE]) -> usize {
    let mut weakest = 0;
    for (index, payout) in payouts.iter().enumerate().skip(1) {
        if *payout < payouts[weakest] {
            weakest = index;
        }
    }
    weakest
}
